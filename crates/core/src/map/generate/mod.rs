pub mod decoration;
pub mod noise;
mod scenery;

use crate::{
    map::{generate::decoration::DecorationPlacer, height::HeightField},
    mesh::{primitive::Frustum, GeometrySink},
    timed, Decoration, MapConfig, TileRecord,
};
use anyhow::Context;
use log::{debug, info, trace};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use validator::Validate;

/// A container for generating a new map. Generation is a single pass over the
/// map's coordinates, in layout order: each tile gets a height, a tier, its
/// geometry and its decorations before moving on to the next one. Scenery
/// comes last.
///
/// Geometry goes straight into the sink as it's generated. The sink is owned
/// by the builder for the duration of the pass, then handed back in the
/// [GeneratedMap].
pub struct MapBuilder<'a, S: GeometrySink> {
    /// This config deterministically controls generation, meaning two maps
    /// with the same config (and height field) will always be identical.
    config: &'a MapConfig,
    height_field: &'a dyn HeightField,
    placer: DecorationPlacer,
    /// RNG provider for decorations and scenery
    rng: Pcg64,
    sink: S,
}

/// Everything produced by a [MapBuilder]
#[derive(Clone, Debug)]
pub struct GeneratedMap<S> {
    /// Every tile that exists in the map, in generation order
    pub tiles: Vec<TileRecord>,
    /// Rocks and trees in generation order, followed by clouds
    pub decorations: Vec<Decoration>,
    pub water: Option<Frustum>,
    /// The sink that received all the geometry
    pub sink: S,
}

impl<'a, S: GeometrySink> MapBuilder<'a, S> {
    /// Create a new builder. Returns an error if the config is invalid, since
    /// generation can't recover from bad probabilities or ranges midway.
    pub fn new(
        config: &'a MapConfig,
        height_field: &'a dyn HeightField,
        sink: S,
    ) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        Ok(Self {
            config,
            height_field,
            placer: DecorationPlacer::new(config.decoration.clone()),
            rng: Pcg64::seed_from_u64(config.seed.to_u64()),
            sink,
        })
    }

    /// Generate the map, consuming the builder
    pub fn generate(mut self) -> GeneratedMap<S> {
        let (tiles, mut decorations) =
            timed!("Tile generation", self.generate_tiles());
        let water = timed!("Scenery generation", {
            let water = scenery::water(self.config);
            if let Some(water) = &water {
                self.sink.add_water(water);
            }
            let clouds =
                scenery::clouds(&self.config.scenery.clouds, &mut self.rng);
            for cloud in clouds {
                self.sink.add_decoration(&cloud);
                decorations.push(cloud);
            }
            water
        });

        info!(
            "Generated {} tiles and {} decorations",
            tiles.len(),
            decorations.len()
        );
        GeneratedMap {
            tiles,
            decorations,
            water,
            sink: self.sink,
        }
    }

    fn generate_tiles(&mut self) -> (Vec<TileRecord>, Vec<Decoration>) {
        let config = self.config;
        let layout = &config.layout;
        let thresholds = &config.height.thresholds;
        let max_height = config.height.max_height;

        let mut tiles = Vec::with_capacity(layout.tile_capacity(config.radius));
        let mut decorations = Vec::new();
        let mut skipped = 0;

        for (coord, position) in layout.tiles(config.radius) {
            let height = match self.height_field.height_at(coord) {
                Some(height) => height,
                None => {
                    trace!("No height for tile {}, skipping", coord);
                    skipped += 1;
                    continue;
                }
            };
            let tier = match thresholds.classify(height, max_height) {
                Some(tier) => tier,
                None => {
                    trace!(
                        "Tile {} at height {} is below every tier, skipping",
                        coord,
                        height
                    );
                    skipped += 1;
                    continue;
                }
            };

            self.sink.add_hex_prism(tier, height, position);
            tiles.push(TileRecord {
                coord,
                position,
                height,
                tier,
            });

            for decoration in
                self.placer.place(tier, height, position, &mut self.rng)
            {
                self.sink.add_decoration(&decoration);
                decorations.push(decoration);
            }
        }

        debug!(
            "Kept {} tiles, skipped {} without a height or tier",
            tiles.len(),
            skipped
        );
        (tiles, decorations)
    }
}
