mod generate;
mod height;
mod layout;
mod tier;
mod tile;

pub use self::{
    generate::{
        decoration::{Decoration, DecorationPlacer},
        GeneratedMap, MapBuilder,
    },
    height::{HeightField, NoiseHeightField, TableHeightField},
    layout::{tile_to_position, AxialCoord, PlanarPosition},
    tier::{classify, DecorationPass, TerrainTier},
    tile::TileRecord,
};

use crate::{
    mesh::{primitive::Frustum, GeometrySink, TierMeshes},
    timed, MapConfig, Seed,
};
use anyhow::Context;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Mixed into the map seed before deriving the noise seed, so the noise
/// function and the generation RNG don't start from the same state
const NOISE_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Everything that has to be loaded before a map can be generated. Loading
/// is the only part of the process that touches the outside world (and so
/// the only part that can fail for reasons other than bad config).
///
/// Resources are derived from a config, and should be used to generate maps
/// from that same config.
#[derive(Debug)]
pub struct MapResources {
    height_field: Box<dyn HeightField>,
}

impl MapResources {
    /// Load resources for the given config. If the config has a height table,
    /// it's loaded here (from disk if necessary). Otherwise, the noise
    /// function is initialized from the config's seed.
    pub fn load(config: &MapConfig) -> anyhow::Result<Self> {
        let height_field: Box<dyn HeightField> = match &config.height.table {
            Some(source) => Box::new(
                TableHeightField::from_source(source, config.radius)
                    .context("error loading height table")?,
            ),
            None => Box::new(NoiseHeightField::new(
                &config.height,
                noise_seed(&config.seed),
            )),
        };
        debug!("Loaded resources: {:?}", height_field);
        Ok(Self { height_field })
    }

    /// Use a custom source of heights, instead of whatever the config says
    pub fn with_height_field(height_field: impl HeightField + 'static) -> Self {
        Self {
            height_field: Box::new(height_field),
        }
    }

    pub fn height_field(&self) -> &dyn HeightField {
        self.height_field.as_ref()
    }
}

/// Derive the seed for the height noise function from the map seed
fn noise_seed(seed: &Seed) -> u32 {
    Pcg64::seed_from_u64(seed.to_u64() ^ NOISE_SEED_SALT).gen()
}

/// A fully generated map. Contains the tiles and decorations, the meshes
/// built from them, and the configuration that was used to generate it all.
///
/// ## Serialization
/// Maps can be serialized to JSON via [HexMap::to_json] and loaded back via
/// [HexMap::from_json]. Meshes aren't included in the JSON, since they can be
/// rebuilt from the tiles and decorations. All fields and values use snake
/// casing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HexMap {
    /// The config used to generate this map. Generation is deterministic
    /// based on the config, and once the map has been generated, the config
    /// can never change.
    config: MapConfig,

    /// Every tile in the map, in generation order
    tiles: Vec<TileRecord>,

    decorations: Vec<Decoration>,

    water: Option<Frustum>,

    #[serde(skip)]
    meshes: TierMeshes,
}

impl HexMap {
    /// Generate a new map with the given config and pre-loaded resources.
    /// Returns an error if the config is invalid. Panics only in the case of
    /// internal bugs in the generation algorithm.
    pub fn generate(
        config: MapConfig,
        resources: &MapResources,
    ) -> anyhow::Result<Self> {
        debug!("Generating map with config {:#?}", config);

        let generated = timed!(
            "Map generation",
            log::Level::Info,
            MapBuilder::new(
                &config,
                resources.height_field(),
                TierMeshes::new()
            )?
            .generate()
        );

        Ok(Self {
            config,
            tiles: generated.tiles,
            decorations: generated.decorations,
            water: generated.water,
            meshes: generated.sink,
        })
    }

    /// Get a reference to the config that defines this map
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Every tile in the map, in the order they were generated
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    /// Look up a single tile by its coordinate. `None` if the coordinate is
    /// outside the map, or was skipped during generation.
    pub fn tile(&self, coord: AxialCoord) -> Option<&TileRecord> {
        self.tiles.iter().find(|tile| tile.coord() == coord)
    }

    /// All decorations: rocks and trees in generation order, then clouds
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    /// The water cylinder, if the config enabled it
    pub fn water(&self) -> Option<&Frustum> {
        self.water.as_ref()
    }

    /// Geometry for the whole map, grouped by layer
    pub fn meshes(&self) -> &TierMeshes {
        &self.meshes
    }

    /// Serialize this map into JSON. This is a recoverable format, which can
    /// be loaded back into a [HexMap] with [HexMap::from_json].
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("error serializing map")
    }

    /// Deserialize a map from JSON, then rebuild its meshes. A map can be
    /// serialized into JSON with [HexMap::to_json]. Will fail if the input is
    /// malformed, or if the config it carries is invalid.
    ///
    /// The rebuilt meshes contain the same triangles as the original ones,
    /// but within a layer, tiles come before decorations rather than being
    /// interleaved with them.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut map: Self =
            serde_json::from_str(json).context("error deserializing map")?;
        map.config.validate().context("invalid config")?;
        map.meshes = timed!("Mesh rebuild", map.build_meshes());
        info!("Loaded map with {} tiles", map.tiles.len());
        Ok(map)
    }

    fn build_meshes(&self) -> TierMeshes {
        let mut meshes = TierMeshes::new();
        for tile in &self.tiles {
            meshes.add_hex_prism(tile.tier(), tile.height(), tile.position());
        }
        for decoration in &self.decorations {
            meshes.add_decoration(decoration);
        }
        if let Some(water) = &self.water {
            meshes.add_water(water);
        }
        meshes
    }
}
