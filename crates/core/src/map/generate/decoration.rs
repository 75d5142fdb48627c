use crate::{
    config::DecorationConfig,
    mesh::{
        primitive::{Frustum, Sphere},
        MeshLayer, Triangle,
    },
    DecorationPass, PlanarPosition, Point3, TerrainTier,
};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A prop placed on top of a tile (rocks, trees) or floating over the map
/// (clouds). Decorations are purely cosmetic: they don't affect tiles or each
/// other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decoration {
    /// A single sphere resting on a tile's top face
    Rock(Sphere),
    /// Cones stacked on a tile's center, bottom to top
    Tree { layers: Vec<Frustum> },
    /// A cluster of spheres
    Cloud { puffs: Vec<Sphere> },
}

impl Decoration {
    /// The mesh layer this decoration belongs to. Rocks and trees share the
    /// materials of stone and grass.
    pub fn layer(&self) -> MeshLayer {
        match self {
            Self::Rock(_) => MeshLayer::Tier(TerrainTier::Stone),
            Self::Tree { .. } => MeshLayer::Tier(TerrainTier::Grass),
            Self::Cloud { .. } => MeshLayer::Clouds,
        }
    }

    pub fn triangles(&self) -> Vec<Triangle> {
        match self {
            Self::Rock(sphere) => sphere.triangles(),
            Self::Tree { layers } => {
                layers.iter().flat_map(Frustum::triangles).collect()
            }
            Self::Cloud { puffs } => {
                puffs.iter().flat_map(Sphere::triangles).collect()
            }
        }
    }
}

/// Randomly places rocks and trees on tiles, according to their tier.
#[derive(Clone, Debug)]
pub struct DecorationPlacer {
    config: DecorationConfig,
}

impl DecorationPlacer {
    /// Radial segments in each tree cone
    pub const TREE_SEGMENTS: u32 = 3;

    /// Create a placer. The config should already be validated, since
    /// probabilities outside `[0, 1]` or inverted ranges can't be sampled.
    pub fn new(config: DecorationConfig) -> Self {
        Self { config }
    }

    /// Roll for decorations on a single tile. Rock tiers get zero, one or two
    /// rocks (two independent rolls), grass gets zero or one tree, and dirt
    /// never gets anything.
    ///
    /// Every random number comes from `rng`, in a fixed order, so the same
    /// RNG state always gives the same decorations.
    pub fn place<R: Rng + ?Sized>(
        &self,
        tier: TerrainTier,
        height: f64,
        position: PlanarPosition,
        rng: &mut R,
    ) -> Vec<Decoration> {
        let mut decorations = Vec::new();
        match tier.decoration_pass() {
            Some(DecorationPass::Rocks) => {
                if rng.gen_bool(self.config.rock_probability) {
                    decorations.push(self.rock(height, position, rng));
                }
                if rng.gen_bool(self.config.second_rock_probability) {
                    decorations.push(self.rock(height, position, rng));
                }
            }
            Some(DecorationPass::Trees) => {
                if rng.gen_bool(self.config.tree_probability) {
                    decorations.push(self.tree(height, position, rng));
                }
            }
            None => {}
        }

        if !decorations.is_empty() {
            trace!(
                "Placed {} decoration(s) on {} tile at {}",
                decorations.len(),
                tier,
                position
            );
        }
        decorations
    }

    fn rock<R: Rng + ?Sized>(
        &self,
        height: f64,
        position: PlanarPosition,
        rng: &mut R,
    ) -> Decoration {
        let jitter_x = rng.gen_range(self.config.rock_jitter);
        let jitter_z = rng.gen_range(self.config.rock_jitter);
        let radius = rng.gen_range(self.config.rock_radius);
        Decoration::Rock(Sphere {
            center: Point3::new(
                position.x + jitter_x,
                height,
                position.z + jitter_z,
            ),
            radius,
        })
    }

    fn tree<R: Rng + ?Sized>(
        &self,
        height: f64,
        position: PlanarPosition,
        rng: &mut R,
    ) -> Decoration {
        // All layers share one height
        let tree_height = rng.gen_range(self.config.tree_height);
        let base = height + self.config.tree_base_offset;
        let layers = self
            .config
            .tree_layers
            .iter()
            .map(|layer| Frustum {
                center: Point3::new(
                    position.x,
                    base + layer.offset * tree_height,
                    position.z,
                ),
                top_radius: 0.0,
                bottom_radius: layer.radius,
                height: tree_height,
                segments: Self::TREE_SEGMENTS,
            })
            .collect();
        Decoration::Tree { layers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use strum::IntoEnumIterator;

    fn placer(
        rock_probability: f64,
        second_rock_probability: f64,
        tree_probability: f64,
    ) -> DecorationPlacer {
        DecorationPlacer::new(DecorationConfig {
            rock_probability,
            second_rock_probability,
            tree_probability,
            ..Default::default()
        })
    }

    #[test]
    fn test_rocks() {
        let placer = placer(1.0, 1.0, 1.0);
        let mut rng = Pcg64::seed_from_u64(1);
        let position = PlanarPosition::new(10.0, -5.0);

        for &tier in &[TerrainTier::Stone, TerrainTier::Sand] {
            let decorations = placer.place(tier, 3.0, position, &mut rng);
            assert_eq!(decorations.len(), 2);
            for decoration in &decorations {
                match decoration {
                    Decoration::Rock(Sphere { center, radius }) => {
                        assert_approx_eq!(center.y, 3.0);
                        assert!(center.x >= 10.0 && center.x <= 10.4);
                        assert!(center.z >= -5.0 && center.z <= -4.6);
                        assert!(*radius >= 0.1 && *radius <= 0.4);
                    }
                    other => panic!("Expected rock, got {:?}", other),
                }
            }
        }
    }

    #[test]
    fn test_second_rock_independent() {
        // The second roll doesn't depend on the first one succeeding
        let placer = placer(0.0, 1.0, 0.0);
        let mut rng = Pcg64::seed_from_u64(2);
        let decorations = placer.place(
            TerrainTier::ShallowDirt,
            0.5,
            PlanarPosition::default(),
            &mut rng,
        );
        assert_eq!(decorations.len(), 1);
    }

    #[test]
    fn test_tree() {
        let placer = placer(1.0, 1.0, 1.0);
        let mut rng = Pcg64::seed_from_u64(3);
        let position = PlanarPosition::new(1.0, 2.0);
        let decorations =
            placer.place(TerrainTier::Grass, 6.0, position, &mut rng);
        assert_eq!(decorations.len(), 1);

        let layers = match &decorations[0] {
            Decoration::Tree { layers } => layers,
            other => panic!("Expected tree, got {:?}", other),
        };
        assert_eq!(layers.len(), 3);
        let tree_height = layers[0].height;
        assert!(tree_height >= 1.25 && tree_height <= 2.25);

        let expected = [(1.5, 0.0), (1.15, 0.6), (0.8, 1.25)];
        for (layer, (radius, offset)) in layers.iter().zip(&expected) {
            assert_approx_eq!(layer.bottom_radius, *radius);
            assert_approx_eq!(layer.top_radius, 0.0);
            assert_approx_eq!(layer.height, tree_height);
            assert_approx_eq!(layer.center.y, 7.0 + offset * tree_height);
            assert_approx_eq!(layer.center.x, 1.0);
            assert_approx_eq!(layer.center.z, 2.0);
            assert_eq!(layer.segments, 3);
        }
        assert_eq!(decorations[0].layer(), MeshLayer::Tier(TerrainTier::Grass));
        assert_eq!(decorations[0].triangles().len(), 18);
    }

    #[test]
    fn test_dirt_undecorated() {
        let placer = placer(1.0, 1.0, 1.0);
        let mut rng = Pcg64::seed_from_u64(4);
        let decorations = placer.place(
            TerrainTier::Dirt,
            7.5,
            PlanarPosition::default(),
            &mut rng,
        );
        assert!(decorations.is_empty());
    }

    #[test]
    fn test_never() {
        let placer = placer(0.0, 0.0, 0.0);
        let mut rng = Pcg64::seed_from_u64(5);
        for tier in TerrainTier::iter() {
            assert!(placer
                .place(tier, 5.0, PlanarPosition::default(), &mut rng)
                .is_empty());
        }
    }

    #[test]
    fn test_deterministic() {
        let placer = placer(0.5, 0.5, 0.5);
        let run = |seed| {
            let mut rng = Pcg64::seed_from_u64(seed);
            (0..50)
                .flat_map(|i| {
                    placer.place(
                        TerrainTier::Stone,
                        9.0,
                        PlanarPosition::new(f64::from(i), 0.0),
                        &mut rng,
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(6), run(6));
    }

    #[test]
    fn test_serialize() {
        let rock = Decoration::Rock(Sphere {
            center: Point3::new(1.0, 2.0, 3.0),
            radius: 0.25,
        });
        assert_eq!(
            serde_json::to_string(&rock).unwrap(),
            r#"{"kind":"rock","center":{"x":1.0,"y":2.0,"z":3.0},"radius":0.25}"#
        );
    }
}
