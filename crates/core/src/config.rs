mod seed;

pub use self::seed::Seed;

use crate::{util::range::NumRange, TerrainTier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Configuration that defines a map generation process. Two maps generated
/// with the same config (and the same resources) will always be identical.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapConfig {
    /// RNG seed for all randomized processes during generation. See [Seed]
    /// for the accepted input formats.
    pub seed: Seed,

    /// Half-width of the square coordinate domain that gets iterated. Both
    /// `col` and `row` run over `[-radius, radius]`, then the boundary test
    /// in [LayoutConfig::boundary] trims that square down to a disc. Zero
    /// yields a single tile, negative values yield an empty map.
    pub radius: i32,

    /// Config for converting tile coordinates to world positions
    #[validate]
    pub layout: LayoutConfig,

    /// Config for tile heights and how they map to terrain tiers
    #[validate]
    pub height: HeightConfig,

    /// Config for rocks and trees scattered on top of tiles
    #[validate]
    pub decoration: DecorationConfig,

    /// Config for map-wide extras: water and clouds
    #[validate]
    pub scenery: SceneryConfig,
}

/// Spacing and boundary of the hex grid. The default spacing fits hexagons
/// with a circumradius of 1, pointy side along the z axis, edge to edge.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance along x between the centers of two neighbors in the same row.
    /// Odd rows are shifted by half of this.
    #[validate(range(min = 0.001), custom = "validate_finite")]
    pub horizontal_spacing: f64,

    /// Distance along z between two consecutive rows.
    #[validate(range(min = 0.001), custom = "validate_finite")]
    pub vertical_spacing: f64,

    /// Maximum distance from the world origin at which a tile still exists.
    pub boundary: BoundaryRadius,
}

/// How the boundary radius is derived from [MapConfig::radius]. A tile is
/// kept iff the length of its planar position is at most this radius. The
/// right value depends on the look you want; the variants cover the formulas
/// that have proven useful.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryRadius {
    /// Use the map radius directly, in world units. Produces a disc that is
    /// noticeably smaller than the iterated square.
    MapRadius,
    /// `radius * factor + offset`. With `factor` set to the horizontal
    /// spacing, this keeps roughly `radius` tiles from the center to the edge.
    Scaled { factor: f64, offset: f64 },
    /// `radius + padding`
    Padded { padding: f64 },
    /// A constant, regardless of the map radius
    Fixed { radius: f64 },
}

/// Where tile heights come from and how they're banded into tiers.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HeightConfig {
    /// Height that the tier thresholds are fractions of. Noise heights are
    /// scaled to `[0, max_height]`; table heights are used as-is.
    #[validate(range(min = 0.0), custom = "validate_finite")]
    pub max_height: f64,

    /// Threshold fractions for each tier
    #[validate]
    pub thresholds: TierThresholds,

    /// Config for the noise function. Used whenever `table` is unset.
    #[validate]
    pub noise: NoiseFnConfig,

    /// A hand-authored height table. If present, it replaces the noise
    /// function entirely.
    pub table: Option<HeightTableSource>,
}

/// Fractions of [HeightConfig::max_height] that a height must exceed to land
/// in each tier. Tiers are checked top-down, so each threshold must be at or
/// below the one before it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_thresholds"))]
pub struct TierThresholds {
    pub stone: f64,
    pub dirt: f64,
    pub grass: f64,
    pub sand: f64,
    /// Unlike the others, this one is an inclusive floor: heights exactly on
    /// it still count as shallow dirt. Anything below is excluded.
    pub shallow_dirt: f64,
}

/// A source of pre-authored heights. Rows are indexed by `row + radius` and
/// columns by `col + radius`, so the table's top-left cell is the tile at
/// `(-radius, -radius)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightTableSource {
    /// Heights given directly in the config
    Inline(Vec<Vec<f64>>),
    /// Path to a JSON file holding an array of rows, loaded before generation
    File(PathBuf),
}

/// Config for a noise generation function. We use
/// [noise](https://crates.io/crates/noise) for noise generation.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NoiseFnConfig {
    pub noise_type: NoiseFnType,

    /// Scale applied to tile coordinates before sampling. Lower values give
    /// smoother, larger features.
    #[validate(range(min = 0.0), custom = "validate_finite")]
    pub frequency: f64,

    /// Number of layered frequencies. Ignored by [NoiseFnType::Simplex].
    #[validate(range(min = 1, max = 32))]
    pub octaves: usize,

    /// Frequency multiplier between successive octaves. Ignored by
    /// [NoiseFnType::Simplex].
    pub lacunarity: f64,

    /// Amplitude multiplier between successive octaves. Ignored by
    /// [NoiseFnType::Simplex].
    pub persistence: f64,

    /// Exponent applied to the noise after it's normalized to [0,1]. Values
    /// above 1 bias towards lowland, below 1 towards peaks.
    #[validate(range(min = 0.0), custom = "validate_finite")]
    pub exponent: f64,
}

/// The supported noise functions. All of them are seedable 2D functions,
/// with everything but [Self::Simplex] being multi-fractal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseFnType {
    Simplex,
    BasicMulti,
    Billow,
    Fbm,
    HybridMulti,
    RidgedMulti,
}

/// Probabilities and dimensions for decorations. Every probability is per
/// tile and independent of every other draw.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DecorationConfig {
    /// Chance of a rock on a stone, sand or shallow dirt tile
    #[validate(custom = "validate_probability")]
    pub rock_probability: f64,

    /// Chance of an additional rock on the same tiles, drawn separately from
    /// the first
    #[validate(custom = "validate_probability")]
    pub second_rock_probability: f64,

    /// Horizontal offset of a rock from the tile center, drawn separately for
    /// x and z
    #[validate(custom = "validate_num_range")]
    pub rock_jitter: NumRange<f64>,

    /// Rock sphere radius
    #[validate(custom = "validate_num_range")]
    pub rock_radius: NumRange<f64>,

    /// Chance of a tree on a grass tile
    #[validate(custom = "validate_probability")]
    pub tree_probability: f64,

    /// Height of each cone in a tree. All layers of one tree share a height.
    #[validate(custom = "validate_num_range")]
    pub tree_height: NumRange<f64>,

    /// Gap between the tile's top and the center of the lowest tree layer
    #[validate(custom = "validate_finite")]
    pub tree_base_offset: f64,

    /// Cones that make up a tree, bottom to top
    pub tree_layers: Vec<TreeLayerConfig>,
}

/// One cone of a tree
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeLayerConfig {
    /// Radius at the base of the cone
    pub radius: f64,
    /// Vertical offset of this cone's center, as a multiple of the tree height
    pub offset: f64,
}

/// Map-wide extras that don't belong to any single tile.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SceneryConfig {
    /// Add a water cylinder spanning the whole map?
    pub water: bool,

    /// Height of the water cylinder, as a fraction of the max tile height.
    /// The cylinder sits on `y = 0`.
    #[validate(range(min = 0.0), custom = "validate_finite")]
    pub water_height_fraction: f64,

    #[validate]
    pub clouds: CloudConfig,
}

/// Config for cloud clusters drifting over the map.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CloudConfig {
    /// Upper bound on the number of clouds. The actual count is
    /// `floor(u^count_exponent * max_count)` for a uniform `u` in [0,1).
    pub max_count: u32,

    #[validate(range(min = 0.0), custom = "validate_finite")]
    pub count_exponent: f64,

    /// Range for the x and z of each cloud's center
    #[validate(custom = "validate_num_range")]
    pub spread: NumRange<f64>,

    /// Range for the y of each cloud's center
    #[validate(custom = "validate_num_range")]
    pub altitude: NumRange<f64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Danger! This means the default will vary between calls!
            seed: Seed::default(),
            radius: 15,
            layout: LayoutConfig::default(),
            height: HeightConfig::default(),
            decoration: DecorationConfig::default(),
            scenery: SceneryConfig::default(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 1.77,
            vertical_spacing: 1.535,
            boundary: BoundaryRadius::MapRadius,
        }
    }
}

impl Default for HeightConfig {
    fn default() -> Self {
        Self {
            max_height: 10.0,
            thresholds: TierThresholds::default(),
            noise: NoiseFnConfig::default(),
            table: None,
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            stone: 0.8,
            dirt: 0.7,
            grass: 0.5,
            sand: 0.3,
            shallow_dirt: 0.0,
        }
    }
}

impl Default for NoiseFnConfig {
    fn default() -> Self {
        Self {
            noise_type: NoiseFnType::Simplex,
            frequency: 0.1,
            octaves: 1,
            lacunarity: 2.0,
            persistence: 0.5,
            exponent: 1.5,
        }
    }
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            rock_probability: 0.2,
            second_rock_probability: 0.1,
            rock_jitter: NumRange::new(0.0, 0.4),
            rock_radius: NumRange::new(0.1, 0.4),
            tree_probability: 0.2,
            tree_height: NumRange::new(1.25, 2.25),
            tree_base_offset: 1.0,
            tree_layers: vec![
                TreeLayerConfig {
                    radius: 1.5,
                    offset: 0.0,
                },
                TreeLayerConfig {
                    radius: 1.15,
                    offset: 0.6,
                },
                TreeLayerConfig {
                    radius: 0.8,
                    offset: 1.25,
                },
            ],
        }
    }
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            water: true,
            water_height_fraction: 0.2,
            clouds: CloudConfig::default(),
        }
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            max_count: 4,
            count_exponent: 0.45,
            spread: NumRange::new(-10.0, 10.0),
            altitude: NumRange::new(7.0, 14.0),
        }
    }
}

impl BoundaryRadius {
    /// Compute the boundary radius, in world units, for a map of the given
    /// radius.
    pub fn resolve(self, map_radius: i32) -> f64 {
        let map_radius = f64::from(map_radius);
        match self {
            Self::MapRadius => map_radius,
            Self::Scaled { factor, offset } => map_radius * factor + offset,
            Self::Padded { padding } => map_radius + padding,
            Self::Fixed { radius } => radius,
        }
    }
}

impl TierThresholds {
    /// Get the threshold fraction for a single tier
    pub fn fraction(&self, tier: TerrainTier) -> f64 {
        match tier {
            TerrainTier::Stone => self.stone,
            TerrainTier::Dirt => self.dirt,
            TerrainTier::Grass => self.grass,
            TerrainTier::Sand => self.sand,
            TerrainTier::ShallowDirt => self.shallow_dirt,
        }
    }
}

fn validate_thresholds(
    thresholds: &TierThresholds,
) -> Result<(), ValidationError> {
    let fractions = [
        thresholds.stone,
        thresholds.dirt,
        thresholds.grass,
        thresholds.sand,
        thresholds.shallow_dirt,
    ];
    if fractions.windows(2).all(|pair| pair[0] >= pair[1]) {
        Ok(())
    } else {
        Err(ValidationError::new("thresholds_not_descending"))
    }
}

// Range checks let NaN through, since every comparison with it is false
fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

fn validate_probability(value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_probability"))
    }
}

fn validate_num_range(range: &NumRange<f64>) -> Result<(), ValidationError> {
    if range.is_ordered() {
        Ok(())
    } else {
        Err(ValidationError::new("range_min_above_max"))
    }
}
