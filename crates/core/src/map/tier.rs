use crate::config::TierThresholds;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// A discrete terrain category, assigned to a tile purely by its height. The
/// declaration order is the check order: highest threshold first.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TerrainTier {
    Stone,
    Dirt,
    Grass,
    Sand,
    ShallowDirt,
}

/// The kind of probabilistic decoration pass a tier triggers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecorationPass {
    /// Zero, one or two rocks
    Rocks,
    /// Zero or one tree
    Trees,
}

impl TerrainTier {
    /// The tier with the lowest threshold. Its threshold is an inclusive floor
    /// rather than a strict bound.
    pub const LOWEST: Self = Self::ShallowDirt;

    /// Which decoration pass, if any, a tile of this tier gets
    pub fn decoration_pass(self) -> Option<DecorationPass> {
        match self {
            Self::Stone | Self::Sand | Self::ShallowDirt => {
                Some(DecorationPass::Rocks)
            }
            Self::Grass => Some(DecorationPass::Trees),
            Self::Dirt => None,
        }
    }
}

impl TierThresholds {
    /// Bucket a height into a tier. Tiers are checked from the top down, and
    /// the first one whose threshold (`fraction * max_height`) the height
    /// strictly exceeds wins. That means a height sitting exactly on a
    /// boundary falls into the lower tier. The one exception is the bottom
    /// tier, whose threshold is inclusive.
    ///
    /// Returns `None` if the height is below even the bottom tier (or is NaN),
    /// in which case the tile shouldn't exist.
    pub fn classify(
        &self,
        height: f64,
        max_height: f64,
    ) -> Option<TerrainTier> {
        TerrainTier::iter().find(|&tier| {
            let threshold = self.fraction(tier) * max_height;
            if tier == TerrainTier::LOWEST {
                height >= threshold
            } else {
                height > threshold
            }
        })
    }
}

/// Bucket a height into a tier with the default thresholds. See
/// [TierThresholds::classify].
pub fn classify(height: f64, max_height: f64) -> Option<TerrainTier> {
    TierThresholds::default().classify(height, max_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_classify() {
        assert_eq!(classify(8.5, 10.0), Some(TerrainTier::Stone));
        assert_eq!(classify(7.5, 10.0), Some(TerrainTier::Dirt));
        assert_eq!(classify(6.0, 10.0), Some(TerrainTier::Grass));
        assert_eq!(classify(4.0, 10.0), Some(TerrainTier::Sand));
        assert_eq!(classify(1.0, 10.0), Some(TerrainTier::ShallowDirt));
    }

    #[test]
    fn test_classify_boundaries() {
        // Boundaries are exclusive, so these all fall one tier down
        assert_eq!(classify(8.0, 10.0), Some(TerrainTier::Dirt));
        assert_eq!(classify(7.0, 10.0), Some(TerrainTier::Grass));
        assert_eq!(classify(5.0, 10.0), Some(TerrainTier::Sand));
        assert_eq!(classify(3.0, 10.0), Some(TerrainTier::ShallowDirt));

        // ...except the bottom one
        assert_eq!(classify(0.0, 10.0), Some(TerrainTier::ShallowDirt));
        assert_eq!(classify(-0.01, 10.0), None);
    }

    #[test]
    fn test_classify_out_of_range() {
        assert_eq!(classify(1000.0, 10.0), Some(TerrainTier::Stone));
        assert_eq!(classify(-1000.0, 10.0), None);
        assert_eq!(classify(f64::NAN, 10.0), None);
    }

    #[test]
    fn test_classify_idempotent() {
        for height in &[-1.0, 0.0, 2.9, 3.0, 5.0, 7.2, 8.0, 9.9] {
            assert_eq!(classify(*height, 10.0), classify(*height, 10.0));
        }
    }

    #[test]
    fn test_classify_custom_thresholds() {
        let thresholds = TierThresholds {
            stone: 0.9,
            dirt: 0.9,
            grass: 0.4,
            sand: 0.2,
            shallow_dirt: 0.1,
        };
        // Dirt is unreachable when it shares stone's threshold
        assert_eq!(thresholds.classify(95.0, 100.0), Some(TerrainTier::Stone));
        assert_eq!(thresholds.classify(90.0, 100.0), Some(TerrainTier::Grass));
        assert_eq!(
            thresholds.classify(10.0, 100.0),
            Some(TerrainTier::ShallowDirt)
        );
        assert_eq!(thresholds.classify(9.0, 100.0), None);
    }

    #[test]
    fn test_decoration_pass() {
        assert_eq!(
            TerrainTier::Stone.decoration_pass(),
            Some(DecorationPass::Rocks)
        );
        assert_eq!(TerrainTier::Dirt.decoration_pass(), None);
        assert_eq!(
            TerrainTier::Grass.decoration_pass(),
            Some(DecorationPass::Trees)
        );
        assert_eq!(
            TerrainTier::Sand.decoration_pass(),
            Some(DecorationPass::Rocks)
        );
        assert_eq!(
            TerrainTier::ShallowDirt.decoration_pass(),
            Some(DecorationPass::Rocks)
        );
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(TerrainTier::ShallowDirt.to_string(), "shallow_dirt");
        assert_eq!(
            TerrainTier::from_str("stone").unwrap(),
            TerrainTier::Stone
        );
        assert!(TerrainTier::from_str("lava").is_err());
    }
}
