use crate::{AxialCoord, PlanarPosition, TerrainTier};
use serde::{Deserialize, Serialize};

/// A map is made of tiles. In 3D, each tile is a hexagonal prism standing on
/// the `y = 0` plane, as tall as its height. Tiles can't be stacked.
///
/// Tiles are only created by map generation (see
/// [HexMap::generate](crate::HexMap::generate)), and only for coordinates that
/// pass the boundary test and classify into a tier. They never change after
/// that.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub(super) coord: AxialCoord,
    pub(super) position: PlanarPosition,
    pub(super) height: f64,
    pub(super) tier: TerrainTier,
}

impl TileRecord {
    /// Grid address of this tile. Every tile in a map has a unique coordinate.
    pub fn coord(&self) -> AxialCoord {
        self.coord
    }

    /// Center of this tile on the map plane
    pub fn position(&self) -> PlanarPosition {
        self.position
    }

    /// Height of the tile's top face above `y = 0`
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn tier(&self) -> TerrainTier {
        self.tier
    }
}
