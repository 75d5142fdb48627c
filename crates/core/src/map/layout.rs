//! Conversion from tile coordinates to world positions, and selection of the
//! tiles that make up a map.
//!
//! ## Coordinates
//!
//! Tiles are addressed by an [AxialCoord]: an integer column and row in an
//! offset ("brick wall") hex grid. Every odd row is shifted half a tile to the
//! right, so each tile touches two tiles in the row above and two in the row
//! below:
//!
//! ```text
//!  row 0:   (0,0)   (1,0)   (2,0)
//!  row 1:       (0,1)   (1,1)   (2,1)
//!  row 2:   (0,2)   (1,2)   (2,2)
//! ```
//!
//! World positions are [PlanarPosition]s on the `y = 0` plane. Columns advance
//! along `+x`, rows along `+z`. The shift applies to every odd row, negative
//! ones included, so row `-1` lines up with row `1`.

use crate::{config::LayoutConfig, util::coord_count};
use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

/// The address of a single tile in the offset hex grid. Immutable once
/// created; maps produce these by iterating their coordinate domain.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", col, row)]
pub struct AxialCoord {
    pub col: i32,
    pub row: i32,
}

impl AxialCoord {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Is this tile in a row that gets shifted by half a tile?
    pub fn is_odd_row(self) -> bool {
        self.row.rem_euclid(2) == 1
    }
}

/// A position on the map plane, in world units. `x` runs along columns and
/// `z` along rows.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Add,
    Sub,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, z)]
pub struct PlanarPosition {
    pub x: f64,
    pub z: f64,
}

impl PlanarPosition {
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Distance from the world origin
    pub fn length(self) -> f64 {
        self.x.hypot(self.z)
    }
}

/// Get the world position of a tile, using the default grid spacing. See
/// [LayoutConfig::tile_to_position] for the formula.
pub fn tile_to_position(col: i32, row: i32) -> PlanarPosition {
    LayoutConfig::default().tile_to_position(AxialCoord::new(col, row))
}

impl LayoutConfig {
    /// Get the world position of a tile:
    ///
    /// - `x = (col + (row mod 2) * 0.5) * horizontal_spacing`
    /// - `z = row * vertical_spacing`
    ///
    /// This is defined for every coordinate, and two different coordinates
    /// never share a position.
    pub fn tile_to_position(&self, coord: AxialCoord) -> PlanarPosition {
        let shift = if coord.is_odd_row() { 0.5 } else { 0.0 };
        PlanarPosition {
            x: (f64::from(coord.col) + shift) * self.horizontal_spacing,
            z: f64::from(coord.row) * self.vertical_spacing,
        }
    }

    /// Is a position within the boundary of a map with the given radius?
    /// Positions exactly on the boundary are included.
    pub fn contains(&self, map_radius: i32, position: PlanarPosition) -> bool {
        position.length() <= self.boundary.resolve(map_radius)
    }

    /// Get every tile that exists in a map of the given radius, along with its
    /// position. Columns are the outer loop and rows the inner one, both over
    /// `[-radius, radius]`. The order is stable, since generation draws random
    /// numbers tile by tile in this order.
    pub fn tiles(
        &self,
        map_radius: i32,
    ) -> impl Iterator<Item = (AxialCoord, PlanarPosition)> + '_ {
        // Negating i32::MIN overflows, and any negative radius is empty anyway
        let (min, max) = if map_radius < 0 {
            (1, 0)
        } else {
            (-map_radius, map_radius)
        };
        (min..=max)
            .flat_map(move |col| {
                (min..=max).map(move |row| AxialCoord::new(col, row))
            })
            .map(move |coord| (coord, self.tile_to_position(coord)))
            .filter(move |(_, position)| self.contains(map_radius, *position))
    }

    /// Upper bound on the number of tiles in a map of the given radius
    pub fn tile_capacity(&self, map_radius: i32) -> usize {
        coord_count(map_radius)
    }
}
