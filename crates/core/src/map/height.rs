use crate::{
    config::{HeightConfig, HeightTableSource},
    map::generate::noise::TileNoiseFn,
    AxialCoord,
};
use anyhow::{bail, Context};
use log::info;
use std::{fmt::Debug, fs::File, io::BufReader, path::Path};

/// A source of per-tile heights. Read-only input to classification: the same
/// classifier handles every implementation.
pub trait HeightField: Debug {
    /// Get the height for a tile. `None` means the field has no value there,
    /// and the tile is skipped (which is not an error).
    fn height_at(&self, coord: AxialCoord) -> Option<f64>;
}

/// Heights from a coherent noise function, sampled at
/// `(col * frequency, row * frequency)`, normalized to `[0,1]`, raised to the
/// configured exponent, then scaled to `[0, max_height]`. Defined everywhere.
#[derive(Debug)]
pub struct NoiseHeightField {
    noise_fn: TileNoiseFn,
}

impl NoiseHeightField {
    pub fn new(config: &HeightConfig, seed: u32) -> Self {
        Self {
            noise_fn: TileNoiseFn::new(config.noise, seed, config.max_height),
        }
    }
}

impl HeightField for NoiseHeightField {
    fn height_at(&self, coord: AxialCoord) -> Option<f64> {
        Some(self.noise_fn.get(coord.col, coord.row))
    }
}

/// Hand-authored heights. The table is centered on the origin tile: row
/// index `row + radius`, column index `col + radius`. Rows can have
/// different lengths; anything outside the table has no height.
#[derive(Clone, Debug, PartialEq)]
pub struct TableHeightField {
    rows: Vec<Vec<f64>>,
    radius: i32,
}

impl TableHeightField {
    pub fn new(rows: Vec<Vec<f64>>, radius: i32) -> Self {
        Self { rows, radius }
    }

    /// Load a table from a JSON file containing an array of rows, e.g.
    /// `[[1.0, 2.5], [3.0, 0.5]]`.
    pub fn from_file(path: &Path, radius: i32) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| {
            format!("error opening height table {:?}", path)
        })?;
        let rows: Vec<Vec<f64>> =
            serde_json::from_reader(BufReader::new(file)).with_context(
                || format!("error parsing height table {:?}", path),
            )?;
        info!("Loaded {}-row height table from {:?}", rows.len(), path);
        Self::from_rows(rows, radius)
    }

    /// Build a table from config, loading it from disk if necessary
    pub fn from_source(
        source: &HeightTableSource,
        radius: i32,
    ) -> anyhow::Result<Self> {
        match source {
            HeightTableSource::Inline(rows) => {
                Self::from_rows(rows.clone(), radius)
            }
            HeightTableSource::File(path) => Self::from_file(path, radius),
        }
    }

    fn from_rows(rows: Vec<Vec<f64>>, radius: i32) -> anyhow::Result<Self> {
        // NaN would silently classify as "excluded", which is never what the
        // author of a table meant
        for (row_index, row) in rows.iter().enumerate() {
            if let Some(col_index) = row.iter().position(|h| !h.is_finite()) {
                bail!(
                    "non-finite height at row {}, column {} of height table",
                    row_index,
                    col_index
                );
            }
        }
        Ok(Self::new(rows, radius))
    }

    fn index(&self, value: i32) -> Option<usize> {
        // Negative indices are outside the table
        usize::try_from(i64::from(value) + i64::from(self.radius)).ok()
    }
}

impl HeightField for TableHeightField {
    fn height_at(&self, coord: AxialCoord) -> Option<f64> {
        let row = self.rows.get(self.index(coord.row)?)?;
        row.get(self.index(coord.col)?).copied()
    }
}
