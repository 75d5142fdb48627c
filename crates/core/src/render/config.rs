use crate::TerrainTier;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration specific to visually rendering a map. These options have
/// absolutely no bearing on map _generation_, only on the visual
/// presentation. In other words, if you generate a map then output to a
/// non-visual format (e.g. JSON), these options will **never** affect that
/// output.
///
/// Not all render options apply to all render output formats, e.g.
/// `vertical_scale` is irrelevant for 2D rendering like SVG. The documentation
/// for each field will list which formats it applies to.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenderConfig {
    /// The vertical scale factor applied to all geometry. This impacts the
    /// _presentation_ of each tile's height, but **does not factor into** the
    /// tile's underlying height value.
    ///
    /// ## Relevant Formats
    /// - STL
    #[validate(range(min = 0.001))]
    pub vertical_scale: f64,

    /// Only render this tier. Decorations follow the tier whose material
    /// they share, so stone includes rocks and grass includes trees.
    ///
    /// ## Relevant Formats
    /// - STL
    /// - SVG
    pub tier: Option<TerrainTier>,

    /// Should rocks and trees be visible?
    ///
    /// ## Relevant Formats
    /// - SVG
    pub show_decorations: bool,

    /// Should the water and clouds be included? Ignored when rendering a
    /// single tier.
    ///
    /// ## Relevant Formats
    /// - STL
    /// - SVG (water only, clouds would cover the map)
    pub show_scenery: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vertical_scale: 1.0,
            tier: None,
            show_decorations: true,
            show_scenery: true,
        }
    }
}
