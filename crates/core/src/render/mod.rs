mod config;
#[cfg(feature = "stl")]
pub mod stl;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

pub use self::config::RenderConfig;

use crate::{
    mesh::{Mesh, MeshLayer, Triangle, Vertex},
    render::unit::Color3,
    HexMap, TerrainTier,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A map renderer is used to convert maps into various visual output
/// formats. A renderer is created using a particular [RenderConfig], and from
/// there can be used to render any number of maps any number of times.
///
/// Config options cannot be changed after creating a renderer, but renderers
/// are very cheap to create so if you need to change the config, just create
/// a new renderer.
///
/// ## Supported Formats
/// - STL (3D, no colors or textures)
/// - SVG (2D top-down, with colors)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapRenderer {
    /// Config that determines how rendering is done
    ///
    /// **This is different from the map config.** The map config controls
    /// how the map is generated, the render config just controls how it's
    /// visually presented _after_ generation.
    render_config: RenderConfig,
}

impl MapRenderer {
    /// Initialize a new renderer with the given options. Returns an error if
    /// the render config is invalid.
    pub fn new(render_config: RenderConfig) -> anyhow::Result<Self> {
        render_config.validate()?;
        Ok(Self { render_config })
    }

    /// Get a reference to the config that this renderer uses
    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }

    /// Map a tier to its preset color
    pub fn tier_color(&self, tier: TerrainTier) -> Color3 {
        match tier {
            TerrainTier::Stone => Color3::new_int(150, 150, 150),
            TerrainTier::Dirt => Color3::new_int(115, 87, 57),
            TerrainTier::Grass => Color3::new_int(86, 150, 58),
            TerrainTier::Sand => Color3::new_int(219, 201, 145),
            TerrainTier::ShallowDirt => Color3::new_int(140, 110, 75),
        }
    }

    /// Get the color for any mesh layer
    pub fn layer_color(&self, layer: MeshLayer) -> Color3 {
        match layer {
            MeshLayer::Tier(tier) => self.tier_color(tier),
            MeshLayer::Water => Color3::new_int(85, 170, 210),
            MeshLayer::Clouds => Color3::new_int(255, 255, 255),
        }
    }

    /// Which mesh layers should be drawn, based on the render config
    pub fn visible_layers(&self) -> Vec<MeshLayer> {
        match self.render_config.tier {
            Some(tier) => vec![MeshLayer::Tier(tier)],
            None => MeshLayer::all()
                .filter(|layer| {
                    self.render_config.show_scenery
                        || matches!(layer, MeshLayer::Tier(_))
                })
                .collect(),
        }
    }

    /// Collect the geometry of every visible layer into one mesh, with the
    /// vertical scale applied.
    pub fn mesh(&self, map: &HexMap) -> Mesh {
        let scale = self.render_config.vertical_scale as f32;
        let scale_vertex =
            |vertex: &Vertex| Vertex::new(vertex.x, vertex.y * scale, vertex.z);
        self.visible_layers()
            .into_iter()
            .flat_map(|layer| map.meshes().layer(layer).triangles().iter())
            .map(|[a, b, c]: &Triangle| {
                [scale_vertex(a), scale_vertex(b), scale_vertex(c)]
            })
            .collect()
    }

    /// Render this map as a 2D SVG, from a top-down perspective. Returns the
    /// SVG in a string.
    #[cfg(feature = "svg")]
    pub fn render_as_svg(&self, map: &HexMap) -> String {
        let svg = svg::map_to_svg(map, self);
        svg.to_string()
    }

    /// Render this map into an STL model. Return value is the STL binary
    /// data.
    #[cfg(feature = "stl")]
    pub fn render_as_stl(&self, map: &HexMap) -> anyhow::Result<Vec<u8>> {
        stl::mesh_to_stl(&self.mesh(map))
    }
}
