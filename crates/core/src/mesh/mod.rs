//! Triangle meshes for generated maps. Geometry is accumulated per
//! [MeshLayer] while a map generates, so each layer can get its own material
//! when rendered.

pub mod primitive;

use crate::{
    mesh::primitive::{hex_prism, Frustum},
    Decoration, PlanarPosition, TerrainTier,
};
use derive_more::Display;
use fnv::FnvHashMap;
use std::iter;
use strum::IntoEnumIterator;

/// A single mesh vertex. Meshes are meant for display, so single precision
/// is plenty.
pub type Vertex = nalgebra::Point3<f32>;

/// Three vertices, counter-clockwise when viewed from the visible side
pub type Triangle = [Vertex; 3];

/// Compute the normal of a triangle from its winding. The result is **not**
/// normalized, and is zero for degenerate triangles.
pub fn normal(triangle: &Triangle) -> nalgebra::Vector3<f32> {
    let [a, b, c] = triangle;
    (b - a).cross(&(c - a))
}

/// Unindexed triangle soup
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Extend<Triangle> for Mesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl iter::FromIterator<Triangle> for Mesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

/// A group of geometry that shares one material: one per terrain tier, plus
/// the scenery.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum MeshLayer {
    #[display(fmt = "{}", _0)]
    Tier(TerrainTier),
    #[display(fmt = "water")]
    Water,
    #[display(fmt = "clouds")]
    Clouds,
}

impl MeshLayer {
    /// Every layer, tiers first (in classification order)
    pub fn all() -> impl Iterator<Item = Self> {
        TerrainTier::iter()
            .map(Self::Tier)
            .chain([Self::Water, Self::Clouds])
    }
}

/// Something that can receive map geometry as it's generated. Generation
/// calls these in a fixed order (tile by tile, then scenery), so an
/// implementation sees the same sequence of calls for the same config.
pub trait GeometrySink {
    /// Append a tile, i.e. a hexagonal prism of height `height` standing on
    /// `position`, to the given tier's geometry.
    fn add_hex_prism(
        &mut self,
        tier: TerrainTier,
        height: f64,
        position: PlanarPosition,
    );

    /// Append a rock, tree or cloud
    fn add_decoration(&mut self, _decoration: &Decoration) {}

    /// Append the water cylinder
    fn add_water(&mut self, _water: &Frustum) {}
}

/// The bundled [GeometrySink]: one mesh per [MeshLayer]. Decorations go into
/// the layer whose material they share (see [Decoration::layer]).
#[derive(Clone, Debug, PartialEq)]
pub struct TierMeshes {
    layers: FnvHashMap<MeshLayer, Mesh>,
}

impl TierMeshes {
    pub fn new() -> Self {
        Self {
            layers: MeshLayer::all()
                .map(|layer| (layer, Mesh::new()))
                .collect(),
        }
    }

    /// Get the accumulated geometry for a single layer
    pub fn layer(&self, layer: MeshLayer) -> &Mesh {
        // Every layer is populated on creation
        &self.layers[&layer]
    }

    fn layer_mut(&mut self, layer: MeshLayer) -> &mut Mesh {
        self.layers.entry(layer).or_default()
    }

    /// Shorthand for [Self::layer] with a tier
    pub fn tier(&self, tier: TerrainTier) -> &Mesh {
        self.layer(MeshLayer::Tier(tier))
    }

    /// Iterate over all layers in a stable order, empty ones included
    pub fn layers(&self) -> impl Iterator<Item = (MeshLayer, &Mesh)> + '_ {
        MeshLayer::all().map(move |layer| (layer, self.layer(layer)))
    }

    /// Total number of triangles across every layer
    pub fn triangle_count(&self) -> usize {
        self.layers.values().map(Mesh::len).sum()
    }

    /// Combine every layer into one mesh, in [MeshLayer::all] order
    pub fn merged(&self) -> Mesh {
        self.layers()
            .flat_map(|(_, mesh)| mesh.triangles().iter().copied())
            .collect()
    }
}

impl Default for TierMeshes {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometrySink for TierMeshes {
    fn add_hex_prism(
        &mut self,
        tier: TerrainTier,
        height: f64,
        position: PlanarPosition,
    ) {
        self.layer_mut(MeshLayer::Tier(tier))
            .extend(hex_prism(position, height));
    }

    fn add_decoration(&mut self, decoration: &Decoration) {
        self.layer_mut(decoration.layer())
            .extend(decoration.triangles());
    }

    fn add_water(&mut self, water: &Frustum) {
        self.layer_mut(MeshLayer::Water).extend(water.triangles());
    }
}
