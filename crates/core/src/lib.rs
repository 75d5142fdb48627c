//! Hexmap is a procedural generator for hexagonal tile maps. Each tile gets a
//! height from a noise function (or a hand-authored table), the height is
//! banded into a [TerrainTier], and a few props (rocks, trees) get scattered
//! on top. The output is plain data: tile records, decorations, and triangle
//! meshes grouped by tier, ready to be handed to whatever renders them.
//!
//! Generation happens in two phases. First, load whatever resources the
//! config needs (this can fail, e.g. if a height table file is missing). Then
//! generate the map, which is deterministic for a given config.
//!
//! ```
//! use hexmap::{HexMap, MapConfig, MapResources};
//!
//! let config = MapConfig::default();
//! let resources = MapResources::load(&config).unwrap();
//! let map = HexMap::generate(config, &resources).unwrap();
//! println!("{}", map.tiles().len());
//! ```
//!
//! See [MapConfig] for details on how generation can be customized.

mod config;
mod map;
mod mesh;
mod render;
mod util;

pub use crate::{
    config::{
        BoundaryRadius, CloudConfig, DecorationConfig, HeightConfig,
        HeightTableSource, LayoutConfig, MapConfig, NoiseFnConfig,
        NoiseFnType, SceneryConfig, Seed, TierThresholds, TreeLayerConfig,
    },
    map::{
        classify, tile_to_position, AxialCoord, Decoration, DecorationPass,
        DecorationPlacer, GeneratedMap, HeightField, HexMap, MapBuilder,
        MapResources, NoiseHeightField, PlanarPosition, TableHeightField,
        TerrainTier, TileRecord,
    },
    mesh::{
        primitive::{Frustum, Sphere},
        GeometrySink, Mesh, MeshLayer, TierMeshes, Triangle,
    },
    render::{unit::Color3, MapRenderer, RenderConfig},
    util::{range::NumRange, unit::Point3},
};
