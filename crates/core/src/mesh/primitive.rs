//! Solid primitives that make up a map's geometry, and their triangulation.
//!
//! Every triangle follows the right-hand rule: its vertices are
//! counter-clockwise when looking at the visible side, so the normal computed
//! from the winding points out of the solid.

use crate::{
    mesh::{Triangle, Vertex},
    PlanarPosition, Point3,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Distance between the center of a tile and one of its 6 vertices. This is
/// also the length of one side of the tile.
pub const TILE_VERTEX_RADIUS: f64 = 1.0;

/// Vertex indices for a tile's face (top or bottom). Together these form the
/// triangles that make up the face. Vertex 0 points along `+z`, and the rest
/// follow around the hexagon towards `+x`.
const FACE_INDICES: &[[usize; 3]] =
    &[[0, 3, 1], [0, 4, 3], [1, 3, 2], [0, 5, 4]];

/// 4 for the top, 4 for the bottom, 2 per side
pub const TRIANGLES_PER_TILE: usize = 20;

/// A sphere, used for rocks and cloud puffs
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Point3,
    pub radius: f64,
}

/// A truncated cone standing upright, centered on `center`. The bottom face
/// is at `center.y - height / 2` and the top face at `center.y + height / 2`.
/// A zero top radius makes a cone, equal radii make a cylinder.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub center: Point3,
    pub top_radius: f64,
    pub bottom_radius: f64,
    pub height: f64,
    /// Number of faces around the side. 3 gives a triangular pyramid.
    pub segments: u32,
}

/// Get the vertex of a hexagonal tile in the given direction, where
/// direction 0 is `+z` and each step turns 60° towards `+x`.
fn hex_vertex(position: PlanarPosition, index: usize, y: f64) -> Point3 {
    let angle = index as f64 * TAU / 6.0;
    Point3::new(
        position.x + TILE_VERTEX_RADIUS * angle.sin(),
        y,
        position.z + TILE_VERTEX_RADIUS * angle.cos(),
    )
}

/// Triangulate a tile: a hexagonal prism standing on `y = 0`, with its top
/// face at `y = height`.
pub fn hex_prism(position: PlanarPosition, height: f64) -> Vec<Triangle> {
    let bottom: Vec<Vertex> = (0..6)
        .map(|i| hex_vertex(position, i, 0.0).into())
        .collect();
    let top: Vec<Vertex> = (0..6)
        .map(|i| hex_vertex(position, i, height).into())
        .collect();
    let mut triangles = Vec::with_capacity(TRIANGLES_PER_TILE);

    // Bottom face
    for &[i1, i2, i3] in FACE_INDICES {
        triangles.push([bottom[i1], bottom[i2], bottom[i3]]);
    }

    // Reverse these so the face points up, not down
    for &[i1, i2, i3] in FACE_INDICES {
        triangles.push([top[i3], top[i2], top[i1]]);
    }

    // Two triangles for each side. From the outside:
    //
    //    top_v1       top_v2
    //          +-----+
    //          |\    |
    //          | \   |
    //          |  \  |
    //          |   \ |
    //          |    \|
    //          +-----+
    // bottom_v1       bottom_v2
    for i1 in 0..6 {
        let i2 = (i1 + 1) % 6;
        triangles.push([bottom[i2], top[i2], top[i1]]);
        triangles.push([top[i1], bottom[i1], bottom[i2]]);
    }

    triangles
}

impl Sphere {
    /// Segments around the equator
    pub const WIDTH_SEGMENTS: usize = 7;
    /// Segments from pole to pole
    pub const HEIGHT_SEGMENTS: usize = 7;

    /// Triangulate this sphere as a UV sphere. The rings touching the poles
    /// are fans, so there are `2 * w * (h - 1)` triangles.
    pub fn triangles(&self) -> Vec<Triangle> {
        let (w, h) = (Self::WIDTH_SEGMENTS, Self::HEIGHT_SEGMENTS);
        let grid: Vec<Vec<Vertex>> = (0..=h)
            .map(|iy| {
                let polar = iy as f64 / h as f64 * PI;
                (0..=w)
                    .map(|ix| {
                        let azimuth = ix as f64 / w as f64 * TAU;
                        let offset = Point3::new(
                            -self.radius * azimuth.cos() * polar.sin(),
                            self.radius * polar.cos(),
                            self.radius * azimuth.sin() * polar.sin(),
                        );
                        (self.center + offset).into()
                    })
                    .collect()
            })
            .collect();

        let mut triangles = Vec::with_capacity(2 * w * (h - 1));
        for iy in 0..h {
            for ix in 0..w {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];
                // Skip the degenerate halves at the poles
                if iy != 0 {
                    triangles.push([a, b, d]);
                }
                if iy != h - 1 {
                    triangles.push([b, c, d]);
                }
            }
        }
        triangles
    }
}

impl Frustum {
    /// A cylinder that rests on `y = 0`
    pub fn cylinder(
        position: PlanarPosition,
        radius: f64,
        height: f64,
        segments: u32,
    ) -> Self {
        Self {
            center: Point3::new(position.x, height / 2.0, position.z),
            top_radius: radius,
            bottom_radius: radius,
            height,
            segments,
        }
    }

    /// Triangulate this frustum. Caps are only added for ends with a
    /// non-zero radius, and the side skips triangles that would collapse
    /// onto a tip.
    pub fn triangles(&self) -> Vec<Triangle> {
        let segments = self.segments.max(3) as usize;
        let half_height = self.height / 2.0;
        let ring = |radius: f64, y: f64| -> Vec<Vertex> {
            (0..=segments)
                .map(|i| {
                    let angle = i as f64 / segments as f64 * TAU;
                    let offset = Point3::new(
                        radius * angle.sin(),
                        y,
                        radius * angle.cos(),
                    );
                    (self.center + offset).into()
                })
                .collect()
        };
        let top = ring(self.top_radius, half_height);
        let bottom = ring(self.bottom_radius, -half_height);
        let top_center: Vertex =
            (self.center + Point3::new(0.0, half_height, 0.0)).into();
        let bottom_center: Vertex =
            (self.center - Point3::new(0.0, half_height, 0.0)).into();

        let mut triangles = Vec::with_capacity(segments * 4);
        for i in 0..segments {
            if self.top_radius > 0.0 {
                triangles.push([top[i], bottom[i], top[i + 1]]);
            }
            if self.bottom_radius > 0.0 {
                triangles.push([bottom[i], bottom[i + 1], top[i + 1]]);
            }
        }

        if self.top_radius > 0.0 {
            for i in 0..segments {
                triangles.push([top_center, top[i], top[i + 1]]);
            }
        }
        if self.bottom_radius > 0.0 {
            for i in 0..segments {
                triangles.push([bottom_center, bottom[i + 1], bottom[i]]);
            }
        }

        triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::normal;
    use assert_approx_eq::assert_approx_eq;

    /// Assert that every triangle faces away from the given interior point
    fn assert_outward(triangles: &[Triangle], inside: Point3) {
        let inside: Vertex = inside.into();
        for triangle in triangles {
            let centroid = nalgebra::Point3::from(
                (triangle[0].coords + triangle[1].coords + triangle[2].coords)
                    / 3.0,
            );
            let dot = normal(triangle).dot(&(centroid - inside));
            assert!(dot > 0.0, "{:?} faces inwards", triangle);
        }
    }

    #[test]
    fn test_hex_prism() {
        let position = PlanarPosition::new(3.0, -2.0);
        let triangles = hex_prism(position, 4.0);
        assert_eq!(triangles.len(), TRIANGLES_PER_TILE);
        assert_outward(&triangles, Point3::new(3.0, 2.0, -2.0));

        // Everything sits between the ground and the top face
        for vertex in triangles.iter().flatten() {
            assert!(vertex.y == 0.0 || vertex.y == 4.0);
        }
        // First vertex of the bottom face points along +z
        assert_approx_eq!(triangles[0][0].x, 3.0);
        assert_approx_eq!(triangles[0][0].z, -1.0);
    }

    #[test]
    fn test_sphere() {
        let center = Point3::new(1.0, 5.0, -1.0);
        let sphere = Sphere {
            center,
            radius: 0.5,
        };
        let triangles = sphere.triangles();
        assert_eq!(triangles.len(), 84);
        assert_outward(&triangles, center);

        let center: Vertex = center.into();
        for vertex in triangles.iter().flatten() {
            let distance = (vertex - center).norm();
            assert_approx_eq!(distance, 0.5, 1e-5);
        }
    }

    #[test]
    fn test_cone() {
        // Tree layers are 3-sided cones: 3 sides plus a 3 triangle base
        let center = Point3::new(0.0, 3.0, 0.0);
        let cone = Frustum {
            center,
            top_radius: 0.0,
            bottom_radius: 1.5,
            height: 2.0,
            segments: 3,
        };
        let triangles = cone.triangles();
        assert_eq!(triangles.len(), 6);
        assert_outward(&triangles, Point3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn test_cylinder() {
        let cylinder =
            Frustum::cylinder(PlanarPosition::new(0.0, 0.0), 16.0, 2.0, 50);
        assert_approx_eq!(cylinder.center.y, 1.0);
        let triangles = cylinder.triangles();
        assert_eq!(triangles.len(), 200);
        assert_outward(&triangles, cylinder.center);
    }
}
