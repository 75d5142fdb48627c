//! This module provides logic for rendering a map as an STL. Only available
//! with the "stl" feature enabled.

use crate::mesh::{self, Mesh};
use anyhow::Context;
use stl_io::{Normal, Triangle, Vertex};

/// Convert a mesh to STL triangles. STL only carries geometric data, so no
/// colors/textures. There's no dominant convention around which axis should
/// be up in an STL, so here we consider the **Y axis to be up and down**, same
/// as the meshes themselves.
pub fn mesh_to_triangles(mesh: &Mesh) -> Vec<Triangle> {
    mesh.triangles()
        .iter()
        .map(|triangle| {
            // Zero for degenerate triangles, which most programs ignore anyway
            let normal = mesh::normal(triangle)
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(nalgebra::Vector3::zeros);
            let [a, b, c] = triangle;
            Triangle {
                normal: Normal::new([normal.x, normal.y, normal.z]),
                vertices: [
                    Vertex::new([a.x, a.y, a.z]),
                    Vertex::new([b.x, b.y, b.z]),
                    Vertex::new([c.x, c.y, c.z]),
                ],
            }
        })
        .collect()
}

/// Serialize a mesh into binary STL
pub fn mesh_to_stl(mesh: &Mesh) -> anyhow::Result<Vec<u8>> {
    let triangles = mesh_to_triangles(mesh);
    let mut buffer = Vec::<u8>::new();
    stl_io::write_stl(&mut buffer, triangles.iter())
        .context("error serializing STL")?;
    Ok(buffer)
}
