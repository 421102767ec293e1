// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL importer

use crate::error::{PricingError, Result};
use crate::geometry::{Mesh, Triangle};
use nalgebra::Point3;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load an ASCII or binary STL file into a mesh.
///
/// `stl_io` welds identical vertices, so the resulting mesh has shared
/// vertices and edge-based checks such as [`Mesh::is_closed`] work.
/// Errors name the file by its bare file name, as catalog rows do.
pub fn load_stl(path: &Path) -> Result<Mesh> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let file = File::open(path).map_err(|e| PricingError::mesh_read(&name, e))?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader).map_err(|e| PricingError::mesh_read(&name, e))?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());
    for vertex in &stl.vertices {
        mesh.add_vertex(Point3::new(
            vertex[0] as f64,
            vertex[1] as f64,
            vertex[2] as f64,
        ));
    }

    for face in &stl.faces {
        if face.vertices.iter().any(|&i| i >= mesh.vertex_count()) {
            return Err(PricingError::mesh_read(&name, "facet references a missing vertex"));
        }
        mesh.add_triangle(Triangle::new(face.vertices));
    }

    if mesh.is_empty() {
        return Err(PricingError::mesh_read(&name, "mesh contains no facets"));
    }

    Ok(mesh)
}
