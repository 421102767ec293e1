// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporters

use crate::error::Result;
use crate::geometry::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export mesh to binary STL
pub fn export_stl(mesh: &Mesh, path: &Path) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let [v0, v1, v2] = mesh.corners(tri);
            let normal = mesh.face_normal(tri);

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [
                    StlVertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    StlVertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    StlVertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();

    let mut file = BufWriter::new(File::create(path)?);
    stl_io::write_stl(&mut file, triangles.iter())?;
    file.flush()?;

    Ok(())
}

/// Export mesh to ASCII STL
pub fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "solid mesh")?;

    for tri in &mesh.triangles {
        let normal = mesh.face_normal(tri);
        writeln!(file, "  facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(file, "    outer loop")?;
        for v in mesh.corners(tri) {
            writeln!(file, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }

    writeln!(file, "endsolid mesh")?;
    file.flush()?;

    Ok(())
}
