// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mass property verification on STL round trips

use anyhow::Result;
use approx::assert_relative_eq;
use meshprice::catalog::{StlVolume, VolumeSource};
use meshprice::geometry::{mass_properties, Mesh, Triangle};
use meshprice::io;
use nalgebra::{Point3, Vector3};
use tempfile::NamedTempFile;

/// Regular octahedron with vertices at distance `r` from the origin
fn octahedron(r: f64) -> Mesh {
    let mut mesh = Mesh::new();
    let px = mesh.add_vertex(Point3::new(r, 0.0, 0.0));
    let nx = mesh.add_vertex(Point3::new(-r, 0.0, 0.0));
    let py = mesh.add_vertex(Point3::new(0.0, r, 0.0));
    let ny = mesh.add_vertex(Point3::new(0.0, -r, 0.0));
    let pz = mesh.add_vertex(Point3::new(0.0, 0.0, r));
    let nz = mesh.add_vertex(Point3::new(0.0, 0.0, -r));

    for indices in [
        [px, py, pz],
        [py, nx, pz],
        [nx, ny, pz],
        [ny, px, pz],
        [py, px, nz],
        [nx, py, nz],
        [ny, nx, nz],
        [px, ny, nz],
    ] {
        mesh.add_triangle(Triangle::new(indices));
    }
    mesh
}

#[test]
fn test_cube_volume_through_stl() -> Result<()> {
    let mesh = Mesh::cuboid(Point3::new(-5.0, -5.0, -5.0), Vector3::new(10.0, 10.0, 10.0));
    let file = NamedTempFile::with_suffix(".stl")?;
    io::export_stl(&mesh, file.path())?;

    let volume = StlVolume.compute_volume(file.path())?;
    println!("Cube 10×10×10: {:.2} mm³ (expected: 1000)", volume);
    assert_relative_eq!(volume, 1000.0, epsilon = 1e-6);

    let reloaded = io::load_stl(file.path())?;
    let props = mass_properties(&reloaded);
    assert!(props.is_closed);
    for c in props.centre_of_gravity {
        assert_relative_eq!(c, 0.0, epsilon = 1e-9);
    }

    Ok(())
}

#[test]
fn test_octahedron_mass_properties() -> Result<()> {
    let r = 3.0;
    let mesh = octahedron(r);
    assert!(mesh.is_closed());

    let props = mass_properties(&mesh);

    // V = 4/3 r³; I = V r² / 5 about each axis
    let expected_volume = 4.0 / 3.0 * r * r * r;
    assert_relative_eq!(props.volume, expected_volume, epsilon = 1e-9);
    for axis in 0..3 {
        assert_relative_eq!(props.inertia[(axis, axis)], expected_volume * r * r / 5.0, epsilon = 1e-9);
    }
    assert_relative_eq!(props.inertia[(0, 1)], 0.0, epsilon = 1e-9);

    Ok(())
}

#[test]
fn test_open_mesh_still_measured() -> Result<()> {
    let mut mesh = octahedron(1.0);
    mesh.triangles.truncate(4);

    let file = NamedTempFile::with_suffix(".stl")?;
    io::export_stl(&mesh, file.path())?;

    let reloaded = io::load_stl(file.path())?;
    assert!(!reloaded.is_closed());
    assert!(StlVolume.compute_volume(file.path()).is_ok());

    Ok(())
}

#[test]
fn test_volume_is_translation_invariant() {
    let size = Vector3::new(2.0, 3.0, 4.0);
    let near = mass_properties(&Mesh::cuboid(Point3::origin(), size));
    let far = mass_properties(&Mesh::cuboid(Point3::new(250.0, -400.0, 75.0), size));

    assert_relative_eq!(near.volume, far.volume, epsilon = 1e-6);
    assert_relative_eq!(near.inertia, far.inertia, epsilon = 1e-4);
}
