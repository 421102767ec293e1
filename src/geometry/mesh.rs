// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangulated surface mesh

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Indexed triangle mesh. Facets are expected to be wound counter-clockwise
/// when seen from outside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Axis-aligned box with one corner at `origin`
    pub fn cuboid(origin: Point3<f64>, size: Vector3<f64>) -> Self {
        let mut mesh = Self::with_capacity(8, 12);
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (1.0, 1.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, 1.0),
            (0.0, 1.0, 1.0),
        ] {
            mesh.add_vertex(origin + Vector3::new(x * size.x, y * size.y, z * size.z));
        }

        for indices in [
            [0, 2, 1], [0, 3, 2], // bottom
            [4, 5, 6], [4, 6, 7], // top
            [0, 1, 5], [0, 5, 4], // front
            [3, 7, 6], [3, 6, 2], // back
            [0, 4, 7], [0, 7, 3], // left
            [1, 2, 6], [1, 6, 5], // right
        ] {
            mesh.add_triangle(Triangle::new(indices));
        }

        mesh
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of a triangle
    pub fn corners(&self, triangle: &Triangle) -> [Point3<f64>; 3] {
        [
            self.vertices[triangle.indices[0]],
            self.vertices[triangle.indices[1]],
            self.vertices[triangle.indices[2]],
        ]
    }

    /// Unit normal of a triangle, zero for degenerate facets
    pub fn face_normal(&self, triangle: &Triangle) -> Vector3<f64> {
        let [v0, v1, v2] = self.corners(triangle);
        (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// A mesh is closed if every edge is shared by exactly 2 triangles.
    /// Only meaningful for meshes with shared (welded) vertices.
    pub fn is_closed(&self) -> bool {
        if self.triangles.is_empty() {
            return false;
        }

        let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
        for triangle in &self.triangles {
            let indices = &triangle.indices;
            for i in 0..3 {
                let a = indices[i];
                let b = indices[(i + 1) % 3];
                let edge = if a < b { (a, b) } else { (b, a) };
                *edge_count.entry(edge).or_insert(0) += 1;
            }
        }

        edge_count.values().all(|&count| count == 2)
    }
}
