// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mass properties of closed triangle meshes
//!
//! Volume, centre of gravity and inertia are obtained by integrating the
//! polynomials 1, x, y, z, x², y², z², xy, yz, zx over the solid bounded by
//! the mesh, using the divergence theorem to turn each volume integral into
//! a sum over facets (Eberly, "Polyhedral Mass Properties").

use super::Mesh;
use nalgebra::{Matrix3, Point3};
use serde::{Deserialize, Serialize};

/// Mass properties at unit density
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MassProperties {
    /// Enclosed volume in cubic model units (mm³ for STL jewellery models)
    pub volume: f64,
    /// Centre of gravity [x, y, z]
    pub centre_of_gravity: [f64; 3],
    /// Inertia tensor about the centre of gravity
    pub inertia: Matrix3<f64>,
    pub triangle_count: usize,
    /// Every edge shared by exactly two facets
    pub is_closed: bool,
}

impl MassProperties {
    pub fn empty() -> Self {
        Self {
            volume: 0.0,
            centre_of_gravity: [0.0; 3],
            inertia: Matrix3::zeros(),
            triangle_count: 0,
            is_closed: false,
        }
    }
}

/// Compute mass properties of a mesh.
///
/// The volume is reported as an absolute value so that meshes wound
/// inside-out still yield a usable magnitude. Centre of gravity and inertia
/// are computed from the signed integrals and are unaffected by winding.
pub fn mass_properties(mesh: &Mesh) -> MassProperties {
    if mesh.is_empty() {
        return MassProperties::empty();
    }

    let integrals = surface_integrals(mesh);
    let volume = integrals[0];

    if volume == 0.0 {
        return MassProperties {
            triangle_count: mesh.triangle_count(),
            is_closed: mesh.is_closed(),
            ..MassProperties::empty()
        };
    }

    let cx = integrals[1] / volume;
    let cy = integrals[2] / volume;
    let cz = integrals[3] / volume;

    let ixx = integrals[5] + integrals[6] - volume * (cy * cy + cz * cz);
    let iyy = integrals[4] + integrals[6] - volume * (cz * cz + cx * cx);
    let izz = integrals[4] + integrals[5] - volume * (cx * cx + cy * cy);
    let ixy = -(integrals[7] - volume * cx * cy);
    let iyz = -(integrals[8] - volume * cy * cz);
    let ixz = -(integrals[9] - volume * cz * cx);

    // Signed integrals flip together with the winding; normalise to an
    // outward-wound solid so the tensor is positive.
    let sign = volume.signum();
    let inertia = Matrix3::new(
        ixx, ixy, ixz,
        ixy, iyy, iyz,
        ixz, iyz, izz,
    ) * sign;

    MassProperties {
        volume: volume.abs(),
        centre_of_gravity: [cx, cy, cz],
        inertia,
        triangle_count: mesh.triangle_count(),
        is_closed: mesh.is_closed(),
    }
}

/// Volume only, skips the inertia work
pub fn volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .map(|triangle| {
            let [v0, v1, v2] = mesh.corners(triangle);
            v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
        })
        .sum::<f64>()
        .abs()
}

struct Subexpressions {
    f1: f64,
    f2: f64,
    f3: f64,
    g0: f64,
    g1: f64,
    g2: f64,
}

fn subexpressions(w0: f64, w1: f64, w2: f64) -> Subexpressions {
    let temp0 = w0 + w1;
    let f1 = temp0 + w2;
    let temp1 = w0 * w0;
    let temp2 = temp1 + w1 * temp0;
    let f2 = temp2 + w2 * f1;
    let f3 = w0 * temp1 + w1 * temp2 + w2 * f2;

    Subexpressions {
        f1,
        f2,
        f3,
        g0: f2 + w0 * (f1 + w0),
        g1: f2 + w1 * (f1 + w1),
        g2: f2 + w2 * (f1 + w2),
    }
}

/// Integrals of 1, x, y, z, x², y², z², xy, yz, zx over the enclosed solid
fn surface_integrals(mesh: &Mesh) -> [f64; 10] {
    const SCALE: [f64; 10] = [
        1.0 / 6.0,
        1.0 / 24.0,
        1.0 / 24.0,
        1.0 / 24.0,
        1.0 / 60.0,
        1.0 / 60.0,
        1.0 / 60.0,
        1.0 / 120.0,
        1.0 / 120.0,
        1.0 / 120.0,
    ];

    let mut intg = [0.0f64; 10];

    for triangle in &mesh.triangles {
        let [p0, p1, p2]: [Point3<f64>; 3] = mesh.corners(triangle);

        // Unnormalised facet normal
        let d = (p1 - p0).cross(&(p2 - p0));

        let sx = subexpressions(p0.x, p1.x, p2.x);
        let sy = subexpressions(p0.y, p1.y, p2.y);
        let sz = subexpressions(p0.z, p1.z, p2.z);

        intg[0] += d.x * sx.f1;
        intg[1] += d.x * sx.f2;
        intg[2] += d.y * sy.f2;
        intg[3] += d.z * sz.f2;
        intg[4] += d.x * sx.f3;
        intg[5] += d.y * sy.f3;
        intg[6] += d.z * sz.f3;
        intg[7] += d.x * (p0.y * sx.g0 + p1.y * sx.g1 + p2.y * sx.g2);
        intg[8] += d.y * (p0.z * sy.g0 + p1.z * sy.g1 + p2.z * sy.g2);
        intg[9] += d.z * (p0.x * sz.g0 + p1.x * sz.g1 + p2.x * sz.g2);
    }

    for (value, scale) in intg.iter_mut().zip(SCALE) {
        *value *= scale;
    }

    intg
}
