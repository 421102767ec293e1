// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and mass properties

mod analytics;
mod mesh;

pub use analytics::{mass_properties, volume, MassProperties};
pub use mesh::{Mesh, Triangle};
