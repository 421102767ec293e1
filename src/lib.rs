// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshprice
//!
//! Builds a price catalog from a folder of STL models: each mesh's volume is
//! measured, converted to a weight per alloy and priced with a fixed
//! markup, overhead, labour and tax formula. The result is one CSV table.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod pricing;

pub use catalog::{BatchReport, CatalogRow, MeshFile, Pipeline, StlVolume, VolumeSource};
pub use config::PricingConfig;
pub use error::{PricingError, Result};
pub use geometry::{mass_properties, MassProperties, Mesh};
pub use pricing::{compute_pricing, compute_weights, MaterialProfile, PricingConstants};

/// Build the catalog described by `config` from STL files
pub fn run(config: PricingConfig) -> Result<BatchReport> {
    Pipeline::new(config).run()
}
