// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Catalog pipeline - discovery, measurement, rows and CSV output

pub mod discovery;
pub mod pipeline;
pub mod report;
pub mod row;
pub mod volume;
pub mod writer;

pub use discovery::{is_mesh_file_name, list_mesh_files, MeshFile};
pub use pipeline::{Pipeline, Quote};
pub use report::{BatchReport, SkippedFile};
pub use row::{format_amount, header, round_to_cents, CatalogRow};
pub use volume::{compute_volume_with_timeout, StlVolume, VolumeSource};
pub use writer::{render_catalog, write_catalog};
