// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for the pricing pipeline

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while building a price catalog
#[derive(Debug, Error)]
pub enum PricingError {
    /// Source directory is missing, unreadable or not a directory
    #[error("Source directory not found or unreadable: {}", path.display())]
    DirectoryNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be parsed as a mesh
    #[error("Failed to read mesh {file}: {reason}")]
    MeshRead { file: String, reason: String },

    /// Volume computation did not finish in time
    #[error("Mesh {file} timed out after {:.1}s", timeout.as_secs_f64())]
    Timeout { file: String, timeout: Duration },

    /// A material or pricing constant violates its invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PricingError {
    pub fn mesh_read(file: impl Into<String>, reason: impl ToString) -> Self {
        PricingError::MeshRead {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors scoped to a single file, which the pipeline may skip
    pub fn is_per_file(&self) -> bool {
        matches!(self, PricingError::MeshRead { .. } | PricingError::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
