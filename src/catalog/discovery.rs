// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh file discovery

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PricingError, Result};

/// Resource-fork files written by macOS onto foreign file systems
const HIDDEN_PREFIX: &str = "._";

/// A mesh file found in the source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshFile {
    /// File name including extension, used as the row key
    pub name: String,
    pub path: PathBuf,
}

/// True if `name` is a mesh file name for `extension`
pub fn is_mesh_file_name(name: &str, extension: &str) -> bool {
    name.ends_with(extension) && !name.starts_with(HIDDEN_PREFIX)
}

/// List mesh files directly inside `source_dir`, sorted by file name.
///
/// Sub-directories are not searched. Symlinks to files are followed.
pub fn list_mesh_files(source_dir: &Path, extension: &str) -> Result<Vec<MeshFile>> {
    let not_found = |source: io::Error| PricingError::DirectoryNotFound {
        path: source_dir.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(source_dir).map_err(not_found)?;
    if !metadata.is_dir() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be read
            Err(e) if e.depth() == 0 => return Err(not_found(e.into())),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if is_mesh_file_name(&name, extension) {
            files.push(MeshFile {
                name,
                path: entry.into_path(),
            });
        }
    }

    Ok(files)
}
