// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSV catalog writer

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::row::{header, CatalogRow};
use crate::error::Result;
use crate::pricing::MaterialProfile;

/// Write the header and rows as CSV to any writer
pub fn render_catalog<W: Write>(
    writer: W,
    materials: &[MaterialProfile],
    rows: &[CatalogRow],
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header(materials))?;
    for row in rows {
        csv.write_record(row.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Replace the table at `path` with a freshly written one.
///
/// Rows go to a temporary file next to `path` which is renamed over the old
/// table once complete, so a failed write leaves the previous table intact.
pub fn write_catalog(path: &Path, materials: &[MaterialProfile], rows: &[CatalogRow]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    render_catalog(tmp.as_file_mut(), materials, rows)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
