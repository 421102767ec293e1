// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Volume capability used by the pipeline

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::MeshFile;
use crate::error::{PricingError, Result};
use crate::geometry::volume;
use crate::io::load_stl;

/// Computes the enclosed volume of a mesh file in mm³
pub trait VolumeSource: Send + Sync {
    fn compute_volume(&self, path: &Path) -> Result<f64>;
}

/// Volume of STL files
#[derive(Debug, Clone, Copy, Default)]
pub struct StlVolume;

impl VolumeSource for StlVolume {
    fn compute_volume(&self, path: &Path) -> Result<f64> {
        let mesh = load_stl(path)?;

        if !mesh.is_closed() {
            tracing::warn!(
                file = %path.display(),
                triangles = mesh.triangle_count(),
                "Mesh is not closed, volume may be inaccurate"
            );
        }

        Ok(volume(&mesh))
    }
}

/// Run `source` on `file`, giving up after `timeout`.
///
/// The computation runs on its own thread. On expiry that thread is left to
/// finish in the background and its result is discarded.
pub fn compute_volume_with_timeout(
    source: &Arc<dyn VolumeSource>,
    file: &MeshFile,
    timeout: Option<Duration>,
) -> Result<f64> {
    let Some(timeout) = timeout else {
        return source.compute_volume(&file.path);
    };

    let (tx, rx) = mpsc::channel();
    let worker_source = Arc::clone(source);
    let path = file.path.clone();

    thread::Builder::new()
        .name(format!("volume-{}", file.name))
        .spawn(move || {
            let _ = tx.send(worker_source.compute_volume(&path));
        })?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => Err(PricingError::Timeout {
            file: file.name.clone(),
            timeout,
        }),
        Err(RecvTimeoutError::Disconnected) => Err(PricingError::mesh_read(
            &file.name,
            "volume computation panicked",
        )),
    }
}
