// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run summary types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Ok(Duration::from_secs_f64(secs))
}

/// A mesh left out of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub file: String,
    pub error: String,
}

/// Outcome of one pricing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub timestamp: String,
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub files_found: usize,
    pub rows_written: usize,
    pub skipped: Vec<SkippedFile>,
    #[serde(serialize_with = "serialize_duration", deserialize_with = "deserialize_duration")]
    pub duration: Duration,
}

impl BatchReport {
    pub fn new(source_dir: PathBuf, output: PathBuf) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            source_dir,
            output,
            files_found: 0,
            rows_written: 0,
            skipped: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
