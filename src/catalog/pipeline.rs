// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pricing pipeline - enumerate, measure, price, write

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::discovery::{list_mesh_files, MeshFile};
use super::report::{BatchReport, SkippedFile};
use super::row::CatalogRow;
use super::volume::{compute_volume_with_timeout, StlVolume, VolumeSource};
use super::writer::write_catalog;
use crate::config::PricingConfig;
use crate::error::{PricingError, Result};
use crate::geometry::{mass_properties, MassProperties};
use crate::io::load_stl;

/// Mass properties and prices of a single mesh
#[derive(Debug, Clone)]
pub struct Quote {
    pub mass: MassProperties,
    pub row: CatalogRow,
}

/// Builds the price catalog for one source directory
pub struct Pipeline {
    config: PricingConfig,
    source: Arc<dyn VolumeSource>,
}

impl Pipeline {
    /// Pipeline measuring STL files
    pub fn new(config: PricingConfig) -> Self {
        Self::with_source(config, Arc::new(StlVolume))
    }

    pub fn with_source(config: PricingConfig, source: Arc<dyn VolumeSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Run the whole batch and write the table.
    ///
    /// With `fail_fast` the per-file error of the first failing file in name
    /// order aborts the run before the table is written. Otherwise failing files are logged, left out of the
    /// table and listed in the report.
    pub fn run(&self) -> Result<BatchReport> {
        self.config.validate()?;

        let start = Instant::now();
        let mut report = BatchReport::new(self.config.source_dir.clone(), self.config.output.clone());

        let files = list_mesh_files(&self.config.source_dir, &self.config.extension)?;
        report.files_found = files.len();
        tracing::info!(
            count = files.len(),
            dir = %self.config.source_dir.display(),
            "Discovered mesh files"
        );

        let progress = self.progress_bar(files.len());

        // Lowest index that has failed so far; later files are not measured
        let first_failure = AtomicUsize::new(usize::MAX);
        let outcomes = self.in_pool(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(index, file)| {
                    if self.config.fail_fast && index > first_failure.load(Ordering::Relaxed) {
                        return None;
                    }
                    let outcome = self.process_file(file, progress.as_ref());
                    if self.config.fail_fast && outcome.is_err() {
                        first_failure.fetch_min(index, Ordering::Relaxed);
                    }
                    Some(outcome)
                })
                .collect::<Vec<_>>()
        })?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        // Walk in file order so the reported failure does not depend on scheduling
        let mut rows = Vec::with_capacity(outcomes.len());
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Some(Ok(row)) => rows.push(row),
                Some(Err(e)) if e.is_per_file() && !self.config.fail_fast => {
                    report.skipped.push(SkippedFile {
                        file: file.name.clone(),
                        error: e.to_string(),
                    });
                }
                Some(Err(e)) => return Err(e),
                None => {}
            }
        }

        write_catalog(&self.config.output, &self.config.materials, &rows)?;

        report.rows_written = rows.len();
        report.duration = start.elapsed();
        tracing::info!(
            rows = report.rows_written,
            skipped = report.skipped.len(),
            output = %self.config.output.display(),
            "Catalog written"
        );

        Ok(report)
    }

    /// Measure and price one file
    pub fn process_file(&self, file: &MeshFile, progress: Option<&ProgressBar>) -> Result<CatalogRow> {
        let result = compute_volume_with_timeout(&self.source, file, self.config.file_timeout())
            .map(|volume| {
                tracing::debug!(file = %file.name, volume_mm3 = volume, "Measured mesh");
                CatalogRow::price(
                    file.name.clone(),
                    volume,
                    &self.config.materials,
                    &self.config.constants,
                )
            });

        if let Err(ref e) = result {
            let log = || tracing::warn!(file = %file.name, error = %e, "Failed to price mesh");
            match progress {
                Some(pb) => pb.suspend(log),
                None => log(),
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }

        result
    }

    /// Load one STL file and price it without writing anything
    pub fn quote(&self, path: &Path) -> Result<Quote> {
        self.config.validate()?;

        let mesh = load_stl(path)?;
        let mass = mass_properties(&mesh);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let row = CatalogRow::price(name, mass.volume, &self.config.materials, &self.config.constants);
        Ok(Quote { mass, row })
    }

    /// Run `op` on a pool sized by `parallelism`, or the global pool
    fn in_pool<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.config.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| PricingError::InvalidConfiguration(e.to_string()))?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.config.show_progress || len == 0 {
            return None;
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::MaterialProfile;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    /// Volumes keyed by file name; unknown names fail like corrupt meshes
    struct FakeVolumes(HashMap<String, f64>);

    impl VolumeSource for FakeVolumes {
        fn compute_volume(&self, path: &Path) -> Result<f64> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.0
                .get(&name)
                .copied()
                .ok_or_else(|| PricingError::mesh_read(name, "not a mesh"))
        }
    }

    fn fixture(files: &[&str]) -> anyhow::Result<(TempDir, PricingConfig)> {
        let dir = tempdir()?;
        let source_dir = dir.path().join("STL_Files");
        fs::create_dir(&source_dir)?;
        for name in files {
            fs::write(source_dir.join(name), b"")?;
        }

        let config = PricingConfig {
            source_dir,
            output: dir.path().join("volume.csv"),
            show_progress: false,
            parallelism: Some(2),
            ..PricingConfig::default()
        };
        Ok((dir, config))
    }

    fn fake(volumes: &[(&str, f64)]) -> Arc<dyn VolumeSource> {
        Arc::new(FakeVolumes(
            volumes.iter().map(|(n, v)| (n.to_string(), *v)).collect(),
        ))
    }

    fn read_lines(path: &PathBuf) -> anyhow::Result<Vec<String>> {
        Ok(fs::read_to_string(path)?.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_rows_in_file_name_order() -> anyhow::Result<()> {
        let (_dir, config) = fixture(&["c.stl", "a.stl", "b.stl", "._a.stl", "readme.md"])?;
        let source = fake(&[("a.stl", 1000.0), ("b.stl", 2000.0), ("c.stl", 3000.0)]);

        let report = Pipeline::with_source(config.clone(), source).run()?;
        assert_eq!(report.files_found, 3);
        assert_eq!(report.rows_written, 3);
        assert!(!report.has_skipped());

        let lines = read_lines(&config.output)?;
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("a.stl,1000.00,10.50,11.50,14.20,"));
        assert!(lines[2].starts_with("b.stl,2000.00,21.00,"));
        assert!(lines[3].starts_with("c.stl,3000.00,31.50,"));
        Ok(())
    }

    #[test]
    fn test_bad_file_is_skipped() -> anyhow::Result<()> {
        let (_dir, config) = fixture(&["good.stl", "broken.stl"])?;
        let source = fake(&[("good.stl", 500.0)]);

        let report = Pipeline::with_source(config.clone(), source).run()?;
        assert_eq!(report.rows_written, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, "broken.stl");

        let lines = read_lines(&config.output)?;
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("good.stl,"));
        Ok(())
    }

    #[test]
    fn test_fail_fast_writes_nothing() -> anyhow::Result<()> {
        let (_dir, mut config) = fixture(&["good.stl", "broken.stl"])?;
        config.fail_fast = true;
        let source = fake(&[("good.stl", 500.0)]);

        let err = Pipeline::with_source(config.clone(), source).run().unwrap_err();
        assert!(matches!(err, PricingError::MeshRead { .. }));
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_fail_fast_reports_first_failure_in_name_order() -> anyhow::Result<()> {
        let names: Vec<String> = (0..32).map(|i| format!("part_{:02}.stl", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (_dir, mut config) = fixture(&refs)?;
        config.fail_fast = true;
        config.parallelism = Some(8);

        // part_05, part_17 and part_29 are unreadable
        let good: Vec<(&str, f64)> = refs
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 12 != 5)
            .map(|(_, n)| (*n, 100.0))
            .collect();

        for _ in 0..10 {
            let err = Pipeline::with_source(config.clone(), fake(&good))
                .run()
                .unwrap_err();
            match err {
                PricingError::MeshRead { file, .. } => assert_eq!(file, "part_05.stl"),
                other => panic!("unexpected error: {other}"),
            }
        }
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_invalid_config_fails_before_reading() -> anyhow::Result<()> {
        let (_dir, mut config) = fixture(&["a.stl"])?;
        config.materials = vec![MaterialProfile::new("Air", 0.0, 0.0)];

        let err = Pipeline::with_source(config.clone(), fake(&[])).run().unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfiguration(_)));
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_out_of_range_timeout_fails_before_reading() -> anyhow::Result<()> {
        let (_dir, mut config) = fixture(&["a.stl"])?;
        config.file_timeout_secs = Some(1e20);

        let err = Pipeline::with_source(config.clone(), fake(&[("a.stl", 1.0)]))
            .run()
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfiguration(_)));
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_missing_source_dir() -> anyhow::Result<()> {
        let (dir, mut config) = fixture(&[])?;
        config.source_dir = dir.path().join("missing");

        let err = Pipeline::with_source(config.clone(), fake(&[])).run().unwrap_err();
        assert!(matches!(err, PricingError::DirectoryNotFound { .. }));
        assert!(!config.output.exists());
        Ok(())
    }

    #[test]
    fn test_custom_materials_change_columns() -> anyhow::Result<()> {
        let (_dir, mut config) = fixture(&["a.stl"])?;
        config.materials = vec![MaterialProfile::new("Platinum 950", 20.0, 0.0)];

        Pipeline::with_source(config.clone(), fake(&[("a.stl", 1000.0)])).run()?;

        let lines = read_lines(&config.output)?;
        assert_eq!(
            lines[0],
            "Filename,Volume,Weight Platinum 950,Price Platinum 950,Profit Platinum 950"
        );
        // (0 + 14.9 + 65) × 1.19 = 95.081, profit 95.081 − 14.9
        assert_eq!(lines[1], "a.stl,1000.00,20.00,95.08,80.18");
        Ok(())
    }

    #[test]
    fn test_sequential_and_parallel_agree() -> anyhow::Result<()> {
        let names: Vec<String> = (0..32).map(|i| format!("part_{:02}.stl", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let volumes: Vec<(&str, f64)> = refs
            .iter()
            .enumerate()
            .map(|(i, n)| (*n, 100.0 * (i as f64 + 1.0)))
            .collect();

        let (_dir, mut config) = fixture(&refs)?;
        config.parallelism = Some(1);
        Pipeline::with_source(config.clone(), fake(&volumes)).run()?;
        let sequential = fs::read(&config.output)?;

        config.parallelism = Some(8);
        Pipeline::with_source(config.clone(), fake(&volumes)).run()?;
        let parallel = fs::read(&config.output)?;

        assert_eq!(sequential, parallel);
        Ok(())
    }
}
