// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use anyhow::Result;
use colored::*;
use std::fs;
use std::path::Path;

use crate::catalog::{format_amount, BatchReport, Quote};
use crate::pricing::MaterialProfile;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Write the run summary as JSON
    pub fn write_json(report: &BatchReport, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Print terminal summary of a catalog run
    pub fn print_summary(report: &BatchReport, verbose: bool) {
        println!("\n{}", "═".repeat(80).white());
        println!("{}", "Price Catalog".bold());
        println!("{}", "═".repeat(80).white());
        println!("  {} {}", "Source:".white(), report.source_dir.display().to_string().cyan());
        println!("  {} {}", "Output:".white(), report.output.display().to_string().cyan());
        println!("  {} {}", "Meshes found:".white(), report.files_found.to_string().cyan());
        println!("  {} {}", "Rows written:".white(), report.rows_written.to_string().green());
        println!(
            "  {} {}",
            "Skipped:".white(),
            if report.has_skipped() {
                report.skipped.len().to_string().red()
            } else {
                "0".to_string().green()
            }
        );
        println!(
            "  {} {:.2}s",
            "Duration:".white(),
            report.duration.as_secs_f64()
        );

        if report.has_skipped() {
            println!("\n{}", "Skipped meshes:".yellow().bold());
            for skipped in &report.skipped {
                if verbose {
                    println!("  {} {}: {}", "✗".red(), skipped.file, skipped.error.bright_black());
                } else {
                    println!("  {} {}", "✗".red(), skipped.file);
                }
            }
        }

        println!("{}", "═".repeat(80).white());
    }

    /// Print mass properties and prices of one mesh
    pub fn print_quote(quote: &Quote, materials: &[MaterialProfile]) {
        let mass = &quote.mass;
        let row = &quote.row;

        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), row.file_name.cyan());
        println!("{}", "━".repeat(80).bright_black());

        println!("  {:<20} {:>14} mm³", "Volume", format_amount(mass.volume));
        println!(
            "  {:<20} ({:.3}, {:.3}, {:.3})",
            "Centre of gravity",
            mass.centre_of_gravity[0],
            mass.centre_of_gravity[1],
            mass.centre_of_gravity[2]
        );
        println!("  {:<20} {:>14}", "Triangles", mass.triangle_count);
        println!(
            "  {:<20} {:>14}",
            "Closed",
            if mass.is_closed { "yes".green() } else { "no".red() }
        );

        println!("\n  {}", "Inertia (unit density):".bold());
        for r in 0..3 {
            println!(
                "    [{:>14.3} {:>14.3} {:>14.3}]",
                mass.inertia[(r, 0)],
                mass.inertia[(r, 1)],
                mass.inertia[(r, 2)]
            );
        }

        println!(
            "\n  {:<16} {:>12} {:>12} {:>12}",
            "Material".bold(),
            "Weight g".bold(),
            "Price".bold(),
            "Profit".bold()
        );
        for ((material, weight), price) in materials.iter().zip(&row.weights).zip(&row.prices) {
            println!(
                "  {:<16} {:>12} {:>12} {:>12}",
                material.name,
                format_amount(*weight),
                format_amount(price.price).green(),
                format_amount(price.profit)
            );
        }

        if !mass.is_closed {
            println!(
                "\n{}",
                "Mesh is not closed; volume and prices may be inaccurate".yellow()
            );
        }
    }
}
