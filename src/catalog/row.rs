// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Catalog rows and number formatting

use serde::{Deserialize, Serialize};

use crate::pricing::{compute_pricing, compute_weights, MaterialProfile, PriceResult, PricingConstants};

/// One priced mesh: volume plus weight, price and profit per material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub file_name: String,
    pub volume_mm3: f64,
    /// Grams, in material order
    pub weights: Vec<f64>,
    /// In material order
    pub prices: Vec<PriceResult>,
}

impl CatalogRow {
    /// Price a mesh of `volume_mm3` in every material
    pub fn price(
        file_name: impl Into<String>,
        volume_mm3: f64,
        materials: &[MaterialProfile],
        constants: &PricingConstants,
    ) -> Self {
        let weights: Vec<f64> = compute_weights(volume_mm3, materials)
            .into_iter()
            .map(|w| w.weight_grams)
            .collect();

        let prices = weights
            .iter()
            .zip(materials)
            .map(|(&weight, material)| compute_pricing(weight, material, constants))
            .collect();

        Self {
            file_name: file_name.into(),
            volume_mm3,
            weights,
            prices,
        }
    }

    /// Fields in header order, numbers rounded to cents
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(2 + self.weights.len() * 3);
        record.push(self.file_name.clone());
        record.push(format_amount(self.volume_mm3));
        record.extend(self.weights.iter().map(|&w| format_amount(w)));
        record.extend(self.prices.iter().map(|p| format_amount(p.price)));
        record.extend(self.prices.iter().map(|p| format_amount(p.profit)));
        record
    }
}

/// Column names for a material set
pub fn header(materials: &[MaterialProfile]) -> Vec<String> {
    let mut columns = vec!["Filename".to_string(), "Volume".to_string()];
    for prefix in ["Weight", "Price", "Profit"] {
        columns.extend(materials.iter().map(|m| format!("{} {}", prefix, m.name)));
    }
    columns
}

/// Round to 2 decimals, ties away from zero.
///
/// The tie rule applies to the binary value: 0.125 becomes 0.13, but 1.005
/// is stored as 1.00499999999999989... and becomes 1.00.
pub fn round_to_cents(value: f64) -> f64 {
    // Adding 0.0 turns -0.0 into 0.0
    (value * 100.0).round() / 100.0 + 0.0
}

/// Value rounded to cents with exactly two decimals
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", round_to_cents(value))
}
