// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Weight and price calculators

use super::{MaterialProfile, PricingConstants};
use serde::{Deserialize, Serialize};

/// mm³ per cm³
pub const MM3_PER_CM3: f64 = 1000.0;

/// Weight of one mesh in one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightResult {
    pub material: String,
    pub weight_grams: f64,
}

/// Sale price and profit of one mesh in one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub price: f64,
    pub profit: f64,
}

/// Weight in grams of `volume_mm3` of each material, in material order
pub fn compute_weights(volume_mm3: f64, materials: &[MaterialProfile]) -> Vec<WeightResult> {
    let volume_cm3 = volume_mm3 / MM3_PER_CM3;

    materials
        .iter()
        .map(|material| WeightResult {
            material: material.name.clone(),
            weight_grams: volume_cm3 * material.density,
        })
        .collect()
}

/// Price and profit for a piece of `weight` grams.
///
/// Profit nets out material and manufacturing cost but not the labour
/// charge. This matches the pricing sheet in use and is intentional.
pub fn compute_pricing(
    weight: f64,
    profile: &MaterialProfile,
    constants: &PricingConstants,
) -> PriceResult {
    let material_cost = profile.unit_price * weight;

    let price = (material_cost * constants.profit_multiplier
        + constants.manufacturing_cost
        + constants.hourly_wage)
        * (1.0 + constants.tax_rate);

    let profit = price - (material_cost + constants.manufacturing_cost);

    PriceResult { price, profit }
}
