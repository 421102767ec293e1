// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Process-wide pricing constants

use crate::error::{PricingError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConstants {
    /// Markup applied to material cost
    pub profit_multiplier: f64,
    /// Flat manufacturing charge per piece
    pub manufacturing_cost: f64,
    /// One hour of labour per piece
    pub hourly_wage: f64,
    pub tax_rate: f64,
}

impl Default for PricingConstants {
    fn default() -> Self {
        Self {
            profit_multiplier: 1.5,
            manufacturing_cost: 14.9,
            hourly_wage: 65.0,
            tax_rate: 0.19,
        }
    }
}

impl PricingConstants {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(PricingError::InvalidConfiguration(msg));

        if !self.profit_multiplier.is_finite() || self.profit_multiplier < 1.0 {
            return invalid(format!(
                "profit multiplier must be at least 1, got {}",
                self.profit_multiplier
            ));
        }
        if !self.manufacturing_cost.is_finite() || self.manufacturing_cost < 0.0 {
            return invalid(format!(
                "manufacturing cost must not be negative, got {}",
                self.manufacturing_cost
            ));
        }
        if !self.hourly_wage.is_finite() || self.hourly_wage < 0.0 {
            return invalid(format!(
                "hourly wage must not be negative, got {}",
                self.hourly_wage
            ));
        }
        if !(0.0..1.0).contains(&self.tax_rate) {
            return invalid(format!("tax rate must be in [0, 1), got {}", self.tax_rate));
        }
        Ok(())
    }
}
