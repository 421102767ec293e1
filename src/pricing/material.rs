// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Material profiles

use crate::error::{PricingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named alloy with its density and per-gram price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub name: String,
    /// Density in g/cm³
    pub density: f64,
    /// Price per gram
    pub unit_price: f64,
}

impl MaterialProfile {
    pub fn new(name: impl Into<String>, density: f64, unit_price: f64) -> Self {
        Self {
            name: name.into(),
            density,
            unit_price,
        }
    }

    pub fn silver_935() -> Self {
        Self::new("Silver 935", 10.5, 1.0)
    }

    pub fn gold_333() -> Self {
        Self::new("Gold 333", 11.5, 21.4)
    }

    pub fn gold_586() -> Self {
        Self::new("Gold 586", 14.2, 37.7)
    }

    /// The catalog's default alloys, in column order
    pub fn standard_set() -> Vec<Self> {
        vec![Self::silver_935(), Self::gold_333(), Self::gold_586()]
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PricingError::InvalidConfiguration(
                "material name must not be empty".to_string(),
            ));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(PricingError::InvalidConfiguration(format!(
                "material '{}': density must be positive, got {}",
                self.name, self.density
            )));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(PricingError::InvalidConfiguration(format!(
                "material '{}': unit price must not be negative, got {}",
                self.name, self.unit_price
            )));
        }
        Ok(())
    }
}

/// Validate a whole material set: non-empty, each profile valid, unique names
pub fn validate_materials(materials: &[MaterialProfile]) -> Result<()> {
    if materials.is_empty() {
        return Err(PricingError::InvalidConfiguration(
            "at least one material is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for material in materials {
        material.validate()?;
        if !seen.insert(material.name.as_str()) {
            return Err(PricingError::InvalidConfiguration(format!(
                "duplicate material '{}'",
                material.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_is_valid() {
        let materials = MaterialProfile::standard_set();
        assert_eq!(materials.len(), 3);
        assert!(validate_materials(&materials).is_ok());
        assert_eq!(materials[0].name, "Silver 935");
        assert_eq!(materials[2].density, 14.2);
    }

    #[test]
    fn test_rejects_bad_profiles() {
        assert!(MaterialProfile::new("Lead", 0.0, 1.0).validate().is_err());
        assert!(MaterialProfile::new("Lead", -1.0, 1.0).validate().is_err());
        assert!(MaterialProfile::new("Lead", f64::NAN, 1.0).validate().is_err());
        assert!(MaterialProfile::new("Lead", 11.3, -0.5).validate().is_err());
        assert!(MaterialProfile::new(" ", 11.3, 0.5).validate().is_err());
        assert!(MaterialProfile::new("Free", 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(validate_materials(&[]).is_err());
        let dup = vec![MaterialProfile::silver_935(), MaterialProfile::silver_935()];
        assert!(matches!(
            validate_materials(&dup),
            Err(PricingError::InvalidConfiguration(_))
        ));
    }
}
