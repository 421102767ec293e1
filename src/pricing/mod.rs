// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Pricing module - materials, constants and the price formula

mod calculator;
mod constants;
mod material;

pub use calculator::{compute_pricing, compute_weights, PriceResult, WeightResult, MM3_PER_CM3};
pub use constants::PricingConstants;
pub use material::{validate_materials, MaterialProfile};
