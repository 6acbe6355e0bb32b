//! Calculation logic for the billing engine.
//!
//! This module contains the per-rule billing calculations (base service
//! detail, meal addition, pickup addition, absence-with-notice addition),
//! the monthly billing aggregation, and the wage calculation.

mod absence_addition;
mod base_service;
mod billing;
mod meal_addition;
mod pickup_addition;
mod wage;

pub use absence_addition::{
    ABSENCE_ADDITION_CODE, ABSENCE_ADDITION_MONTHLY_CAP, ABSENCE_ADDITION_UNITS,
    absence_addition,
};
pub use base_service::{base_service_code, base_service_detail};
pub use billing::calculate_monthly_billing;
pub use meal_addition::{MEAL_ADDITION_CODE, MEAL_ADDITION_UNITS, meal_addition};
pub use pickup_addition::{PICKUP_ADDITION_CODE, PICKUP_ADDITION_UNITS, pickup_addition};
pub use wage::calculate_monthly_wage;
