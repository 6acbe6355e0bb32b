//! Billing and wage calculation engine for B-type employment support facilities.
//!
//! This crate computes monthly Kokuho-Ren billing claims and user wage payouts
//! from attendance and production records, validates the results, and encodes
//! them as the fixed-format government submission file and the wage report CSV.

#![warn(missing_docs)]

pub mod calculation;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod rates;
pub mod validation;
