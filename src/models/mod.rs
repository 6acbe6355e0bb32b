//! Core data models for the billing engine.
//!
//! This module contains all the domain models used throughout the engine:
//! reference data (facility, users, service codes), per-date records
//! (attendance, production output) and the computed monthly results.

mod attendance;
mod billing_result;
mod facility;
mod product;
mod service_code;
mod service_user;
mod wage_result;
mod year_month;

pub use attendance::{Attendance, AttendanceType, PickupType};
pub use billing_result::{MonthlyBillingResult, ServiceDetail, UserBillingResult};
pub use facility::{Facility, RewardStructure};
pub use product::{ProductActivity, ProductOutput};
pub use service_code::ServiceCode;
pub use service_user::{Gender, ServiceUser};
pub use wage_result::{MonthlyWageResult, UserWageResult, WageConfig};
pub use year_month::YearMonth;
