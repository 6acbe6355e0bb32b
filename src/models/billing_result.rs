//! Billing result models.
//!
//! These types capture the output of the billing calculator: one
//! [`ServiceDetail`] per billed line item, one [`UserBillingResult`] per
//! billed user, and a [`MonthlyBillingResult`] aggregating the facility.
//!
//! Invariants maintained by the calculator and checked by the validator:
//! `total_units = Σ detail.subtotal_units`,
//! `total_amount = floor(total_units × area_unit_price)`,
//! `copayment_amount = min(total_amount, copayment_limit)`,
//! `benefit_amount = total_amount − copayment_amount`, and facility totals
//! are sums over users.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// A single billed line item: base service or an addition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDetail {
    /// The government service code.
    pub service_code: String,
    /// Human-readable name of the line item.
    pub name: String,
    /// Units per occurrence.
    pub units: i64,
    /// Number of occurrences in the month.
    pub count: u32,
    /// `units × count`.
    pub subtotal_units: i64,
}

/// The computed claim for one user for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBillingResult {
    /// The billed user.
    pub user_id: String,
    /// The user's 10-digit recipient number.
    pub recipient_number: String,
    /// Number of present days in the month.
    pub attendance_days: u32,
    /// Billed line items, base service first.
    pub details: Vec<ServiceDetail>,
    /// Sum of detail subtotal units.
    pub total_units: i64,
    /// `floor(total_units × area_unit_price)` in yen.
    pub total_amount: i64,
    /// `min(total_amount, copayment_limit)` in yen.
    pub copayment_amount: i64,
    /// `total_amount − copayment_amount` in yen.
    pub benefit_amount: i64,
}

/// The computed claim for one facility for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBillingResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The facility billed.
    pub facility_id: String,
    /// The billing period.
    pub year_month: YearMonth,
    /// The yen-per-unit price applied, from the facility's area grade.
    pub area_unit_price: Decimal,
    /// Per-user results; users with no present days are excluded.
    pub users: Vec<UserBillingResult>,
    /// Sum of user total units.
    pub total_units: i64,
    /// Sum of user total amounts in yen.
    pub total_amount: i64,
    /// Sum of user copayments in yen.
    pub total_copayment: i64,
    /// Sum of user benefit amounts in yen.
    pub total_benefit: i64,
}
