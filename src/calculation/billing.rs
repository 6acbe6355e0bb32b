//! Monthly billing calculation.
//!
//! Turns attendance and facility configuration into per-user and
//! facility-level claim amounts. Business conditions that produce nothing
//! to bill (inactive users, no present days) are handled by exclusion,
//! never by error.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;
use uuid::Uuid;

use super::{absence_addition, base_service_detail, meal_addition, pickup_addition};
use crate::models::{
    Attendance, Facility, MonthlyBillingResult, ServiceUser, UserBillingResult, YearMonth,
};
use crate::rates::area_unit_price;

/// Calculates the monthly billing result for a facility.
///
/// For each active user with at least one present day, builds the base
/// service detail plus any applicable additions, then derives the amount
/// chain: `total_amount = floor(total_units × area_unit_price)`,
/// `copayment_amount = min(total_amount, copayment_limit)`,
/// `benefit_amount = total_amount − copayment_amount`. Users with no
/// present days are silently excluded.
pub fn calculate_monthly_billing(
    year_month: YearMonth,
    facility: &Facility,
    users: &[ServiceUser],
    attendance: &HashMap<String, Vec<Attendance>>,
) -> MonthlyBillingResult {
    let unit_price = area_unit_price(facility.area_grade);
    let mut user_results = Vec::new();

    for user in users {
        if !user.is_active {
            continue;
        }
        let records = attendance.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
        if let Some(result) = calculate_user_billing(facility, user, records, unit_price) {
            user_results.push(result);
        } else {
            debug!(user_id = %user.id, "no present days, excluded from billing");
        }
    }

    let total_units = user_results.iter().map(|u| u.total_units).sum();
    let total_amount = user_results.iter().map(|u| u.total_amount).sum();
    let total_copayment = user_results.iter().map(|u| u.copayment_amount).sum();
    let total_benefit = user_results.iter().map(|u| u.benefit_amount).sum();

    MonthlyBillingResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        facility_id: facility.id.clone(),
        year_month,
        area_unit_price: unit_price,
        users: user_results,
        total_units,
        total_amount,
        total_copayment,
        total_benefit,
    }
}

fn calculate_user_billing(
    facility: &Facility,
    user: &ServiceUser,
    records: &[Attendance],
    unit_price: Decimal,
) -> Option<UserBillingResult> {
    let present_days = records.iter().filter(|a| a.is_present()).count() as u32;
    if present_days == 0 {
        return None;
    }

    let mut details = vec![base_service_detail(facility, present_days)];
    details.extend(meal_addition(records));
    details.extend(pickup_addition(records));
    details.extend(absence_addition(records));

    let total_units: i64 = details.iter().map(|d| d.subtotal_units).sum();
    let total_amount = (Decimal::from(total_units) * unit_price)
        .floor()
        .to_i64()
        .unwrap_or(0);
    let copayment_amount = total_amount.min(user.copayment_limit);
    let benefit_amount = total_amount - copayment_amount;

    Some(UserBillingResult {
        user_id: user.id.clone(),
        recipient_number: user.recipient_number.clone(),
        attendance_days: present_days,
        details,
        total_units,
        total_amount,
        copayment_amount,
        benefit_amount,
    })
}
