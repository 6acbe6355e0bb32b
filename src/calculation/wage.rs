//! Monthly wage calculation.
//!
//! Turns attendance and production output into per-user wage payouts.
//! The production wage rounds once per output record, not after summation;
//! downstream reports depend on that exact sequencing.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    Attendance, Facility, MonthlyWageResult, ProductActivity, ProductOutput, ServiceUser,
    UserWageResult, WageConfig, YearMonth,
};

/// Calculates the monthly wage result for a facility.
///
/// Per active user with at least one present day:
/// `base_wage = Σ round(work_minutes / 60 × hourly_rate)` per output
/// record, `attendance_bonus = perfect_attendance_bonus` iff
/// `attendance_days ≥ expected_days`, `deductions = round(total_wage ×
/// deduction_rate)`. The facility average is `round(Σ net_wage /
/// user_count)`, 0 with no users.
pub fn calculate_monthly_wage(
    year_month: YearMonth,
    facility: &Facility,
    users: &[ServiceUser],
    attendance: &HashMap<String, Vec<Attendance>>,
    outputs: &HashMap<String, Vec<ProductOutput>>,
    activities: &[ProductActivity],
    expected_days: u32,
    config: &WageConfig,
) -> MonthlyWageResult {
    let mut user_results = Vec::new();

    for user in users {
        if !user.is_active {
            continue;
        }
        let records = attendance.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
        let attendance_days = records.iter().filter(|a| a.is_present()).count() as u32;
        if attendance_days == 0 {
            continue;
        }

        let user_outputs = outputs.get(&user.id).map(Vec::as_slice).unwrap_or(&[]);
        let (base_wage, work_minutes) = base_wage(user_outputs, activities);
        let skill = skill_wage(user);
        let attendance_bonus = if attendance_days >= expected_days {
            config.perfect_attendance_bonus
        } else {
            0
        };

        let total_wage = base_wage + skill + attendance_bonus;
        let deductions = round_yen(Decimal::from(total_wage) * config.deduction_rate);
        let net_wage = total_wage - deductions;

        user_results.push(UserWageResult {
            user_id: user.id.clone(),
            attendance_days,
            work_minutes,
            base_wage,
            skill_wage: skill,
            attendance_bonus,
            total_wage,
            deductions,
            net_wage,
        });
    }

    let total_wage: i64 = user_results.iter().map(|u| u.net_wage).sum();
    let average_wage = if user_results.is_empty() {
        0
    } else {
        round_yen(Decimal::from(total_wage) / Decimal::from(user_results.len() as i64))
    };
    let meets_minimum_threshold = average_wage >= config.minimum_average_monthly_wage;
    if !meets_minimum_threshold {
        debug!(
            facility_id = %facility.id,
            average_wage,
            minimum = config.minimum_average_monthly_wage,
            "average wage below minimum threshold"
        );
    }

    MonthlyWageResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        facility_id: facility.id.clone(),
        year_month,
        users: user_results,
        total_wage,
        average_wage,
        meets_minimum_threshold,
    }
}

/// Production wage: rounded per output record, in record order. Outputs
/// against an unknown activity contribute nothing.
fn base_wage(outputs: &[ProductOutput], activities: &[ProductActivity]) -> (i64, u32) {
    let mut wage = 0i64;
    let mut minutes = 0u32;
    for output in outputs {
        let Some(activity) = activities.iter().find(|a| a.id == output.activity_id) else {
            continue;
        };
        let hours = Decimal::from(output.work_minutes) / Decimal::from(60);
        wage += round_yen(hours * activity.hourly_rate);
        minutes += output.work_minutes;
    }
    (wage, minutes)
}

/// Skill supplement hook. Always 0 until skill grading lands.
fn skill_wage(_user: &ServiceUser) -> i64 {
    0
}

/// Half-away-from-zero rounding to whole yen.
fn round_yen(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}
