//! Wage result models and wage calculation configuration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// Tunable wage calculation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageConfig {
    /// The statutory minimum average monthly wage in yen.
    pub minimum_average_monthly_wage: i64,
    /// Bonus in yen paid for attending every expected business day.
    pub perfect_attendance_bonus: i64,
    /// Deduction rate applied to the total wage (0 = no deductions).
    pub deduction_rate: Decimal,
}

impl Default for WageConfig {
    fn default() -> Self {
        Self {
            minimum_average_monthly_wage: 3000,
            perfect_attendance_bonus: 1000,
            deduction_rate: Decimal::ZERO,
        }
    }
}

/// The computed wage payout for one user for one month.
///
/// `total_wage = base_wage + skill_wage + attendance_bonus` and
/// `net_wage = total_wage − deductions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWageResult {
    /// The paid user.
    pub user_id: String,
    /// Number of present days in the month.
    pub attendance_days: u32,
    /// Total recorded work minutes.
    pub work_minutes: u32,
    /// Production wage in yen, rounded per output record.
    pub base_wage: i64,
    /// Skill supplement in yen (currently always 0).
    pub skill_wage: i64,
    /// Perfect-attendance bonus in yen, or 0.
    pub attendance_bonus: i64,
    /// Gross wage in yen.
    pub total_wage: i64,
    /// Deductions in yen.
    pub deductions: i64,
    /// Net payout in yen.
    pub net_wage: i64,
}

/// The computed wage payouts for one facility for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyWageResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The facility paid.
    pub facility_id: String,
    /// The wage period.
    pub year_month: YearMonth,
    /// Per-user results; users with no present days are excluded.
    pub users: Vec<UserWageResult>,
    /// Sum of user net wages in yen.
    pub total_wage: i64,
    /// `round(total_wage / user_count)` in yen; 0 with no users.
    pub average_wage: i64,
    /// Whether the average meets the configured minimum.
    pub meets_minimum_threshold: bool,
}
