//! Production activity and output models for wage calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A paid work activity with an hourly wage rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductActivity {
    /// Opaque business identifier.
    pub id: String,
    /// Activity name (e.g. 袋詰め, 清掃).
    pub name: String,
    /// Hourly wage rate in yen.
    pub hourly_rate: Decimal,
}

/// Minutes of work a user performed against an activity on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOutput {
    /// The user who performed the work.
    pub user_id: String,
    /// The activity worked on.
    pub activity_id: String,
    /// The date of the work.
    pub date: NaiveDate,
    /// Work duration in minutes.
    pub work_minutes: u32,
}
