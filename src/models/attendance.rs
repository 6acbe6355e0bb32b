//! Attendance models: daily attendance, pickup usage and meal provision.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a user's day was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    /// Attended.
    Present,
    /// Absent without notice.
    Absent,
    /// Absent with prior notice; qualifies for the absence addition.
    AbsentNotified,
    /// Facility holiday.
    Holiday,
    /// Approved leave.
    Leave,
}

/// Pickup service usage on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupType {
    /// No pickup service used.
    None,
    /// Pickup on the way in only.
    PickupOnly,
    /// Drop-off on the way home only.
    DropoffOnly,
    /// Both directions.
    Both,
}

impl PickupType {
    /// Number of one-way trips this usage represents.
    pub fn one_way_trips(&self) -> u32 {
        match self {
            PickupType::None => 0,
            PickupType::PickupOnly | PickupType::DropoffOnly => 1,
            PickupType::Both => 2,
        }
    }
}

/// One attendance record per user per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    /// The user this record belongs to.
    pub user_id: String,
    /// The date of the record.
    pub date: NaiveDate,
    /// How the day was recorded.
    pub attendance_type: AttendanceType,
    /// Pickup service usage.
    pub pickup_type: PickupType,
    /// Whether a meal was provided.
    pub meal_provided: bool,
}

impl Attendance {
    /// True when the user actually attended.
    pub fn is_present(&self) -> bool {
        self.attendance_type == AttendanceType::Present
    }
}
