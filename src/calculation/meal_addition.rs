//! Meal provision addition (食事提供体制加算).

use crate::models::{Attendance, ServiceDetail};

/// Units per meal-provided present day.
pub const MEAL_ADDITION_UNITS: i64 = 30;

/// Service code for the meal provision addition.
pub const MEAL_ADDITION_CODE: &str = "635480";

/// Calculates the meal addition: 30 units per present day on which a meal
/// was provided. Returns `None` when no qualifying days exist, so the
/// detail line is omitted entirely.
pub fn meal_addition(attendances: &[Attendance]) -> Option<ServiceDetail> {
    let count = attendances
        .iter()
        .filter(|a| a.is_present() && a.meal_provided)
        .count() as u32;

    if count == 0 {
        return None;
    }

    Some(ServiceDetail {
        service_code: MEAL_ADDITION_CODE.to_string(),
        name: "食事提供体制加算".to_string(),
        units: MEAL_ADDITION_UNITS,
        count,
        subtotal_units: MEAL_ADDITION_UNITS * i64::from(count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceType, PickupType};
    use chrono::NaiveDate;

    fn attendance(day: u32, attendance_type: AttendanceType, meal: bool) -> Attendance {
        Attendance {
            user_id: "user_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            attendance_type,
            pickup_type: PickupType::None,
            meal_provided: meal,
        }
    }

    #[test]
    fn test_counts_meal_provided_present_days() {
        let records = vec![
            attendance(1, AttendanceType::Present, true),
            attendance(2, AttendanceType::Present, true),
            attendance(3, AttendanceType::Present, false),
        ];
        let detail = meal_addition(&records).unwrap();
        assert_eq!(detail.count, 2);
        assert_eq!(detail.subtotal_units, 60);
    }

    #[test]
    fn test_absent_days_do_not_count() {
        let records = vec![
            attendance(1, AttendanceType::AbsentNotified, true),
            attendance(2, AttendanceType::Holiday, true),
        ];
        assert!(meal_addition(&records).is_none());
    }

    #[test]
    fn test_zero_qualifying_days_omits_detail() {
        let records = vec![attendance(1, AttendanceType::Present, false)];
        assert!(meal_addition(&records).is_none());
        assert!(meal_addition(&[]).is_none());
    }
}
