//! Absence-with-notice addition (欠席時対応加算).

use crate::models::{Attendance, AttendanceType, ServiceDetail};

/// Units per notified absence.
pub const ABSENCE_ADDITION_UNITS: i64 = 94;

/// Hard monthly cap on billable notified absences.
pub const ABSENCE_ADDITION_MONTHLY_CAP: u32 = 4;

/// Service code for the absence-with-notice addition.
pub const ABSENCE_ADDITION_CODE: &str = "635495";

/// Calculates the absence addition: 94 units per `absent_notified` record,
/// capped at 4 per month regardless of how many qualifying records exist.
/// Returns `None` when there were no notified absences.
pub fn absence_addition(attendances: &[Attendance]) -> Option<ServiceDetail> {
    let notified = attendances
        .iter()
        .filter(|a| a.attendance_type == AttendanceType::AbsentNotified)
        .count() as u32;

    if notified == 0 {
        return None;
    }

    let count = notified.min(ABSENCE_ADDITION_MONTHLY_CAP);
    Some(ServiceDetail {
        service_code: ABSENCE_ADDITION_CODE.to_string(),
        name: "欠席時対応加算".to_string(),
        units: ABSENCE_ADDITION_UNITS,
        count,
        subtotal_units: ABSENCE_ADDITION_UNITS * i64::from(count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PickupType;
    use chrono::NaiveDate;

    fn attendance(day: u32, attendance_type: AttendanceType) -> Attendance {
        Attendance {
            user_id: "user_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            attendance_type,
            pickup_type: PickupType::None,
            meal_provided: false,
        }
    }

    #[test]
    fn test_counts_notified_absences() {
        let records = vec![
            attendance(1, AttendanceType::AbsentNotified),
            attendance(2, AttendanceType::AbsentNotified),
            attendance(3, AttendanceType::Absent),
        ];
        let detail = absence_addition(&records).unwrap();
        assert_eq!(detail.count, 2);
        assert_eq!(detail.subtotal_units, 188);
    }

    #[test]
    fn test_monthly_cap_of_four() {
        let records: Vec<Attendance> = (1..=7)
            .map(|day| attendance(day, AttendanceType::AbsentNotified))
            .collect();
        let detail = absence_addition(&records).unwrap();
        assert_eq!(detail.count, 4);
        assert_eq!(detail.subtotal_units, 376);
    }

    #[test]
    fn test_unnotified_absence_does_not_count() {
        let records = vec![
            attendance(1, AttendanceType::Absent),
            attendance(2, AttendanceType::Leave),
        ];
        assert!(absence_addition(&records).is_none());
    }
}
