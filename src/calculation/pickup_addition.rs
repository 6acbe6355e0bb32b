//! Pickup service addition (送迎加算).

use crate::models::{Attendance, ServiceDetail};

/// Units per one-way trip.
pub const PICKUP_ADDITION_UNITS: i64 = 21;

/// Service code for the pickup addition.
pub const PICKUP_ADDITION_CODE: &str = "635490";

/// Calculates the pickup addition: 21 units per one-way trip, summed
/// across the month's records (`pickup_only`/`dropoff_only` count one
/// trip, `both` counts two). Returns `None` when no trips were taken.
pub fn pickup_addition(attendances: &[Attendance]) -> Option<ServiceDetail> {
    let trips: u32 = attendances
        .iter()
        .map(|a| a.pickup_type.one_way_trips())
        .sum();

    if trips == 0 {
        return None;
    }

    Some(ServiceDetail {
        service_code: PICKUP_ADDITION_CODE.to_string(),
        name: "送迎加算".to_string(),
        units: PICKUP_ADDITION_UNITS,
        count: trips,
        subtotal_units: PICKUP_ADDITION_UNITS * i64::from(trips),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceType, PickupType};
    use chrono::NaiveDate;

    fn attendance(day: u32, pickup: PickupType) -> Attendance {
        Attendance {
            user_id: "user_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            attendance_type: AttendanceType::Present,
            pickup_type: pickup,
            meal_provided: false,
        }
    }

    #[test]
    fn test_both_counts_two_trips() {
        let records = vec![
            attendance(1, PickupType::Both),
            attendance(2, PickupType::PickupOnly),
            attendance(3, PickupType::DropoffOnly),
            attendance(4, PickupType::None),
        ];
        let detail = pickup_addition(&records).unwrap();
        assert_eq!(detail.count, 4);
        assert_eq!(detail.subtotal_units, 84);
    }

    #[test]
    fn test_no_trips_omits_detail() {
        let records = vec![attendance(1, PickupType::None)];
        assert!(pickup_addition(&records).is_none());
        assert!(pickup_addition(&[]).is_none());
    }
}
