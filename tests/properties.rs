//! Property tests for the arithmetic and encoding invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use billing_engine::calculation::{ABSENCE_ADDITION_MONTHLY_CAP, absence_addition};
use billing_engine::models::{Attendance, AttendanceType, PickupType};
use billing_engine::rates::area_unit_price;

fn notified_absences(count: u32) -> Vec<Attendance> {
    (0..count)
        .map(|i| Attendance {
            user_id: "user_001".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1 + (i % 28)).unwrap(),
            attendance_type: AttendanceType::AbsentNotified,
            pickup_type: PickupType::None,
            meal_provided: false,
        })
        .collect()
}

proptest! {
    #[test]
    fn copayment_and_benefit_identities_hold(
        total_units in 0i64..60_000,
        grade in 0u8..=10,
        copayment_limit in 0i64..500_000,
    ) {
        let total_amount = (Decimal::from(total_units) * area_unit_price(grade))
            .floor()
            .to_i64()
            .unwrap();
        let copayment = total_amount.min(copayment_limit);
        let benefit = total_amount - copayment;

        prop_assert!(copayment <= total_amount);
        prop_assert!(copayment <= copayment_limit);
        prop_assert!(benefit >= 0);
        prop_assert_eq!(copayment + benefit, total_amount);
    }

    #[test]
    fn absence_addition_never_exceeds_cap(count in 0u32..40) {
        let records = notified_absences(count);
        match absence_addition(&records) {
            None => prop_assert_eq!(count, 0),
            Some(detail) => {
                prop_assert!(detail.count <= ABSENCE_ADDITION_MONTHLY_CAP);
                prop_assert_eq!(detail.count, count.min(ABSENCE_ADDITION_MONTHLY_CAP));
            }
        }
    }

    #[test]
    fn area_price_total_is_monotonic_in_units(
        units_a in 0i64..40_000,
        units_b in 0i64..40_000,
        grade in 0u8..=7,
    ) {
        let amount = |units: i64| {
            (Decimal::from(units) * area_unit_price(grade))
                .floor()
                .to_i64()
                .unwrap()
        };
        if units_a <= units_b {
            prop_assert!(amount(units_a) <= amount(units_b));
        } else {
            prop_assert!(amount(units_a) >= amount(units_b));
        }
    }
}
