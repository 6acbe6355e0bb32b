//! Area-grade unit price table.

use rust_decimal::Decimal;

/// Returns the yen-per-unit price for an area grade (地域区分).
///
/// Grades 1–7 map to the statutory table; grade 0 and any other value
/// fall back to the "other" (その他) price.
///
/// # Example
///
/// ```
/// use billing_engine::rates::area_unit_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(area_unit_price(1), Decimal::new(1140, 2));
/// assert_eq!(area_unit_price(0), Decimal::new(1000, 2));
/// assert_eq!(area_unit_price(99), area_unit_price(0));
/// ```
pub fn area_unit_price(grade: u8) -> Decimal {
    match grade {
        1 => Decimal::new(1140, 2), // 11.40
        2 => Decimal::new(1112, 2), // 11.12
        3 => Decimal::new(1105, 2), // 11.05
        4 => Decimal::new(1084, 2), // 10.84
        5 => Decimal::new(1070, 2), // 10.70
        6 => Decimal::new(1042, 2), // 10.42
        7 => Decimal::new(1021, 2), // 10.21
        _ => Decimal::new(1000, 2), // その他 10.00
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_one_price() {
        assert_eq!(area_unit_price(1), Decimal::new(1140, 2));
    }

    #[test]
    fn test_prices_descend_with_grade() {
        for grade in 1..7 {
            assert!(
                area_unit_price(grade) > area_unit_price(grade + 1),
                "grade {} should be priced above grade {}",
                grade,
                grade + 1
            );
        }
    }

    #[test]
    fn test_unknown_grades_fall_back_to_other() {
        assert_eq!(area_unit_price(8), area_unit_price(0));
        assert_eq!(area_unit_price(255), area_unit_price(0));
    }
}
