//! Base service detail calculation.
//!
//! Resolves the facility's base billing units from the rate engine and
//! multiplies them by the user's present days.

use crate::models::{Facility, RewardStructure, ServiceDetail};
use crate::rates::base_units;

/// The base service code for each reward structure.
pub fn base_service_code(structure: RewardStructure) -> &'static str {
    match structure {
        RewardStructure::I => "631111",
        RewardStructure::II => "631112",
        RewardStructure::III => "631113",
        RewardStructure::IV => "631114",
        RewardStructure::V => "631115",
        RewardStructure::VI => "631116",
    }
}

/// Builds the base service detail for a user with `present_days` attended
/// days: `subtotal_units = base_units × present_days`.
///
/// # Example
///
/// ```
/// use billing_engine::calculation::base_service_detail;
/// use billing_engine::models::{Facility, RewardStructure};
///
/// let facility = Facility {
///     id: "fac_001".to_string(),
///     name: "テスト事業所".to_string(),
///     facility_number: "1312345678".to_string(),
///     insurer_number: "131219".to_string(),
///     address: String::new(),
///     phone: String::new(),
///     area_grade: 1,
///     reward_structure: RewardStructure::II,
///     capacity: 20,
///     average_monthly_wage: None,
///     service_type_code: "45".to_string(),
/// };
///
/// let detail = base_service_detail(&facility, 20);
/// assert_eq!(detail.units, 567);
/// assert_eq!(detail.subtotal_units, 11340);
/// ```
pub fn base_service_detail(facility: &Facility, present_days: u32) -> ServiceDetail {
    let lookup = base_units(
        facility.reward_structure,
        facility.capacity,
        facility.average_monthly_wage,
    );
    ServiceDetail {
        service_code: base_service_code(facility.reward_structure).to_string(),
        name: format!("就労継続支援B型サービス費({})", lookup.tier),
        units: lookup.units,
        count: present_days,
        subtotal_units: lookup.units * i64::from(present_days),
    }
}
