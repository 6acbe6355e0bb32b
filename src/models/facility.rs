//! Facility model and related types.

use serde::{Deserialize, Serialize};

/// The reward-structure category of a B-type facility (報酬体系).
///
/// Structure I bases its billing units on the facility's average monthly
/// wage; structures II–VI base them on capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardStructure {
    /// Structure Ⅰ: wage-tiered base units.
    I,
    /// Structure Ⅱ: capacity-tiered base units.
    II,
    /// Structure Ⅲ: capacity-tiered base units.
    III,
    /// Structure Ⅳ: capacity-tiered base units.
    IV,
    /// Structure Ⅴ: capacity-tiered base units.
    V,
    /// Structure Ⅵ: capacity-tiered base units.
    VI,
}

/// A B-type employment support facility.
///
/// Immutable reference data during a billing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    /// Opaque business identifier.
    pub id: String,
    /// Facility name.
    pub name: String,
    /// The 10-digit government facility number. Its first two characters
    /// are the prefecture code used in the submission control record.
    pub facility_number: String,
    /// The insurer number for the submission control record.
    pub insurer_number: String,
    /// Postal address.
    pub address: String,
    /// Contact phone number.
    pub phone: String,
    /// Area grade 1–7; 0 means "other" (その他).
    pub area_grade: u8,
    /// The reward-structure category.
    pub reward_structure: RewardStructure,
    /// Registered capacity (定員).
    pub capacity: u32,
    /// Average monthly wage in yen, when known. Drives the wage tier for
    /// structure I facilities.
    pub average_monthly_wage: Option<i64>,
    /// Government service-type code carried into each data record.
    pub service_type_code: String,
}

impl Facility {
    /// The 2-character prefecture code embedded in the facility number.
    pub fn prefecture_code(&self) -> String {
        self.facility_number.chars().take(2).collect()
    }
}
