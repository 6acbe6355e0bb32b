//! Reward-structure base-unit tables.
//!
//! Structure I is keyed by the facility's average monthly wage across nine
//! descending tiers. Structures II–VI are keyed by capacity across five
//! tiers, with a named default row for facilities without a capacity band.

use crate::models::RewardStructure;

/// Structure I wage tiers: lower bound in yen, tier label, units.
/// Ordered descending; lookup takes the first tier whose bound is met.
const WAGE_TIERS: [(i64, &str, i64); 9] = [
    (45_000, "4.5万円以上", 702),
    (35_000, "3.5万円以上4.5万円未満", 672),
    (30_000, "3万円以上3.5万円未満", 657),
    (25_000, "2.5万円以上3万円未満", 643),
    (20_000, "2万円以上2.5万円未満", 631),
    (15_000, "1.5万円以上2万円未満", 611),
    (10_000, "1万円以上1.5万円未満", 590),
    (5_000, "5千円以上1万円未満", 574),
    (0, "5千円未満", 566),
];

/// Capacity tier labels shared by structures II–VI.
const CAPACITY_TIER_LABELS: [&str; 5] = [
    "定員20人以下",
    "定員21人以上40人以下",
    "定員41人以上60人以下",
    "定員61人以上80人以下",
    "定員81人以上",
];

/// Label for the default row used when no capacity band applies.
const CAPACITY_DEFAULT_LABEL: &str = "定員区分なし";

/// Base units per capacity tier for structures II–VI, plus the default.
const CAPACITY_UNITS: [(RewardStructure, [i64; 5], i64); 5] = [
    (RewardStructure::II, [567, 506, 471, 461, 445], 445),
    (RewardStructure::III, [550, 490, 458, 448, 433], 433),
    (RewardStructure::IV, [532, 474, 443, 433, 419], 419),
    (RewardStructure::V, [514, 458, 428, 419, 405], 405),
    (RewardStructure::VI, [496, 442, 413, 404, 391], 391),
];

/// A resolved base-unit entry: the units and the tier that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUnitsLookup {
    /// Base billing units per present day.
    pub units: i64,
    /// The wage or capacity tier label the units came from.
    pub tier: String,
}

/// Resolves the structure I wage tier for an average monthly wage.
///
/// A facility with no recorded average lands in the lowest tier.
///
/// # Example
///
/// ```
/// use billing_engine::rates::wage_tier;
///
/// let lookup = wage_tier(Some(36_000));
/// assert_eq!(lookup.tier, "3.5万円以上4.5万円未満");
/// assert_eq!(lookup.units, 672);
/// ```
pub fn wage_tier(average_monthly_wage: Option<i64>) -> BaseUnitsLookup {
    let wage = average_monthly_wage.unwrap_or(0).max(0);
    let (_, label, units) = WAGE_TIERS
        .iter()
        .find(|(bound, _, _)| wage >= *bound)
        .unwrap_or(&WAGE_TIERS[8]);
    BaseUnitsLookup {
        units: *units,
        tier: (*label).to_string(),
    }
}

fn capacity_tier_index(capacity: u32) -> usize {
    match capacity {
        1..=20 => 0,
        21..=40 => 1,
        41..=60 => 2,
        61..=80 => 3,
        _ => 4,
    }
}

/// Resolves base units for a facility's reward structure.
///
/// Structure I uses `average_monthly_wage`; structures II–VI use
/// `capacity`, falling back to the named default row when `capacity` is 0.
/// Never fails: every input lands in some tier.
pub fn base_units(
    structure: RewardStructure,
    capacity: u32,
    average_monthly_wage: Option<i64>,
) -> BaseUnitsLookup {
    if structure == RewardStructure::I {
        return wage_tier(average_monthly_wage);
    }

    let (_, per_tier, default_units) = CAPACITY_UNITS
        .iter()
        .find(|(s, _, _)| *s == structure)
        .unwrap_or(&CAPACITY_UNITS[0]);

    if capacity == 0 {
        return BaseUnitsLookup {
            units: *default_units,
            tier: CAPACITY_DEFAULT_LABEL.to_string(),
        };
    }

    let idx = capacity_tier_index(capacity);
    BaseUnitsLookup {
        units: per_tier[idx],
        tier: CAPACITY_TIER_LABELS[idx].to_string(),
    }
}
