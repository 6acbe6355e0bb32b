//! Rate and service-code lookup engine.
//!
//! Static statutory tables (area unit prices, reward-structure base units)
//! plus a cached lookup over a facility's loaded service-code master data.

mod area_price;
mod base_units;
mod cache;
mod service_codes;

pub use area_price::area_unit_price;
pub use base_units::{BaseUnitsLookup, base_units, wage_tier};
pub use cache::TtlCache;
pub use service_codes::{
    SERVICE_CODE_CACHE_MAX, SERVICE_CODE_CACHE_TTL, ServiceCodeEngine,
};
