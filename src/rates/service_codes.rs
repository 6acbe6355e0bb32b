//! Cached lookup over a facility's service-code master data.

use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;

use super::cache::TtlCache;
use crate::models::ServiceCode;

/// Maximum number of cached service-code entries.
pub const SERVICE_CODE_CACHE_MAX: usize = 500;

/// Time-to-live of a cached service-code entry.
pub const SERVICE_CODE_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

/// Lookup engine over a facility's loaded `ServiceCode` master records.
///
/// `find_by_code` is cached (populate-on-miss from a linear scan); the
/// other queries scan directly. Cached values are immutable once computed,
/// so a shared engine only needs last-write-wins protection on the cache.
///
/// # Example
///
/// ```
/// use billing_engine::rates::ServiceCodeEngine;
///
/// let engine = ServiceCodeEngine::new(vec![]);
/// assert!(engine.find_by_code("631111").is_none());
/// ```
pub struct ServiceCodeEngine {
    codes: Vec<ServiceCode>,
    cache: Mutex<TtlCache<String, ServiceCode>>,
}

impl ServiceCodeEngine {
    /// Creates an engine over a facility's service-code master data.
    pub fn new(codes: Vec<ServiceCode>) -> Self {
        Self {
            codes,
            cache: Mutex::new(TtlCache::new(
                SERVICE_CODE_CACHE_MAX,
                SERVICE_CODE_CACHE_TTL,
            )),
        }
    }

    /// Finds a service code by its code string.
    ///
    /// Returns the cached entry on a hit; on a miss, scans the master data
    /// and caches the result.
    pub fn find_by_code(&self, code: &str) -> Option<ServiceCode> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(&code.to_string()) {
                return Some(hit);
            }
        }

        let found = self.codes.iter().find(|sc| sc.code == code).cloned();
        if let Some(ref sc) = found {
            if let Ok(mut cache) = self.cache.lock() {
                cache.insert(code.to_string(), sc.clone());
            }
        }
        found
    }

    /// All codes whose validity window covers `date`.
    pub fn find_all_valid(&self, date: NaiveDate) -> Vec<ServiceCode> {
        self.codes
            .iter()
            .filter(|sc| sc.is_valid_on(date))
            .cloned()
            .collect()
    }

    /// All addition (加算) codes.
    pub fn find_additions(&self) -> Vec<ServiceCode> {
        self.codes
            .iter()
            .filter(|sc| sc.is_addition)
            .cloned()
            .collect()
    }

    /// Number of loaded master records.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no master records are loaded.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
