//! Government service-code master record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of a facility's service-code master data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCode {
    /// The government service code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Billing units for this code.
    pub units: i64,
    /// The service type this code belongs to.
    pub service_type: String,
    /// First date this code is valid.
    pub valid_from: NaiveDate,
    /// Last date this code is valid; `None` means open-ended.
    pub valid_until: Option<NaiveDate>,
    /// True for addition (加算) codes as opposed to base service codes.
    pub is_addition: bool,
}

impl ServiceCode {
    /// Whether the code's validity window covers `date`.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        if date < self.valid_from {
            return false;
        }
        match self.valid_until {
            Some(until) => date <= until,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(valid_from: &str, valid_until: Option<&str>) -> ServiceCode {
        ServiceCode {
            code: "631111".to_string(),
            name: "就労継続支援B型サービス費".to_string(),
            units: 567,
            service_type: "45".to_string(),
            valid_from: valid_from.parse().unwrap(),
            valid_until: valid_until.map(|d| d.parse().unwrap()),
            is_addition: false,
        }
    }

    #[test]
    fn test_valid_within_window() {
        let sc = code("2024-04-01", Some("2027-03-31"));
        assert!(sc.is_valid_on("2025-04-15".parse().unwrap()));
        assert!(sc.is_valid_on("2024-04-01".parse().unwrap()));
        assert!(sc.is_valid_on("2027-03-31".parse().unwrap()));
    }

    #[test]
    fn test_invalid_outside_window() {
        let sc = code("2024-04-01", Some("2027-03-31"));
        assert!(!sc.is_valid_on("2024-03-31".parse().unwrap()));
        assert!(!sc.is_valid_on("2027-04-01".parse().unwrap()));
    }

    #[test]
    fn test_open_ended_validity() {
        let sc = code("2024-04-01", None);
        assert!(sc.is_valid_on("2099-12-31".parse().unwrap()));
    }
}
