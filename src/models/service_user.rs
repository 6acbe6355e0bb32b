//! Service user model and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Gender of a service user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male, submission gender code `1`.
    Male,
    /// Female, submission gender code `2`.
    Female,
    /// Other or unspecified, submission gender code `2`.
    Other,
}

impl Gender {
    /// The 1-character Kokuho-Ren gender code (`1` = male, `2` = other).
    pub fn submission_code(&self) -> &'static str {
        match self {
            Gender::Male => "1",
            Gender::Female | Gender::Other => "2",
        }
    }
}

/// A billed individual receiving employment support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceUser {
    /// Opaque business identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Full name in full-width katakana, carried into the submission file.
    pub name_kana: String,
    /// The 10-digit recipient number (受給者証番号).
    pub recipient_number: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Monthly copayment ceiling in yen (負担上限月額).
    pub copayment_limit: i64,
    /// Whether the user is currently enrolled. Inactive users are skipped
    /// by both calculators.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_submission_codes() {
        assert_eq!(Gender::Male.submission_code(), "1");
        assert_eq!(Gender::Female.submission_code(), "2");
        assert_eq!(Gender::Other.submission_code(), "2");
    }

    #[test]
    fn test_deserialize_service_user() {
        let json = r#"{
            "id": "user_001",
            "name": "山田 太郎",
            "name_kana": "ヤマダ　タロウ",
            "recipient_number": "1234567890",
            "birth_date": "1985-05-20",
            "gender": "male",
            "copayment_limit": 9300,
            "is_active": true
        }"#;

        let user: ServiceUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "user_001");
        assert_eq!(user.recipient_number, "1234567890");
        assert_eq!(user.gender, Gender::Male);
        assert_eq!(user.copayment_limit, 9300);
        assert!(user.is_active);
    }
}
