//! Wage report CSV: the human/accounting-facing counterpart of the
//! submission file.
//!
//! Unlike the Kokuho-Ren format this is ordinary CSV: fields are quoted
//! and escaped when they contain commas, quotes or newlines. Rows end
//! with CRLF; output is UTF-8 with BOM by default, or bare UTF-8, or
//! Shift-JIS.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ExportOutcome;
use crate::error::EngineResult;
use crate::models::{Facility, MonthlyWageResult, ServiceUser, WageConfig};
use crate::validation::ValidationIssue;

/// The fixed 11-column header row.
pub const WAGE_CSV_HEADERS: [&str; 11] = [
    "利用者ID",
    "氏名",
    "氏名カナ",
    "出勤日数",
    "作業時間(分)",
    "基本工賃",
    "技能工賃",
    "皆勤手当",
    "支給総額",
    "控除額",
    "差引支給額",
];

/// Output byte encoding for the wage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageCsvEncoding {
    /// UTF-8 with a byte-order mark, for spreadsheet applications.
    #[default]
    Utf8Bom,
    /// Bare UTF-8.
    Utf8,
    /// Shift-JIS.
    ShiftJis,
}

/// Encodes the wage report as CSV text (header + one row per user).
pub fn encode_wage_csv(
    wage: &MonthlyWageResult,
    users: &[ServiceUser],
) -> EngineResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(WAGE_CSV_HEADERS)?;
    for user_wage in &wage.users {
        let user = users.iter().find(|u| u.id == user_wage.user_id);
        writer.write_record([
            user_wage.user_id.as_str(),
            user.map(|u| u.name.as_str()).unwrap_or(""),
            user.map(|u| u.name_kana.as_str()).unwrap_or(""),
            &user_wage.attendance_days.to_string(),
            &user_wage.work_minutes.to_string(),
            &user_wage.base_wage.to_string(),
            &user_wage.skill_wage.to_string(),
            &user_wage.attendance_bonus.to_string(),
            &user_wage.total_wage.to_string(),
            &user_wage.deductions.to_string(),
            &user_wage.net_wage.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn encode_bytes(content: &str, encoding: WageCsvEncoding) -> Vec<u8> {
    match encoding {
        WageCsvEncoding::Utf8Bom => {
            let mut bytes = vec![0xEF, 0xBB, 0xBF];
            bytes.extend_from_slice(content.as_bytes());
            bytes
        }
        WageCsvEncoding::Utf8 => content.as_bytes().to_vec(),
        WageCsvEncoding::ShiftJis => {
            encoding_rs::SHIFT_JIS.encode(content).0.into_owned()
        }
    }
}

/// Exports the wage report.
///
/// An empty result set is a blocking validation error, not an empty file.
/// A computed average wage below the configured facility minimum emits a
/// non-blocking warning and does not stop the export.
pub fn export_wage_csv(
    facility: &Facility,
    users: &[ServiceUser],
    wage: &MonthlyWageResult,
    config: &WageConfig,
    output_dir: &Path,
    dry_run: bool,
    encoding: WageCsvEncoding,
) -> EngineResult<ExportOutcome> {
    if wage.users.is_empty() {
        return Ok(ExportOutcome::blocked(vec![ValidationIssue::new(
            "EMPTY_WAGE_RESULT",
            "no wage rows to export",
        )]));
    }

    if wage.average_wage < config.minimum_average_monthly_wage {
        warn!(
            facility_id = %facility.id,
            average_wage = wage.average_wage,
            minimum = config.minimum_average_monthly_wage,
            "average wage below facility minimum"
        );
    }

    let content = encode_wage_csv(wage, users)?;
    let rows = wage.users.len();

    if dry_run {
        info!(
            facility_id = %facility.id,
            year_month = %wage.year_month,
            rows,
            "dry run: wage report export skipped"
        );
        return Ok(ExportOutcome::completed(None, rows));
    }

    let file_name = format!(
        "wage_{}_{}.csv",
        facility.facility_number,
        wage.year_month.compact()
    );
    let path = output_dir.join(file_name);
    fs::write(&path, encode_bytes(&content, encoding))?;
    info!(
        facility_id = %facility.id,
        path = %path.display(),
        rows,
        "wage report written"
    );
    Ok(ExportOutcome::completed(Some(path), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, RewardStructure, UserWageResult};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn facility() -> Facility {
        Facility {
            id: "fac_001".to_string(),
            name: "テスト事業所".to_string(),
            facility_number: "1312345678".to_string(),
            insurer_number: "131219".to_string(),
            address: String::new(),
            phone: String::new(),
            area_grade: 1,
            reward_structure: RewardStructure::II,
            capacity: 20,
            average_monthly_wage: None,
            service_type_code: "45".to_string(),
        }
    }

    fn user(id: &str, name: &str) -> ServiceUser {
        ServiceUser {
            id: id.to_string(),
            name: name.to_string(),
            name_kana: "ヤマダ　タロウ".to_string(),
            recipient_number: "1234567890".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 5, 20).unwrap(),
            gender: Gender::Male,
            copayment_limit: 9300,
            is_active: true,
        }
    }

    fn wage_result(users: Vec<UserWageResult>) -> MonthlyWageResult {
        let total_wage = users.iter().map(|u| u.net_wage).sum();
        let average_wage = if users.is_empty() {
            0
        } else {
            total_wage / users.len() as i64
        };
        MonthlyWageResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            facility_id: "fac_001".to_string(),
            year_month: "2025-04".parse().unwrap(),
            users,
            total_wage,
            average_wage,
            meets_minimum_threshold: average_wage >= 3000,
        }
    }

    fn user_wage(user_id: &str, net: i64) -> UserWageResult {
        UserWageResult {
            user_id: user_id.to_string(),
            attendance_days: 20,
            work_minutes: 6000,
            base_wage: net,
            skill_wage: 0,
            attendance_bonus: 0,
            total_wage: net,
            deductions: 0,
            net_wage: net,
        }
    }

    #[test]
    fn test_header_and_row_shape() {
        let wage = wage_result(vec![user_wage("user_001", 20000)]);
        let users = vec![user("user_001", "山田 太郎")];
        let content = encode_wage_csv(&wage, &users).unwrap();

        let lines: Vec<&str> = content.trim_end().split("\r\n").collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("利用者ID,氏名,氏名カナ"));
        assert_eq!(lines[0].split(',').count(), 11);
        assert!(lines[1].contains("20000"));
    }

    #[test]
    fn test_rows_end_with_crlf() {
        let wage = wage_result(vec![user_wage("user_001", 20000)]);
        let users = vec![user("user_001", "山田 太郎")];
        let content = encode_wage_csv(&wage, &users).unwrap();
        assert!(content.ends_with("\r\n"));
        assert!(!content.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_embedded_comma_is_quoted() {
        let wage = wage_result(vec![user_wage("user_001", 100)]);
        let users = vec![user("user_001", "山田, 太郎")];
        let content = encode_wage_csv(&wage, &users).unwrap();
        assert!(content.contains("\"山田, 太郎\""));
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let wage = wage_result(vec![user_wage("user_001", 100)]);
        let users = vec![user("user_001", "山田\"太郎")];
        let content = encode_wage_csv(&wage, &users).unwrap();
        assert!(content.contains("\"山田\"\"太郎\""));
    }

    #[test]
    fn test_empty_result_blocks_export() {
        let wage = wage_result(vec![]);
        let dir = tempfile::tempdir().unwrap();
        let outcome = export_wage_csv(
            &facility(),
            &[],
            &wage,
            &WageConfig::default(),
            dir.path(),
            false,
            WageCsvEncoding::default(),
        )
        .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.errors[0].code, "EMPTY_WAGE_RESULT");
        assert!(outcome.file_path.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_utf8_bom_prepended_by_default() {
        let wage = wage_result(vec![user_wage("user_001", 20000)]);
        let users = vec![user("user_001", "山田 太郎")];
        let dir = tempfile::tempdir().unwrap();
        let outcome = export_wage_csv(
            &facility(),
            &users,
            &wage,
            &WageConfig::default(),
            dir.path(),
            false,
            WageCsvEncoding::default(),
        )
        .unwrap();

        let bytes = fs::read(outcome.file_path.unwrap()).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    }

    #[test]
    fn test_shift_jis_output_has_no_bom() {
        let wage = wage_result(vec![user_wage("user_001", 20000)]);
        let users = vec![user("user_001", "山田 太郎")];
        let dir = tempfile::tempdir().unwrap();
        let outcome = export_wage_csv(
            &facility(),
            &users,
            &wage,
            &WageConfig::default(),
            dir.path(),
            false,
            WageCsvEncoding::ShiftJis,
        )
        .unwrap();

        let bytes = fs::read(outcome.file_path.unwrap()).unwrap();
        assert_ne!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&bytes);
        assert!(!had_errors);
        assert!(decoded.starts_with("利用者ID"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let wage = wage_result(vec![user_wage("user_001", 20000)]);
        let users = vec![user("user_001", "山田 太郎")];
        let dir = tempfile::tempdir().unwrap();
        let outcome = export_wage_csv(
            &facility(),
            &users,
            &wage,
            &WageConfig::default(),
            dir.path(),
            true,
            WageCsvEncoding::default(),
        )
        .unwrap();

        assert!(outcome.success);
        assert!(outcome.file_path.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
