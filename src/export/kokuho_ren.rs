//! Kokuho-Ren submission file: record model, pre-encode validation,
//! fixed-width encoding and Shift-JIS file export.
//!
//! The file is a strict sequence: one control record, one data record per
//! billed user, one trailer record whose fields must equal the recomputed
//! sums over the data records. Fields are comma-joined without quoting or
//! escaping (the format's numeric, kana and date fields make escaping
//! unnecessary by contract) and every line ends with CRLF.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ExportOutcome;
use crate::error::EngineResult;
use crate::models::{Facility, MonthlyBillingResult, ServiceUser};
use crate::validation::ValidationIssue;

/// Fixed exchange-information identifier for the submission format.
pub const EXCHANGE_INFO_ID: &str = "7121";

/// Media-type code for CSV submission media.
pub const MEDIA_TYPE_CSV: &str = "2";

/// Monthly cap on a user's aggregated service units.
pub const MONTHLY_UNITS_CAP: i64 = 31_000;

/// The leading control record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRecord {
    /// Fixed exchange-information id (`7121`).
    pub exchange_info_id: String,
    /// Media-type code.
    pub media_type: String,
    /// 2-digit prefecture code (first two characters of the facility number).
    pub prefecture_code: String,
    /// Insurer number.
    pub insurer_number: String,
    /// 10-digit facility number.
    pub facility_number: String,
    /// File creation date, encoded `YYYYMMDD`.
    pub creation_date: NaiveDate,
    /// Target period, `YYYYMM`.
    pub target_month: String,
}

/// One data record per billed user, with all service-detail line items
/// collapsed into `total_service_units`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// 10-digit facility number.
    pub facility_number: String,
    /// Government service-type code.
    pub service_type_code: String,
    /// 10-digit recipient number.
    pub recipient_number: String,
    /// User name in full-width katakana.
    pub name_kana: String,
    /// Birth date, encoded `YYYYMMDD`.
    pub birth_date: NaiveDate,
    /// Gender code: `1` = male, `2` = other.
    pub gender_code: String,
    /// The base service code billed.
    pub service_code: String,
    /// Units of the base service line.
    pub units: i64,
    /// Service days in the month.
    pub days: u32,
    /// Aggregated units across all of the user's detail lines.
    pub total_service_units: i64,
    /// The benefit amount claimed, in yen.
    pub benefit_claim_amount: i64,
    /// The user's copayment, in yen.
    pub copayment_amount: i64,
    /// The applied area unit price.
    pub area_unit_price: Decimal,
}

/// The closing trailer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerRecord {
    /// Count of data records.
    pub total_count: u64,
    /// Sum of `total_service_units` over the data records.
    pub total_units: i64,
    /// Sum of `benefit_claim_amount` over the data records.
    pub total_claim_amount: i64,
}

/// A record in the submission file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "record_type")]
pub enum KokuhoRenRecord {
    /// Leading control record.
    Control(ControlRecord),
    /// Per-user data record.
    Data(DataRecord),
    /// Closing trailer record.
    Trailer(TrailerRecord),
}

/// Builds the record sequence for a billing result: control, one data
/// record per billed user, trailer. Users present in the billing result
/// but missing from `users` are skipped (the validator will then flag the
/// trailer mismatch if that loses records).
pub fn build_kokuho_ren_records(
    facility: &Facility,
    users: &[ServiceUser],
    billing: &MonthlyBillingResult,
    creation_date: NaiveDate,
) -> Vec<KokuhoRenRecord> {
    let mut records = vec![KokuhoRenRecord::Control(ControlRecord {
        exchange_info_id: EXCHANGE_INFO_ID.to_string(),
        media_type: MEDIA_TYPE_CSV.to_string(),
        prefecture_code: facility.prefecture_code(),
        insurer_number: facility.insurer_number.clone(),
        facility_number: facility.facility_number.clone(),
        creation_date,
        target_month: billing.year_month.compact(),
    })];

    let mut count = 0u64;
    let mut unit_sum = 0i64;
    let mut claim_sum = 0i64;

    for user_billing in &billing.users {
        let Some(user) = users.iter().find(|u| u.id == user_billing.user_id) else {
            continue;
        };
        let base = user_billing.details.first();
        records.push(KokuhoRenRecord::Data(DataRecord {
            facility_number: facility.facility_number.clone(),
            service_type_code: facility.service_type_code.clone(),
            recipient_number: user_billing.recipient_number.clone(),
            name_kana: user.name_kana.clone(),
            birth_date: user.birth_date,
            gender_code: user.gender.submission_code().to_string(),
            service_code: base.map(|d| d.service_code.clone()).unwrap_or_default(),
            units: base.map(|d| d.units).unwrap_or(0),
            days: user_billing.attendance_days,
            total_service_units: user_billing.total_units,
            benefit_claim_amount: user_billing.benefit_amount,
            copayment_amount: user_billing.copayment_amount,
            area_unit_price: billing.area_unit_price,
        }));
        count += 1;
        unit_sum += user_billing.total_units;
        claim_sum += user_billing.benefit_amount;
    }

    records.push(KokuhoRenRecord::Trailer(TrailerRecord {
        total_count: count,
        total_units: unit_sum,
        total_claim_amount: claim_sum,
    }));
    records
}

fn is_numeric(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

/// Full-width katakana, the long-vowel mark, and spaces only.
fn is_submission_kana(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| ('ァ'..='ヶ').contains(&c) || c == 'ー' || c == '　' || c == ' ')
}

/// Validates a record sequence before encoding. Export never proceeds
/// when this returns any finding.
pub fn validate_records(records: &[KokuhoRenRecord], today: NaiveDate) -> Vec<ValidationIssue> {
    let mut errors = Vec::new();

    if records.is_empty() {
        errors.push(ValidationIssue::new("EMPTY_RECORDS", "no records to encode"));
        return errors;
    }

    if !matches!(records.first(), Some(KokuhoRenRecord::Control(_))) {
        errors.push(
            ValidationIssue::new("MISSING_CONTROL", "first record must be a control record")
                .at_record(0),
        );
    }
    if !matches!(records.last(), Some(KokuhoRenRecord::Trailer(_))) {
        errors.push(
            ValidationIssue::new("MISSING_TRAILER", "last record must be a trailer record")
                .at_record(records.len() - 1),
        );
    }

    let earliest_birth = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    let mut data_count = 0u64;
    let mut unit_sum = 0i64;
    let mut claim_sum = 0i64;

    for (index, record) in records.iter().enumerate() {
        match record {
            KokuhoRenRecord::Control(control) => {
                if !is_numeric(&control.prefecture_code, 2) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_PREFECTURE_CODE",
                            format!("prefecture code '{}' must be 2 digits", control.prefecture_code),
                        )
                        .on_field("prefecture_code")
                        .at_record(index),
                    );
                }
                if !is_numeric(&control.facility_number, 10) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_FACILITY_NUMBER",
                            format!(
                                "facility number '{}' must be 10 digits",
                                control.facility_number
                            ),
                        )
                        .on_field("facility_number")
                        .at_record(index),
                    );
                }
                if !is_numeric(&control.target_month, 6) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_TARGET_MONTH",
                            format!("target month '{}' must be YYYYMM", control.target_month),
                        )
                        .on_field("target_month")
                        .at_record(index),
                    );
                }
            }
            KokuhoRenRecord::Data(data) => {
                data_count += 1;
                unit_sum += data.total_service_units;
                claim_sum += data.benefit_claim_amount;

                if !is_numeric(&data.recipient_number, 10) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_RECIPIENT_NUMBER",
                            format!(
                                "recipient number '{}' must be 10 digits",
                                data.recipient_number
                            ),
                        )
                        .on_field("recipient_number")
                        .at_record(index),
                    );
                }
                if !is_submission_kana(&data.name_kana) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_NAME_KANA",
                            format!(
                                "name '{}' must be full-width katakana",
                                data.name_kana
                            ),
                        )
                        .on_field("name_kana")
                        .at_record(index),
                    );
                }
                if data.birth_date < earliest_birth || data.birth_date > today {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_BIRTH_DATE",
                            format!("birth date {} outside 1900-01-01..today", data.birth_date),
                        )
                        .on_field("birth_date")
                        .at_record(index),
                    );
                }
                if data.units <= 0 {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_UNITS",
                            format!("units {} must be positive", data.units),
                        )
                        .on_field("units")
                        .at_record(index),
                    );
                }
                if !(1..=31).contains(&data.days) {
                    errors.push(
                        ValidationIssue::new(
                            "INVALID_DAYS",
                            format!("days {} outside 1–31", data.days),
                        )
                        .on_field("days")
                        .at_record(index),
                    );
                }
                if data.total_service_units > MONTHLY_UNITS_CAP {
                    errors.push(
                        ValidationIssue::new(
                            "UNITS_OVER_MONTHLY_CAP",
                            format!(
                                "total service units {} exceed the monthly cap {MONTHLY_UNITS_CAP}",
                                data.total_service_units
                            ),
                        )
                        .on_field("total_service_units")
                        .at_record(index),
                    );
                }
                if data.benefit_claim_amount < 0 {
                    errors.push(
                        ValidationIssue::new(
                            "NEGATIVE_CLAIM_AMOUNT",
                            format!(
                                "benefit claim amount {} is negative",
                                data.benefit_claim_amount
                            ),
                        )
                        .on_field("benefit_claim_amount")
                        .at_record(index),
                    );
                }
            }
            KokuhoRenRecord::Trailer(trailer) => {
                if trailer.total_count != data_count {
                    errors.push(
                        ValidationIssue::new(
                            "TRAILER_COUNT_MISMATCH",
                            format!(
                                "trailer count {} but {} data records present",
                                trailer.total_count, data_count
                            ),
                        )
                        .on_field("total_count")
                        .at_record(index),
                    );
                }
                if trailer.total_units != unit_sum {
                    errors.push(
                        ValidationIssue::new(
                            "TRAILER_UNITS_MISMATCH",
                            format!(
                                "trailer units {} but data records sum to {unit_sum}",
                                trailer.total_units
                            ),
                        )
                        .on_field("total_units")
                        .at_record(index),
                    );
                }
                if trailer.total_claim_amount != claim_sum {
                    errors.push(
                        ValidationIssue::new(
                            "TRAILER_CLAIM_MISMATCH",
                            format!(
                                "trailer claim amount {} but data records sum to {claim_sum}",
                                trailer.total_claim_amount
                            ),
                        )
                        .on_field("total_claim_amount")
                        .at_record(index),
                    );
                }
            }
        }
    }

    errors
}

/// Zero-pads a number to `width` without ever truncating wider values.
fn zero_pad(value: i64, width: usize) -> String {
    format!("{value:0width$}")
}

/// Encodes records into the submission text: fields comma-joined without
/// quoting, numeric fields zero-padded to their declared widths, CRLF
/// after every line including the last.
pub fn encode_records(records: &[KokuhoRenRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let fields: Vec<String> = match record {
            KokuhoRenRecord::Control(c) => vec![
                c.exchange_info_id.clone(),
                c.media_type.clone(),
                c.prefecture_code.clone(),
                c.insurer_number.clone(),
                c.facility_number.clone(),
                c.creation_date.format("%Y%m%d").to_string(),
                c.target_month.clone(),
            ],
            KokuhoRenRecord::Data(d) => vec![
                d.facility_number.clone(),
                d.service_type_code.clone(),
                d.recipient_number.clone(),
                d.name_kana.clone(),
                d.birth_date.format("%Y%m%d").to_string(),
                d.gender_code.clone(),
                d.service_code.clone(),
                zero_pad(d.units, 6),
                zero_pad(i64::from(d.days), 2),
                zero_pad(d.total_service_units, 8),
                zero_pad(d.benefit_claim_amount, 10),
                zero_pad(d.copayment_amount, 10),
                d.area_unit_price.to_string(),
            ],
            KokuhoRenRecord::Trailer(t) => vec![
                zero_pad(t.total_count as i64, 6),
                zero_pad(t.total_units, 10),
                zero_pad(t.total_claim_amount, 12),
            ],
        };
        out.push_str(&fields.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Builds, validates and exports the Kokuho-Ren submission file.
///
/// Fail-closed: when pre-encode validation finds anything, the outcome
/// carries the findings and nothing is written, dry-run or not. On
/// success the file is written as Shift-JIS bytes unless `dry_run`.
pub fn export_kokuho_ren_csv(
    facility: &Facility,
    users: &[ServiceUser],
    billing: &MonthlyBillingResult,
    output_dir: &Path,
    dry_run: bool,
    today: NaiveDate,
) -> EngineResult<ExportOutcome> {
    let records = build_kokuho_ren_records(facility, users, billing, today);
    export_records(&records, facility, billing, output_dir, dry_run, today)
}

/// Validates and exports an already-built record sequence.
pub fn export_records(
    records: &[KokuhoRenRecord],
    facility: &Facility,
    billing: &MonthlyBillingResult,
    output_dir: &Path,
    dry_run: bool,
    today: NaiveDate,
) -> EngineResult<ExportOutcome> {
    let errors = validate_records(records, today);
    if !errors.is_empty() {
        return Ok(ExportOutcome::blocked(errors));
    }

    let data_rows = records
        .iter()
        .filter(|r| matches!(r, KokuhoRenRecord::Data(_)))
        .count();
    let content = encode_records(records);

    if dry_run {
        info!(
            facility_id = %facility.id,
            year_month = %billing.year_month,
            rows = data_rows,
            "dry run: kokuho-ren export skipped"
        );
        return Ok(ExportOutcome::completed(None, data_rows));
    }

    let file_name = format!(
        "kokuhoren_{}_{}.csv",
        facility.facility_number,
        billing.year_month.compact()
    );
    let path = output_dir.join(file_name);
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(&content);
    fs::write(&path, &bytes)?;
    info!(
        facility_id = %facility.id,
        path = %path.display(),
        rows = data_rows,
        "kokuho-ren submission file written"
    );
    Ok(ExportOutcome::completed(Some(path), data_rows))
}
