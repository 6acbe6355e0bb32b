//! CSV export: the Kokuho-Ren government submission file and the wage
//! report file.
//!
//! Both exporters are fail-closed: any pre-encode validation failure
//! blocks the write entirely and no partial file is ever produced.

mod kokuho_ren;
mod wage_csv;

pub use kokuho_ren::{
    ControlRecord, DataRecord, EXCHANGE_INFO_ID, KokuhoRenRecord, MEDIA_TYPE_CSV,
    MONTHLY_UNITS_CAP, TrailerRecord, build_kokuho_ren_records, encode_records,
    export_kokuho_ren_csv, export_records, validate_records,
};
pub use wage_csv::{
    WAGE_CSV_HEADERS, WageCsvEncoding, encode_wage_csv, export_wage_csv,
};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationIssue;

/// The outcome of an export attempt.
///
/// `success` is false when pre-encode validation blocked the write; the
/// findings are in `errors`. `file_path` is `None` under dry-run or when
/// the export was blocked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOutcome {
    /// Whether the export (or dry-run) completed.
    pub success: bool,
    /// Pre-encode validation findings that blocked the write.
    pub errors: Vec<ValidationIssue>,
    /// The written file, when one was produced.
    pub file_path: Option<PathBuf>,
    /// Number of exported rows (data records or user rows).
    pub rows: usize,
}

impl ExportOutcome {
    fn blocked(errors: Vec<ValidationIssue>) -> Self {
        Self {
            success: false,
            errors,
            file_path: None,
            rows: 0,
        }
    }

    fn completed(file_path: Option<PathBuf>, rows: usize) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            file_path,
            rows,
        }
    }
}
