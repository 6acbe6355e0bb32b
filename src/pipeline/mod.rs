//! Orchestration pipeline: fetch → calculate → validate → export.
//!
//! The six external reads are independent and issued concurrently; all
//! calculation and encoding afterwards is synchronous. The pipeline
//! proceeds to export regardless of the billing validator's outcome and
//! surfaces `validation_passed` for the caller to act on; the Kokuho-Ren
//! exporter's own pre-encode validation still blocks structurally invalid
//! files.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{calculate_monthly_billing, calculate_monthly_wage};
use crate::error::EngineResult;
use crate::export::{
    ExportOutcome, WageCsvEncoding, export_kokuho_ren_csv, export_wage_csv,
};
use crate::models::{
    Attendance, Facility, MonthlyBillingResult, MonthlyWageResult, ProductActivity,
    ProductOutput, ServiceUser, WageConfig, YearMonth,
};
use crate::validation::{ValidationReport, validate_billing};

/// The external data provider collaborator.
///
/// Implementations deal only in opaque business IDs; how the collections
/// are stored is not this crate's concern. Methods return futures so the
/// pipeline can issue all six reads concurrently.
pub trait BillingDataProvider {
    /// Fetches the facility's reference data.
    fn fetch_facility(
        &self,
        facility_id: &str,
    ) -> impl Future<Output = EngineResult<Facility>> + Send;

    /// Fetches all service users enrolled at the facility.
    fn fetch_service_users(
        &self,
        facility_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<ServiceUser>>> + Send;

    /// Fetches the month's attendance records, keyed by user id.
    fn fetch_attendance(
        &self,
        facility_id: &str,
        year_month: YearMonth,
    ) -> impl Future<Output = EngineResult<HashMap<String, Vec<Attendance>>>> + Send;

    /// Fetches the month's production outputs, keyed by user id.
    fn fetch_product_outputs(
        &self,
        facility_id: &str,
        year_month: YearMonth,
    ) -> impl Future<Output = EngineResult<HashMap<String, Vec<ProductOutput>>>> + Send;

    /// Fetches the facility's work activities.
    fn fetch_activities(
        &self,
        facility_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<ProductActivity>>> + Send;

    /// Fetches the periods that already have an invoice.
    fn fetch_existing_invoice_months(
        &self,
        facility_id: &str,
    ) -> impl Future<Output = EngineResult<Vec<YearMonth>>> + Send;
}

/// Pipeline run options.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory the export files are written into.
    pub output_dir: PathBuf,
    /// Compute and validate everything without touching the filesystem.
    pub dry_run: bool,
    /// Business-day count for the month; derived from the calendar when
    /// not supplied.
    pub expected_days: Option<u32>,
    /// Wage calculation parameters.
    pub wage_config: WageConfig,
    /// Byte encoding for the wage report.
    pub wage_encoding: WageCsvEncoding,
}

impl PipelineOptions {
    /// Options writing into `output_dir` with defaults everywhere else.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
            expected_days: None,
            wage_config: WageConfig::default(),
            wage_encoding: WageCsvEncoding::default(),
        }
    }
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// The computed billing result.
    pub billing: MonthlyBillingResult,
    /// The computed wage result.
    pub wage: MonthlyWageResult,
    /// The billing validator's findings.
    pub validation: ValidationReport,
    /// Convenience flag: `validation.valid`.
    pub validation_passed: bool,
    /// Outcome of the Kokuho-Ren submission export.
    pub kokuho_export: ExportOutcome,
    /// Outcome of the wage report export.
    pub wage_export: ExportOutcome,
}

/// Weekdays (Monday–Friday) in the month; the default `expected_days`.
pub fn business_days_in_month(year_month: YearMonth) -> u32 {
    let first = year_month.first_day();
    let next_first = year_month.next().first_day();
    let mut day = first;
    let mut count = 0;
    while day < next_first {
        if day.weekday().number_from_monday() <= 5 {
            count += 1;
        }
        day = day + chrono::Days::new(1);
    }
    count
}

/// Runs the full monthly pipeline for one facility and period.
pub async fn run_monthly_billing<P: BillingDataProvider>(
    provider: &P,
    facility_id: &str,
    year_month: YearMonth,
    options: &PipelineOptions,
) -> EngineResult<PipelineReport> {
    info!(facility_id, %year_month, dry_run = options.dry_run, "billing pipeline started");

    let (facility, users, attendance, outputs, activities, existing_months) = tokio::try_join!(
        provider.fetch_facility(facility_id),
        provider.fetch_service_users(facility_id),
        provider.fetch_attendance(facility_id, year_month),
        provider.fetch_product_outputs(facility_id, year_month),
        provider.fetch_activities(facility_id),
        provider.fetch_existing_invoice_months(facility_id),
    )?;

    let billing = calculate_monthly_billing(year_month, &facility, &users, &attendance);
    let expected_days = options
        .expected_days
        .unwrap_or_else(|| business_days_in_month(year_month));
    let wage = calculate_monthly_wage(
        year_month,
        &facility,
        &users,
        &attendance,
        &outputs,
        &activities,
        expected_days,
        &options.wage_config,
    );

    let today = today();
    let validation = validate_billing(&billing, &existing_months, today);
    let validation_passed = validation.valid;
    if !validation_passed {
        warn!(
            facility_id,
            errors = validation.errors.len(),
            "billing validation failed; exporting anyway, caller decides"
        );
    }

    let kokuho_export = export_kokuho_ren_csv(
        &facility,
        &users,
        &billing,
        &options.output_dir,
        options.dry_run,
        today,
    )?;
    let wage_export = export_wage_csv(
        &facility,
        &users,
        &wage,
        &options.wage_config,
        &options.output_dir,
        options.dry_run,
        options.wage_encoding,
    )?;

    info!(
        facility_id,
        total_amount = billing.total_amount,
        total_wage = wage.total_wage,
        validation_passed,
        "billing pipeline finished"
    );

    Ok(PipelineReport {
        billing,
        wage,
        validation,
        validation_passed,
        kokuho_export,
        wage_export,
    })
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_days_april_2025() {
        // April 2025: 30 days, starts on a Tuesday, 22 weekdays.
        let ym: YearMonth = "2025-04".parse().unwrap();
        assert_eq!(business_days_in_month(ym), 22);
    }

    #[test]
    fn test_business_days_february_leap() {
        // February 2024: 29 days, starts on a Thursday, 21 weekdays.
        let ym: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(business_days_in_month(ym), 21);
    }

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::new("/tmp/out");
        assert!(!options.dry_run);
        assert!(options.expected_days.is_none());
        assert_eq!(options.wage_encoding, WageCsvEncoding::Utf8Bom);
    }
}
