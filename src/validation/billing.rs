//! Cross-checks a computed billing result for internal consistency and
//! basic business constraints. Pure and synchronous; never fails, only
//! reports.

use chrono::NaiveDate;

use super::{ValidationIssue, ValidationReport};
use crate::models::{MonthlyBillingResult, YearMonth};

/// Validates a monthly billing result.
///
/// `existing_invoice_months` is the caller-supplied list of periods that
/// already have an invoice; `today` drives the submission-deadline check
/// and is passed in so the validator stays deterministic under test.
///
/// Errors: duplicate invoice, malformed recipient number, attendance days
/// out of range, negative copayment, and the two cross-total checks
/// (`TOTAL_MISMATCH`, `DETAIL_UNITS_MISMATCH`). Warnings: submission
/// deadline passed, zero or negative total units.
pub fn validate_billing(
    result: &MonthlyBillingResult,
    existing_invoice_months: &[YearMonth],
    today: NaiveDate,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if existing_invoice_months.contains(&result.year_month) {
        errors.push(ValidationIssue::new(
            "DUPLICATE_INVOICE",
            format!("an invoice for {} already exists", result.year_month),
        ));
    }

    let deadline = result.year_month.submission_deadline();
    if today > deadline {
        warnings.push(ValidationIssue::new(
            "DEADLINE_PASSED",
            format!(
                "submission deadline {deadline} for {} has passed",
                result.year_month
            ),
        ));
    }

    for user in &result.users {
        if user.recipient_number.len() != 10
            || !user.recipient_number.chars().all(|c| c.is_ascii_digit())
        {
            errors.push(
                ValidationIssue::new(
                    "INVALID_RECIPIENT_NUMBER",
                    format!(
                        "recipient number '{}' must be exactly 10 digits",
                        user.recipient_number
                    ),
                )
                .for_user(&user.user_id)
                .on_field("recipient_number"),
            );
        }

        if user.attendance_days > 31 {
            errors.push(
                ValidationIssue::new(
                    "INVALID_ATTENDANCE_DAYS",
                    format!("attendance days {} outside 0–31", user.attendance_days),
                )
                .for_user(&user.user_id)
                .on_field("attendance_days"),
            );
        }

        if user.total_units <= 0 {
            warnings.push(
                ValidationIssue::new(
                    "ZERO_UNITS",
                    format!("total units {} is not positive", user.total_units),
                )
                .for_user(&user.user_id)
                .on_field("total_units"),
            );
        }

        if user.copayment_amount < 0 {
            errors.push(
                ValidationIssue::new(
                    "NEGATIVE_COPAYMENT",
                    format!("copayment amount {} is negative", user.copayment_amount),
                )
                .for_user(&user.user_id)
                .on_field("copayment_amount"),
            );
        }

        let detail_sum: i64 = user.details.iter().map(|d| d.subtotal_units).sum();
        if detail_sum != user.total_units {
            errors.push(
                ValidationIssue::new(
                    "DETAIL_UNITS_MISMATCH",
                    format!(
                        "detail subtotals sum to {detail_sum} but total_units is {}",
                        user.total_units
                    ),
                )
                .for_user(&user.user_id)
                .on_field("total_units"),
            );
        }
    }

    let amount_sum: i64 = result.users.iter().map(|u| u.total_amount).sum();
    if amount_sum != result.total_amount {
        errors.push(
            ValidationIssue::new(
                "TOTAL_MISMATCH",
                format!(
                    "user amounts sum to {amount_sum} but total_amount is {}",
                    result.total_amount
                ),
            )
            .on_field("total_amount"),
        );
    }

    ValidationReport::from_findings(errors, warnings)
}
