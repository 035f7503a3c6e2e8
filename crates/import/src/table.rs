use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use paymatch_core::{AccountNumber, PaymentOccurrence};

use crate::csv::{CellValue, TableData, TableError};

// Export-side account numbers run 6 to 7 digits, one digit narrower than
// the statement side.
fn re_account() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"\bW\d{6,7}\b").expect("invalid regex"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Amount cell failed decimal parsing.
    InvalidAmount,
    /// Identifier cell held a number or nothing instead of text.
    NonTextAccount,
    /// Identifier cell was text but contained no account pattern.
    NoAccountPattern,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InvalidAmount => write!(f, "invalid amount"),
            RejectReason::NonTextAccount => write!(f, "account cell is not text"),
            RejectReason::NoAccountPattern => write!(f, "no account number found"),
        }
    }
}

/// One skipped row, with enough context to chase it down in the file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRejection {
    /// Row number as shown by a spreadsheet application: 1-based, counting
    /// the header row, so the first data row is 2.
    pub row: usize,
    pub reason: RejectReason,
    /// The offending cell's text rendering.
    pub cell: String,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: '{}'", self.row, self.reason, self.cell)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectionCounts {
    pub invalid_amount: usize,
    pub non_text_account: usize,
    pub no_account_pattern: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TableExtraction {
    pub occurrences: Vec<PaymentOccurrence>,
    pub rejections: Vec<RowRejection>,
}

impl TableExtraction {
    pub fn rejection_counts(&self) -> RejectionCounts {
        let mut counts = RejectionCounts::default();
        for rejection in &self.rejections {
            match rejection.reason {
                RejectReason::InvalidAmount => counts.invalid_amount += 1,
                RejectReason::NonTextAccount => counts.non_text_account += 1,
                RejectReason::NoAccountPattern => counts.no_account_pattern += 1,
            }
        }
        counts
    }
}

/// Pulls payment occurrences out of a loaded export: a decimal amount
/// column plus a free-text column with an account number buried in it.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    pub account_column: String,
    pub amount_column: String,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self {
            account_column: "merchant_defined_field_1".to_string(),
            amount_column: "amount".to_string(),
        }
    }
}

impl TableExtractor {
    pub fn new(account_column: impl Into<String>, amount_column: impl Into<String>) -> Self {
        Self {
            account_column: account_column.into(),
            amount_column: amount_column.into(),
        }
    }

    /// Missing required columns abort the run; everything value-level is a
    /// per-row rejection and the scan continues.
    pub fn extract(&self, table: &TableData) -> Result<TableExtraction, TableError> {
        for required in [&self.amount_column, &self.account_column] {
            if !table.columns.iter().any(|c| c == required) {
                return Err(TableError::MissingColumn(required.clone()));
            }
        }

        static MISSING: CellValue = CellValue::Empty;

        let mut extraction = TableExtraction::default();

        for (idx, row) in table.rows.iter().enumerate() {
            // First data row sits under the header, so it is row 2 in the file.
            let file_row = idx + 2;

            let amount_cell = row.get(&self.amount_column).unwrap_or(&MISSING);
            let Some(amount_cents) = parse_amount_cents(amount_cell) else {
                extraction.rejections.push(RowRejection {
                    row: file_row,
                    reason: RejectReason::InvalidAmount,
                    cell: amount_cell.render(),
                });
                continue;
            };

            let account_cell = row.get(&self.account_column).unwrap_or(&MISSING);
            let Some(account_text) = account_cell.as_text() else {
                extraction.rejections.push(RowRejection {
                    row: file_row,
                    reason: RejectReason::NonTextAccount,
                    cell: account_cell.render(),
                });
                continue;
            };

            match re_account().find(account_text) {
                Some(m) => extraction.occurrences.push(PaymentOccurrence::new(
                    AccountNumber::new(m.as_str()),
                    amount_cents,
                )),
                None => extraction.rejections.push(RowRejection {
                    row: file_row,
                    reason: RejectReason::NoAccountPattern,
                    cell: account_text.to_string(),
                }),
            }
        }

        Ok(extraction)
    }
}

fn parse_amount_cents(cell: &CellValue) -> Option<i64> {
    let text = cell.render();
    let dec = Decimal::from_str(text.trim()).ok()?;
    (dec * Decimal::from(100)).round().to_i64()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
