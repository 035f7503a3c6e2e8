use serde::Serialize;
use std::fmt;

use paymatch_core::{AccountNumber, PaymentOccurrence};

/// A payment candidate whose amount text failed numeric conversion.
/// Recoverable: the candidate is dropped, the rest of the scan continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    /// 1-based line number within the assembled statement text.
    pub line: usize,
    pub account: AccountNumber,
    /// The captured amount text as matched, before whitespace removal.
    pub raw: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse payment amount '{}' for account {} (line {})",
            self.raw, self.account, self.line
        )
    }
}

/// Everything one scan of a statement produces: the attributable payments
/// and the recoverable diagnostics, side by side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatementExtraction {
    pub occurrences: Vec<PaymentOccurrence>,
    pub warnings: Vec<ParseWarning>,
}
