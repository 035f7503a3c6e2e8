use serde::{Deserialize, Serialize};
use std::fmt;

/// A payer account number as it appears in the source documents: an
/// uppercase `W` followed by a run of digits. Comparison is exact string
/// equality; no case folding or reformatting happens after extraction, so
/// an OCR-corrupted number is a different number until the reconciler's
/// fuzzy fallback says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountNumber(pub String);

impl AccountNumber {
    pub fn new(s: impl Into<String>) -> Self {
        AccountNumber(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        AccountNumber(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_verbatim() {
        assert_eq!(AccountNumber::new("W123456").to_string(), "W123456");
    }

    #[test]
    fn equality_is_case_sensitive() {
        assert_ne!(AccountNumber::new("W123456"), AccountNumber::new("w123456"));
    }
}
