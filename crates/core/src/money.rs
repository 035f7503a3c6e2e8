use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A payment amount with two fractional digits of financial meaning.
/// The extractors and the reconciler work in integer cents throughout;
/// this type exists at the rendering edge, where cents become `$x.xx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
