use serde::{Deserialize, Serialize};

use super::account::AccountNumber;

/// One payment attributed to one account, extracted from a single
/// statement line or export row. Both sources reduce to this shape before
/// aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOccurrence {
    pub account: AccountNumber,
    pub amount_cents: i64,
}

impl PaymentOccurrence {
    pub fn new(account: AccountNumber, amount_cents: i64) -> Self {
        PaymentOccurrence { account, amount_cents }
    }
}
