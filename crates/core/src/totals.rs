use std::collections::hash_map;
use std::collections::HashMap;

use super::account::AccountNumber;
use super::payment::PaymentOccurrence;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Entry {
    total_cents: i64,
    count: u32,
}

/// Per-source aggregate: account → summed payment cents and occurrence
/// count, remembering the order accounts were first seen in. Built once
/// per source per run and only read afterwards; the reconciler iterates
/// the statement side's encounter order to keep its output stable.
#[derive(Debug, Clone, Default)]
pub struct AccountTotals {
    entries: HashMap<AccountNumber, Entry>,
    order: Vec<AccountNumber>,
}

impl AccountTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single occurrence into the running totals.
    pub fn record(&mut self, occurrence: PaymentOccurrence) {
        let entry = match self.entries.entry(occurrence.account.clone()) {
            hash_map::Entry::Occupied(e) => e.into_mut(),
            hash_map::Entry::Vacant(e) => {
                self.order.push(occurrence.account.clone());
                e.insert(Entry::default())
            }
        };
        entry.total_cents += occurrence.amount_cents;
        entry.count += 1;
    }

    pub fn from_occurrences<I>(occurrences: I) -> Self
    where
        I: IntoIterator<Item = PaymentOccurrence>,
    {
        let mut totals = Self::new();
        for occ in occurrences {
            totals.record(occ);
        }
        totals
    }

    pub fn total(&self, account: &AccountNumber) -> Option<i64> {
        self.entries.get(account).map(|e| e.total_cents)
    }

    pub fn count(&self, account: &AccountNumber) -> Option<u32> {
        self.entries.get(account).map(|e| e.count)
    }

    pub fn contains(&self, account: &AccountNumber) -> bool {
        self.entries.contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Accounts with their totals, in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&AccountNumber, i64)> + '_ {
        self.order
            .iter()
            .map(move |acc| (acc, self.entries[acc].total_cents))
    }
}
