use std::collections::HashSet;

use serde::Serialize;

use paymatch_core::{AccountNumber, AccountTotals};

use crate::util::identifier_similarity;

/// One line of the comparison result. The sequence is the run's final
/// artifact; rendering (currency strings, icons) belongs to whoever
/// consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    ExactMatch {
        account: AccountNumber,
        amount_cents: i64,
    },
    AmountMismatch {
        account: AccountNumber,
        statement_cents: i64,
        export_cents: i64,
    },
    ApproximateMatch {
        statement_account: AccountNumber,
        export_account: AccountNumber,
        amount_cents: i64,
    },
    OnlyInStatement {
        account: AccountNumber,
        amount_cents: i64,
    },
    OnlyInExport {
        account: AccountNumber,
        amount_cents: i64,
    },
    /// Both sides were empty. Emitted alone, never alongside other outcomes.
    NothingToCompare,
}

/// Matches the two aggregated sides. Exact key lookup first; for statement
/// accounts with no export key, a fuzzy-identifier fallback restricted to
/// export accounts carrying the same amount. Identifier similarity alone is
/// never enough to pair two accounts.
#[derive(Debug, Clone)]
pub struct Reconciler {
    /// Minimum identifier similarity for an approximate match.
    pub fuzzy_threshold: f32,
    /// Two totals "agree" when they differ by no more than this many cents.
    pub amount_tolerance_cents: i64,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.83,
            amount_tolerance_cents: 0,
        }
    }
}

impl Reconciler {
    pub fn new(fuzzy_threshold: f32, amount_tolerance_cents: i64) -> Self {
        Self { fuzzy_threshold, amount_tolerance_cents }
    }

    /// Every account in either input lands in exactly one outcome; an
    /// approximate match consumes one account from each side. Statement
    /// entries drive the output order, export leftovers follow in their own
    /// encounter order.
    pub fn reconcile(
        &self,
        statement: &AccountTotals,
        export: &AccountTotals,
    ) -> Vec<ComparisonOutcome> {
        let mut outcomes = Vec::new();
        let mut matched: HashSet<AccountNumber> = HashSet::new();

        for (account, statement_cents) in statement.iter() {
            if let Some(export_cents) = export.total(account) {
                if self.amounts_agree(statement_cents, export_cents) {
                    outcomes.push(ComparisonOutcome::ExactMatch {
                        account: account.clone(),
                        amount_cents: statement_cents,
                    });
                } else {
                    outcomes.push(ComparisonOutcome::AmountMismatch {
                        account: account.clone(),
                        statement_cents,
                        export_cents,
                    });
                }
                matched.insert(account.clone());
            } else {
                match self.best_fuzzy_candidate(account, statement_cents, export, &matched) {
                    Some(candidate) => {
                        matched.insert(candidate.clone());
                        outcomes.push(ComparisonOutcome::ApproximateMatch {
                            statement_account: account.clone(),
                            export_account: candidate,
                            amount_cents: statement_cents,
                        });
                    }
                    None => outcomes.push(ComparisonOutcome::OnlyInStatement {
                        account: account.clone(),
                        amount_cents: statement_cents,
                    }),
                }
            }
        }

        for (account, export_cents) in export.iter() {
            if !matched.contains(account) {
                outcomes.push(ComparisonOutcome::OnlyInExport {
                    account: account.clone(),
                    amount_cents: export_cents,
                });
            }
        }

        if outcomes.is_empty() {
            outcomes.push(ComparisonOutcome::NothingToCompare);
        }

        outcomes
    }

    fn amounts_agree(&self, a: i64, b: i64) -> bool {
        (a - b).abs() <= self.amount_tolerance_cents
    }

    /// Candidates are unconsumed export accounts whose total agrees with the
    /// statement amount. Best = highest similarity at or above the
    /// threshold; on a tie the earliest candidate in export encounter order
    /// wins (the scan only replaces on strictly greater similarity).
    fn best_fuzzy_candidate(
        &self,
        account: &AccountNumber,
        statement_cents: i64,
        export: &AccountTotals,
        matched: &HashSet<AccountNumber>,
    ) -> Option<AccountNumber> {
        let mut best: Option<(&AccountNumber, f32)> = None;
        for (candidate, candidate_cents) in export.iter() {
            if matched.contains(candidate) {
                continue;
            }
            if !self.amounts_agree(statement_cents, candidate_cents) {
                continue;
            }
            let score = identifier_similarity(account.as_str(), candidate.as_str());
            if score < self.fuzzy_threshold {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use paymatch_core::PaymentOccurrence;

    fn totals(entries: &[(&str, i64)]) -> AccountTotals {
        AccountTotals::from_occurrences(
            entries
                .iter()
                .map(|(acc, cents)| PaymentOccurrence::new(AccountNumber::new(*acc), *cents)),
        )
    }

    fn acc(s: &str) -> AccountNumber {
        AccountNumber::new(s)
    }

    #[test]
    fn exact_match_same_account_same_amount() {
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W123456", 4500)]), &totals(&[("W123456", 4500)]));
        assert_eq!(
            outcomes,
            vec![ComparisonOutcome::ExactMatch { account: acc("W123456"), amount_cents: 4500 }]
        );
    }

    #[test]
    fn one_cent_difference_is_a_mismatch() {
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W123456", 4500)]), &totals(&[("W123456", 4501)]));
        assert_eq!(
            outcomes,
            vec![ComparisonOutcome::AmountMismatch {
                account: acc("W123456"),
                statement_cents: 4500,
                export_cents: 4501,
            }]
        );
    }

    #[test]
    fn amount_mismatch_reports_both_amounts() {
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W123456", 4500)]), &totals(&[("W123456", 4000)]));
        assert_eq!(
            outcomes,
            vec![ComparisonOutcome::AmountMismatch {
                account: acc("W123456"),
                statement_cents: 4500,
                export_cents: 4000,
            }]
        );
    }

    #[test]
    fn corrupted_identifier_with_equal_amount_matches_approximately() {
        // W123457 is a one-digit OCR corruption of W123456.
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W123457", 3000)]), &totals(&[("W123456", 3000)]));
        assert_eq!(
            outcomes,
            vec![ComparisonOutcome::ApproximateMatch {
                statement_account: acc("W123457"),
                export_account: acc("W123456"),
                amount_cents: 3000,
            }]
        );
    }

    #[test]
    fn fuzzy_never_fires_across_differing_amounts() {
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W123457", 3000)]), &totals(&[("W123456", 3001)]));
        assert_eq!(
            outcomes,
            vec![
                ComparisonOutcome::OnlyInStatement { account: acc("W123457"), amount_cents: 3000 },
                ComparisonOutcome::OnlyInExport { account: acc("W123456"), amount_cents: 3001 },
            ]
        );
    }

    #[test]
    fn fuzzy_needs_similarity_above_threshold() {
        // Same amount but identifiers four edits apart.
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W111111", 3000)]), &totals(&[("W999999", 3000)]));
        assert_eq!(
            outcomes,
            vec![
                ComparisonOutcome::OnlyInStatement { account: acc("W111111"), amount_cents: 3000 },
                ComparisonOutcome::OnlyInExport { account: acc("W999999"), amount_cents: 3000 },
            ]
        );
    }

    #[test]
    fn fuzzy_skips_already_consumed_candidates() {
        // The exact match on W123456 consumes it; the corrupted W123450
        // cannot fuzzy-match the same export account afterwards.
        let statement = totals(&[("W123456", 2000), ("W123450", 2000)]);
        let export = totals(&[("W123456", 2000)]);
        let outcomes = Reconciler::default().reconcile(&statement, &export);
        assert_eq!(
            outcomes,
            vec![
                ComparisonOutcome::ExactMatch { account: acc("W123456"), amount_cents: 2000 },
                ComparisonOutcome::OnlyInStatement { account: acc("W123450"), amount_cents: 2000 },
            ]
        );
    }

    #[test]
    fn fuzzy_tie_keeps_first_export_candidate() {
        // Both candidates are one edit away with the same amount; the one
        // encountered first in the export wins.
        let statement = totals(&[("W123456", 3000)]);
        let export = totals(&[("W123455", 3000), ("W123457", 3000)]);
        let outcomes = Reconciler::default().reconcile(&statement, &export);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            outcomes[0],
            ComparisonOutcome::ApproximateMatch {
                statement_account: acc("W123456"),
                export_account: acc("W123455"),
                amount_cents: 3000,
            }
        );
        assert_eq!(
            outcomes[1],
            ComparisonOutcome::OnlyInExport { account: acc("W123457"), amount_cents: 3000 }
        );
    }

    #[test]
    fn only_in_statement_when_export_has_no_candidate() {
        let outcomes =
            Reconciler::default().reconcile(&totals(&[("W999999", 1000)]), &totals(&[("W888888", 2000)]));
        assert_eq!(
            outcomes,
            vec![
                ComparisonOutcome::OnlyInStatement { account: acc("W999999"), amount_cents: 1000 },
                ComparisonOutcome::OnlyInExport { account: acc("W888888"), amount_cents: 2000 },
            ]
        );
    }

    #[test]
    fn export_leftovers_follow_in_encounter_order() {
        let statement = totals(&[("W123456", 4500)]);
        let export = totals(&[("W222222", 1), ("W123456", 4500), ("W111111", 2)]);
        let outcomes = Reconciler::default().reconcile(&statement, &export);
        assert_eq!(
            outcomes,
            vec![
                ComparisonOutcome::ExactMatch { account: acc("W123456"), amount_cents: 4500 },
                ComparisonOutcome::OnlyInExport { account: acc("W222222"), amount_cents: 1 },
                ComparisonOutcome::OnlyInExport { account: acc("W111111"), amount_cents: 2 },
            ]
        );
    }

    #[test]
    fn both_sides_empty_yields_sentinel() {
        let outcomes = Reconciler::default().reconcile(&totals(&[]), &totals(&[]));
        assert_eq!(outcomes, vec![ComparisonOutcome::NothingToCompare]);
    }

    #[test]
    fn every_account_appears_exactly_once() {
        let statement = totals(&[
            ("W100001", 100),
            ("W100002", 200),
            ("W100003", 300),
            ("W100009", 400),
        ]);
        let export = totals(&[
            ("W100002", 250),
            ("W100008", 400), // fuzzy partner for W100009
            ("W100001", 100),
            ("W100005", 500),
        ]);
        let outcomes = Reconciler::default().reconcile(&statement, &export);

        let mut seen = Vec::new();
        for outcome in &outcomes {
            match outcome {
                ComparisonOutcome::ExactMatch { account, .. }
                | ComparisonOutcome::AmountMismatch { account, .. }
                | ComparisonOutcome::OnlyInStatement { account, .. }
                | ComparisonOutcome::OnlyInExport { account, .. } => {
                    seen.push(account.clone());
                }
                ComparisonOutcome::ApproximateMatch {
                    statement_account,
                    export_account,
                    ..
                } => {
                    seen.push(statement_account.clone());
                    seen.push(export_account.clone());
                }
                ComparisonOutcome::NothingToCompare => {}
            }
        }
        // Union of both sides' identifiers: two shared (exact + mismatch),
        // two statement-only, two export-only.
        let expected = 6;
        assert_eq!(seen.len(), expected);
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), expected);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let statement = totals(&[("W123457", 3000), ("W555555", 100)]);
        let export = totals(&[("W123456", 3000), ("W666666", 200)]);
        let reconciler = Reconciler::default();
        let first = reconciler.reconcile(&statement, &export);
        let second = reconciler.reconcile(&statement, &export);
        assert_eq!(first, second);
    }

    #[test]
    fn output_follows_statement_encounter_order() {
        let statement = totals(&[("W300000", 3), ("W100000", 1), ("W200000", 2)]);
        let export = totals(&[("W100000", 1), ("W200000", 2), ("W300000", 3)]);
        let outcomes = Reconciler::default().reconcile(&statement, &export);
        let accounts: Vec<&str> = outcomes
            .iter()
            .map(|o| match o {
                ComparisonOutcome::ExactMatch { account, .. } => account.as_str(),
                other => panic!("unexpected outcome {other:?}"),
            })
            .collect();
        assert_eq!(accounts, vec!["W300000", "W100000", "W200000"]);
    }
}
