use paymatch_core::Money;
use paymatch_import::ComparisonOutcome;

/// Render outcomes into the user-facing text report, one entry per
/// outcome (mismatch and approximate-match entries carry a follow-up
/// hint line).
pub fn render_lines(outcomes: &[ComparisonOutcome]) -> Vec<String> {
    let mut lines = Vec::new();

    for outcome in outcomes {
        match outcome {
            ComparisonOutcome::ExactMatch { account, amount_cents } => {
                lines.push(format!(
                    "✅ Account {account} matches: {} in both files.",
                    Money::from_cents(*amount_cents)
                ));
            }
            ComparisonOutcome::AmountMismatch { account, statement_cents, export_cents } => {
                lines.push(format!(
                    "⚠️ Mismatch payment for account {account}: statement = {}, export = {}",
                    Money::from_cents(*statement_cents),
                    Money::from_cents(*export_cents)
                ));
                lines.push("    Check statement and export with account number...".to_string());
            }
            ComparisonOutcome::ApproximateMatch {
                statement_account,
                export_account,
                amount_cents,
            } => {
                lines.push(format!(
                    "✅ Approximate match: statement account {statement_account} ≈ export account {export_account}, both have amount {}",
                    Money::from_cents(*amount_cents)
                ));
                lines.push("    Check statement with export account number...".to_string());
            }
            ComparisonOutcome::OnlyInStatement { account, amount_cents } => {
                lines.push(format!(
                    "❌ Account {account} found in statement but missing in export. Amount found = {}",
                    Money::from_cents(*amount_cents)
                ));
            }
            ComparisonOutcome::OnlyInExport { account, amount_cents } => {
                lines.push(format!(
                    "❌ Account {account} found in export but missing in statement. Amount found = {}",
                    Money::from_cents(*amount_cents)
                ));
            }
            ComparisonOutcome::NothingToCompare => {
                lines.push("No accounts found in either file for comparison.".to_string());
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use paymatch_core::AccountNumber;

    fn acc(s: &str) -> AccountNumber {
        AccountNumber::new(s)
    }

    #[test]
    fn exact_match_line() {
        let lines = render_lines(&[ComparisonOutcome::ExactMatch {
            account: acc("W123456"),
            amount_cents: 4500,
        }]);
        assert_eq!(lines, vec!["✅ Account W123456 matches: $45.00 in both files."]);
    }

    #[test]
    fn mismatch_gets_a_hint_line() {
        let lines = render_lines(&[ComparisonOutcome::AmountMismatch {
            account: acc("W123456"),
            statement_cents: 4500,
            export_cents: 4000,
        }]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("statement = $45.00"));
        assert!(lines[0].contains("export = $40.00"));
    }

    #[test]
    fn approximate_match_names_both_accounts() {
        let lines = render_lines(&[ComparisonOutcome::ApproximateMatch {
            statement_account: acc("W123457"),
            export_account: acc("W123456"),
            amount_cents: 3000,
        }]);
        assert!(lines[0].contains("W123457"));
        assert!(lines[0].contains("W123456"));
        assert!(lines[0].contains("$30.00"));
    }

    #[test]
    fn one_sided_lines() {
        let lines = render_lines(&[
            ComparisonOutcome::OnlyInStatement { account: acc("W999999"), amount_cents: 1000 },
            ComparisonOutcome::OnlyInExport { account: acc("W888888"), amount_cents: 2000 },
        ]);
        assert!(lines[0].contains("missing in export"));
        assert!(lines[1].contains("missing in statement"));
    }

    #[test]
    fn sentinel_line() {
        let lines = render_lines(&[ComparisonOutcome::NothingToCompare]);
        assert_eq!(lines, vec!["No accounts found in either file for comparison."]);
    }
}
