use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use paymatch_core::{AccountNumber, PaymentOccurrence};

use crate::types::{ParseWarning, StatementExtraction};

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// Statement-side account numbers run 6 to 8 digits; the export side is
// narrower (see the import crate).
re!(re_account, r"\bW\d{6,8}\b");

// The three payment-label variants seen in the scanned statements. Amounts
// are dot-decimal with two fractional digits; the OCR output scatters
// whitespace around the sign and the decimal point, so the capture admits it
// and parsing strips it. `FR[O0]M` / `[B8]AT` tolerate the label whether or
// not the correction pass already rewrote its look-alike letters.
re!(re_elf_pay, r"ELF PAY AU\s*(-?\s*\d+\s*\.\s*\d{2})");
re!(re_delete_bat, r"XXDELETE FR[O0]M [B8]AT\s*(-?\s*\d+\s*\.\s*\d{2})");
re!(re_card_payment, r"CARD PAYME\s*(-?\s*\d+\s*\.\s*\d{2})");

// ── Carry-forward cursor ─────────────────────────────────────────────────────

/// The per-line attribution state: payments belong to the most recently
/// seen account number, until the next one appears. The cursor deliberately
/// survives page markers: payments split across a page boundary keep the
/// previous page's account (see the cross-page test below).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    NoAccount,
    OnAccount(AccountNumber),
}

impl Cursor {
    fn observe(&mut self, line: &str) {
        if let Some(m) = re_account().find(line) {
            *self = Cursor::OnAccount(AccountNumber::new(m.as_str()));
        }
    }

    fn account(&self) -> Option<&AccountNumber> {
        match self {
            Cursor::NoAccount => None,
            Cursor::OnAccount(acc) => Some(acc),
        }
    }
}

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Scan the full corrected statement text and collect per-account
    /// payment occurrences. Payment lines seen before any account number
    /// cannot be attributed and are dropped; unparseable amounts are
    /// reported as warnings.
    pub fn extract(text: &str) -> StatementExtraction {
        let mut cursor = Cursor::NoAccount;
        let mut occurrences = Vec::new();
        let mut warnings = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            cursor.observe(line);

            let candidates = payment_candidates(line);
            if candidates.is_empty() {
                continue;
            }
            let Some(account) = cursor.account() else {
                continue;
            };

            for raw in candidates {
                match parse_amount_cents(&raw) {
                    Some(cents) => {
                        occurrences.push(PaymentOccurrence::new(account.clone(), cents));
                    }
                    None => warnings.push(ParseWarning {
                        line: idx + 1,
                        account: account.clone(),
                        raw,
                    }),
                }
            }
        }

        StatementExtraction { occurrences, warnings }
    }
}

/// One candidate per label variant, at most three per line.
fn payment_candidates(line: &str) -> Vec<String> {
    [re_elf_pay(), re_delete_bat(), re_card_payment()]
        .iter()
        .filter_map(|re| re.captures(line))
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn parse_amount_cents(s: &str) -> Option<i64> {
    let clean: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let dec = Decimal::from_str(&clean).ok()?;
    (dec * Decimal::from(100)).round().to_i64()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
