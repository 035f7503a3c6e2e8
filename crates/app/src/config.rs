use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Startup configuration. Every field has a default, so a missing file or
/// a partial TOML both work; the OCR engine location in particular is
/// resolved here once (bundled tessdata vs a development install) and
/// injected into the recognizer, never read from process-wide state.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub table: TableConfig,
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Tessdata directory; `None` uses the engine's own default lookup.
    pub data_path: Option<String>,
    pub lang: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self { data_path: None, lang: "eng".to_string() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub account_column: String,
    pub amount_column: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            account_column: "merchant_defined_field_1".to_string(),
            amount_column: "amount".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReconcileConfig {
    pub fuzzy_threshold: f32,
    pub amount_tolerance_cents: i64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { fuzzy_threshold: 0.83, amount_tolerance_cents: 0 }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
