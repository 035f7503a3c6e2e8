use thiserror::Error;

use crate::correct::apply_corrections;
use crate::extract::Extractor;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::StatementExtraction;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

impl PipelineError {
    /// True when the failure is the engine itself being absent, as opposed
    /// to a bad page. Callers abort the run either way but present this one
    /// differently.
    pub fn engine_unavailable(&self) -> bool {
        matches!(self, PipelineError::Ocr(OcrError::NotAvailable))
    }
}

/// Orchestrates the statement side: per page, recognize → correction pass →
/// append behind a page marker; then scan the assembled text.
pub struct StatementPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> StatementPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// OCR every page and join the corrected texts with literal
    /// `--- Page N ---` markers (1-based). Corrections run per page, before
    /// the marker is added, so marker text is never rewritten by the
    /// substitution table.
    pub fn assemble_text(&self, pages: &[Vec<u8>]) -> Result<String, PipelineError> {
        let mut full_text = String::new();
        for (idx, page) in pages.iter().enumerate() {
            let raw = self.recognizer.recognize(page)?;
            let corrected = apply_corrections(&raw);
            full_text.push_str(&format!("\n--- Page {} ---\n{}\n", idx + 1, corrected));
        }
        Ok(full_text)
    }

    /// Full statement-side run: pages in, attributable payments and
    /// warnings out.
    pub fn process_pages(&self, pages: &[Vec<u8>]) -> Result<StatementExtraction, PipelineError> {
        let text = self.assemble_text(pages)?;
        Ok(Extractor::extract(&text))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
