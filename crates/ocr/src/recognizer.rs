use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR engine.
/// Implementations accept raw PNG/JPEG page bytes and return the recognized
/// text. Engine unavailability is fatal and surfaces as `NotAvailable`;
/// callers never retry it.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, page_bytes: &[u8]) -> Result<String, OcrError>;
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string per page, letting the extraction pipeline be
/// exercised without Tesseract installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _page_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Always fails with `NotAvailable`. Stands in for a missing engine when
/// the `tesseract` feature is compiled out.
pub struct UnavailableRecognizer;

impl OcrBackend for UnavailableRecognizer {
    fn recognize(&self, _page_bytes: &[u8]) -> Result<String, OcrError> {
        Err(OcrError::NotAvailable)
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// The tessdata path distinguishes a bundled deployment from a
    /// development install; it is resolved once at startup from config and
    /// injected here, never read from process-wide state.
    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, page_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(page_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("W123456\nELF PAY AU 45.00");
        assert_eq!(r.recognize(b"fake page data").unwrap(), "W123456\nELF PAY AU 45.00");
    }

    #[test]
    fn mock_ignores_page_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn unavailable_backend_is_fatal() {
        let r = UnavailableRecognizer;
        assert!(matches!(r.recognize(b"page"), Err(OcrError::NotAvailable)));
    }
}
