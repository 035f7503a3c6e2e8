pub mod correct;
pub mod extract;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use correct::apply_corrections;
pub use extract::Extractor;
pub use pipeline::{PipelineError, StatementPipeline};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, UnavailableRecognizer};
pub use types::{ParseWarning, StatementExtraction};
