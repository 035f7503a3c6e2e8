pub mod csv;
pub mod reconcile;
pub mod table;
pub(crate) mod util;

pub use csv::{load_file, load_rows, CellValue, TableData, TableError, TableRow};
pub use reconcile::{ComparisonOutcome, Reconciler};
pub use table::{
    RejectReason, RejectionCounts, RowRejection, TableExtraction, TableExtractor,
};
