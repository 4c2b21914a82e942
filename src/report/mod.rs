// * Tabular output of flagged slides

pub mod errors;
pub mod writer;

pub use errors::ReportError;
pub use writer::{fallback_path, save_report, write_csv, write_xlsx, SavedReport};
