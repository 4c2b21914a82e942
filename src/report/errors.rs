use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    // * Both the primary and the fallback format failed
    #[error("Report could not be saved to {primary} ({primary_error}) nor to {fallback} ({fallback_error})")]
    Unpersisted {
        primary: PathBuf,
        primary_error: String,
        fallback: PathBuf,
        fallback_error: String,
    },
}
