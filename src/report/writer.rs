// * Report Writer
// * Persists flagged rows as a spreadsheet, falling back to CSV when the
// * spreadsheet cannot be written.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tracing::{error, info, warn};

use crate::engine::row::{ReportRow, REPORT_COLUMNS, WORD_COUNT_COLUMN};
use crate::report::errors::ReportError;

// * UTF-8 byte order mark so spreadsheet tools open the CSV with the right encoding
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Which format actually got written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedReport {
    Spreadsheet(PathBuf),
    Csv(PathBuf),
}

impl SavedReport {
    pub fn path(&self) -> &Path {
        match self {
            SavedReport::Spreadsheet(p) | SavedReport::Csv(p) => p,
        }
    }
}

pub fn write_xlsx(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header = Format::new().set_bold();

    for (col, name) in REPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.cells().iter().enumerate() {
            // * Word count stays numeric so the sheet can sort and filter on it
            if col == WORD_COUNT_COLUMN {
                worksheet.write_number(r, col as u16, row.word_count as f64)?;
            } else {
                worksheet.write_string(r, col as u16, cell)?;
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

pub fn write_csv(rows: &[ReportRow], path: &Path) -> Result<(), ReportError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;

    // * Headers come from the serde renames on ReportRow
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// * Same location and stem, .csv extension
pub fn fallback_path(primary: &Path) -> PathBuf {
    primary.with_extension("csv")
}

/// Saves `rows` to `primary` as xlsx, or to the CSV fallback next to it.
///
/// Only a failure of both formats is returned as an error.
pub fn save_report(rows: &[ReportRow], primary: &Path) -> Result<SavedReport, ReportError> {
    let primary_error = match write_xlsx(rows, primary) {
        Ok(()) => {
            info!(path = %primary.display(), rows = rows.len(), "Report saved");
            return Ok(SavedReport::Spreadsheet(primary.to_path_buf()));
        }
        Err(e) => e,
    };

    warn!(path = %primary.display(), error = %primary_error, "Spreadsheet save failed, attempting CSV instead");

    let fallback = fallback_path(primary);
    match write_csv(rows, &fallback) {
        Ok(()) => {
            info!(path = %fallback.display(), rows = rows.len(), "Report saved as CSV");
            Ok(SavedReport::Csv(fallback))
        }
        Err(fallback_error) => {
            error!(path = %fallback.display(), error = %fallback_error, "CSV save failed as well");
            Err(ReportError::Unpersisted {
                primary: primary.to_path_buf(),
                primary_error: primary_error.to_string(),
                fallback,
                fallback_error: fallback_error.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_path() {
        assert_eq!(
            fallback_path(Path::new("out/carousel_issues_report.xlsx")),
            PathBuf::from("out/carousel_issues_report.csv")
        );
        assert_eq!(fallback_path(Path::new("report")), PathBuf::from("report.csv"));
    }
}
