//! Reading uploaded exports and writing reports.
//!
//! CSV files become a single-sheet [`Workbook`] named after the file
//! stem. Spreadsheets (with the `xlsx` feature) keep every sheet.

#[cfg(feature = "csv")]
mod delimited;
#[cfg(feature = "xlsx")]
mod workbook;

#[cfg(feature = "csv")]
use std::fs::File;
use std::path::Path;

#[cfg(feature = "csv")]
pub use delimited::read_csv;
#[cfg(all(feature = "csv", feature = "report"))]
pub use delimited::write_report_csv;
#[cfg(feature = "xlsx")]
pub use workbook::read_workbook;

use crate::core::{GstError, Upload, Workbook};

/// Load an export from disk, picking the reader by extension. The upload
/// is named after the file name, which is what duplicate detection keys
/// on.
pub fn read_upload(path: &Path) -> Result<Upload, GstError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let workbook: Workbook = match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            read_csv(&stem, File::open(path)?)?.into()
        }
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        other => {
            return Err(GstError::Workbook(format!(
                "unsupported file type '.{other}': {}",
                path.display()
            )));
        }
    };
    Ok(Upload::new(file_name, workbook))
}

/// Write every non-empty report to `dir` as CSV, named
/// `{stem}_{YYYYmmdd_HHMMSS}.csv`. Returns the written paths.
#[cfg(all(feature = "csv", feature = "report"))]
pub fn write_reports(
    reports: &crate::report::Reports,
    dir: &Path,
    timestamp: chrono::NaiveDateTime,
) -> Result<Vec<std::path::PathBuf>, GstError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for table in reports.non_empty() {
        let path = dir.join(table.kind.file_name(timestamp, "csv"));
        write_report_csv(table, File::create(&path)?)?;
        tracing::info!(report = %table.kind, rows = table.len(), path = %path.display(), "wrote report");
        written.push(path);
    }
    Ok(written)
}
