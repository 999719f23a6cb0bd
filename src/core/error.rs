use thiserror::Error;

/// Errors surfaced by the crate outside of per-file ingestion.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GstError {
    /// Invalid business configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file was rejected or contributed nothing.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing failed.
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A spreadsheet workbook could not be read.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// Configuration JSON could not be parsed or written.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why an uploaded file contributed no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Every row had a taxable value of exactly zero.
    ZeroTaxable,
    /// No row had a strictly positive taxable value (B2B).
    NoPositiveTaxable,
    /// No row had a parsable invoice date (B2B).
    NoValidInvoiceDates,
    /// None of the expected workbook sheets were present.
    NoRecognisedSheets,
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::ZeroTaxable => "no rows after filtering zero taxable value",
            Self::NoPositiveTaxable => "no positive Taxable Value rows",
            Self::NoValidInvoiceDates => "no valid Invoice Dates",
            Self::NoRecognisedSheets => "no recognised sheets in workbook",
        };
        f.write_str(msg)
    }
}

/// Per-file ingestion failure.
///
/// `MissingColumns` and `HomeStateRequired` reject the file; `Empty` is a
/// warning (see [`IngestError::is_warning`]). Neither aborts the rest of a
/// batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// Required columns are absent; nothing from the file is ingested.
    #[error("sheet '{sheet}' is missing columns: {}", columns.join(", "))]
    MissingColumns { sheet: String, columns: Vec<String> },

    /// All rows were removed by a business filter.
    #[error("{0}")]
    Empty(EmptyReason),

    /// The file has an intra-state section but no business state is set.
    #[error("business state must be configured to process intra-state supplies")]
    HomeStateRequired,
}

impl IngestError {
    /// Whether this outcome is a warning rather than a rejection.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}
