use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{error, info, warn};

use super::accumulator::Accumulator;
use super::compile::{compile, compile_grouped};
use crate::core::{
    B2bInvoiceRow, B2csRow, BusinessConfig, EmptyReason, GstError, HsnB2bRow, HsnRow,
    IngestError, Platform, Upload,
};
use crate::ingest::{self, Context};

/// What happened to one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file contributed rows.
    Ingested {
        rows: usize,
        /// Rows dropped for an unparsable invoice date.
        dropped_rows: usize,
    },
    /// A file of the same name was already ingested for this platform.
    AlreadyProcessed,
    /// The file's schema did not match; nothing was ingested.
    Rejected(IngestError),
    /// Every row was filtered out; nothing was ingested.
    Empty(EmptyReason),
}

impl FileOutcome {
    fn from_error(err: IngestError) -> Self {
        match err {
            IngestError::Empty(reason) => Self::Empty(reason),
            other => Self::Rejected(other),
        }
    }

    pub fn is_ingested(&self) -> bool {
        matches!(self, Self::Ingested { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingested { rows, dropped_rows: 0 } => write!(f, "ingested {rows} rows"),
            Self::Ingested { rows, dropped_rows } => write!(
                f,
                "ingested {rows} rows ({dropped_rows} dropped for invalid dates)"
            ),
            Self::AlreadyProcessed => f.write_str("already processed, skipped"),
            Self::Rejected(err) => write!(f, "rejected: {err}"),
            Self::Empty(reason) => write!(f, "empty: {reason}"),
        }
    }
}

/// Per-file outcomes of one batch, in upload order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub platform: Option<Platform>,
    pub files: Vec<(String, FileOutcome)>,
}

impl BatchReport {
    pub fn ingested(&self) -> usize {
        self.files.iter().filter(|(_, o)| o.is_ingested()).count()
    }

    pub fn rejected(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, o)| matches!(o, FileOutcome::Rejected(_)))
            .count()
    }

    /// Whether no file was rejected.
    pub fn is_clean(&self) -> bool {
        self.rejected() == 0
    }
}

/// One user's working set: configuration, accumulated rows and the names
/// of files already ingested per platform.
///
/// ```
/// use gstify::core::*;
/// use gstify::store::{FileOutcome, Session};
///
/// let sheet = RawTable::from_rows(
///     "gst",
///     &["end_customer_state_new", "gst_rate", "total_taxable_sale_value",
///       "hsn_code", "quantity", "total_invoice_value"],
///     vec![vec!["Goa", "5", "100", "6109", "1", "105"]],
/// );
/// let upload = Upload::new("meesho_march.csv", sheet);
///
/// let mut session = Session::new(BusinessConfig::default());
/// assert!(session.ingest(Platform::MeeshoSales, &upload).is_ingested());
/// assert_eq!(session.ingest(Platform::MeeshoSales, &upload), FileOutcome::AlreadyProcessed);
/// assert_eq!(session.b2cs_summary().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: BusinessConfig,
    store: Accumulator,
    processed: BTreeMap<Platform, BTreeSet<String>>,
}

impl Session {
    pub fn new(config: BusinessConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    /// Replace the configuration. Already accumulated rows are kept as
    /// they were computed.
    pub fn set_config(&mut self, config: BusinessConfig) -> Result<(), GstError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn store(&self) -> &Accumulator {
        &self.store
    }

    pub fn is_processed(&self, platform: Platform, file_name: &str) -> bool {
        self.processed
            .get(&platform)
            .is_some_and(|names| names.contains(file_name))
    }

    /// Names of files ingested for `platform`, sorted.
    pub fn processed_files(&self, platform: Platform) -> impl Iterator<Item = &str> {
        self.processed
            .get(&platform)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Ingest one file. A file name already ingested for the platform is
    /// skipped; a file is only marked as processed once it contributed
    /// rows.
    pub fn ingest(&mut self, platform: Platform, upload: &Upload) -> FileOutcome {
        if self.is_processed(platform, &upload.name) {
            info!(%platform, file = %upload.name, "already processed, skipping");
            return FileOutcome::AlreadyProcessed;
        }

        let ctx = Context::new(&self.config);
        match ingest::run(platform, &upload.workbook, &ctx) {
            Ok(delta) => {
                let rows = delta.row_count();
                let dropped_rows = delta.dropped_rows;
                self.store.append_delta(delta);
                self.processed
                    .entry(platform)
                    .or_default()
                    .insert(upload.name.clone());
                info!(%platform, file = %upload.name, rows, "ingested");
                FileOutcome::Ingested { rows, dropped_rows }
            }
            Err(err) if err.is_warning() => {
                warn!(%platform, file = %upload.name, "{err}");
                FileOutcome::from_error(err)
            }
            Err(err) => {
                error!(%platform, file = %upload.name, "{err}");
                FileOutcome::from_error(err)
            }
        }
    }

    /// Ingest files one after another. A failing file never stops the
    /// rest of the batch.
    pub fn ingest_batch<'a, I>(&mut self, platform: Platform, uploads: I) -> BatchReport
    where
        I: IntoIterator<Item = &'a Upload>,
    {
        let files = uploads
            .into_iter()
            .map(|upload| (upload.name.clone(), self.ingest(platform, upload)))
            .collect();
        BatchReport {
            platform: Some(platform),
            files,
        }
    }

    /// Drop all accumulated rows and forget every processed file name.
    pub fn reset(&mut self) {
        self.store.clear();
        self.processed.clear();
        info!("session reset");
    }

    /// Merged B2CS view, grouped by state and rate.
    pub fn b2cs_summary(&self) -> Vec<B2csRow> {
        compile_grouped(self.store.b2cs())
    }

    /// Merged B2C HSN view, grouped by HSN and rate.
    pub fn hsn_summary(&self) -> Vec<HsnRow> {
        compile_grouped(self.store.hsn())
    }

    /// All B2C HSN rows, ungrouped, each tagged with its source platform.
    pub fn hsn_rows(&self) -> Vec<HsnRow> {
        compile(self.store.hsn())
    }

    /// Merged B2B invoice register.
    pub fn b2b_register(&self) -> Vec<B2bInvoiceRow> {
        compile(self.store.b2b())
    }

    /// Merged B2B HSN view, grouped by HSN and rate.
    pub fn hsn_b2b_summary(&self) -> Vec<HsnB2bRow> {
        compile_grouped(self.store.hsn_b2b())
    }

    /// All B2B HSN rows, ungrouped.
    pub fn hsn_b2b_rows(&self) -> Vec<HsnB2bRow> {
        compile(self.store.hsn_b2b())
    }
}
