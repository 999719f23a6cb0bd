use crate::core::{B2bInvoiceRow, B2csRow, HsnB2bRow, HsnRow};
use crate::ingest::Delta;

/// The four accumulated outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    B2cs,
    Hsn,
    B2b,
    HsnB2b,
}

impl OutputKind {
    pub const ALL: [OutputKind; 4] = [Self::B2cs, Self::Hsn, Self::B2b, Self::HsnB2b];
}

/// One appended batch, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    B2cs(Vec<B2csRow>),
    Hsn(Vec<HsnRow>),
    B2b(Vec<B2bInvoiceRow>),
    HsnB2b(Vec<HsnB2bRow>),
}

impl Table {
    pub fn kind(&self) -> OutputKind {
        match self {
            Table::B2cs(_) => OutputKind::B2cs,
            Table::Hsn(_) => OutputKind::Hsn,
            Table::B2b(_) => OutputKind::B2b,
            Table::HsnB2b(_) => OutputKind::HsnB2b,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Table::B2cs(rows) => rows.len(),
            Table::Hsn(rows) => rows.len(),
            Table::B2b(rows) => rows.len(),
            Table::HsnB2b(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered, append-only sequences of batches per output kind.
///
/// No deduplication happens here; see [`super::Session`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    b2cs: Vec<Vec<B2csRow>>,
    hsn: Vec<Vec<HsnRow>>,
    b2b: Vec<Vec<B2bInvoiceRow>>,
    hsn_b2b: Vec<Vec<HsnB2bRow>>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, table: Table) {
        match table {
            Table::B2cs(rows) => self.b2cs.push(rows),
            Table::Hsn(rows) => self.hsn.push(rows),
            Table::B2b(rows) => self.b2b.push(rows),
            Table::HsnB2b(rows) => self.hsn_b2b.push(rows),
        }
    }

    /// Append every non-empty output of one ingested file.
    pub fn append_delta(&mut self, delta: Delta) {
        let tables = [
            Table::B2cs(delta.b2cs),
            Table::Hsn(delta.hsn),
            Table::B2b(delta.b2b),
            Table::HsnB2b(delta.hsn_b2b),
        ];
        for table in tables {
            if !table.is_empty() {
                self.append(table);
            }
        }
    }

    pub fn b2cs(&self) -> &[Vec<B2csRow>] {
        &self.b2cs
    }

    pub fn hsn(&self) -> &[Vec<HsnRow>] {
        &self.hsn
    }

    pub fn b2b(&self) -> &[Vec<B2bInvoiceRow>] {
        &self.b2b
    }

    pub fn hsn_b2b(&self) -> &[Vec<HsnB2bRow>] {
        &self.hsn_b2b
    }

    /// Number of appended batches of `kind`.
    pub fn batch_count(&self, kind: OutputKind) -> usize {
        match kind {
            OutputKind::B2cs => self.b2cs.len(),
            OutputKind::Hsn => self.hsn.len(),
            OutputKind::B2b => self.b2b.len(),
            OutputKind::HsnB2b => self.hsn_b2b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        OutputKind::ALL.iter().all(|k| self.batch_count(*k) == 0)
    }

    pub fn clear(&mut self) {
        self.b2cs.clear();
        self.hsn.clear();
        self.b2b.clear();
        self.hsn_b2b.clear();
    }
}
