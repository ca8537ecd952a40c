//! Per-invoice field records and the result table they accumulate into.

use serde::{Deserialize, Serialize};

/// Column headers of the result table, in record-field order.
pub const COLUMNS: [&str; 4] = ["Invoice Number", "Date", "Total Amount", "Source File"];

/// Fields matched in a document's text.
///
/// A field that did not match is `None`; that is an expected outcome,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
    /// Token following an invoice label.
    pub invoice_number: Option<String>,
    /// First numeric day/month/year triple, verbatim.
    pub date: Option<String>,
    /// First decimal-money shaped number, verbatim.
    pub total_amount: Option<String>,
}

impl InvoiceFields {
    /// True when no field matched.
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none() && self.date.is_none() && self.total_amount.is_none()
    }
}

/// One row of the result table: the parsed fields plus the source file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(rename = "Invoice Number")]
    pub invoice_number: Option<String>,

    #[serde(rename = "Date")]
    pub date: Option<String>,

    #[serde(rename = "Total Amount")]
    pub total_amount: Option<String>,

    #[serde(rename = "Source File")]
    pub source_file: String,
}

impl FieldRecord {
    /// Attach the source file name to parsed fields.
    pub fn new(fields: InvoiceFields, source_file: impl Into<String>) -> Self {
        Self {
            invoice_number: fields.invoice_number,
            date: fields.date,
            total_amount: fields.total_amount,
            source_file: source_file.into(),
        }
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [Option<&str>; 4] {
        [
            self.invoice_number.as_deref(),
            self.date.as_deref(),
            self.total_amount.as_deref(),
            Some(self.source_file.as_str()),
        ]
    }
}

/// Ordered collection of records, one per processed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    records: Vec<FieldRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: FieldRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<FieldRecord> for ResultTable {
    fn from_iter<I: IntoIterator<Item = FieldRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
