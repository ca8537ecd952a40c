//! Rule-based invoice field parser.

use tracing::debug;

use crate::models::record::InvoiceFields;

use super::rules::{AmountExtractor, DateExtractor, FieldExtractor, InvoiceNumberExtractor};

/// Parses the fixed invoice fields out of extracted text.
///
/// Each field takes the first match of its rule; a field without a match
/// is left as `None`.
pub struct FieldParser {
    invoice_number: InvoiceNumberExtractor,
    date: DateExtractor,
    amount: AmountExtractor,
}

impl FieldParser {
    pub fn new() -> Self {
        Self {
            invoice_number: InvoiceNumberExtractor::new(),
            date: DateExtractor::new(),
            amount: AmountExtractor::new(),
        }
    }

    /// Parse invoice fields from text.
    pub fn parse(&self, text: &str) -> InvoiceFields {
        let fields = InvoiceFields {
            invoice_number: self.invoice_number.extract(text),
            date: self.date.extract(text),
            total_amount: self.amount.extract(text),
        };

        debug!(
            "Parsed {} chars: number={:?} date={:?} total={:?}",
            text.len(),
            fields.invoice_number,
            fields.date,
            fields.total_amount
        );

        fields
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}
