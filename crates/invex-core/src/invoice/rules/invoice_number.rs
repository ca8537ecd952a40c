//! Invoice number extraction.

use super::patterns::INVOICE_NUMBER;
use super::FieldExtractor;

/// Finds the word token that follows an invoice label.
///
/// Recognized labels: `Invoice`, `发票`, `Faktura`, any case.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        INVOICE_NUMBER
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().to_string())
    }
}
