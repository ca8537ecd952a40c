//! Amount extraction.

use super::patterns::AMOUNT;
use super::FieldExtractor;

/// Amount field extractor.
///
/// Returns the first run of digits, commas and dots that ends in `.` plus
/// two digits. No currency or magnitude checks are applied, so other
/// numbers in the same shape (dates included) can match first.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        AMOUNT.captures(text).map(|caps| caps[1].to_string())
    }
}
