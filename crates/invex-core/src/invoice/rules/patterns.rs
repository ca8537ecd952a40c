//! Regex patterns for invoice field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice label (English, Chinese, Danish) then the next word token on the same line
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)(Invoice|发票|Faktura).*?(\w+)"
    ).unwrap();

    // Numeric D/M/Y triple, any of . / - as separators, no calendar check
    pub static ref DATE: Regex = Regex::new(
        r"(\d{1,2}[./\-]\d{1,2}[./\-]\d{2,4})"
    ).unwrap();

    // Digits and separators ending in a dot and two decimals
    pub static ref AMOUNT: Regex = Regex::new(
        r"([\d,.]+\.\d{2})"
    ).unwrap();
}
