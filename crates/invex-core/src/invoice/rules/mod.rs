//! Rule-based field extractors.

pub mod amounts;
pub mod dates;
pub mod invoice_number;
pub mod patterns;

pub use amounts::AmountExtractor;
pub use dates::DateExtractor;
pub use invoice_number::InvoiceNumberExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
