//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::FieldParser;
