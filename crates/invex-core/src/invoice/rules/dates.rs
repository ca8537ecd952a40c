//! Date extraction.

use super::patterns::DATE;
use super::FieldExtractor;

/// Date field extractor.
///
/// Returns the first `D[./-]M[./-]Y` triple verbatim. Day and month take
/// one or two digits, the year two to four. Calendar validity is not
/// checked.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        DATE.captures(text).map(|caps| caps[1].to_string())
    }
}
