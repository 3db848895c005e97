//! Canonical equality forms for the extended value kinds.
//!
//! Functions, dates, regexes, and symbols have no structural children to
//! recurse into; the engine compares them by a canonical string form
//! instead. These forms exist only for equality. Display rendering lives in
//! [`crate::display`] and is allowed to differ.

use crate::value::{FunctionValue, RegexValue, SymbolValue, Value};

/// Separator between a regex pattern and its canonical flag string.
///
/// The unit separator control character cannot appear in a flag string, so
/// `source + separator + flags` is unambiguous even when the pattern itself
/// contains slashes or flag letters.
pub const REGEX_CANONICAL_SEPARATOR: char = '\u{1f}';

impl FunctionValue {
    /// Canonical equality form: the source text with every whitespace run
    /// collapsed to a single space and leading/trailing whitespace removed.
    ///
    /// Equality of functions is purely syntactic. Closures and identity are
    /// not modeled, so two textually equivalent functions are equal.
    pub fn canonical_source(&self) -> String {
        self.source().split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl RegexValue {
    /// Canonical equality form: pattern source, the unit separator, then the
    /// flags sorted as a character set.
    ///
    /// Sorting makes `/a/gi` and `/a/ig` normalize identically; flag order
    /// carries no meaning.
    pub fn canonical(&self) -> String {
        let mut flags: Vec<char> = self.flags().chars().collect();
        flags.sort_unstable();
        let flags: String = flags.into_iter().collect();
        format!("{}{}{}", self.source(), REGEX_CANONICAL_SEPARATOR, flags)
    }
}

impl SymbolValue {
    /// `Symbol(description)` string form, `Symbol()` when undescribed.
    ///
    /// Serves as both the display and the canonical form: two symbols with
    /// equal descriptions normalize equal even when their identities differ.
    pub fn display_form(&self) -> String {
        match self.description() {
            Some(description) => format!("Symbol({description})"),
            None => "Symbol()".to_string(),
        }
    }
}

/// The canonical equality form of an extended-kind value, `None` for every
/// other kind.
///
/// - Function: whitespace-collapsed source text.
/// - Date: decimal milliseconds since the UNIX epoch, timezone-independent.
/// - Regex: pattern source and sorted flags, separator-joined.
/// - Symbol: the `Symbol(description)` form.
pub fn normalize(value: &Value) -> Option<String> {
    match value {
        Value::Function(function) => Some(function.canonical_source()),
        Value::Date(date) => Some(date.epoch_ms().to_string()),
        Value::Regex(regex) => Some(regex.canonical()),
        Value::Symbol(symbol) => Some(symbol.display_form()),
        _ => None,
    }
}
