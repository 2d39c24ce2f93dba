// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property parser trait definition.
//!
//! Parsers turn raw source content into an ordered list of key/value pairs.
//! File adapters pair a parser with the I/O around it.

use crate::domain::Result;

/// A trait for parsing property content.
///
/// Parsers return pairs in content order rather than a map so importers can
/// apply last-wins semantics for duplicate keys themselves.
///
/// # Examples
///
/// ```rust
/// use refcfg::ports::PropertyParser;
/// use refcfg::domain::Result;
///
/// struct ColonParser;
///
/// impl PropertyParser for ColonParser {
///     fn parse(&self, content: &str) -> Result<Vec<(String, String)>> {
///         Ok(content
///             .lines()
///             .filter_map(|l| l.split_once(':'))
///             .map(|(k, v)| (k.to_string(), v.to_string()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["colon"]
///     }
/// }
///
/// let parser = ColonParser;
/// let pairs = parser.parse("a:1\nb:2").unwrap();
/// assert_eq!(pairs.len(), 2);
/// ```
pub trait PropertyParser {
    /// Parses source content into ordered key/value pairs.
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>>;

    /// Returns the file extensions (without the leading dot) this parser
    /// handles, for extension-based parser selection.
    fn supported_extensions(&self) -> &[&str];
}
