// SPDX-License-Identifier: MIT OR Apache-2.0

//! The recursive reference substitution engine.
//!
//! Values may embed references to other keys using the `{name}` syntax. This
//! module expands those references by looking the referenced key up through a
//! caller-supplied lookup function and splicing the resolved text in place of
//! the reference, recursively, up to [`MAX_SUBST_DEPTH`] levels.
//!
//! Anything that cannot be expanded stays in the value as literal text: an
//! unknown key keeps its `{name}` delimiters, a `{` with no closing `}` is
//! left untouched, and nesting beyond the depth cap stops expanding at the
//! cap. None of these conditions is an error.

/// Opening delimiter of a reference inside a value.
const START_DELIM: char = '{';

/// Closing delimiter of a reference inside a value.
const END_DELIM: char = '}';

/// The maximum depth for recursive substitution of references within values
/// (e.g. `A={B}`, `B={C}`, `C={D}`, and so on).
pub const MAX_SUBST_DEPTH: usize = 5;

/// Resolves the value stored under `key`, expanding embedded `{name}`
/// references through `lookup`.
///
/// `depth` is the current recursion level; a fresh top-level call passes 0.
/// Returns `None` when `key` itself is absent from the lookup, which callers
/// treat as "leave the referencing text alone" rather than as a failure.
///
/// The scan is a single left-to-right pass that splices and continues:
/// after a reference is replaced, scanning resumes immediately *after* the
/// spliced-in text, so substituted text is never itself rescanned within the
/// same splice step. When expansion aborts mid-value (depth cap, missing
/// closing delimiter, unknown referenced key) the value is returned as
/// assembled so far, keeping any splices already made during this call.
///
/// # Examples
///
/// ```
/// use refcfg::domain::resolver;
/// use std::collections::HashMap;
///
/// let table: HashMap<String, String> = [
///     ("A".to_string(), "12345678".to_string()),
///     ("B".to_string(), "{A}90".to_string()),
///     ("C".to_string(), "{B} plus more".to_string()),
/// ]
/// .into();
///
/// let lookup = |k: &str| table.get(k).cloned();
/// assert_eq!(
///     resolver::resolve("C", 0, &lookup),
///     Some("1234567890 plus more".to_string())
/// );
/// assert_eq!(resolver::resolve("unknown", 0, &lookup), None);
/// ```
pub fn resolve<F>(key: &str, depth: usize, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut value = lookup(key)?;

    // Scan resumes here after each splice, past the substituted text.
    let mut begin_index = 0;

    while let Some(offset) = value[begin_index..].find(START_DELIM) {
        let start_name = begin_index + offset;

        if depth + 1 > MAX_SUBST_DEPTH {
            tracing::trace!(key, depth, "substitution depth cap reached");
            return Some(value);
        }

        // Closing delimiter must follow; otherwise the reference is malformed
        // and the remainder of the value stays literal.
        let end_name = match value[start_name..].find(END_DELIM) {
            Some(rel) => start_name + rel,
            None => return Some(value),
        };

        let const_name = &value[start_name + START_DELIM.len_utf8()..end_name];
        let const_value = match resolve(const_name, depth + 1, lookup) {
            Some(v) => v,
            // Referenced key not found: keep the reference, delimiters and all.
            None => return Some(value),
        };

        let tail = &value[end_name + END_DELIM.len_utf8()..];
        let mut new_value = String::with_capacity(start_name + const_value.len() + tail.len());
        new_value.push_str(&value[..start_name]);
        new_value.push_str(&const_value);
        begin_index = new_value.len();
        new_value.push_str(tail);
        value = new_value;
    }

    Some(value)
}
