//! Field tag resolution
//!
//! Every schema field carries a handful of compact directive strings
//! ("tags"). This module resolves the effective property name and the
//! inline flag from the naming tags; the remaining tags are handled by
//! the type and validation modules.

/// Splits `val` on `sep` and trims surrounding whitespace from every segment.
///
/// An empty input yields no segments rather than a single empty one.
pub(crate) fn split_trim(val: &str, sep: char) -> Vec<&str> {
    if val.is_empty() {
        return Vec::new();
    }
    val.split(sep).map(str::trim).collect()
}

/// Resolves the effective property name and inline flag for a field.
///
/// The first non-empty leading comma-segment wins, checked across the
/// explicit `field` tag and then the `bson` tag. When both are empty the
/// declared field name is used with its first character lower-cased.
/// Only the `field` tag's second segment can mark a field as inline
/// (`field:"name,inline"`); segments past the second are ignored.
pub fn resolve_name(field_tag: &str, bson_tag: &str, name: &str) -> (String, bool) {
    let field_arr = split_trim(field_tag, ',');
    let inline = field_arr.len() > 1 && field_arr[1].eq_ignore_ascii_case("inline");

    if let Some(first) = field_arr.first() {
        if !first.is_empty() {
            return (first.to_string(), inline);
        }
    }

    let bson_arr = split_trim(bson_tag, ',');
    if let Some(first) = bson_arr.first() {
        if !first.is_empty() {
            return (first.to_string(), inline);
        }
    }

    (first_char_lower(name), inline)
}

/// Lower-cases the first character of `name`, leaving the rest untouched.
pub(crate) fn first_char_lower(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
