//! Name grammar shared by element and attribute names.

/// Returns `true` if `s` is a legal element or attribute name.
///
/// A name is non-empty, starts with an ASCII letter, `:` or `_`, and
/// continues with ASCII alphanumerics or any of `-`, `.`, `_`, `:`.
/// Colons carry no namespace meaning.
pub fn is_valid_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, ':' | '_')
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | ':')
}
