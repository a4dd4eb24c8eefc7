//! Line normalization applied before a line is interpreted.

/// Strips leading spaces and tabs and collapses every internal run of spaces
/// into a single space.
///
/// This is lossy: text that relies on repeated or leading spaces does not
/// survive a save/parse cycle.
pub fn normalize(line: &str) -> String {
    let trimmed = line.trim_start_matches([' ', '\t']);
    let mut result = String::with_capacity(trimmed.len());
    let mut prev_space = false;
    for c in trimmed.chars() {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_leading_indent() {
        assert_eq!(normalize("\t\t  <a>"), "<a>");
    }

    #[test]
    fn test_collapses_space_runs() {
        assert_eq!(normalize("<a   b=\"x  y\">"), "<a b=\"x y\">");
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(normalize(" \t "), "");
    }

    #[test]
    fn test_keeps_single_trailing_space() {
        assert_eq!(normalize("text   "), "text ");
    }
}
