//! Entity encoding for text and attribute values.
//!
//! Only the five reserved characters are handled. Decoding recognises exactly
//! the references produced by [`encode`]; any other `&...;` token is dropped
//! from the output rather than passed through.

/// Reserved characters and their entity references, in match order.
/// `&` comes first so that it is never confused with part of another entity.
pub const ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('"', "&quot;"),
    ('>', "&gt;"),
    ('\'', "&#39;"),
];

/// Replaces every reserved character in `text` with its entity reference.
pub fn encode(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match ENTITIES.iter().find(|(key, _)| *key == c) {
            Some((_, entity)) => result.push_str(entity),
            None => result.push(c),
        }
    }
    result
}

/// Replaces entity references in `text` with the characters they stand for.
///
/// A token runs from `&` up to and including the next `;` (or the end of
/// input when there is none). Tokens missing from [`ENTITIES`] contribute
/// nothing.
pub fn decode(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        let mut token = String::from("&");
        for next in chars.by_ref() {
            token.push(next);
            if next == ';' {
                break;
            }
        }

        if let Some((key, _)) = ENTITIES.iter().find(|(_, entity)| *entity == token) {
            result.push(*key);
        }
    }
    result
}
