//! Text normalizer: canonical lowercase form used by every comparison.

/// Punctuation that survives the first cleaning pass in résumé text
/// (`node.js`, `c++`, `c#`, `full-stack`) and is then stripped without leaving
/// a separator, so `node.js` and `nodejs` compare equal.
const JOINING_PUNCTUATION: &[char] = &['.', ',', '-', '+', '#'];

/// Normalizes raw text:
/// - lowercases
/// - drops joining punctuation (`. , - + #`) in place
/// - turns every other non-word character into a separator
/// - collapses separators to single spaces and trims the ends
///
/// The output contains only word characters and single spaces, so applying
/// `normalize` again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if is_word_char(ch) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else if !JOINING_PUNCTUATION.contains(&ch) {
            pending_space = true;
        }
    }

    out
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
