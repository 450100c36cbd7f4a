// 🧹 Badge text normalizer
//
// Scanners emulate a keyboard, so raw text arrives with stray spaces, tabs,
// line breaks, lowercase letters and sometimes a byte-order mark.

/// Is `c` a separator in scanned text? Same set as a browser's `\s`:
/// U+FEFF counts, U+0085 (NEL) does not.
fn is_scan_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

/// Trim, uppercase, and collapse every whitespace run into a single space.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.split(is_scan_whitespace)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Split normalized text into its token stream.
///
/// Plain split on `' '`: the empty string yields one empty token, and every
/// extraction rule is written to tolerate that.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split(' ').collect()
}
