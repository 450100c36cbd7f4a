// ✂️ Clamped text helpers
//
// Badge layouts are described in fixed character offsets. Every offset rule
// goes through these helpers so a short token yields "" instead of a panic.
// Offsets count chars, never bytes.

/// Number of chars in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the `n`th char, or `s.len()` past the end.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// `s` without its first `n` chars.
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    &s[byte_offset(s, n)..]
}

/// The first `n` chars of `s`.
pub(crate) fn take_chars(s: &str, n: usize) -> &str {
    &s[..byte_offset(s, n)]
}

/// The last `n` chars of `s` (all of `s` when it is shorter).
pub(crate) fn last_chars(s: &str, n: usize) -> &str {
    skip_chars(s, char_len(s).saturating_sub(n))
}

/// Chars `start..end` of `s`, clamped to its length. Empty when `start >= end`.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_and_take_clamp() {
        assert_eq!(skip_chars("M1SMITH", 2), "SMITH");
        assert_eq!(skip_chars("M", 2), "");
        assert_eq!(skip_chars("", 2), "");
        assert_eq!(take_chars("TK0123XYZ", 6), "TK0123");
        assert_eq!(take_chars("TK01", 6), "TK01");
    }

    #[test]
    fn test_last_chars() {
        assert_eq!(last_chars("DOHMLEQR", 2), "QR");
        assert_eq!(last_chars("Q", 2), "Q");
        assert_eq!(last_chars("", 2), "");
    }

    #[test]
    fn test_char_slice_out_of_range() {
        assert_eq!(char_slice("123Y012A0001", 5, 8), "12A");
        assert_eq!(char_slice("ABCDE", 5, 1), "");
        assert_eq!(char_slice("ABC", 8, 11), "");
        assert_eq!(char_slice("ABCDEFGHIJ", 8, 11), "IJ");
    }

    #[test]
    fn test_multibyte_offsets_count_chars() {
        assert_eq!(skip_chars("ÉÉNAME", 2), "NAME");
        assert_eq!(char_len("ÉÉ"), 2);
        assert_eq!(char_slice("ÀBCDÉFGHÌJK", 8, 11), "ÌJK");
    }
}
