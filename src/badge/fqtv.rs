// ✈️ Frequent Flyer Detector
//
// Best-effort: infers a loyalty number from the same token stream the
// extractor saw, keyed on the carrier of the extracted flight. Never fails,
// only comes back empty.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::text::{char_len, take_chars};

/// Two letters then 6-12 digits, the whole token
static FIXED_FORMAT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2})([0-9]{6,12})$").unwrap());

/// Which strategy produced the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FqtvStrategy {
    /// `<carrier> <digits>` as two adjacent tokens
    AdjacentToken,
    /// `<carrier><spaces?><digits>` anywhere in the joined text
    JoinedText,
    /// A single `<carrier><6-12 digits>` token
    FixedFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FqtvMatch {
    pub code: String,
    pub strategy: FqtvStrategy,
}

/// Detect the frequent-flyer code, or "" when nothing matches.
pub fn detect_fqtv(tokens: &[&str], flight_no: &str) -> String {
    detect_fqtv_match(tokens, flight_no)
        .map(|m| m.code)
        .unwrap_or_default()
}

/// Same as [`detect_fqtv`] but reports which strategy matched.
///
/// Strategies run in a fixed order and the first hit wins.
pub fn detect_fqtv_match(tokens: &[&str], flight_no: &str) -> Option<FqtvMatch> {
    if char_len(flight_no) < 2 {
        return None;
    }
    let carrier = take_chars(flight_no, 2).to_uppercase();

    let found = adjacent_token(tokens, &carrier)
        .map(|code| FqtvMatch { code, strategy: FqtvStrategy::AdjacentToken })
        .or_else(|| {
            joined_text(tokens, &carrier)
                .map(|code| FqtvMatch { code, strategy: FqtvStrategy::JoinedText })
        })
        .or_else(|| {
            fixed_format_token(tokens, &carrier)
                .map(|code| FqtvMatch { code, strategy: FqtvStrategy::FixedFormat })
        });

    if let Some(m) = &found {
        tracing::debug!(code = %m.code, strategy = ?m.strategy, "FQTV detected");
    }
    found
}

/// Strategy 1: the carrier as a token of its own, followed by an all-digit
/// token. Stops at the first such pair.
fn adjacent_token(tokens: &[&str], carrier: &str) -> Option<String> {
    let index = tokens.iter().enumerate().position(|(i, token)| {
        *token == carrier && tokens.get(i + 1).is_some_and(|next| is_all_digits(next))
    })?;

    let mut code = format!("{}-{}", carrier, tokens[index + 1]);
    code.push_str(tier_suffix(tokens));
    Some(code)
}

/// Tier marker, read from the last token of the whole stream rather than
/// from the tokens around the match.
fn tier_suffix(tokens: &[&str]) -> &'static str {
    match tokens.last() {
        Some(last) if last.ends_with("Y1") || last.ends_with("N1") => "/G",
        Some(last) if last.ends_with("N2") => "/S",
        _ => "",
    }
}

/// Strategy 2: case-insensitive `<carrier>\s*<digits>` over the joined text.
fn joined_text(tokens: &[&str], carrier: &str) -> Option<String> {
    // Built per call: the carrier varies per badge. Case-insensitive since
    // callers of detect_fqtv may pass tokens that were never normalized.
    let pattern = format!(r"(?i){}\s*([0-9]+)", regex::escape(carrier));
    let re = Regex::new(&pattern).ok()?;
    let joined = tokens.join(" ");
    let caps = re.captures(&joined)?;
    Some(format!("{}-{}", carrier, &caps[1]))
}

/// Strategy 3: a token that is exactly two letters plus 6-12 digits, with
/// the letters equal to the carrier.
fn fixed_format_token(tokens: &[&str], carrier: &str) -> Option<String> {
    tokens.iter().find_map(|token| {
        let caps = FIXED_FORMAT_TOKEN.captures(token)?;
        if &caps[1] == carrier {
            Some(format!("{}-{}", &caps[1], &caps[2]))
        } else {
            None
        }
    })
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// TESTS
// ============================================================================
