// 🏗️ Field Extractor - dialect-aware positional parser
//
// Two badge layouts are in circulation at the desk:
// - StandardM1: space-separated IATA M1 text, anchored on the token that
//   carries the MLE airport code
// - TKVCPO: a carrier-specific layout that is scanned as raw substrings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::normalize::tokenize;
use super::text::{char_len, char_slice, last_chars, skip_chars, take_chars};

/// Prefix that selects the TKVCPO layout.
pub const TKVCPO_PREFIX: &str = "TKVCPO";

/// Airport code that anchors both layouts.
pub const AIRPORT_CODE: &str = "MLE";

/// Width of the document-type preamble in front of a TKVCPO name.
const TKVCPO_PREAMBLE: usize = 6;

/// Flight marker and fixed flight width in the TKVCPO layout.
const TKVCPO_FLIGHT_MARKER: &str = "TK0";
const TKVCPO_FLIGHT_WIDTH: usize = 6;

/// Document-type prefix on the first StandardM1 token (e.g. "M1").
const M1_PREFIX_WIDTH: usize = 2;

/// Trailing check/document characters glued to a StandardM1 name.
const M1_NAME_TRAILER: usize = 6;

// ============================================================================
// CORE TYPES
// ============================================================================

/// BadgeDialect - which layout a scan follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeDialect {
    StandardM1,
    Tkvcpo,
}

impl BadgeDialect {
    pub fn name(&self) -> &'static str {
        match self {
            BadgeDialect::StandardM1 => "Standard M1",
            BadgeDialect::Tkvcpo => "TKVCPO",
        }
    }
}

impl fmt::Display for BadgeDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// NameRule - how a StandardM1 name is cut out of the token stream
///
/// The desk screens disagreed here, so both behaviours stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameRule {
    /// Every token before the MLE token, minus the "M1" prefix and the
    /// 6-character trailer. Used by check-in and the payment screen.
    #[default]
    SpanBeforeMle,

    /// First token minus the "M1" prefix, nothing else. Used by the
    /// older walk-in screen.
    FirstToken,
}

impl FromStr for NameRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "span" | "span-before-mle" => Ok(NameRule::SpanBeforeMle),
            "first-token" | "first" => Ok(NameRule::FirstToken),
            other => Err(anyhow::anyhow!("Unknown name rule: {}", other)),
        }
    }
}

/// ExtractedFields - output of the extractor
///
/// Each field is independent: "" means not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: String,
    pub flight_no: String,
    pub seat_no: String,
    pub dialect: BadgeDialect,
}

impl ExtractedFields {
    pub fn empty(dialect: BadgeDialect) -> Self {
        ExtractedFields {
            name: String::new(),
            flight_no: String::new(),
            seat_no: String::new(),
            dialect,
        }
    }
}

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// DialectParser - one rule set per badge layout
///
/// Implementations are stateless and must never panic, whatever the input.
pub trait DialectParser: Send + Sync {
    /// Extract name, flight and seat from already-normalized text
    fn extract(&self, normalized: &str) -> ExtractedFields;

    /// Layout this parser handles
    fn dialect(&self) -> BadgeDialect;
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Pick the layout by a hard prefix test on normalized text.
pub fn detect_dialect(normalized: &str) -> BadgeDialect {
    if normalized.starts_with(TKVCPO_PREFIX) {
        BadgeDialect::Tkvcpo
    } else {
        BadgeDialect::StandardM1
    }
}

/// Get the parser for a layout. `name_rule` only affects StandardM1.
pub fn get_parser(dialect: BadgeDialect, name_rule: NameRule) -> Box<dyn DialectParser> {
    match dialect {
        BadgeDialect::StandardM1 => Box::new(StandardM1Parser::new().with_name_rule(name_rule)),
        BadgeDialect::Tkvcpo => Box::new(TkvcpoParser::new()),
    }
}

/// Detect the layout and extract with the default name rule.
pub fn extract(normalized: &str) -> ExtractedFields {
    extract_with(normalized, NameRule::default())
}

/// Detect the layout and extract with an explicit name rule.
pub fn extract_with(normalized: &str, name_rule: NameRule) -> ExtractedFields {
    get_parser(detect_dialect(normalized), name_rule).extract(normalized)
}

// ============================================================================
// TKVCPO
// ============================================================================

/// TKVCPO layout: `TKVCPO<NAME> ... TK0nnn ... <..>MLE<........seat..>`
pub struct TkvcpoParser;

impl TkvcpoParser {
    pub fn new() -> Self {
        TkvcpoParser
    }
}

impl Default for TkvcpoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for TkvcpoParser {
    fn extract(&self, normalized: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::empty(BadgeDialect::Tkvcpo);

        if let Some(tk_index) = normalized.find(TKVCPO_FLIGHT_MARKER) {
            fields.flight_no = take_chars(&normalized[tk_index..], TKVCPO_FLIGHT_WIDTH).to_string();
            fields.name = normalized
                .get(TKVCPO_PREAMBLE..tk_index)
                .unwrap_or("")
                .trim()
                .to_string();
        }

        // Raw substring, not a token: the code may sit mid-word
        if let Some(mle_pos) = normalized.find(AIRPORT_CODE) {
            let chunk = normalized[mle_pos..].split(' ').next().unwrap_or("");
            if char_len(chunk) >= 11 {
                fields.seat_no = char_slice(chunk, 8, 11).to_string();
            }
        }

        fields
    }

    fn dialect(&self) -> BadgeDialect {
        BadgeDialect::Tkvcpo
    }
}

// ============================================================================
// STANDARD M1
// ============================================================================

/// StandardM1 layout: `M1<NAME...> <PNR> <FROM>MLE<CC> <FLIGHT> <..SEAT....> ...`
pub struct StandardM1Parser {
    name_rule: NameRule,
}

impl StandardM1Parser {
    pub fn new() -> Self {
        StandardM1Parser {
            name_rule: NameRule::default(),
        }
    }

    pub fn with_name_rule(mut self, name_rule: NameRule) -> Self {
        self.name_rule = name_rule;
        self
    }

    fn extract_name(&self, tokens: &[&str], mle_index: Option<usize>) -> String {
        let first = tokens.first().copied().unwrap_or("");

        if self.name_rule == NameRule::FirstToken {
            return skip_chars(first, M1_PREFIX_WIDTH).to_string();
        }

        let name = match mle_index {
            Some(m) if m > 0 => {
                let mut parts: Vec<&str> = tokens[..m].to_vec();
                parts[0] = skip_chars(parts[0], M1_PREFIX_WIDTH);
                parts.join(" ").trim().to_string()
            }
            _ => skip_chars(first, M1_PREFIX_WIDTH).to_string(),
        };

        // Names of 6 chars or fewer are kept whole
        let len = char_len(&name);
        if len > M1_NAME_TRAILER {
            take_chars(&name, len - M1_NAME_TRAILER).trim().to_string()
        } else {
            name
        }
    }

    fn extract_seat(after_mle: &[&str]) -> String {
        after_mle
            .iter()
            .find(|w| char_len(w) >= 9 && !w.contains("QR") && !w.contains(AIRPORT_CODE))
            .map(|w| char_slice(w, 5, char_len(w) - 4).to_string())
            .unwrap_or_default()
    }
}

impl Default for StandardM1Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectParser for StandardM1Parser {
    fn extract(&self, normalized: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::empty(BadgeDialect::StandardM1);
        let tokens = tokenize(normalized);
        let mle_index = tokens.iter().position(|w| w.contains(AIRPORT_CODE));

        fields.name = self.extract_name(&tokens, mle_index);

        // No MLE token, no flight: there is no secondary inference path
        if let Some(m) = mle_index {
            let next = tokens.get(m + 1).copied().unwrap_or("");
            fields.flight_no = format!("{}{}", last_chars(tokens[m], 2), next);
            fields.seat_no = Self::extract_seat(&tokens[m + 1..]);
        }

        fields
    }

    fn dialect(&self) -> BadgeDialect {
        BadgeDialect::StandardM1
    }
}

// ============================================================================
// TESTS
// ============================================================================
