// 🎫 Badge Parser - QR boarding-pass scan → check-in form fields
//
// raw text → normalize → extract (per dialect) → FQTV + airline
//
// Every step degrades to "" (or "Unknown" for the airline) instead of
// failing: operators scan whatever the passenger hands over and the form
// has to stay usable.

pub mod airline;
pub mod extract;
pub mod fqtv;
pub mod normalize;
mod text;

pub use airline::{carrier_code, resolve_airline, CarrierTable, DEFAULT_CARRIERS, UNKNOWN_AIRLINE};
pub use extract::{
    detect_dialect, extract, extract_with, get_parser, BadgeDialect, DialectParser,
    ExtractedFields, NameRule, StandardM1Parser, TkvcpoParser,
};
pub use fqtv::{detect_fqtv, detect_fqtv_match, FqtvMatch, FqtvStrategy};
pub use normalize::{normalize, tokenize};

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// ParsedBadge - everything a check-in or payment form takes from a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBadge {
    pub name: String,
    pub flight_no: String,
    pub seat_no: String,
    pub fqtv: String,
    pub airline: String,
}

impl ParsedBadge {
    /// Was anything at all recognised?
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.flight_no.is_empty()
            && self.seat_no.is_empty()
            && self.fqtv.is_empty()
    }
}

/// BadgeReader - the full pipeline with its carrier table and name rule
///
/// Immutable once built, so one reader can serve every scan.
#[derive(Debug, Clone, Default)]
pub struct BadgeReader {
    carriers: CarrierTable,
    name_rule: NameRule,
}

impl BadgeReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_carriers(mut self, carriers: CarrierTable) -> Self {
        self.carriers = carriers;
        self
    }

    pub fn with_name_rule(mut self, name_rule: NameRule) -> Self {
        self.name_rule = name_rule;
        self
    }

    pub fn carriers(&self) -> &CarrierTable {
        &self.carriers
    }

    pub fn name_rule(&self) -> NameRule {
        self.name_rule
    }

    /// Parse one raw scan. Never fails.
    pub fn read(&self, raw: &str) -> ParsedBadge {
        let normalized = normalize(raw);
        let tokens = tokenize(&normalized);

        let dialect = detect_dialect(&normalized);
        let fields = get_parser(dialect, self.name_rule).extract(&normalized);

        let fqtv = detect_fqtv(&tokens, &fields.flight_no);
        let airline = self.carriers.resolve(&fields.flight_no);

        tracing::debug!(
            %dialect,
            name = %fields.name,
            flight_no = %fields.flight_no,
            seat_no = %fields.seat_no,
            fqtv = %fqtv,
            airline = %airline,
            "Badge parsed"
        );

        ParsedBadge {
            name: fields.name,
            flight_no: fields.flight_no,
            seat_no: fields.seat_no,
            fqtv,
            airline,
        }
    }

    /// Parse a batch of scans, skipping blank lines.
    pub fn read_all<'a, I>(&self, scans: I) -> Vec<ParsedBadge>
    where
        I: IntoIterator<Item = &'a str>,
    {
        scans
            .into_iter()
            .filter(|scan| !scan.trim().is_empty())
            .map(|scan| self.read(scan))
            .collect()
    }
}

static DEFAULT_READER: LazyLock<BadgeReader> = LazyLock::new(BadgeReader::new);

/// Parse a raw scan with the built-in carrier table and default name rule.
pub fn parse_badge(raw: &str) -> ParsedBadge {
    DEFAULT_READER.read(raw)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_badge_empty() {
        let badge = parse_badge("");

        assert_eq!(badge.name, "");
        assert_eq!(badge.flight_no, "");
        assert_eq!(badge.seat_no, "");
        assert_eq!(badge.fqtv, "");
        assert_eq!(badge.airline, "Unknown");
        assert!(badge.is_blank());
    }

    #[test]
    fn test_parse_badge_standard_m1() {
        let badge = parse_badge("m1smith/john   eabc123 dohmleqr 0674 123y012a0001 100");

        assert_eq!(badge.name, "SMITH/JOHN E");
        assert_eq!(badge.flight_no, "QR0674");
        assert_eq!(badge.seat_no, "12A");
        assert_eq!(badge.fqtv, "QR-0674");
        assert_eq!(badge.airline, "Qatar Airways");
    }

    #[test]
    fn test_parse_badge_tkvcpo() {
        let badge = parse_badge("TKVCPOJOHN SMITH TK0123 XMLE12345678AB");

        assert_eq!(badge.name, "JOHN SMITH");
        assert_eq!(badge.flight_no, "TK0123");
        assert_eq!(badge.seat_no, "678");
        assert_eq!(badge.fqtv, "TK-0123");
        assert_eq!(badge.airline, "Turkish Airlines");
    }

    #[test]
    fn test_parse_badge_is_repeatable() {
        let raw = "M1DOE/JANE EXYZ789 DOHMLEEK 0652 120Y033K0009 EK 445566 Y1";
        let first = parse_badge(raw);
        let second = parse_badge(raw);

        assert_eq!(first, second);
        assert_eq!(first.fqtv, "EK-445566/G");
    }

    #[test]
    fn test_reader_custom_name_rule_and_carriers() {
        let reader = BadgeReader::new()
            .with_name_rule(NameRule::FirstToken)
            .with_carriers(CarrierTable::empty());

        let badge = reader.read("M1SMITH/JOHN EABC123 DOHMLEQR 0674 123Y012A0001");
        assert_eq!(badge.name, "SMITH/JOHN");
        assert_eq!(badge.airline, "Unknown");
        assert_eq!(reader.name_rule(), NameRule::FirstToken);
    }

    #[test]
    fn test_read_all_skips_blank_lines() {
        let reader = BadgeReader::new();
        let badges = reader.read_all(vec!["M1DOE DOHMLEQR 0674", "  ", "", "TKVCPOA TK0001"]);

        assert_eq!(badges.len(), 2);
        assert_eq!(badges[0].flight_no, "QR0674");
        assert_eq!(badges[1].flight_no, "TK0001");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(parse_badge("M1DOE DOHMLEQR 0674")).unwrap();

        assert_eq!(json["flightNo"], "QR0674");
        assert_eq!(json["seatNo"], "");
        assert_eq!(json["airline"], "Qatar Airways");
    }

    #[test]
    fn test_reader_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BadgeReader>();

        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| parse_badge("M1DOE DOHMLEQR 0674 123Y012A0001")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().seat_no, "12A");
        }
    }
}
