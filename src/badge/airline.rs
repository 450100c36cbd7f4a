// 🛫 Airline Code Resolver
//
// Carrier code (first two chars of a flight number) → display name.
// The built-in table is the union of every desk screen's list; sites can
// layer their own entries on top from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::text::{char_len, take_chars};

/// Returned whenever a flight number can't be resolved.
pub const UNKNOWN_AIRLINE: &str = "Unknown";

/// Built-in carrier table.
pub const DEFAULT_CARRIERS: &[(&str, &str)] = &[
    ("BA", "British Airways"),
    ("TK", "Turkish Airlines"),
    ("QR", "Qatar Airways"),
    ("EK", "Emirates"),
    ("EY", "Etihad Airways"),
    ("LH", "Lufthansa"),
    ("AF", "Air France"),
    ("KL", "KLM"),
    ("AA", "American Airlines"),
    ("UA", "United Airlines"),
    ("DL", "Delta Air Lines"),
    ("SQ", "Singapore Airlines"),
    ("CX", "Cathay Pacific"),
    ("NH", "All Nippon Airways"),
    ("JL", "Japan Airlines"),
    ("KE", "Korean Air"),
    ("PG", "Bangkok Airways"),
    ("TG", "Thai Airways"),
    ("MH", "Malaysia Airlines"),
    ("GA", "Garuda Indonesia"),
    ("QF", "Qantas"),
    ("NZ", "Air New Zealand"),
    ("AI", "Air India"),
    ("AC", "Air Canada"),
    ("LX", "Swiss International Air Lines"),
    ("OS", "Austrian Airlines"),
    ("SN", "Brussels Airlines"),
    ("SK", "SAS Scandinavian Airlines"),
    ("AY", "Finnair"),
    ("LO", "LOT Polish Airlines"),
    ("SU", "Aeroflot"),
    ("AZ", "Alitalia"),
    ("IB", "Iberia"),
    ("Q2", "Maldivian"),
    ("SV", "Saudia"),
    ("ET", "Ethiopian Airlines"),
    ("MS", "EgyptAir"),
    ("G9", "Indigo"),
    ("OD", "Batik Air"),
    ("JD", "Beijing Capital Airlines"),
    ("RJ", "Royal Jordanian"),
    ("UL", "Srilankan Airlines"),
    ("GF", "GULF AIR"),
];

/// Carrier code of a flight number: first two chars, uppercased.
pub fn carrier_code(flight_no: &str) -> Option<String> {
    if char_len(flight_no) < 2 {
        return None;
    }
    Some(take_chars(flight_no, 2).to_uppercase())
}

/// Resolve against the built-in table.
pub fn resolve_airline(flight_no: &str) -> String {
    carrier_code(flight_no)
        .and_then(|code| {
            DEFAULT_CARRIERS
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, name)| name.to_string())
        })
        .unwrap_or_else(|| UNKNOWN_AIRLINE.to_string())
}

// ============================================================================
// CARRIER TABLE
// ============================================================================

/// CarrierTable - immutable code → name mapping bundled with a reader
///
/// (De)serializes as a plain JSON object. Deserialized entries go through
/// [`CarrierTable::with_entries`] on an empty table, so they get the same
/// code checks as any other entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct CarrierTable {
    entries: BTreeMap<String, String>,
}

impl CarrierTable {
    /// Table with the built-in carriers
    pub fn new() -> Self {
        Self::empty().with_entries(
            DEFAULT_CARRIERS
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string())),
        )
    }

    /// Table with no carriers at all (everything resolves to Unknown)
    pub fn empty() -> Self {
        CarrierTable {
            entries: BTreeMap::new(),
        }
    }

    /// Built-in carriers plus the entries of a JSON object file
    ///
    /// File format: `{ "XY": "Example Air", "QR": "Qatar" }`. File entries
    /// override built-in ones.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read carriers file: {:?}", path.as_ref()))?;

        let overrides: BTreeMap<String, String> = serde_json::from_str(&content)
            .context("Failed to parse carriers JSON")?;

        Ok(Self::new().with_entries(overrides))
    }

    /// Add entries; codes are uppercased, codes that aren't two chars are skipped.
    pub fn with_entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (code, name) in entries {
            let code = code.trim().to_uppercase();
            if char_len(&code) != 2 {
                tracing::warn!(code = %code, "Skipping carrier entry: code must be 2 characters");
                continue;
            }
            self.entries.insert(code, name);
        }
        self
    }

    /// Name for a 2-letter code (case-insensitive)
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.entries.get(&code.to_uppercase()).map(String::as_str)
    }

    /// Airline name for a flight number, or "Unknown"
    pub fn resolve(&self, flight_no: &str) -> String {
        carrier_code(flight_no)
            .and_then(|code| self.entries.get(&code).cloned())
            .unwrap_or_else(|| UNKNOWN_AIRLINE.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CarrierTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, String>> for CarrierTable {
    fn from(entries: BTreeMap<String, String>) -> Self {
        CarrierTable::empty().with_entries(entries)
    }
}

impl From<CarrierTable> for BTreeMap<String, String> {
    fn from(table: CarrierTable) -> Self {
        table.entries
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(resolve_airline("QR0642"), "Qatar Airways");
        assert_eq!(resolve_airline("ZZ9999"), UNKNOWN_AIRLINE);
        assert_eq!(resolve_airline(""), UNKNOWN_AIRLINE);
        assert_eq!(resolve_airline("Q"), UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_resolve_lowercase_flight() {
        assert_eq!(resolve_airline("ek0652"), "Emirates");
        assert_eq!(resolve_airline("q2 123"), "Maldivian");
    }

    #[test]
    fn test_table_is_union_of_screens() {
        let table = CarrierTable::new();
        for code in ["AI", "AC", "G9", "RJ", "UL", "GF"] {
            assert!(table.lookup(code).is_some(), "missing {code}");
        }
        assert_eq!(table.len(), DEFAULT_CARRIERS.len());
    }

    #[test]
    fn test_table_matches_free_function() {
        let table = CarrierTable::new();
        for (code, _) in DEFAULT_CARRIERS {
            let flight = format!("{code}123");
            assert_eq!(table.resolve(&flight), resolve_airline(&flight));
        }
        assert_eq!(table.resolve("ZZ1"), UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_empty_table() {
        let table = CarrierTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.resolve("QR0642"), UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_with_entries_override_and_skip() {
        let table = CarrierTable::new().with_entries(vec![
            ("qr".to_string(), "Qatar".to_string()),
            ("8M".to_string(), "Myanmar Airways".to_string()),
            ("XYZ".to_string(), "Too Long".to_string()),
        ]);

        assert_eq!(table.resolve("QR0642"), "Qatar");
        assert_eq!(table.resolve("8M0231"), "Myanmar Airways");
        assert_eq!(table.lookup("XYZ"), None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"VP": "Villa Air", "EK": "Emirates Airline"}}"#).unwrap();

        let table = CarrierTable::from_file(file.path()).unwrap();
        assert_eq!(table.resolve("VP0101"), "Villa Air");
        assert_eq!(table.resolve("EK0652"), "Emirates Airline");
        assert_eq!(table.resolve("BA0001"), "British Airways");
    }

    #[test]
    fn test_from_file_errors() {
        assert!(CarrierTable::from_file("/nonexistent/carriers.json").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(CarrierTable::from_file(file.path()).is_err());
    }

    #[test]
    fn test_deserialize_applies_code_checks() {
        let table: CarrierTable =
            serde_json::from_str(r#"{"vp":"Villa Air","XYZ":"Too Long"}"#).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.resolve("VP100"), "Villa Air");
        assert_eq!(table.lookup("XYZ"), None);
        assert_eq!(table.resolve("QR0674"), UNKNOWN_AIRLINE);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let table = CarrierTable::empty().with_entries(vec![("vp".to_string(), "Villa Air".to_string())]);
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json, serde_json::json!({"VP": "Villa Air"}));
    }
}
