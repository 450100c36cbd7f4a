// Lounge Desk - Core Library
// Badge parsing plus the pure computations behind the front-desk screens

pub mod badge;
pub mod cash;      // Cash drawer count + shift eligibility
pub mod checkin;   // Pending check-in records
pub mod config;
pub mod fare;      // Walk-in fare quote
pub mod shift;     // Morning/evening shift board

// Re-export commonly used types
pub use badge::{
    parse_badge, resolve_airline, detect_fqtv, normalize, extract,
    BadgeReader, ParsedBadge, BadgeDialect, ExtractedFields, NameRule,
    CarrierTable, UNKNOWN_AIRLINE,
};
pub use cash::{
    CashCount, Currency, DrawerCounts, DrawerReport, DrawerStatus,
    PettyPresets, RecordedPayment, ShiftActions, ShiftStatus, SystemTotals,
    reconcile, system_totals,
};
pub use checkin::{CheckIn, document_id, earliest_approved_time};
pub use config::Config;
pub use fare::{FareQuote, FareRequest, PaymentType, Rate, RateCard};
pub use shift::{
    ShiftBoard, ShiftDecision, ShiftRecord, ShiftSlot, SlotDisplay, SlotStatus,
    current_shift_label, NO_SHIFT_OPEN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// TESTS
// ============================================================================

// End-to-end scans through the re-exported API: badge → check-in, fare → drawer
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_empty_scan_is_fully_populated() {
        let badge = parse_badge("");

        assert_eq!(badge.name, "");
        assert_eq!(badge.flight_no, "");
        assert_eq!(badge.seat_no, "");
        assert_eq!(badge.fqtv, "");
        assert_eq!(badge.airline, "Unknown");
    }

    #[test]
    fn test_garbage_never_panics() {
        let inputs = [
            "\u{FEFF}",
            "M1",
            "MLE",
            "TKVCPO",
            "TKVCPOTK0MLE",
            "🙂🙂 MLE🙂 🙂🙂🙂🙂🙂🙂🙂🙂🙂",
            "M1X MLE (( 1",
            "M1X ABMLE[] ]]] [] 1",
            "\t\n\r",
            "a b c d e f g h i j k l m n o p",
        ];
        for input in inputs {
            let badge = parse_badge(input);
            assert!(!badge.airline.is_empty());
        }
    }

    #[test]
    fn test_standard_m1_badge_with_gold_member() {
        let badge = parse_badge(
            "M1AHMED/ALI MR EQX4F2R DOHMLEQR 0674 325Y018C0042 QR 123456789 Y1",
        );

        assert_eq!(badge.name, "AHMED/ALI MR E");
        assert_eq!(badge.flight_no, "QR0674");
        assert_eq!(badge.seat_no, "18C");
        assert_eq!(badge.fqtv, "QR-123456789/G");
        assert_eq!(badge.airline, "Qatar Airways");
    }

    #[test]
    fn test_standard_m1_silver_suffix() {
        let badge = parse_badge("M1LEE/MIN EZZ1234 SINMLESQ 0452 100Y004A0001 SQ 8877665 N2");

        assert_eq!(badge.flight_no, "SQ0452");
        assert_eq!(badge.fqtv, "SQ-8877665/S");
        assert_eq!(badge.airline, "Singapore Airlines");
    }

    #[test]
    fn test_tkvcpo_badge() {
        let badge = parse_badge("tkvcpojohn smith  tk0123 xmle12345678ab");

        assert_eq!(badge.name, "JOHN SMITH");
        assert_eq!(badge.flight_no, "TK0123");
        assert_eq!(badge.seat_no, "678");
        assert_eq!(badge.airline, "Turkish Airlines");
    }

    #[test]
    fn test_name_rules_diverge_only_on_name() {
        let raw = "M1SMITH/JOHN EABC123 DOHMLEQR 0674 123Y012A0001 100";
        let span = BadgeReader::new().read(raw);
        let first = BadgeReader::new().with_name_rule(NameRule::FirstToken).read(raw);

        assert_eq!(span.name, "SMITH/JOHN E");
        assert_eq!(first.name, "SMITH/JOHN");
        assert_eq!(span.flight_no, first.flight_no);
        assert_eq!(span.seat_no, first.seat_no);
        assert_eq!(span.fqtv, first.fqtv);
    }

    #[test]
    fn test_fqtv_strategy_precedence_through_public_api() {
        let normalized = normalize("qr987654321 qr 123456");
        let tokens: Vec<&str> = normalized.split(' ').collect();

        assert_eq!(detect_fqtv(&tokens, "QR0674"), "QR-123456");
    }

    #[test]
    fn test_resolver_edge_cases() {
        assert_ne!(resolve_airline("QR0642"), "Unknown");
        assert_eq!(resolve_airline("ZZ9999"), "Unknown");
        assert_eq!(resolve_airline(""), "Unknown");
        assert_eq!(resolve_airline("Q"), "Unknown");
    }

    #[test]
    fn test_custom_carrier_table() {
        let reader = BadgeReader::new().with_carriers(
            CarrierTable::new().with_entries(vec![("NR".to_string(), "Manta Air".to_string())]),
        );
        let badge = reader.read("M1DOE DHIMLENR 0101 100Y002B0003");

        assert_eq!(badge.airline, "Manta Air");
        assert_eq!(badge.seat_no, "02B");
    }

    #[test]
    fn test_scan_to_checkin() {
        let badge = parse_badge("M1AHMED/ALI MR EQX4F2R DOHMLEQR 0674 325Y018C0042");
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();

        let checkin = CheckIn::from_badge(&badge, date, time).unwrap().with_num_pax(2);

        assert_eq!(checkin.time_added, "23:59");
        assert_eq!(checkin.num_pax, 2);
        assert_eq!(checkin.document_id().unwrap(), "AHMEDALIMRE_QR0674");
    }

    #[test]
    fn test_walkin_fares_reconcile_against_drawer() {
        let card: RateCard = serde_json::from_str(
            r#"{"AdultAUSD": {"price": 40, "GST": 10}, "KidsAUSD": {"price": 20, "GST": 10}}"#,
        )
        .unwrap();

        let request = FareRequest {
            adults: 2,
            kids: 1,
            rate_type: "A".to_string(),
            currency: "USD".to_string(),
            payment: PaymentType::Cash,
            paid: 100.0,
        };
        let quote = card.quote(&request).unwrap();
        assert!((quote.grand_total - 110.0).abs() < 1e-9);
        assert!((quote.balance + 10.0).abs() < 1e-9);

        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut board = ShiftBoard::new(today);
        board.open(ShiftSlot::Morning, today.and_hms_opt(6, 0, 0).unwrap()).unwrap();
        let shift = current_shift_label(Some(&board));

        let recorded = |payment_type, grand_total| RecordedPayment {
            date: today,
            shift: shift.to_string(),
            currency: Currency::Usd,
            payment_type,
            grand_total,
        };
        let payments = vec![
            recorded(PaymentType::Cash, 110.0),
            recorded(PaymentType::Card, 55.0),
        ];
        let system = system_totals(&payments, today, shift);
        assert_eq!(system.usd, 110.0);
        assert_eq!(system_totals(&payments, today, "Evening Shift").usd, 0.0);

        let counts = DrawerCounts {
            mvr: CashCount::new(Currency::Mvr),
            usd: CashCount::new(Currency::Usd).with_count(100, 1).with_count(10, 1),
            petty_mvr: CashCount::new(Currency::Mvr).with_count(500, 1),
            petty_usd: CashCount::new(Currency::Usd).with_count(100, 1),
        };
        let report = reconcile(&counts, system, PettyPresets::default());
        assert!(report.enough_cash());
    }
}
