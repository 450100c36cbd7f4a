// 🛂 Check-in records
//
// A pending check-in is what the desk stores after a scan (or a manual
// entry): the badge fields plus date, time added, pax count and notes.
// Supervisors approve it later; the earliest approved arrival of the day
// heads the supervisor's summary.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::badge::ParsedBadge;

/// Document key for a check-in: `<NAME>_<FLIGHT>`, both stripped to ASCII
/// letters and digits and uppercased.
///
/// Returns None when either part is missing.
///
/// # Example:
/// ```
/// use lounge_desk::checkin::document_id;
/// assert_eq!(document_id("Smith/John", "QR 0674"), Some("SMITHJOHN_QR0674".to_string()));
/// ```
pub fn document_id(name: &str, flight_no: &str) -> Option<String> {
    if name.is_empty() || flight_no.is_empty() {
        return None;
    }
    Some(format!("{}_{}", clean_key_part(name), clean_key_part(flight_no)))
}

fn clean_key_part(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// CheckIn - one pending passenger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub date: NaiveDate,
    pub flight_no: String,
    pub airline: String,
    pub name: String,
    pub seat_no: String,
    pub fqtv: String,
    pub serial: String,
    pub remarks: String,
    pub num_pax: u32,
    /// 24h `HH:MM`
    pub time_added: String,
    #[serde(default)]
    pub approved: bool,
}

impl CheckIn {
    /// Build a check-in from a parsed badge
    ///
    /// # Returns
    /// * `Err` if name, seat or flight number is empty
    pub fn from_badge(badge: &ParsedBadge, date: NaiveDate, time: NaiveTime) -> Result<Self> {
        if badge.name.is_empty() || badge.seat_no.is_empty() || badge.flight_no.is_empty() {
            bail!("Name, Seat, and Flight Number are required");
        }

        Ok(CheckIn {
            date,
            flight_no: badge.flight_no.clone(),
            airline: badge.airline.clone(),
            name: badge.name.clone(),
            seat_no: badge.seat_no.clone(),
            fqtv: badge.fqtv.clone(),
            serial: String::new(),
            remarks: String::new(),
            num_pax: 1,
            time_added: time.format("%H:%M").to_string(),
            approved: false,
        })
    }

    pub fn with_serial(mut self, serial: String) -> Self {
        self.serial = serial;
        self
    }

    pub fn with_remarks(mut self, remarks: String) -> Self {
        self.remarks = remarks;
        self
    }

    /// Party size; 0 counts as the default of 1
    pub fn with_num_pax(mut self, num_pax: u32) -> Self {
        self.num_pax = num_pax.max(1);
        self
    }

    /// Mark as approved by a supervisor
    pub fn approve(&mut self) {
        self.approved = true;
    }

    pub fn document_id(&self) -> Option<String> {
        document_id(&self.name, &self.flight_no)
    }
}

/// Earliest `time_added` among approved check-ins; empty times are skipped.
///
/// `HH:MM` is zero-padded, so string order is time order.
pub fn earliest_approved_time(checkins: &[CheckIn]) -> Option<&str> {
    checkins
        .iter()
        .filter(|c| c.approved && !c.time_added.is_empty())
        .map(|c| c.time_added.as_str())
        .min()
}
