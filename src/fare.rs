// 💵 Walk-in fare quote
//
// Walk-in passengers pay at the desk. The rate card is keyed by passenger
// kind, rate type and currency ("AdultAUSD", "KidsBMVR", ...); GST is a
// percentage taken from the adult rate.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// How the passenger pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    Cash,
    Card,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Cash",
            PaymentType::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentType::Cash),
            "card" => Ok(PaymentType::Card),
            other => Err(anyhow::anyhow!("Unknown payment type: {}", other)),
        }
    }
}

/// One rate card entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub price: f64,

    /// GST percentage (only read from the adult rate)
    #[serde(rename = "GST", default)]
    pub gst: f64,
}

/// Rate card as stored by the desk: rate key → rate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateCard {
    rates: HashMap<String, Rate>,
}

/// What the cashier has entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareRequest {
    pub adults: u32,
    pub kids: u32,
    /// Rate tier letter, e.g. "A"
    pub rate_type: String,
    /// Currency code, e.g. "USD" or "MVR"
    pub currency: String,
    pub payment: PaymentType,
    /// Amount tendered (cash only)
    pub paid: f64,
}

/// Computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FareQuote {
    pub adults_total: f64,
    pub kids_total: f64,
    pub subtotal: f64,
    pub gst: f64,
    pub grand_total: f64,
    /// Change due (negative = still owed); always 0 for card
    pub balance: f64,
}

impl RateCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a rate card from a JSON object file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rate card: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse rate card JSON")
    }

    /// Rate key: `<Adult|Kids><rate_type><currency>`
    pub fn rate_key(kind: &str, rate_type: &str, currency: &str) -> String {
        format!("{}{}{}", kind, rate_type, currency)
    }

    pub fn insert(&mut self, key: String, rate: Rate) {
        self.rates.insert(key, rate);
    }

    pub fn get(&self, key: &str) -> Option<&Rate> {
        self.rates.get(key)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Quote a walk-in fare
    ///
    /// # Returns
    /// * `None` if the card has no adult or no kids rate for the
    ///   rate type/currency pair
    pub fn quote(&self, request: &FareRequest) -> Option<FareQuote> {
        let adult = self.get(&Self::rate_key("Adult", &request.rate_type, &request.currency))?;
        let kids = self.get(&Self::rate_key("Kids", &request.rate_type, &request.currency))?;

        let adults_total = request.adults as f64 * adult.price;
        let kids_total = request.kids as f64 * kids.price;
        let subtotal = adults_total + kids_total;
        let gst = subtotal * (adult.gst / 100.0);
        let grand_total = subtotal + gst;

        let balance = match request.payment {
            PaymentType::Card => 0.0,
            PaymentType::Cash => request.paid - grand_total,
        };

        Some(FareQuote {
            adults_total,
            kids_total,
            subtotal,
            gst,
            grand_total,
            balance,
        })
    }
}
