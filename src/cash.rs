// ⚖️ Cash drawer reconciliation
//
// At shift open/close the cashier counts four drawers: MVR and USD takings,
// plus an MVR and a USD petty-cash float. Takings must cover what the
// system recorded as cash sales for the shift; floats must cover their
// presets. Only then may the cashier shift be opened or closed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fare::PaymentType;

/// MVR notes and coins, largest first
pub const MVR_DENOMINATIONS: &[u32] = &[1000, 500, 100, 50, 20, 10, 5, 2, 1];

/// USD notes, largest first
pub const USD_DENOMINATIONS: &[u32] = &[100, 50, 20, 10, 5, 1];

// ============================================================================
// CURRENCY + COUNTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Mvr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Mvr => "MVR",
            Currency::Usd => "USD",
        }
    }

    pub fn denominations(&self) -> &'static [u32] {
        match self {
            Currency::Mvr => MVR_DENOMINATIONS,
            Currency::Usd => USD_DENOMINATIONS,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "MVR" => Some(Currency::Mvr),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

/// CashCount - how many of each denomination are in one drawer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashCount {
    pub currency: Currency,
    pub counts: BTreeMap<u32, u32>,
}

impl CashCount {
    pub fn new(currency: Currency) -> Self {
        CashCount {
            currency,
            counts: BTreeMap::new(),
        }
    }

    /// Builder: set the count for one denomination
    pub fn with_count(mut self, denomination: u32, count: u32) -> Self {
        self.set(denomination, count);
        self
    }

    pub fn set(&mut self, denomination: u32, count: u32) {
        self.counts.insert(denomination, count);
    }

    /// (denomination, line total) for every denomination of the currency
    pub fn line_totals(&self) -> Vec<(u32, f64)> {
        self.currency
            .denominations()
            .iter()
            .map(|&d| (d, d as f64 * self.counts.get(&d).copied().unwrap_or(0) as f64))
            .collect()
    }

    /// Drawer total. Denominations the currency doesn't have are ignored.
    pub fn total(&self) -> f64 {
        self.line_totals().iter().map(|(_, amount)| amount).sum()
    }
}

/// The four drawers counted at a shift change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerCounts {
    pub mvr: CashCount,
    pub usd: CashCount,
    pub petty_mvr: CashCount,
    pub petty_usd: CashCount,
}

impl DrawerCounts {
    pub fn new() -> Self {
        DrawerCounts {
            mvr: CashCount::new(Currency::Mvr),
            usd: CashCount::new(Currency::Usd),
            petty_mvr: CashCount::new(Currency::Mvr),
            petty_usd: CashCount::new(Currency::Usd),
        }
    }
}

impl Default for DrawerCounts {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// EXPECTED AMOUNTS
// ============================================================================

/// Petty-cash floats the drawer must hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PettyPresets {
    pub mvr: f64,
    pub usd: f64,
}

impl Default for PettyPresets {
    fn default() -> Self {
        PettyPresets { mvr: 500.0, usd: 100.0 }
    }
}

/// Cash sales the system recorded for the shift
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemTotals {
    pub mvr: f64,
    pub usd: f64,
}

/// A recorded walk-in payment, as far as the drawer cares
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedPayment {
    pub date: NaiveDate,
    /// Shift label stamped at payment time, e.g. "Morning Shift"
    pub shift: String,
    pub currency: Currency,
    pub payment_type: PaymentType,
    pub grand_total: f64,
}

/// Sum one shift's cash payments per currency.
///
/// Payments from other dates or shifts are ignored, and card payments
/// never reach the drawer.
pub fn system_totals(payments: &[RecordedPayment], date: NaiveDate, shift: &str) -> SystemTotals {
    let mut totals = SystemTotals::default();

    let in_drawer = payments
        .iter()
        .filter(|p| p.date == date && p.shift == shift && p.payment_type == PaymentType::Cash);
    for payment in in_drawer {
        match payment.currency {
            Currency::Mvr => totals.mvr += payment.grand_total,
            Currency::Usd => totals.usd += payment.grand_total,
        }
    }

    tracing::debug!(%date, shift, mvr = totals.mvr, usd = totals.usd, "System cash totals");
    totals
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawerStatus {
    /// Counted cash covers the expected amount
    Ok,

    /// Counted cash falls short
    Short { difference: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerLine {
    pub counted: f64,
    pub expected: f64,
    pub status: DrawerStatus,
}

impl DrawerLine {
    fn compare(counted: f64, expected: f64) -> Self {
        let status = if counted >= expected {
            DrawerStatus::Ok
        } else {
            DrawerStatus::Short {
                difference: expected - counted,
            }
        };
        DrawerLine {
            counted,
            expected,
            status,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == DrawerStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawerReport {
    pub mvr: DrawerLine,
    pub usd: DrawerLine,
    pub petty_mvr: DrawerLine,
    pub petty_usd: DrawerLine,
}

impl DrawerReport {
    /// All four drawers covered?
    pub fn enough_cash(&self) -> bool {
        self.mvr.is_ok() && self.usd.is_ok() && self.petty_mvr.is_ok() && self.petty_usd.is_ok()
    }

    /// What the cashier may do given the current shift status
    pub fn actions(&self, status: ShiftStatus) -> ShiftActions {
        let enough = self.enough_cash();
        ShiftActions {
            can_open: status != ShiftStatus::Open && enough,
            can_close: status == ShiftStatus::Open && enough,
        }
    }
}

/// Compare counted drawers against system totals and petty presets
pub fn reconcile(counts: &DrawerCounts, system: SystemTotals, presets: PettyPresets) -> DrawerReport {
    let report = DrawerReport {
        mvr: DrawerLine::compare(counts.mvr.total(), system.mvr),
        usd: DrawerLine::compare(counts.usd.total(), system.usd),
        petty_mvr: DrawerLine::compare(counts.petty_mvr.total(), presets.mvr),
        petty_usd: DrawerLine::compare(counts.petty_usd.total(), presets.usd),
    };

    if !report.enough_cash() {
        tracing::info!("Drawer count short of expected amounts");
    }
    report
}

// ============================================================================
// SHIFT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    NotOpened,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftActions {
    pub can_open: bool,
    pub can_close: bool,
}

// ============================================================================
// TESTS
// ============================================================================
