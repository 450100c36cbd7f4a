// 🌅 Shift board - morning/evening open & close bookkeeping
//
// One board per desk, two shifts per day. The evening shift waits while
// the morning shift is open and may only open once the morning shift has
// closed the same day. A board whose morning shift closed on an earlier
// day is reset for the new day.

use anyhow::{bail, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Label used when no shift is open
pub const NO_SHIFT_OPEN: &str = "No Shift Open";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftSlot {
    /// shift1
    Morning,
    /// shift2
    Evening,
}

impl ShiftSlot {
    /// Label stamped on payments and receipts
    pub fn label(&self) -> &'static str {
        match self {
            ShiftSlot::Morning => "Morning Shift",
            ShiftSlot::Evening => "Evening Shift",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Open,
    Closed,
}

/// What the shift screen shows for one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotDisplay {
    Open,
    Closed,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub status: SlotStatus,
    pub opened_at: Option<NaiveDateTime>,
    pub closed_at: Option<NaiveDateTime>,
}

impl ShiftRecord {
    pub fn closed() -> Self {
        ShiftRecord {
            status: SlotStatus::Closed,
            opened_at: None,
            closed_at: None,
        }
    }

    fn closed_on(&self) -> Option<NaiveDate> {
        self.closed_at.map(|t| t.date())
    }

    fn is_open(&self) -> bool {
        self.status == SlotStatus::Open
    }
}

/// Outcome of evaluating the board against today's date
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftDecision {
    /// Morning shift closed on an earlier day: store this fresh board
    ResetForNewDay(ShiftBoard),

    /// Board is current: show these states
    Display { morning: SlotDisplay, evening: SlotDisplay },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBoard {
    pub date: NaiveDate,
    #[serde(rename = "shift1")]
    pub morning: ShiftRecord,
    #[serde(rename = "shift2")]
    pub evening: ShiftRecord,
}

impl ShiftBoard {
    /// Both shifts closed, no timestamps
    pub fn new(date: NaiveDate) -> Self {
        ShiftBoard {
            date,
            morning: ShiftRecord::closed(),
            evening: ShiftRecord::closed(),
        }
    }

    pub fn record(&self, slot: ShiftSlot) -> &ShiftRecord {
        match slot {
            ShiftSlot::Morning => &self.morning,
            ShiftSlot::Evening => &self.evening,
        }
    }

    fn record_mut(&mut self, slot: ShiftSlot) -> &mut ShiftRecord {
        match slot {
            ShiftSlot::Morning => &mut self.morning,
            ShiftSlot::Evening => &mut self.evening,
        }
    }

    /// Decide what the board means today
    pub fn evaluate(&self, today: NaiveDate) -> ShiftDecision {
        // New day: wipe both shifts
        if self.morning.closed_on().is_some_and(|d| today > d) {
            tracing::info!(%today, "Resetting shift board for new day");
            return ShiftDecision::ResetForNewDay(ShiftBoard::new(today));
        }

        if self.morning.is_open() {
            return ShiftDecision::Display {
                morning: SlotDisplay::Open,
                evening: SlotDisplay::Waiting,
            };
        }

        let evening = if self.evening.is_open() && self.morning.closed_on() == Some(today) {
            SlotDisplay::Open
        } else {
            SlotDisplay::Closed
        };
        ShiftDecision::Display {
            morning: SlotDisplay::Closed,
            evening,
        }
    }

    /// Both shifts closed today?
    pub fn day_complete(&self, today: NaiveDate) -> bool {
        !self.morning.is_open()
            && !self.evening.is_open()
            && self.morning.closed_on() == Some(today)
            && self.evening.closed_on() == Some(today)
    }

    /// Board for the next day once both shifts closed today; None otherwise.
    /// Timestamps are kept so tomorrow's evaluation sees the closed day.
    pub fn roll_over(&self, today: NaiveDate) -> Option<ShiftBoard> {
        if !self.day_complete(today) {
            return None;
        }
        let mut next = self.clone();
        next.date = today.succ_opt()?;
        Some(next)
    }

    /// Open a shift
    ///
    /// # Returns
    /// * `Err` if the shift is already open, or for the evening shift if
    ///   the morning shift hasn't closed today
    pub fn open(&mut self, slot: ShiftSlot, now: NaiveDateTime) -> Result<()> {
        if self.record(slot).is_open() {
            bail!("{} is already open", slot.label());
        }
        if slot == ShiftSlot::Evening {
            if self.morning.is_open() {
                bail!("Morning Shift must close before Evening Shift opens");
            }
            if self.morning.closed_on() != Some(now.date()) {
                bail!("Morning Shift has not closed today");
            }
        }

        let record = self.record_mut(slot);
        record.status = SlotStatus::Open;
        record.opened_at = Some(now);
        record.closed_at = None;
        Ok(())
    }

    /// Close an open shift
    pub fn close(&mut self, slot: ShiftSlot, now: NaiveDateTime) -> Result<()> {
        let record = self.record_mut(slot);
        if !record.is_open() {
            bail!("{} is not open", slot.label());
        }
        record.status = SlotStatus::Closed;
        record.closed_at = Some(now);
        Ok(())
    }

    /// The shift currently open, morning first
    pub fn current_slot(&self) -> Option<ShiftSlot> {
        if self.morning.is_open() {
            Some(ShiftSlot::Morning)
        } else if self.evening.is_open() {
            Some(ShiftSlot::Evening)
        } else {
            None
        }
    }
}

/// Header label for the walk-in and cashier screens
pub fn current_shift_label(board: Option<&ShiftBoard>) -> &'static str {
    board
        .and_then(ShiftBoard::current_slot)
        .map(|slot| slot.label())
        .unwrap_or(NO_SHIFT_OPEN)
}

// ============================================================================
// TESTS
// ============================================================================
