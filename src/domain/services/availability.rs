use chrono::NaiveTime;
use serde::Serialize;
use std::fmt;

use crate::domain::models::blocked_slot::BlockedSlot;
use crate::domain::models::test_drive::TestDrive;

/// Why a requested slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotConflict {
    Blocked,
    Booked,
}

impl SlotConflict {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotConflict::Blocked => "BLOCKED",
            SlotConflict::Booked => "BOOKED",
        }
    }
}

impl fmt::Display for SlotConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotConflict::Blocked => write!(f, "time is blocked off"),
            SlotConflict::Booked => write!(f, "slot is already booked"),
        }
    }
}

/// Parses a client-supplied time label and returns it normalized to 24-hour
/// "HH:MM". Accepts "14:00" as well as 12-hour forms like "2:00 PM"; all
/// storage and comparison happen on the normalized form.
pub fn normalize_time(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M %p"))
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%I:%M%p"))
        .ok()?;
    Some(parsed.format("%H:%M").to_string())
}

/// The bookable slot labels for one business day: every `interval_min` minutes
/// from `open` up to (strictly before) `close`.
pub fn business_hour_slots(open: &str, close: &str, interval_min: u32) -> Vec<String> {
    let (Ok(open), Ok(close)) = (
        NaiveTime::parse_from_str(open, "%H:%M"),
        NaiveTime::parse_from_str(close, "%H:%M"),
    ) else {
        return Vec::new();
    };

    if interval_min == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut cursor = open;
    while cursor < close {
        slots.push(cursor.format("%H:%M").to_string());
        match cursor.overflowing_add_signed(chrono::Duration::minutes(interval_min as i64)) {
            (next, 0) => cursor = next,
            // wrapped past midnight
            _ => break,
        }
    }
    slots
}

/// Decides whether a slot on a single day may be booked, given that day's
/// blocked ranges and appointments. Blocked ranges win over double-booking
/// when both apply. Cancelled appointments never occupy a slot.
pub fn check_slot(
    time: &str,
    blocked: &[BlockedSlot],
    existing: &[TestDrive],
) -> Option<SlotConflict> {
    let Ok(requested) = NaiveTime::parse_from_str(time, "%H:%M") else {
        return Some(SlotConflict::Blocked);
    };

    for slot in blocked {
        if slot.all_day {
            return Some(SlotConflict::Blocked);
        }
        if let (Ok(start), Ok(end)) = (
            NaiveTime::parse_from_str(&slot.start_time, "%H:%M"),
            NaiveTime::parse_from_str(&slot.end_time, "%H:%M"),
        ) {
            // bounds are inclusive as authored by staff
            if start <= requested && requested <= end {
                return Some(SlotConflict::Blocked);
            }
        }
    }

    if existing
        .iter()
        .any(|td| td.status != "CANCELLED" && td.time == time)
    {
        return Some(SlotConflict::Booked);
    }

    None
}
