//! Timetable lookups: today's day, the class at a given time, the next class,
//! the slot grid used for display and interval conflicts.
//!
//! Times are fractional hours (`10.5` is 10:30). Intervals are half-open: a class
//! `[start, end)` is over at exactly `end`.

use crate::core::models::{Day, TimetableEntry};
use chrono::{Datelike, Local, NaiveTime, Timelike, Weekday};

/// Day shown when the real day is not tracked (Sunday)
pub const FALLBACK_DAY: Day = Day::Monday;

/// Map a calendar weekday to a tracked day, falling back to [`FALLBACK_DAY`]
#[must_use]
pub const fn day_for_weekday(weekday: Weekday) -> Day {
    match weekday {
        Weekday::Mon | Weekday::Sun => FALLBACK_DAY,
        Weekday::Tue => Day::Tuesday,
        Weekday::Wed => Day::Wednesday,
        Weekday::Thu => Day::Thursday,
        Weekday::Fri => Day::Friday,
        Weekday::Sat => Day::Saturday,
    }
}

/// Tracked day for the local calendar date
#[must_use]
pub fn current_day() -> Day {
    day_for_weekday(Local::now().weekday())
}

/// Time of day as a fractional hour
#[must_use]
pub fn fractional_hour(time: NaiveTime) -> f64 {
    f64::from(time.hour()) + f64::from(time.minute()) / 60.0
}

/// Local time of day as a fractional hour
#[must_use]
pub fn now_hour() -> f64 {
    fractional_hour(Local::now().time())
}

/// The entry running at `hour` (`start <= hour < end`), if any
///
/// Overlaps are not checked here; the first match in order wins.
#[must_use]
pub fn class_at_time(entries: &[TimetableEntry], hour: f64) -> Option<&TimetableEntry> {
    entries
        .iter()
        .find(|e| e.start_hour <= hour && hour < e.end_hour)
}

/// The class running now or the next one today, by start time
///
/// `None` once every class of the day has ended.
#[must_use]
pub fn upcoming_class(entries: &[TimetableEntry], now: f64) -> Option<&TimetableEntry> {
    let mut sorted: Vec<&TimetableEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));
    sorted.into_iter().find(|e| e.end_hour > now)
}

/// Where a class sits relative to the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassState {
    /// Already ended
    Past,
    /// Running now
    Current,
    /// Not started yet
    Upcoming,
}

/// Classify `entry` against `now`
#[must_use]
pub fn class_state(entry: &TimetableEntry, now: f64) -> ClassState {
    if now >= entry.end_hour {
        ClassState::Past
    } else if now >= entry.start_hour {
        ClassState::Current
    } else {
        ClassState::Upcoming
    }
}

/// A column of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSlot {
    /// Slot start hour
    pub start: f64,
    /// Slot end hour
    pub end: f64,
    /// Non-teaching period (classes may still run through it)
    pub is_break: bool,
}

impl TimeSlot {
    const fn class(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            is_break: false,
        }
    }

    const fn pause(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            is_break: true,
        }
    }

    /// Display label (e.g., "10:30-11:30")
    #[must_use]
    pub fn label(&self) -> String {
        format_hour_range(self.start, self.end)
    }
}

/// The standard teaching day, 08:00-16:30, with morning, lunch and afternoon breaks
pub const DEFAULT_SLOTS: [TimeSlot; 10] = [
    TimeSlot::class(8.0, 9.0),
    TimeSlot::class(9.0, 10.0),
    TimeSlot::pause(10.0, 10.5),
    TimeSlot::class(10.5, 11.5),
    TimeSlot::class(11.5, 12.5),
    TimeSlot::pause(12.5, 13.0),
    TimeSlot::class(13.0, 14.0),
    TimeSlot::class(14.0, 15.0),
    TimeSlot::pause(15.0, 15.5),
    TimeSlot::class(15.5, 16.5),
];

/// Index of the slot an entry starting at `start_hour` begins in
#[must_use]
pub fn slot_index(slots: &[TimeSlot], start_hour: f64) -> Option<usize> {
    slots
        .iter()
        .position(|s| s.start <= start_hour && start_hour < s.end)
}

/// Number of contiguous slots, breaks included, that `entry` covers from `start_index`
///
/// A slot counts while the entry ends after the slot starts. Always at least 1 so the
/// result is usable directly as a column span.
#[must_use]
pub fn column_span(entry: &TimetableEntry, slots: &[TimeSlot], start_index: usize) -> usize {
    let span = slots
        .iter()
        .skip(start_index)
        .take_while(|slot| entry.end_hour > slot.start)
        .count();
    span.max(1)
}

/// First entry, other than `ignore_id`, whose interval intersects `[start, end)`
#[must_use]
pub fn find_conflict<'a>(
    entries: &'a [TimetableEntry],
    start: f64,
    end: f64,
    ignore_id: Option<&str>,
) -> Option<&'a TimetableEntry> {
    entries
        .iter()
        .filter(|e| ignore_id != Some(e.id.as_str()))
        .find(|e| e.overlaps(start, end))
}

/// `HH:MM` for a fractional hour
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_hour(hour: f64) -> String {
    let minutes = (hour.max(0.0) * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `HH:MM-HH:MM` for a start/end pair
#[must_use]
pub fn format_hour_range(start: f64, end: f64) -> String {
    format!("{}-{}", format_hour(start), format_hour(end))
}

/// Parse `HH:MM`, `H:MM` or a plain fractional hour (`10.5`)
#[must_use]
pub fn parse_hour(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some((h, m)) = value.split_once(':') {
        let hours: u32 = h.parse().ok()?;
        let minutes: u32 = m.parse().ok()?;
        if hours > 23 || minutes > 59 {
            return None;
        }
        return Some(f64::from(hours) + f64::from(minutes) / 60.0);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|h| (0.0..24.0).contains(h))
}
