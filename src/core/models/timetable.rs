//! Timetable model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A tracked teaching day. Sunday is not part of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl Day {
    /// Every tracked day, in week order
    pub const ALL: [Self; 6] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Storage name (e.g., "MONDAY")
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
        }
    }

    /// Three-letter column label (e.g., "MON")
    #[must_use]
    pub fn short(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|day| day.name() == upper || (upper.len() == 3 && day.short() == upper))
            .ok_or_else(|| format!("Unknown day: '{s}' (expected MONDAY..SATURDAY)"))
    }
}

/// Colour tag for a timetable entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum EntryColor {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Teal,
    Red,
    Yellow,
}

impl EntryColor {
    /// Every palette colour
    pub const PALETTE: [Self; 8] = [
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Pink,
        Self::Teal,
        Self::Red,
        Self::Yellow,
    ];

    /// Lowercase tag name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Teal => "teal",
            Self::Red => "red",
            Self::Yellow => "yellow",
        }
    }
}

impl FromStr for EntryColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::PALETTE
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("Unknown colour: '{s}'"))
    }
}

/// A class in the weekly schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    /// Opaque identifier, unique within the timetable
    pub id: String,

    /// Abbreviation shown in the grid (e.g., "DM")
    pub short_name: String,

    /// Full subject name
    pub full_name: String,

    /// Display time range (e.g., "10:30-11:30")
    pub time: String,

    /// Room label
    pub room: String,

    /// Start as a fractional hour (10.5 is 10:30)
    pub start_hour: f64,

    /// End as a fractional hour, greater than `start_hour`
    pub end_hour: f64,

    /// Optional palette colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EntryColor>,
}

impl TimetableEntry {
    /// Duration in hours
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end_hour - self.start_hour
    }

    /// Whether `[start, end)` intersects this entry's interval
    #[must_use]
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start < self.end_hour && self.start_hour < end
    }
}

/// Field values for an entry that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewEntry {
    /// Abbreviation
    pub short_name: String,
    /// Full name
    pub full_name: String,
    /// Display time; generated from the hours when empty
    pub time: String,
    /// Room label
    pub room: String,
    /// Start hour
    pub start_hour: f64,
    /// End hour
    pub end_hour: f64,
    /// Palette colour
    pub color: Option<EntryColor>,
}

impl NewEntry {
    /// Attach an id, producing a stored entry
    #[must_use]
    pub fn with_id(self, id: String) -> TimetableEntry {
        TimetableEntry {
            id,
            short_name: self.short_name,
            full_name: self.full_name,
            time: self.time,
            room: self.room,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            color: self.color,
        }
    }
}

/// Day -> entries sorted by start hour
pub type Timetable = BTreeMap<Day, Vec<TimetableEntry>>;

/// Sort a day's entries by start hour, keeping insertion order for ties
pub fn sort_by_start(entries: &mut [TimetableEntry]) {
    entries.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));
}
