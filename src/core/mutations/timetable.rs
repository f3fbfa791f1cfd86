//! Timetable mutations
//!
//! Each day's entries stay sorted by start hour after every change. Overlaps are
//! only rejected by [`move_timetable_entry`]; callers that want strict non-overlap
//! on add/update check with [`find_conflict`] first.

use super::{rejected, MutationError, MutationResult};
use crate::core::models::timetable::sort_by_start;
use crate::core::models::{ids, AppData, Day, EntryColor, NewEntry, TimetableEntry};
use crate::core::schedule::{find_conflict, format_hour_range};
use crate::debug;

/// Fields to change on a timetable entry; `None` leaves the field as it is
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryPatch {
    /// New abbreviation
    pub short_name: Option<String>,
    /// New full name
    pub full_name: Option<String>,
    /// New display time; regenerated from the hours when they change and this is `None`
    pub time: Option<String>,
    /// New room
    pub room: Option<String>,
    /// New start hour
    pub start_hour: Option<f64>,
    /// New end hour
    pub end_hour: Option<f64>,
    /// New colour; `Some(None)` clears it
    pub color: Option<Option<EntryColor>>,
}

impl EntryPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.short_name.is_none()
            && self.full_name.is_none()
            && self.time.is_none()
            && self.room.is_none()
            && self.start_hour.is_none()
            && self.end_hour.is_none()
            && self.color.is_none()
    }

    const fn moves_hours(&self) -> bool {
        self.start_hour.is_some() || self.end_hour.is_some()
    }
}

fn check_interval(start: f64, end: f64) -> MutationResult<()> {
    if end > start {
        Ok(())
    } else {
        Err(rejected(MutationError::InvalidInterval { start, end }))
    }
}

fn entry_not_found(day: Day, id: &str) -> MutationError {
    rejected(MutationError::EntryNotFound {
        day,
        id: id.to_string(),
    })
}

/// Insert an entry on `day` under a fresh id and re-sort the day
///
/// An empty `time` is filled from the hours.
///
/// # Errors
/// [`MutationError::InvalidInterval`] when `end_hour <= start_hour`.
pub fn add_timetable_entry(data: &AppData, day: Day, entry: NewEntry) -> MutationResult<AppData> {
    check_interval(entry.start_hour, entry.end_hour)?;

    let id = ids::unique_id(|candidate| data.has_entry_id(candidate));
    let mut entry = entry.with_id(id);
    if entry.time.trim().is_empty() {
        entry.time = format_hour_range(entry.start_hour, entry.end_hour);
    }
    debug!("Adding {} ({}) on {day} at {}", entry.short_name, entry.id, entry.time);

    let mut next = data.clone();
    let entries = next.timetable.entry(day).or_default();
    entries.push(entry);
    sort_by_start(entries);
    Ok(next)
}

/// Merge `patch` into the entry `id` on `day`, then re-sort the day
///
/// # Errors
/// [`MutationError::EntryNotFound`] for an unknown entry and
/// [`MutationError::InvalidInterval`] when the patched hours are inverted.
pub fn update_timetable_entry(
    data: &AppData,
    day: Day,
    id: &str,
    patch: &EntryPatch,
) -> MutationResult<AppData> {
    let mut next = data.clone();
    let entries = next
        .timetable
        .get_mut(&day)
        .ok_or_else(|| entry_not_found(day, id))?;
    let entry = entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| entry_not_found(day, id))?;

    let start = patch.start_hour.unwrap_or(entry.start_hour);
    let end = patch.end_hour.unwrap_or(entry.end_hour);
    check_interval(start, end)?;

    if let Some(short_name) = &patch.short_name {
        entry.short_name.clone_from(short_name);
    }
    if let Some(full_name) = &patch.full_name {
        entry.full_name.clone_from(full_name);
    }
    if let Some(room) = &patch.room {
        entry.room.clone_from(room);
    }
    if let Some(color) = patch.color {
        entry.color = color;
    }
    entry.start_hour = start;
    entry.end_hour = end;
    match &patch.time {
        Some(time) => entry.time.clone_from(time),
        None if patch.moves_hours() => entry.time = format_hour_range(start, end),
        None => {}
    }

    sort_by_start(entries);
    debug!("Updated timetable entry {id} on {day}");
    Ok(next)
}

/// Remove the entry `id` from `day`; an unknown id leaves the data unchanged
#[must_use]
pub fn remove_timetable_entry(data: &AppData, day: Day, id: &str) -> AppData {
    let mut next = data.clone();
    if let Some(entries) = next.timetable.get_mut(&day) {
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() < before {
            debug!("Removed timetable entry {id} from {day}");
        }
    }
    next
}

/// Move an entry to `to` starting at `new_start`, keeping its duration
///
/// The display time is regenerated from the new hours. On the same day the entry
/// is updated in place; across days it is removed from `from` and inserted into `to`.
///
/// # Errors
/// [`MutationError::EntryNotFound`] for an unknown entry,
/// [`MutationError::InvalidInterval`] for a non-positive duration and
/// [`MutationError::ScheduleConflict`] when another entry on `to` overlaps the new interval.
pub fn move_timetable_entry(
    data: &AppData,
    from: Day,
    to: Day,
    id: &str,
    new_start: f64,
) -> MutationResult<AppData> {
    let original = data
        .entries(from)
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| entry_not_found(from, id))?;
    let new_end = new_start + original.duration();
    check_interval(new_start, new_end)?;

    if let Some(other) = find_conflict(data.entries(to), new_start, new_end, Some(id)) {
        return Err(rejected(MutationError::ScheduleConflict {
            day: to,
            range: format_hour_range(new_start, new_end),
            with: other.short_name.clone(),
        }));
    }

    let moved = TimetableEntry {
        time: format_hour_range(new_start, new_end),
        start_hour: new_start,
        end_hour: new_end,
        ..original.clone()
    };
    debug!("Moving {} from {from} to {to} at {}", moved.short_name, moved.time);

    let mut next = data.clone();
    if let Some(source) = next.timetable.get_mut(&from) {
        source.retain(|e| e.id != id);
    }
    let target = next.timetable.entry(to).or_default();
    target.push(moved);
    sort_by_start(target);
    Ok(next)
}
