//! Timetable command handlers
//!
//! The weekly view is a text grid with one column per slot of the standard
//! teaching day; a class spanning several slots is drawn across them.

use super::{CommandResult, Session};
use crate::args::TimetableCommand;
use academic_navigator::core::models::{AppData, Day, NewEntry, TimetableEntry};
use academic_navigator::core::mutations::{
    add_timetable_entry, move_timetable_entry, remove_timetable_entry, update_timetable_entry,
    EntryPatch,
};
use academic_navigator::core::schedule::{
    class_state, column_span, current_day, find_conflict, format_hour_range, now_hour, slot_index,
    ClassState, DEFAULT_SLOTS,
};
use academic_navigator::{verbose, warn};
use std::fmt::Write;

/// Width of one grid column; fits an `HH:MM-HH:MM` label
const CELL: usize = 11;

/// Dispatch timetable subcommands
///
/// # Errors
/// Unknown entry, invalid interval, a conflict, or the data could not be saved.
pub fn run(action: TimetableCommand, session: &mut Session) -> CommandResult {
    match action {
        TimetableCommand::Show { day: None } => {
            print!("{}", grid(&session.data));
            Ok(())
        }
        TimetableCommand::Show { day: Some(day) } => {
            print!("{}", day_view(day, session.data.entries(day), None));
            Ok(())
        }
        TimetableCommand::Now => {
            let day = current_day();
            print!("{}", day_view(day, session.data.entries(day), Some(now_hour())));
            Ok(())
        }
        TimetableCommand::Add {
            day,
            short_name,
            start,
            end,
            full_name,
            room,
            color,
            allow_overlap,
        } => {
            if let Some(other) = find_conflict(session.data.entries(day), start, end, None) {
                if !allow_overlap {
                    return Err(format!(
                        "{} overlaps {} ({}) on {day}; pass --allow-overlap to add it anyway",
                        format_hour_range(start, end),
                        other.short_name,
                        other.time
                    ));
                }
                warn!("Adding overlapping class on {day} next to {}", other.short_name);
            }
            let entry = NewEntry {
                full_name: full_name.unwrap_or_else(|| short_name.clone()),
                short_name,
                time: String::new(),
                room,
                start_hour: start,
                end_hour: end,
                color,
            };
            let next = add_timetable_entry(&session.data, day, entry).map_err(|e| e.to_string())?;
            let added = next
                .entries(day)
                .iter()
                .find(|e| !session.data.has_entry_id(&e.id))
                .map(|e| format!("{} {} (id {})", e.short_name, e.time, e.id));
            session.commit(next)?;
            println!("✓ Added {} on {day}", added.unwrap_or_default());
            Ok(())
        }
        TimetableCommand::Update {
            day,
            id,
            short_name,
            full_name,
            room,
            start,
            end,
            color,
        } => {
            let patch = EntryPatch {
                short_name,
                full_name,
                time: None,
                room,
                start_hour: start,
                end_hour: end,
                color: color.map(Some),
            };
            if patch.is_empty() {
                return Err("Nothing to update".to_string());
            }
            verbose!("Updating {id} on {day}: {patch:?}");
            let next = update_timetable_entry(&session.data, day, &id, &patch).map_err(|e| e.to_string())?;
            session.commit(next)?;
            if let Some(entry) = session.data.entries(day).iter().find(|e| e.id == id) {
                println!("✓ Updated {} {}", entry.short_name, entry.time);
                if let Some(other) =
                    find_conflict(session.data.entries(day), entry.start_hour, entry.end_hour, Some(id.as_str()))
                {
                    println!("⚠ Now overlaps {} ({})", other.short_name, other.time);
                }
            }
            Ok(())
        }
        TimetableCommand::Remove { day, id } => {
            let Some(entry) = session.data.entries(day).iter().find(|e| e.id == id) else {
                println!("✗ No class '{id}' on {day}; nothing removed");
                return Ok(());
            };
            let label = format!("{} {}", entry.short_name, entry.time);
            let next = remove_timetable_entry(&session.data, day, &id);
            session.commit(next)?;
            println!("✓ Removed {label} from {day}");
            Ok(())
        }
        TimetableCommand::Move { from, to, id, start } => {
            let next = move_timetable_entry(&session.data, from, to, &id, start).map_err(|e| e.to_string())?;
            session.commit(next)?;
            let time = session
                .data
                .entries(to)
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.time.clone())
                .unwrap_or_default();
            println!("✓ Moved {id} from {from} to {to} {time}");
            Ok(())
        }
    }
}

fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Weekly grid: one row per day, one column per slot
pub fn grid(data: &AppData) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<10}|", "");
    for slot in &DEFAULT_SLOTS {
        let label = if slot.is_break { "break".to_string() } else { slot.label() };
        let _ = write!(out, "{label:^CELL$}|");
    }
    out.push('\n');

    let mut unplaced: Vec<(Day, &TimetableEntry)> = Vec::new();
    for day in Day::ALL {
        let entries = data.entries(day);
        let _ = write!(out, "{:<10}|", day.name());
        let mut index = 0;
        while index < DEFAULT_SLOTS.len() {
            let starting = entries
                .iter()
                .find(|e| slot_index(&DEFAULT_SLOTS, e.start_hour) == Some(index));
            if let Some(entry) = starting {
                let span = column_span(entry, &DEFAULT_SLOTS, index).min(DEFAULT_SLOTS.len() - index);
                let width = span * (CELL + 1) - 1;
                let _ = write!(out, "{:^width$}|", fit(&entry.short_name, width));
                index += span;
            } else {
                let _ = write!(out, "{:^CELL$}|", "");
                index += 1;
            }
        }
        out.push('\n');
        unplaced.extend(
            entries
                .iter()
                .filter(|e| slot_index(&DEFAULT_SLOTS, e.start_hour).is_none())
                .map(|e| (day, e)),
        );
    }

    if !unplaced.is_empty() {
        out.push_str("\nOutside the standard day:\n");
        for (day, entry) in unplaced {
            let _ = writeln!(out, "  {day} {} {}", entry.time, entry.short_name);
        }
    }
    out
}

/// One day's classes; with `now`, each class is marked past, current or upcoming
pub fn day_view(day: Day, entries: &[TimetableEntry], now: Option<f64>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{day}");
    if entries.is_empty() {
        out.push_str("  No classes\n");
        return out;
    }
    for entry in entries {
        let marker = match now.map(|hour| class_state(entry, hour)) {
            Some(ClassState::Past) => "✓",
            Some(ClassState::Current) => "▶",
            Some(ClassState::Upcoming) | None => " ",
        };
        let color = entry.color.map_or("", |c| c.name());
        let _ = writeln!(
            out,
            "{marker} {:<11} {:<10} {:<40} {:<8} {:<9} {color}",
            entry.time,
            entry.short_name,
            fit(&entry.full_name, 40),
            entry.room,
            entry.id
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spans_long_classes() {
        let data = AppData::default();
        let text = grid(&data);
        let monday = text.lines().find(|l| l.starts_with("MONDAY")).unwrap();

        // The 14:00-16:30 lab covers three slots including the 15:00 break
        let lab_width = 3 * (CELL + 1) - 1;
        assert!(monday.contains(&format!("{:^lab_width$}|", "MADL+NDPL")));
        assert!(text.lines().next().unwrap().contains("10:30-11:30"));
        assert!(!text.contains("Outside the standard day"));
    }

    #[test]
    fn test_grid_lists_unplaced_classes() {
        let mut data = AppData::default();
        data.timetable.get_mut(&Day::Friday).unwrap().push(
            NewEntry {
                short_name: "EVE".into(),
                time: "18:00-19:00".into(),
                start_hour: 18.0,
                end_hour: 19.0,
                ..NewEntry::default()
            }
            .with_id("eve".into()),
        );
        let text = grid(&data);
        assert!(text.contains("Outside the standard day"));
        assert!(text.contains("FRIDAY 18:00-19:00 EVE"));
    }

    #[test]
    fn test_day_view_marks_state() {
        let data = AppData::default();
        let text = day_view(Day::Monday, data.entries(Day::Monday), Some(9.5));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "MONDAY");
        assert!(lines[1].starts_with("✓ 08:00-09:00"));
        assert!(lines[2].starts_with("▶ 09:00-10:00"));
        assert!(lines[3].starts_with("  10:30-11:30"));
    }

    #[test]
    fn test_day_view_empty() {
        assert_eq!(day_view(Day::Tuesday, &[], None), "TUESDAY\n  No classes\n");
    }
}
