//! Subject command handlers

use super::{CommandResult, Session};
use crate::args::SubjectCommand;
use academic_navigator::core::metrics::semester_average;
use academic_navigator::core::models::{NewSubject, Semester};
use academic_navigator::core::mutations::{add_subject, remove_subject, update_subject, SubjectPatch};
use academic_navigator::verbose;
use std::fmt::Write;

/// Dispatch subject subcommands
///
/// # Errors
/// Unknown semester or subject, or the data could not be saved.
pub fn run(action: SubjectCommand, session: &mut Session) -> CommandResult {
    match action {
        SubjectCommand::List { semester } => {
            print!("{}", list(session.semester(semester)?));
            Ok(())
        }
        SubjectCommand::Add {
            name,
            credits,
            grade,
            semester,
        } => {
            let id = session.semester_id(semester);
            let next = add_subject(&session.data, id, NewSubject::new(name.clone(), credits, grade))
                .map_err(|e| e.to_string())?;
            session.commit(next)?;
            let added = session
                .data
                .semester(id)
                .and_then(|s| s.subjects.last())
                .map_or("?", |s| s.id.as_str());
            println!("✓ Added '{name}' to semester {id} (id {added})");
            Ok(())
        }
        SubjectCommand::Remove { id, semester } => {
            let sem = session.semester_id(semester);
            let known = session
                .semester(Some(sem))?
                .subject(&id)
                .map(|s| s.name.clone());
            let Some(name) = known else {
                println!("✗ No subject '{id}' in semester {sem}; nothing removed");
                return Ok(());
            };
            let next = remove_subject(&session.data, sem, &id).map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Removed '{name}' from semester {sem}");
            Ok(())
        }
        SubjectCommand::Update {
            id,
            name,
            credits,
            grade,
            semester,
        } => {
            let patch = SubjectPatch {
                name,
                credits,
                grade,
                attendance: None,
            };
            if patch.is_empty() {
                return Err("Nothing to update (use --name, --credits or --grade)".to_string());
            }
            let sem = session.semester_id(semester);
            verbose!("Updating subject {id} in semester {sem}: {patch:?}");
            let next = update_subject(&session.data, sem, &id, &patch).map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Updated subject {id}");
            Ok(())
        }
    }
}

/// Subject table for one semester
pub fn list(semester: &Semester) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", semester.name);
    let _ = writeln!(out, "{:<10} {:<44} {:>7} {:>6} {:>6}", "ID", "NAME", "CREDITS", "GRADE", "LETTER");
    for subject in &semester.subjects {
        let _ = writeln!(
            out,
            "{:<10} {:<44} {:>7} {:>6} {:>6}",
            subject.id,
            subject.name,
            subject.credits,
            subject.grade.to_string(),
            subject.grade.letter().unwrap_or("-")
        );
    }
    let avg = semester_average(semester);
    let _ = writeln!(
        out,
        "\nAverage {:.2} over {} graded of {} registered credits",
        avg.average,
        avg.total_credits,
        semester.registered_credits()
    );
    out
}
