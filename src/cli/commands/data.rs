//! Import, export and share-link command handlers

use super::{CommandResult, Session};
use academic_navigator::core::store::{decompress, export_json, import_json, payload_from_url, share_url};
use academic_navigator::{error, info};
use std::fs;
use std::path::Path;

/// Replace semesters and subjects with the contents of a JSON file
///
/// # Errors
/// The file cannot be read, is not a valid export, or the data could not be saved.
pub fn import(session: &mut Session, file: &Path) -> CommandResult {
    let text = fs::read_to_string(file).map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let next = import_json(&session.data, &text).map_err(|e| {
        error!("Import of {} failed: {e}", file.display());
        format!("Invalid import file {}: {e}", file.display())
    })?;
    let count = next.semesters.len();
    let subjects = next.subjects().count();
    session.commit(next)?;
    info!("Imported {} from {}", count, file.display());
    println!("✓ Imported {count} semesters ({subjects} subjects) from {}", file.display());
    Ok(())
}

/// Write the export document to `output`, or print it
///
/// # Errors
/// Serialization or write failures.
pub fn export(session: &Session, output: Option<&Path>) -> CommandResult {
    let json = export_json(&session.data).map_err(|e| format!("Failed to serialize data: {e}"))?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
            }
            fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            println!("✓ Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print a share link for the current data
///
/// # Errors
/// No base URL is configured or the link is too long.
pub fn share(session: &Session, base_url: &str) -> CommandResult {
    if base_url.is_empty() {
        return Err("No share base URL configured (set base_url or pass --base-url)".to_string());
    }
    let url = share_url(base_url, &session.data).map_err(|e| e.to_string())?;
    info!("Share link is {} characters", url.len());
    println!("{url}");
    Ok(())
}

/// Replace the stored data with the snapshot carried by a share link
///
/// # Errors
/// The link has no payload, the payload is corrupt, or the data could not be saved.
pub fn open(session: &mut Session, link: &str) -> CommandResult {
    let payload = payload_from_url(link).map_err(|e| e.to_string())?;
    let shared = decompress(payload).map_err(|e| format!("Could not read shared data: {e}"))?;
    let next = shared.into_app_data().map_err(|e| format!("Could not open shared data: {e}"))?;
    let count = next.semesters.len();
    session.commit(next)?;
    println!("✓ Loaded shared data ({count} semesters)");
    Ok(())
}
