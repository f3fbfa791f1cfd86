//! Share links
//!
//! A reduced snapshot of the data is serialized to JSON, DEFLATE-compressed and
//! encoded as URL-safe base64, then carried in the `#data=` fragment of a link.
//! Ids are not part of the snapshot; opening a link assigns fresh ones.

use crate::core::models::seed::DEFAULT_MAX_SEMESTER;
use crate::core::models::timetable::sort_by_start;
use crate::core::models::{
    ids, is_valid_semester_id, AppData, Attendance, Day, EntryColor, Grade, Semester, SemesterId, Subject,
    Timetable, TimetableEntry, MAX_GRADE_POINT, MAX_SEMESTER_ID,
};
use crate::warn;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};
use thiserror::Error;

/// Longest share URL that will be produced
pub const MAX_SHARE_URL_LEN: usize = 8000;

const FRAGMENT_KEY: &str = "data=";

/// Errors building or opening a share link
#[derive(Debug, Error)]
pub enum ShareError {
    /// Snapshot could not be (de)serialized
    #[error("share payload is not valid data: {0}")]
    Json(#[from] serde_json::Error),

    /// Compression stream failure
    #[error("share payload compression failed: {0}")]
    Io(#[from] std::io::Error),

    /// Payload is not valid URL-safe base64
    #[error("share payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The link would be too long to share; use the JSON export instead
    #[error("share link is {len} characters, over the {max} limit; use JSON export instead")]
    TooLong {
        /// Length of the generated URL
        len: usize,
        /// Allowed maximum
        max: usize,
    },

    /// The link has no `#data=` payload
    #[error("link does not contain a '#data=' payload")]
    MissingPayload,

    /// The snapshot has no semesters
    #[error("shared data contains no semesters")]
    NoSemesters,

    /// A shared semester id is outside `1..=MAX_SEMESTER_ID`
    #[error("shared semester id {0} is out of range (expected 1..={max})", max = MAX_SEMESTER_ID)]
    InvalidSemesterId(SemesterId),
}

/// Subject in a share snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSubject {
    /// Name
    pub n: String,
    /// Credits
    pub c: u32,
    /// Grade point, `-1` when ungraded
    pub g: Grade,
    /// Classes attended
    pub a: u32,
    /// Classes held
    pub o: u32,
}

/// Semester in a share snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedSemester {
    /// Id
    pub i: SemesterId,
    /// Name
    pub n: String,
    /// Subjects
    pub s: Vec<SharedSubject>,
}

/// Timetable entry in a share snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedEntry {
    /// Short name
    pub s: String,
    /// Full name
    pub f: String,
    /// Display time
    pub t: String,
    /// Room
    pub r: String,
    /// Start hour
    pub b: f64,
    /// End hour
    pub e: f64,
    /// Colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<EntryColor>,
}

/// Reduced-field snapshot carried in a share link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareData {
    /// Target average
    pub t: f64,
    /// Semesters in id order
    pub s: Vec<SharedSemester>,
    /// Timetable
    #[serde(default)]
    pub tt: BTreeMap<Day, Vec<SharedEntry>>,
}

impl From<&Subject> for SharedSubject {
    fn from(subject: &Subject) -> Self {
        Self {
            n: subject.name.clone(),
            c: subject.credits,
            g: subject.grade,
            a: subject.attendance.attended,
            o: subject.attendance.total,
        }
    }
}

impl From<&TimetableEntry> for SharedEntry {
    fn from(entry: &TimetableEntry) -> Self {
        Self {
            s: entry.short_name.clone(),
            f: entry.full_name.clone(),
            t: entry.time.clone(),
            r: entry.room.clone(),
            b: entry.start_hour,
            e: entry.end_hour,
            c: entry.color,
        }
    }
}

impl From<&AppData> for ShareData {
    fn from(data: &AppData) -> Self {
        Self {
            t: data.target_cgpa,
            s: data
                .semesters
                .values()
                .map(|sem| SharedSemester {
                    i: sem.id,
                    n: sem.name.clone(),
                    s: sem.subjects.iter().map(SharedSubject::from).collect(),
                })
                .collect(),
            tt: data
                .timetable
                .iter()
                .map(|(day, entries)| (*day, entries.iter().map(SharedEntry::from).collect()))
                .collect(),
        }
    }
}

impl ShareData {
    /// Rebuild full data with fresh ids
    ///
    /// `maxSemester` covers the shared ids (at least the default of 8) and the
    /// smallest shared semester becomes current. Attendance is re-clamped, classes
    /// that do not end after they start are dropped and each day is re-sorted.
    ///
    /// # Errors
    /// [`ShareError::NoSemesters`] for an empty snapshot and
    /// [`ShareError::InvalidSemesterId`] for an id outside `1..=MAX_SEMESTER_ID`.
    pub fn into_app_data(self) -> Result<AppData, ShareError> {
        if self.s.is_empty() {
            return Err(ShareError::NoSemesters);
        }
        if let Some(bad) = self.s.iter().find(|sem| !is_valid_semester_id(sem.i)) {
            return Err(ShareError::InvalidSemesterId(bad.i));
        }

        let mut taken: HashSet<String> = HashSet::new();
        let mut fresh_id = || {
            let id = ids::unique_id(|candidate| taken.contains(candidate));
            taken.insert(id.clone());
            id
        };

        let semesters: BTreeMap<SemesterId, Semester> = self
            .s
            .into_iter()
            .map(|sem| {
                let subjects = sem
                    .s
                    .into_iter()
                    .map(|sub| Subject {
                        id: fresh_id(),
                        name: sub.n,
                        credits: sub.c,
                        grade: sub.g,
                        attendance: Attendance::new(sub.a, sub.o),
                    })
                    .collect();
                (
                    sem.i,
                    Semester {
                        id: sem.i,
                        name: sem.n,
                        subjects,
                    },
                )
            })
            .collect();

        let timetable: Timetable = self
            .tt
            .into_iter()
            .map(|(day, entries)| {
                let mut entries: Vec<TimetableEntry> = entries
                    .into_iter()
                    .filter(|e| {
                        let valid = e.b.is_finite() && e.e.is_finite() && e.e > e.b;
                        if !valid {
                            warn!("Dropping shared class {} on {day}: invalid time {}-{}", e.s, e.b, e.e);
                        }
                        valid
                    })
                    .map(|e| TimetableEntry {
                        id: fresh_id(),
                        short_name: e.s,
                        full_name: e.f,
                        time: e.t,
                        room: e.r,
                        start_hour: e.b,
                        end_hour: e.e,
                        color: e.c,
                    })
                    .collect();
                sort_by_start(&mut entries);
                (day, entries)
            })
            .collect();

        let highest = semesters.keys().next_back().copied().unwrap_or(1);
        let current_semester = semesters.keys().next().copied().unwrap_or(1);
        Ok(AppData {
            semesters,
            timetable,
            max_semester: DEFAULT_MAX_SEMESTER.max(highest),
            target_cgpa: if self.t.is_nan() { 0.0 } else { self.t.clamp(0.0, MAX_GRADE_POINT) },
            current_semester,
        })
    }
}

/// Snapshot -> JSON -> DEFLATE -> URL-safe base64
///
/// # Errors
/// Serialization or compression failures.
pub fn compress(data: &ShareData) -> Result<String, ShareError> {
    let json = serde_json::to_vec(data)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let bytes = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Inverse of [`compress`]
///
/// # Errors
/// Invalid base64, a corrupt stream or JSON that is not a snapshot.
pub fn decompress(payload: &str) -> Result<ShareData, ShareError> {
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim())?;
    let mut json = Vec::new();
    DeflateDecoder::new(bytes.as_slice()).read_to_end(&mut json)?;
    Ok(serde_json::from_slice(&json)?)
}

/// `<base>#data=<payload>` for the current data
///
/// # Errors
/// [`ShareError::TooLong`] when the URL exceeds [`MAX_SHARE_URL_LEN`].
pub fn share_url(base: &str, data: &AppData) -> Result<String, ShareError> {
    let payload = compress(&ShareData::from(data))?;
    let url = format!("{base}#{FRAGMENT_KEY}{payload}");
    if url.len() > MAX_SHARE_URL_LEN {
        return Err(ShareError::TooLong {
            len: url.len(),
            max: MAX_SHARE_URL_LEN,
        });
    }
    Ok(url)
}

/// The payload of a share link
///
/// Accepts a full link (`...#data=<payload>`) or a bare payload.
///
/// # Errors
/// [`ShareError::MissingPayload`] when the link has no non-empty payload.
pub fn payload_from_url(link: &str) -> Result<&str, ShareError> {
    let link = link.trim();
    let payload = match link.split_once('#') {
        Some((_, fragment)) => fragment
            .split('&')
            .find_map(|part| part.strip_prefix(FRAGMENT_KEY))
            .unwrap_or_default(),
        None if link.contains("://") => "",
        None => link.strip_prefix(FRAGMENT_KEY).unwrap_or(link),
    };
    if payload.is_empty() {
        Err(ShareError::MissingPayload)
    } else {
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_default_data() {
        let share = ShareData::from(&AppData::default());
        let payload = compress(&share).unwrap();
        assert!(payload.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decompress(&payload).unwrap(), share);
    }

    #[test]
    fn test_share_url_and_payload() {
        let data = AppData::default();
        let url = share_url("https://example.org/app", &data).unwrap();
        assert!(url.starts_with("https://example.org/app#data="));

        let payload = payload_from_url(&url).unwrap();
        let opened = decompress(payload).unwrap().into_app_data().unwrap();
        assert_eq!(ShareData::from(&opened), ShareData::from(&data));
        assert_eq!(opened.current_semester, 1);
    }

    #[test]
    fn test_too_long() {
        let mut data = AppData::default();
        let semester = data.semesters.get_mut(&1).unwrap();
        for i in 0..5000 {
            semester.subjects.push(Subject {
                id: format!("s{i}"),
                name: format!("{i:x}-{}", i * 7919),
                credits: i % 5,
                grade: Grade::Ungraded,
                attendance: Attendance::default(),
            });
        }
        assert!(matches!(
            share_url("https://example.org", &data),
            Err(ShareError::TooLong { max: MAX_SHARE_URL_LEN, .. })
        ));
    }

    #[test]
    fn test_payload_extraction() {
        assert_eq!(payload_from_url("https://x.org/#data=abc").unwrap(), "abc");
        assert_eq!(payload_from_url("https://x.org/#v=1&data=abc").unwrap(), "abc");
        assert_eq!(payload_from_url("abc").unwrap(), "abc");
        assert!(matches!(payload_from_url("https://x.org/"), Err(ShareError::MissingPayload)));
        assert!(matches!(payload_from_url("https://x.org/#data="), Err(ShareError::MissingPayload)));
    }

    #[test]
    fn test_garbage_payload() {
        assert!(matches!(decompress("!!!"), Err(ShareError::Base64(_))));
        assert!(decompress("aGVsbG8").is_err());
    }

    #[test]
    fn test_empty_snapshot_is_rejected() {
        let share: ShareData = serde_json::from_str(r#"{"t":9.0,"s":[]}"#).unwrap();
        let decoded = decompress(&compress(&share).unwrap()).unwrap();
        assert!(matches!(decoded.into_app_data(), Err(ShareError::NoSemesters)));
    }

    #[test]
    fn test_semester_id_out_of_range() {
        for id in [0, MAX_SEMESTER_ID + 1, SemesterId::MAX] {
            let text = format!(r#"{{"t":9.0,"s":[{{"i":1,"n":"A","s":[]}},{{"i":{id},"n":"B","s":[]}}]}}"#);
            let share: ShareData = serde_json::from_str(&text).unwrap();
            assert!(matches!(share.into_app_data(), Err(ShareError::InvalidSemesterId(bad)) if bad == id));
        }
    }

    #[test]
    fn test_timetable_is_sorted_and_inverted_classes_dropped() {
        let text = r#"{"t":8.0,"s":[{"i":1,"n":"Semester 1","s":[]}],"tt":{"MONDAY":[
            {"s":"LATE","f":"Late","t":"14:00-15:00","r":"","b":14.0,"e":15.0},
            {"s":"BACK","f":"Backwards","t":"12:00-11:00","r":"","b":12.0,"e":11.0},
            {"s":"EARLY","f":"Early","t":"08:00-09:00","r":"","b":8.0,"e":9.0},
            {"s":"ZERO","f":"Zero","t":"10:00-10:00","r":"","b":10.0,"e":10.0}
        ]}}"#;
        let share: ShareData = serde_json::from_str(text).unwrap();
        let data = share.into_app_data().unwrap();
        let names: Vec<&str> = data.entries(Day::Monday).iter().map(|e| e.short_name.as_str()).collect();
        assert_eq!(names, ["EARLY", "LATE"]);
    }
}
