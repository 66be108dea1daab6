//! JSON snapshots of a guest collection.
//!
//! Snapshots store drafts with an optional id. Grades in the file are ignored:
//! every loaded guest is rebuilt through [`Guest::new`], so the grade always
//! matches the ratings that were read.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;

use super::domain::{Guest, GuestDraft, GuestId, ValidationError};

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid {
        index: usize,
        source: ValidationError,
    },
    DuplicateId(GuestId),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(err) => write!(f, "failed to read guest snapshot: {}", err),
            SnapshotError::Json(err) => write!(f, "invalid guest snapshot: {}", err),
            SnapshotError::Invalid { index, source } => {
                write!(f, "guest #{} in snapshot is invalid: {}", index + 1, source)
            }
            SnapshotError::DuplicateId(id) => {
                write!(f, "guest id '{}' appears more than once in snapshot", id)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io(err) => Some(err),
            SnapshotError::Json(err) => Some(err),
            SnapshotError::Invalid { source, .. } => Some(source),
            SnapshotError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    #[serde(default)]
    id: Option<GuestId>,
    #[serde(flatten)]
    draft: GuestDraft,
}

pub struct GuestSnapshot;

impl GuestSnapshot {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Guest>, SnapshotError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Guest>, SnapshotError> {
        let entries: Vec<SnapshotEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    /// Same as [`GuestSnapshot::from_reader`] for an already parsed JSON array.
    pub fn from_value(value: serde_json::Value) -> Result<Vec<Guest>, SnapshotError> {
        let entries: Vec<SnapshotEntry> = serde_json::from_value(value)?;
        Self::from_entries(entries)
    }

    /// Guests missing an id get `snapshot-N` from their position in the list.
    fn from_entries(entries: Vec<SnapshotEntry>) -> Result<Vec<Guest>, SnapshotError> {
        let mut seen = HashSet::new();
        let mut guests = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let draft = entry
                .draft
                .validate()
                .map_err(|source| SnapshotError::Invalid { index, source })?;
            let id = entry
                .id
                .unwrap_or_else(|| GuestId(format!("snapshot-{}", index + 1)));
            if !seen.insert(id.clone()) {
                return Err(SnapshotError::DuplicateId(id));
            }
            guests.push(Guest::new(id, draft));
        }

        Ok(guests)
    }

    pub fn write<W: Write>(guests: &[Guest], writer: W) -> Result<(), SnapshotError> {
        serde_json::to_writer_pretty(writer, guests)?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(guests: &[Guest], path: P) -> Result<(), SnapshotError> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write(guests, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
