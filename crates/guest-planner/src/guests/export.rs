//! Spreadsheet export of a guest collection.
//!
//! The table is a pure mapping with a fixed column schema; the CSV encoding is
//! the only I/O in this module.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::Guest;

pub const EXPORT_FILE_PREFIX: &str = "wedding-guest-list-";
pub const EXPORT_FILE_EXTENSION: &str = "csv";

/// Column header plus its width hint in character units.
///
/// CSV has no column widths, so the hints never reach the written file. They
/// are exposed through [`ExportTable::column_widths`] for callers that lay the
/// table out themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportColumn {
    pub header: &'static str,
    pub width: u8,
}

pub const EXPORT_COLUMNS: [ExportColumn; 9] = [
    ExportColumn { header: "Name", width: 25 },
    ExportColumn { header: "Category", width: 18 },
    ExportColumn { header: "Groom Rating", width: 15 },
    ExportColumn { header: "Bridesmaid Rating", width: 18 },
    ExportColumn { header: "Attendance Possibility", width: 22 },
    ExportColumn { header: "Final Grade", width: 12 },
    ExportColumn { header: "Invite Sent", width: 12 },
    ExportColumn { header: "Confirmed", width: 12 },
    ExportColumn { header: "Notes", width: 40 },
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write guest export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode guest export: {0}")]
    Csv(#[from] csv::Error),
}

/// One exported guest, already rendered to spreadsheet cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub name: String,
    pub category: &'static str,
    pub groom_rating: u8,
    pub bridesmaid_rating: u8,
    pub attendance_possibility: u8,
    pub final_grade: &'static str,
    pub invite_sent: &'static str,
    pub confirmed: &'static str,
    pub notes: String,
}

impl ExportRow {
    fn from_guest(guest: &Guest) -> Self {
        Self {
            name: guest.name().to_string(),
            category: guest.category().label(),
            groom_rating: guest.groom_rating(),
            bridesmaid_rating: guest.bridesmaid_rating(),
            attendance_possibility: guest.attendance_possibility(),
            final_grade: guest.final_grade().label(),
            invite_sent: yes_no(guest.invite_sent()),
            confirmed: yes_no(guest.confirmation()),
            notes: guest.notes().unwrap_or_default().to_string(),
        }
    }

    /// Cell values in [`EXPORT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 9] {
        [
            self.name.clone(),
            self.category.to_string(),
            self.groom_rating.to_string(),
            self.bridesmaid_rating.to_string(),
            self.attendance_possibility.to_string(),
            self.final_grade.to_string(),
            self.invite_sent.to_string(),
            self.confirmed.to_string(),
            self.notes.clone(),
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    rows: Vec<ExportRow>,
}

/// One row per guest, input order preserved. No filtering or sorting.
pub fn build_export_table(guests: &[Guest]) -> ExportTable {
    ExportTable {
        rows: guests.iter().map(ExportRow::from_guest).collect(),
    }
}

/// `wedding-guest-list-YYYY-MM-DD.csv` for the given export date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!(
        "{EXPORT_FILE_PREFIX}{}.{EXPORT_FILE_EXTENSION}",
        date.format("%Y-%m-%d")
    )
}

impl ExportTable {
    pub fn headers(&self) -> [&'static str; 9] {
        EXPORT_COLUMNS.map(|column| column.header)
    }

    /// Width hints in [`EXPORT_COLUMNS`] order. Not written to the CSV.
    pub fn column_widths(&self) -> [u8; 9] {
        EXPORT_COLUMNS.map(|column| column.width)
    }

    pub fn rows(&self) -> &[ExportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for row in &self.rows {
            csv_writer.write_record(row.cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// Write the artifact into `dir` under the dated file name.
    pub fn write_to_dir<P: AsRef<Path>>(
        &self,
        dir: P,
        date: NaiveDate,
    ) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(export_file_name(date));
        let file = File::create(&path)?;
        self.write_csv(file)?;
        Ok(path)
    }
}
