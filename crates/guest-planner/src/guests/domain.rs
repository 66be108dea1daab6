use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::grading::compute_grade;

/// Identifier wrapper assigned by the persistence layer when a guest is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub String);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated identity that owns a guest collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

/// Closed set of guest classifications offered by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestCategory {
    #[serde(rename = "Close Family")]
    CloseFamily,
    #[serde(rename = "Groom's Family")]
    GroomsFamily,
    #[serde(rename = "Bride's Family")]
    BridesFamily,
    #[serde(rename = "Close Friends")]
    CloseFriends,
    #[serde(rename = "Friends")]
    Friends,
    #[serde(rename = "Colleagues")]
    Colleagues,
    #[serde(rename = "Out of Town")]
    OutOfTown,
    #[serde(rename = "Significant Other")]
    SignificantOther,
    #[serde(rename = "Vendors")]
    Vendors,
    #[serde(rename = "Other")]
    Other,
}

impl GuestCategory {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::CloseFamily,
            Self::GroomsFamily,
            Self::BridesFamily,
            Self::CloseFriends,
            Self::Friends,
            Self::Colleagues,
            Self::OutOfTown,
            Self::SignificantOther,
            Self::Vendors,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CloseFamily => "Close Family",
            Self::GroomsFamily => "Groom's Family",
            Self::BridesFamily => "Bride's Family",
            Self::CloseFriends => "Close Friends",
            Self::Friends => "Friends",
            Self::Colleagues => "Colleagues",
            Self::OutOfTown => "Out of Town",
            Self::SignificantOther => "Significant Other",
            Self::Vendors => "Vendors",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GuestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GuestCategory {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guest category '{0}'")]
pub struct UnknownCategory(pub String);

/// Priority label derived from a guest's ratings, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::F]
    }

    /// Fixed rank where 1 is the best grade.
    pub const fn rank(self) -> u8 {
        match self {
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
            Self::F => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    pub const fn is_high_priority(self) -> bool {
        matches!(self, Self::A | Self::B)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

/// The three rating axes collected for every guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingField {
    Groom,
    Bridesmaid,
    Attendance,
}

impl RatingField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Groom => "groom_rating",
            Self::Bridesmaid => "bridesmaid_rating",
            Self::Attendance => "attendance_possibility",
        }
    }
}

/// Rejections raised before a draft reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("guest name must not be blank")]
    BlankName,
    #[error("{} must be between 1 and 10, got {value}", .field.label())]
    RatingOutOfRange { field: RatingField, value: u8 },
}

/// Create/update request: every guest field except the id and the derived grade.
///
/// The confirmation and invite flags are optional so that an edit which omits
/// them keeps whatever the stored guest already has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDraft {
    pub name: String,
    pub category: GuestCategory,
    pub groom_rating: u8,
    pub bridesmaid_rating: u8,
    pub attendance_possibility: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_sent: Option<bool>,
}

impl GuestDraft {
    pub fn new(
        name: impl Into<String>,
        category: GuestCategory,
        groom_rating: u8,
        bridesmaid_rating: u8,
        attendance_possibility: u8,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            groom_rating,
            bridesmaid_rating,
            attendance_possibility,
            notes: None,
            confirmation: None,
            invite_sent: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Trim text fields and check the rating bounds.
    pub fn validate(mut self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        self.name = name.to_string();
        self.notes = normalize_notes(self.notes);

        for (field, value) in [
            (RatingField::Groom, self.groom_rating),
            (RatingField::Bridesmaid, self.bridesmaid_rating),
            (RatingField::Attendance, self.attendance_possibility),
        ] {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(ValidationError::RatingOutOfRange { field, value });
            }
        }

        Ok(self)
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A stored invitee. The grade is private and re-derived at every mutation
/// boundary so it can never drift from the ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    id: GuestId,
    name: String,
    category: GuestCategory,
    groom_rating: u8,
    bridesmaid_rating: u8,
    attendance_possibility: u8,
    final_grade: Grade,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    confirmation: bool,
    invite_sent: bool,
}

impl Guest {
    pub fn new(id: GuestId, draft: GuestDraft) -> Self {
        let final_grade = compute_grade(
            draft.groom_rating,
            draft.bridesmaid_rating,
            draft.attendance_possibility,
        );

        Self {
            id,
            name: draft.name,
            category: draft.category,
            groom_rating: draft.groom_rating,
            bridesmaid_rating: draft.bridesmaid_rating,
            attendance_possibility: draft.attendance_possibility,
            final_grade,
            notes: normalize_notes(draft.notes),
            confirmation: draft.confirmation.unwrap_or(false),
            invite_sent: draft.invite_sent.unwrap_or(false),
        }
    }

    /// Replace the editable fields and re-derive the grade.
    pub fn apply_update(&mut self, draft: GuestDraft) {
        self.name = draft.name;
        self.category = draft.category;
        self.groom_rating = draft.groom_rating;
        self.bridesmaid_rating = draft.bridesmaid_rating;
        self.attendance_possibility = draft.attendance_possibility;
        self.notes = normalize_notes(draft.notes);
        if let Some(confirmation) = draft.confirmation {
            self.confirmation = confirmation;
        }
        if let Some(invite_sent) = draft.invite_sent {
            self.invite_sent = invite_sent;
        }
        self.final_grade = compute_grade(
            self.groom_rating,
            self.bridesmaid_rating,
            self.attendance_possibility,
        );
    }

    pub fn set_confirmation(&mut self, confirmation: bool) {
        self.confirmation = confirmation;
    }

    pub fn set_invite_sent(&mut self, invite_sent: bool) {
        self.invite_sent = invite_sent;
    }

    pub fn id(&self) -> &GuestId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> GuestCategory {
        self.category
    }

    pub fn groom_rating(&self) -> u8 {
        self.groom_rating
    }

    pub fn bridesmaid_rating(&self) -> u8 {
        self.bridesmaid_rating
    }

    pub fn attendance_possibility(&self) -> u8 {
        self.attendance_possibility
    }

    pub fn final_grade(&self) -> Grade {
        self.final_grade
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn confirmation(&self) -> bool {
        self.confirmation
    }

    pub fn invite_sent(&self) -> bool {
        self.invite_sent
    }

    /// Sum of the two importance ratings; twice the average used for ranking.
    pub fn importance_total(&self) -> u16 {
        u16::from(self.groom_rating) + u16::from(self.bridesmaid_rating)
    }

    pub fn average_rating(&self) -> f64 {
        f64::from(self.importance_total()) / 2.0
    }

    pub fn to_draft(&self) -> GuestDraft {
        GuestDraft {
            name: self.name.clone(),
            category: self.category,
            groom_rating: self.groom_rating,
            bridesmaid_rating: self.bridesmaid_rating,
            attendance_possibility: self.attendance_possibility,
            notes: self.notes.clone(),
            confirmation: Some(self.confirmation),
            invite_sent: Some(self.invite_sent),
        }
    }
}
