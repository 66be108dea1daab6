//! Filtered, searched, and sorted views over a guest collection.
//!
//! Every view borrows the input and never reorders or mutates it. The pipeline
//! order is fixed: category filter, then text search, then a stable sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Guest, GuestCategory, UnknownCategory};

/// Category selector; `All` is the sentinel that keeps every guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(GuestCategory),
}

impl CategoryFilter {
    pub fn matches(self, guest: &Guest) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => guest.category() == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

/// Case-insensitive substring match against name, notes, and category label.
/// A blank query matches everything.
pub fn matches_search(guest: &Guest, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    guest.name().to_lowercase().contains(&query)
        || guest
            .notes()
            .map(|notes| notes.to_lowercase().contains(&query))
            .unwrap_or(false)
        || guest.category().label().to_lowercase().contains(&query)
}

/// Named sort modes. Declaration order must match [`SORT_MODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    GradeAsc,
    GradeDesc,
    CategoryAsc,
    GroomRatingDesc,
    BridesmaidRatingDesc,
    AttendanceDesc,
}

type Comparator = fn(&Guest, &Guest) -> Ordering;

/// Comparator table entry for a sort mode.
pub struct SortMode {
    pub key: SortKey,
    pub slug: &'static str,
    pub label: &'static str,
    compare: Comparator,
}

impl fmt::Debug for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortMode")
            .field("key", &self.key)
            .field("slug", &self.slug)
            .finish()
    }
}

pub static SORT_MODES: [SortMode; 8] = [
    SortMode {
        key: SortKey::NameAsc,
        slug: "name-asc",
        label: "Name (A-Z)",
        compare: |a, b| compare_text(a.name(), b.name()),
    },
    SortMode {
        key: SortKey::NameDesc,
        slug: "name-desc",
        label: "Name (Z-A)",
        compare: |a, b| compare_text(b.name(), a.name()),
    },
    SortMode {
        key: SortKey::GradeAsc,
        slug: "grade-asc",
        label: "Grade (A-F)",
        compare: |a, b| a.final_grade().rank().cmp(&b.final_grade().rank()),
    },
    SortMode {
        key: SortKey::GradeDesc,
        slug: "grade-desc",
        label: "Grade (F-A)",
        compare: |a, b| b.final_grade().rank().cmp(&a.final_grade().rank()),
    },
    SortMode {
        key: SortKey::CategoryAsc,
        slug: "category-asc",
        label: "Category",
        compare: |a, b| compare_text(a.category().label(), b.category().label()),
    },
    SortMode {
        key: SortKey::GroomRatingDesc,
        slug: "groom-rating-desc",
        label: "Groom Rating (High-Low)",
        compare: |a, b| b.groom_rating().cmp(&a.groom_rating()),
    },
    SortMode {
        key: SortKey::BridesmaidRatingDesc,
        slug: "bridesmaid-rating-desc",
        label: "Bridesmaid Rating (High-Low)",
        compare: |a, b| b.bridesmaid_rating().cmp(&a.bridesmaid_rating()),
    },
    SortMode {
        key: SortKey::AttendanceDesc,
        slug: "attendance-desc",
        label: "Attendance Possibility (High-Low)",
        compare: |a, b| b.attendance_possibility().cmp(&a.attendance_possibility()),
    },
];

impl SortKey {
    pub fn mode(self) -> &'static SortMode {
        &SORT_MODES[self as usize]
    }

    pub fn slug(self) -> &'static str {
        self.mode().slug
    }

    pub fn compare(self, a: &Guest, b: &Guest) -> Ordering {
        (self.mode().compare)(a, b)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        SORT_MODES
            .iter()
            .find(|mode| mode.slug.eq_ignore_ascii_case(trimmed))
            .map(|mode| mode.key)
            .ok_or_else(|| UnknownSortKey(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort option '{0}'")]
pub struct UnknownSortKey(pub String);

/// Collation key: accents folded to their base letters, then lower-cased.
fn collation_key(text: &str) -> String {
    deunicode::deunicode(text).to_lowercase()
}

/// Locale-style ordering. Base letters decide first ("Émile" before "Zoe"),
/// then unaccented before accented, then lowercase before uppercase.
fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Category filter, then search, then a stable sort on a copy of the refs.
pub fn filter_and_sort<'a>(
    guests: &'a [Guest],
    filter: CategoryFilter,
    search: &str,
    sort: SortKey,
) -> Vec<&'a Guest> {
    let mut view: Vec<&Guest> = guests
        .iter()
        .filter(|guest| filter.matches(guest))
        .filter(|guest| matches_search(guest, search))
        .collect();

    view.sort_by(|a, b| sort.compare(a, b));
    view
}

/// Listing payload with the "showing N of M" counters.
#[derive(Debug, Clone, Serialize)]
pub struct GuestListing {
    pub showing: usize,
    pub total: usize,
    pub sort: SortKey,
    pub guests: Vec<Guest>,
}

impl GuestListing {
    pub fn build(guests: &[Guest], filter: CategoryFilter, search: &str, sort: SortKey) -> Self {
        let view: Vec<Guest> = filter_and_sort(guests, filter, search, sort)
            .into_iter()
            .cloned()
            .collect();

        Self {
            showing: view.len(),
            total: guests.len(),
            sort,
            guests: view,
        }
    }

    pub fn is_filtered_empty(&self) -> bool {
        self.showing == 0 && self.total > 0
    }
}
