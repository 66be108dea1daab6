//! Guest list management: the grading rubric, the derived list views, and the
//! owner-scoped service and HTTP routes built on top of them.

pub mod domain;
pub mod export;
pub mod grading;
pub mod listing;
pub mod report;
pub mod repository;
pub mod router;
pub mod sample;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    Grade, Guest, GuestCategory, GuestDraft, GuestId, OwnerId, RatingField, UnknownCategory,
    ValidationError,
};
pub use export::{build_export_table, export_file_name, ExportError, ExportRow, ExportTable};
pub use grading::{compute_grade, weighted_score};
pub use listing::{filter_and_sort, CategoryFilter, GuestListing, SortKey, UnknownSortKey};
pub use report::views::StatisticsSummary;
pub use report::{aggregate_statistics, GuestStatistics, StatisticsError};
pub use repository::{GuestRepository, RepositoryError};
pub use router::{guest_router, OWNER_HEADER};
pub use service::{GuestService, GuestServiceError};
pub use snapshot::{GuestSnapshot, SnapshotError};
