mod summary;
pub mod views;

pub use summary::{aggregate_statistics, CategoryCount, GuestStatistics, StatisticsError};

/// Attendance possibility at or above which a guest counts as expected.
pub const EXPECTED_ATTENDANCE_THRESHOLD: u8 = 7;
/// Size of the top-rated leaderboard.
pub const TOP_RATED_LIMIT: usize = 3;
