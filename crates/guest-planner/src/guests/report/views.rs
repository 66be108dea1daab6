use super::super::domain::{Grade, GuestCategory, GuestId};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdownEntry {
    pub category: GuestCategory,
    pub category_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeBucketEntry {
    pub grade: Grade,
    pub grade_label: &'static str,
    pub count: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopGuestEntry {
    pub rank: usize,
    pub id: GuestId,
    pub name: String,
    pub category: GuestCategory,
    pub category_label: &'static str,
    pub average_rating: f64,
}

/// Display-ready statistics: averages rounded, every grade bucket present,
/// categories ordered by head count.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSummary {
    pub total_guests: usize,
    pub expected_attendance: usize,
    pub average_attendance: f64,
    pub high_priority_guests: usize,
    pub top_category: GuestCategory,
    pub top_category_label: &'static str,
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
    pub grade_distribution: Vec<GradeBucketEntry>,
    pub top_rated: Vec<TopGuestEntry>,
}
