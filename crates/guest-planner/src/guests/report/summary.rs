use super::super::domain::{Grade, Guest, GuestCategory};
use super::views::{
    CategoryBreakdownEntry, GradeBucketEntry, StatisticsSummary, TopGuestEntry,
};
use super::{EXPECTED_ATTENDANCE_THRESHOLD, TOP_RATED_LIMIT};
use std::collections::BTreeMap;

/// Returned instead of a snapshot when there is nothing to summarize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatisticsError {
    #[error("no guests to summarize")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: GuestCategory,
    pub count: usize,
}

/// Aggregate metrics over a non-empty guest collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestStatistics {
    pub total_guests: usize,
    pub average_attendance: f64,
    pub expected_attendance: usize,
    pub high_priority_guests: usize,
    /// Only categories that occur, in first-encountered order.
    pub category_distribution: Vec<CategoryCount>,
    /// Only grades that occur.
    pub grade_distribution: BTreeMap<Grade, usize>,
    pub top_rated_guests: Vec<Guest>,
    pub top_category: GuestCategory,
}

pub fn aggregate_statistics(guests: &[Guest]) -> Result<GuestStatistics, StatisticsError> {
    if guests.is_empty() {
        return Err(StatisticsError::Empty);
    }

    let total_guests = guests.len();
    let attendance_sum: u64 = guests
        .iter()
        .map(|guest| u64::from(guest.attendance_possibility()))
        .sum();
    let average_attendance = attendance_sum as f64 / total_guests as f64;

    let expected_attendance = guests
        .iter()
        .filter(|guest| guest.attendance_possibility() >= EXPECTED_ATTENDANCE_THRESHOLD)
        .count();

    let high_priority_guests = guests
        .iter()
        .filter(|guest| guest.final_grade().is_high_priority())
        .count();

    let mut category_distribution: Vec<CategoryCount> = Vec::new();
    let mut grade_distribution = BTreeMap::new();
    for guest in guests {
        match category_distribution
            .iter_mut()
            .find(|entry| entry.category == guest.category())
        {
            Some(entry) => entry.count += 1,
            None => category_distribution.push(CategoryCount {
                category: guest.category(),
                count: 1,
            }),
        }
        *grade_distribution.entry(guest.final_grade()).or_insert(0) += 1;
    }

    // Strictly greater keeps the first-encountered category on ties.
    let mut top = category_distribution[0];
    for entry in &category_distribution[1..] {
        if entry.count > top.count {
            top = *entry;
        }
    }

    let mut ranked: Vec<&Guest> = guests.iter().collect();
    ranked.sort_by(|a, b| b.importance_total().cmp(&a.importance_total()));
    let top_rated_guests = ranked
        .into_iter()
        .take(TOP_RATED_LIMIT)
        .cloned()
        .collect();

    Ok(GuestStatistics {
        total_guests,
        average_attendance,
        expected_attendance,
        high_priority_guests,
        category_distribution,
        grade_distribution,
        top_rated_guests,
        top_category: top.category,
    })
}

impl GuestStatistics {
    pub fn grade_count(&self, grade: Grade) -> usize {
        self.grade_distribution.get(&grade).copied().unwrap_or(0)
    }

    /// All five grades in A..F order, zero-filled for grades nobody holds.
    pub fn full_grade_distribution(&self) -> [(Grade, usize); 5] {
        Grade::ordered().map(|grade| (grade, self.grade_count(grade)))
    }

    pub fn category_count(&self, category: GuestCategory) -> usize {
        self.category_distribution
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn summary(&self) -> StatisticsSummary {
        let total = self.total_guests as f64;

        let mut category_breakdown: Vec<CategoryBreakdownEntry> = self
            .category_distribution
            .iter()
            .map(|entry| CategoryBreakdownEntry {
                category: entry.category,
                category_label: entry.category.label(),
                count: entry.count,
                share_pct: entry.count as f64 / total * 100.0,
            })
            .collect();
        category_breakdown.sort_by(|a, b| b.count.cmp(&a.count));

        let grade_distribution = self
            .full_grade_distribution()
            .into_iter()
            .map(|(grade, count)| GradeBucketEntry {
                grade,
                grade_label: grade.label(),
                count,
                percentage: (count as f64 / total * 100.0).round() as u8,
            })
            .collect();

        let top_rated = self
            .top_rated_guests
            .iter()
            .enumerate()
            .map(|(index, guest)| TopGuestEntry {
                rank: index + 1,
                id: guest.id().clone(),
                name: guest.name().to_string(),
                category: guest.category(),
                category_label: guest.category().label(),
                average_rating: guest.average_rating(),
            })
            .collect();

        StatisticsSummary {
            total_guests: self.total_guests,
            expected_attendance: self.expected_attendance,
            average_attendance: round_one_decimal(self.average_attendance),
            high_priority_guests: self.high_priority_guests,
            top_category: self.top_category,
            top_category_label: self.top_category.label(),
            category_breakdown,
            grade_distribution,
            top_rated,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
