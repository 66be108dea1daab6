use super::common::*;
use crate::guests::domain::{Grade, GuestCategory};
use crate::guests::report::{aggregate_statistics, StatisticsError};
use crate::guests::sample::sample_guests;

#[test]
fn empty_collection_has_no_statistics() {
    assert_eq!(aggregate_statistics(&[]), Err(StatisticsError::Empty));
}

#[test]
fn attendance_metrics_use_the_threshold_of_seven() {
    let guests = vec![
        guest("g1", "One", GuestCategory::Friends, 5, 5, 10),
        guest("g2", "Two", GuestCategory::Friends, 5, 5, 8),
        guest("g3", "Three", GuestCategory::Friends, 5, 5, 5),
        guest("g4", "Four", GuestCategory::Friends, 5, 5, 3),
    ];
    let stats = aggregate_statistics(&guests).expect("stats");
    assert_eq!(stats.total_guests, 4);
    assert_eq!(stats.expected_attendance, 2);
    assert!((stats.average_attendance - 6.5).abs() < 1e-9);
}

#[test]
fn grade_buckets_sum_to_total_and_zero_fill() {
    let guests = party();
    let stats = aggregate_statistics(&guests).expect("stats");
    let total: usize = stats.grade_distribution.values().sum();
    assert_eq!(total, guests.len());
    assert!(!stats.grade_distribution.contains_key(&Grade::F));

    let full = stats.full_grade_distribution();
    assert_eq!(
        full,
        [
            (Grade::A, 2),
            (Grade::B, 1),
            (Grade::C, 2),
            (Grade::D, 1),
            (Grade::F, 0),
        ]
    );
    assert_eq!(stats.high_priority_guests, 3);
}

#[test]
fn category_distribution_keeps_first_seen_order() {
    let guests = party();
    let stats = aggregate_statistics(&guests).expect("stats");
    let order: Vec<GuestCategory> = stats
        .category_distribution
        .iter()
        .map(|entry| entry.category)
        .collect();
    assert_eq!(
        order,
        vec![
            GuestCategory::GroomsFamily,
            GuestCategory::CloseFriends,
            GuestCategory::Friends,
            GuestCategory::Vendors,
        ]
    );
    assert_eq!(stats.category_count(GuestCategory::Friends), 2);
    assert_eq!(stats.category_count(GuestCategory::Colleagues), 0);
}

#[test]
fn top_category_tie_goes_to_the_first_encountered() {
    // Close Friends and Friends both have two guests; Close Friends is seen first.
    let guests = party();
    let stats = aggregate_statistics(&guests).expect("stats");
    assert_eq!(stats.top_category, GuestCategory::CloseFriends);

    let reversed: Vec<_> = guests.iter().rev().cloned().collect();
    let stats = aggregate_statistics(&reversed).expect("stats");
    assert_eq!(stats.top_category, GuestCategory::CloseFriends);

    let friends_first = vec![
        guest("f1", "Friend", GuestCategory::Friends, 5, 5, 5),
        guest("c1", "Colleague", GuestCategory::Colleagues, 5, 5, 5),
    ];
    let stats = aggregate_statistics(&friends_first).expect("stats");
    assert_eq!(stats.top_category, GuestCategory::Friends);
}

#[test]
fn top_rated_is_capped_and_ties_keep_input_order() {
    let guests = party();
    let stats = aggregate_statistics(&guests).expect("stats");
    let ids: Vec<&str> = stats
        .top_rated_guests
        .iter()
        .map(|guest| guest.id().0.as_str())
        .collect();
    assert_eq!(ids, vec!["g6", "g2", "g1"]);

    let small = vec![guest("g1", "Solo", GuestCategory::Other, 4, 4, 4)];
    let stats = aggregate_statistics(&small).expect("stats");
    assert_eq!(stats.top_rated_guests.len(), 1);
}

#[test]
fn summary_orders_categories_by_count_and_rounds() {
    let guests = vec![
        guest("g1", "One", GuestCategory::Vendors, 5, 5, 7),
        guest("g2", "Two", GuestCategory::Friends, 9, 9, 9),
        guest("g3", "Three", GuestCategory::Friends, 9, 9, 9),
    ];
    let summary = aggregate_statistics(&guests).expect("stats").summary();
    assert_eq!(summary.category_breakdown[0].category, GuestCategory::Friends);
    assert_eq!(summary.category_breakdown[0].count, 2);
    assert_eq!(summary.category_breakdown[1].category, GuestCategory::Vendors);
    assert!((summary.average_attendance - 8.3).abs() < 1e-9);
    assert_eq!(summary.grade_distribution.len(), 5);
    assert_eq!(summary.grade_distribution[0].percentage, 67);
    assert_eq!(summary.top_rated[0].rank, 1);
    assert!((summary.top_rated[0].average_rating - 9.0).abs() < 1e-9);
}

#[test]
fn sample_list_statistics() {
    let guests = sample_guests();
    let stats = aggregate_statistics(&guests).expect("stats");
    assert_eq!(stats.total_guests, 40);
    assert_eq!(stats.top_category, GuestCategory::CloseFriends);
    assert_eq!(stats.category_count(GuestCategory::CloseFriends), 12);
    let names: Vec<&str> = stats
        .top_rated_guests
        .iter()
        .map(|guest| guest.name())
        .collect();
    assert_eq!(names, vec!["Emma Thompson", "James Wilson", "Sophie Martinez"]);
}
