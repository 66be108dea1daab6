//! Weighted scoring that turns the three guest ratings into a priority grade.
//!
//! `score = avg(groom, bridesmaid) * 0.6 + attendance * 0.4`. Thresholds are
//! compared on a tenfold scale, `(groom + bridesmaid) * 3 + attendance * 4`,
//! which is exact for whole and half ratings so a score of exactly 9.0 or 7.5
//! never lands on the wrong side of a boundary through float rounding.

use super::domain::Grade;

/// `avg * 0.6` on the tenfold scale is `(groom + bridesmaid) * 3`.
const IMPORTANCE_FACTOR: f64 = 3.0;
/// `attendance * 0.4` on the tenfold scale.
const ATTENDANCE_FACTOR: f64 = 4.0;

/// Minimum tenfold score (inclusive) for each grade, first match wins.
const GRADE_THRESHOLDS: [(f64, Grade); 4] = [
    (90.0, Grade::A),
    (75.0, Grade::B),
    (60.0, Grade::C),
    (45.0, Grade::D),
];

/// Weighted score on the 1..=10 scale.
pub fn weighted_score(
    groom_rating: impl Into<f64>,
    bridesmaid_rating: impl Into<f64>,
    attendance_possibility: impl Into<f64>,
) -> f64 {
    scaled_score(
        groom_rating.into(),
        bridesmaid_rating.into(),
        attendance_possibility.into(),
    ) / 10.0
}

/// Map a rating triple to its grade. Total over every real input; values
/// outside 1..=10 give a meaningless but well-defined grade and NaN maps to F.
pub fn compute_grade(
    groom_rating: impl Into<f64>,
    bridesmaid_rating: impl Into<f64>,
    attendance_possibility: impl Into<f64>,
) -> Grade {
    let scaled = scaled_score(
        groom_rating.into(),
        bridesmaid_rating.into(),
        attendance_possibility.into(),
    );

    GRADE_THRESHOLDS
        .iter()
        .find(|(minimum, _)| scaled >= *minimum)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

fn scaled_score(groom: f64, bridesmaid: f64, attendance: f64) -> f64 {
    (groom + bridesmaid) * IMPORTANCE_FACTOR + attendance * ATTENDANCE_FACTOR
}
