//! Review interval classification
//!
//! A two-bucket classifier over a glyph's accumulated counts. Rules are
//! checked in order and the first match wins:
//! - more than 3 correct answers: review in 7 days
//! - more than 2 incorrect answers: review in 1 day
//! - otherwise: review in 1 day

use super::models::{PerformanceEntry, ReviewInterval};

/// Correct answers needed before a glyph moves to the weekly bucket
const WEEKLY_CORRECT_THRESHOLD: u32 = 3;

/// Incorrect answers that pin a glyph to daily review
const DAILY_INCORRECT_THRESHOLD: u32 = 2;

/// Classify an entry into a review interval
#[allow(clippy::if_same_then_else)]
pub fn interval_for(entry: &PerformanceEntry) -> ReviewInterval {
    if entry.correct > WEEKLY_CORRECT_THRESHOLD {
        ReviewInterval::SevenDays
    } else if entry.incorrect > DAILY_INCORRECT_THRESHOLD {
        ReviewInterval::OneDay
    } else {
        ReviewInterval::OneDay
    }
}

/// Interval for a glyph that may never have been seen
pub fn interval_or_default(entry: Option<&PerformanceEntry>) -> ReviewInterval {
    entry.map(interval_for).unwrap_or(ReviewInterval::OneDay)
}
