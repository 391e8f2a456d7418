//! Per-skill mastery tracking and spaced review intervals.
//!
//! Theta moves by a fixed step per practice and maps onto coarse mastery
//! levels. Review spacing follows the mastery band: the stronger the
//! skill, the longer the retention interval, and a recent miss sharply
//! shortens it regardless of historical mastery.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::types::{MasteryLevel, MasteryRecord, THETA_MAX, THETA_MIN};

const THETA_STEP: f64 = 0.2;

/// Base review interval in days for a theta band, halved (floored, minimum
/// one day) when the most recent attempt was a miss.
pub fn next_review_in_days(theta: f64, was_correct: bool) -> i64 {
    let base = if theta >= 1.5 {
        14
    } else if theta >= 0.5 {
        7
    } else if theta >= -0.5 {
        4
    } else {
        2
    };
    if was_correct {
        base
    } else {
        (base / 2).max(1)
    }
}

/// Fold one practice outcome into a mastery record: step theta, refresh
/// the level, and schedule the next review from the post-step theta.
pub fn apply_practice(record: &mut MasteryRecord, correct: bool, today: NaiveDate) {
    let step = if correct { THETA_STEP } else { -THETA_STEP };
    record.theta = (record.theta + step).clamp(THETA_MIN, THETA_MAX);
    record.attempts += 1;
    record.mastery_level = MasteryLevel::from_theta(record.theta);
    record.last_practiced_at = Some(today);
    record.next_review_at = Some(today + Duration::days(next_review_in_days(record.theta, correct)));

    tracing::debug!(
        skill = %record.skill_id,
        correct,
        theta = record.theta,
        level = record.mastery_level.as_str(),
        "mastery updated"
    );
}

/// Load-or-create semantics over a mastery map: a skill never practiced
/// starts from the zero-theta default, never an error.
pub fn update_mastery(
    records: &mut HashMap<String, MasteryRecord>,
    skill_id: &str,
    correct: bool,
    today: NaiveDate,
) -> MasteryRecord {
    let record = records
        .entry(skill_id.to_string())
        .or_insert_with(|| MasteryRecord::new(skill_id));
    apply_practice(record, correct, today);
    record.clone()
}
