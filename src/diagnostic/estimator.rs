//! Running ability estimation from scored responses.
//!
//! A 1-PL expectation drives an adaptive step size: informative items and
//! surprising outcomes move the estimate more, and consistent runs are
//! amplified so the estimate converges faster toward a learner's true
//! ceiling or floor. Deliberately more aggressive than a textbook 1-PL
//! update.

use crate::types::{AttemptRecord, Item, SessionState, ABILITY_MAX, ABILITY_MIN};

const BASE_DELTA: f64 = 0.5;
const INFORMATION_FLOOR: f64 = 0.3;
const INFORMATION_GAIN: f64 = 1.4;
const SURPRISE_FLOOR: f64 = 0.5;
const STREAK_STEP: f64 = 0.15;
const STREAK_MIN_RUN: i32 = 2;

/// 1-parameter-logistic probability of a correct response.
pub fn expected_probability(ability: f64, difficulty: f64) -> f64 {
    1.0 / (1.0 + (-(ability - difficulty)).exp())
}

/// Fold one scored response into the session state: move the ability
/// estimate, extend or flip the streak, and record the attempt.
pub fn update_ability(state: &mut SessionState, correct: bool, item: &Item) {
    let p = expected_probability(state.ability, item.difficulty);
    let information = p * (1.0 - p);
    let surprise = if correct { 1.0 - p } else { p };

    let adaptive_delta =
        BASE_DELTA * (INFORMATION_FLOOR + INFORMATION_GAIN * information) * (SURPRISE_FLOOR + surprise);

    // Multiplier reflects the run length going into this answer
    let streak_multiplier = if state.streak.abs() >= STREAK_MIN_RUN {
        1.0 + STREAK_STEP * state.streak.abs() as f64
    } else {
        1.0
    };

    let direction = if correct { 1.0 } else { -1.0 };
    state.ability = (state.ability + adaptive_delta * direction * streak_multiplier)
        .clamp(ABILITY_MIN, ABILITY_MAX);

    state.streak = if correct {
        if state.streak > 0 {
            state.streak + 1
        } else {
            1
        }
    } else if state.streak < 0 {
        state.streak - 1
    } else {
        -1
    };

    state.skills_seen.insert(item.skill.clone());
    if correct {
        state.correct_count += 1;
    }
    state.attempts += 1;
    state.items_asked.push(item.id.clone());
    state.attempt_log.push(AttemptRecord {
        item_id: item.id.clone(),
        skill: item.skill.clone(),
        difficulty: item.difficulty,
        correct,
        ability_after: state.ability,
        streak_after: state.streak,
        answered_at_ms: chrono::Utc::now().timestamp_millis(),
    });

    tracing::debug!(
        item_id = %item.id,
        correct,
        p,
        delta = adaptive_delta * direction * streak_multiplier,
        ability = state.ability,
        streak = state.streak,
        "ability updated"
    );
}
