//! Session termination and the mindful-break rule.
//!
//! Finding the struggle bound is prioritized over confirming the upper
//! bound: a long incorrect streak stops the session, while an equally long
//! correct streak with the estimate near the top of the scale keeps going,
//! since that pattern usually means the bank is out of headroom rather
//! than the learner having plateaued.

use crate::blueprint::Blueprint;
use crate::types::SessionState;

/// Extra run length, beyond the configured threshold, at which a streak in
/// either direction ends the session.
const LONG_STREAK_MARGIN: i32 = 2;

/// Ability above which a correct streak is attributed to missing headroom.
const HEADROOM_ABILITY: f64 = 2.0;

/// Lowest mood check-in that does not suggest a break.
const LOW_MOOD: i32 = 2;

pub fn should_stop(state: &SessionState, blueprint: &Blueprint) -> bool {
    if state.attempts >= blueprint.max_items {
        return true;
    }
    if state.attempts < blueprint.min_items {
        return false;
    }
    if (state.skills_seen.len() as i32) < blueprint.min_distinct_skills {
        return false;
    }

    // Ceiling found: a sustained run of misses
    if state.streak <= -blueprint.stop_streak_threshold {
        return true;
    }

    let long_streak = blueprint.stop_streak_threshold + LONG_STREAK_MARGIN;
    if state.streak.abs() >= long_streak {
        if state.streak > 0 && state.ability > HEADROOM_ABILITY {
            return false;
        }
        return true;
    }

    false
}

/// Raise the break flag at most once per session, either at the configured
/// attempt count or on a low mood check-in. Returns whether the flag was
/// raised by this call; dismissal is the caller's responsibility.
pub fn maybe_trigger_break(state: &mut SessionState, blueprint: &Blueprint) -> bool {
    if state.break_triggered {
        return false;
    }
    if state.attempts == blueprint.break_after_attempts || state.mood <= LOW_MOOD {
        state.needs_break = true;
        state.break_triggered = true;
        tracing::debug!(
            attempts = state.attempts,
            mood = state.mood,
            "mindful break suggested"
        );
        return true;
    }
    false
}
