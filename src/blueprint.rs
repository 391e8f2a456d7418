//! Per-subject diagnostic configuration.
//!
//! A blueprint is static configuration: constructed and validated once,
//! never mutated while a session runs. Construction fails fast on an
//! inconsistent blueprint, before any session starts.

use serde::{Deserialize, Serialize};

use crate::types::{Subject, ABILITY_MAX, ABILITY_MIN};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BlueprintError {
    #[error("minItems {min} exceeds maxItems {max}")]
    MinExceedsMax { min: i32, max: i32 },
    #[error("blueprint must allow at least one item")]
    ZeroItems,
    #[error("startDifficulty {0} outside ability range")]
    StartDifficultyOutOfRange(f64),
    #[error("breakAfterAttempts {0} must be positive")]
    BreakAfterOutOfRange(i32),
    #[error("stopStreakThreshold {0} must be at least 2")]
    StreakThresholdTooLow(i32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub min_items: i32,
    pub max_items: i32,
    pub break_after_attempts: i32,
    pub start_difficulty: f64,
    pub stop_streak_threshold: i32,
    pub min_distinct_skills: i32,
}

impl Blueprint {
    pub fn new(
        min_items: i32,
        max_items: i32,
        break_after_attempts: i32,
        start_difficulty: f64,
        stop_streak_threshold: i32,
        min_distinct_skills: i32,
    ) -> Result<Self, BlueprintError> {
        let blueprint = Self {
            min_items,
            max_items,
            break_after_attempts,
            start_difficulty,
            stop_streak_threshold,
            min_distinct_skills,
        };
        blueprint.validate()?;
        Ok(blueprint)
    }

    pub fn validate(&self) -> Result<(), BlueprintError> {
        if self.max_items < 1 || self.min_items < 1 {
            return Err(BlueprintError::ZeroItems);
        }
        if self.min_items > self.max_items {
            return Err(BlueprintError::MinExceedsMax {
                min: self.min_items,
                max: self.max_items,
            });
        }
        if !self.start_difficulty.is_finite()
            || self.start_difficulty < ABILITY_MIN
            || self.start_difficulty > ABILITY_MAX
        {
            return Err(BlueprintError::StartDifficultyOutOfRange(
                self.start_difficulty,
            ));
        }
        if self.break_after_attempts < 1 {
            return Err(BlueprintError::BreakAfterOutOfRange(
                self.break_after_attempts,
            ));
        }
        if self.stop_streak_threshold < 2 {
            return Err(BlueprintError::StreakThresholdTooLow(
                self.stop_streak_threshold,
            ));
        }
        Ok(())
    }

    /// Shipped defaults per subject. Reading starts slightly easier since
    /// its bank skews toward early decoding skills.
    pub fn for_subject(subject: Subject) -> Self {
        match subject {
            Subject::Math => Self {
                min_items: 8,
                max_items: 20,
                break_after_attempts: 10,
                start_difficulty: 0.0,
                stop_streak_threshold: 3,
                min_distinct_skills: 3,
            },
            Subject::Reading => Self {
                min_items: 8,
                max_items: 20,
                break_after_attempts: 10,
                start_difficulty: -0.3,
                stop_streak_threshold: 3,
                min_distinct_skills: 3,
            },
            Subject::Science => Self {
                min_items: 6,
                max_items: 16,
                break_after_attempts: 8,
                start_difficulty: 0.0,
                stop_streak_threshold: 3,
                min_distinct_skills: 2,
            },
            Subject::SocialStudies => Self {
                min_items: 6,
                max_items: 16,
                break_after_attempts: 8,
                start_difficulty: 0.0,
                stop_streak_threshold: 3,
                min_distinct_skills: 2,
            },
        }
    }

    /// Subject defaults with environment overrides, e.g.
    /// `DIAG_MAX_ITEMS=24`. Overrides are re-validated as a whole so a bad
    /// combination still fails fast.
    pub fn from_env(subject: Subject) -> Result<Self, BlueprintError> {
        let mut blueprint = Self::for_subject(subject);

        if let Some(val) = env_i32("DIAG_MIN_ITEMS") {
            blueprint.min_items = val;
        }
        if let Some(val) = env_i32("DIAG_MAX_ITEMS") {
            blueprint.max_items = val;
        }
        if let Some(val) = env_i32("DIAG_BREAK_AFTER") {
            blueprint.break_after_attempts = val;
        }
        if let Some(val) = env_i32("DIAG_STOP_STREAK") {
            blueprint.stop_streak_threshold = val;
        }

        blueprint.validate()?;
        Ok(blueprint)
    }
}

fn env_i32(name: &str) -> Option<i32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
