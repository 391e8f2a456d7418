//! Common Types and Constants
//!
//! Shared data structures used across the diagnostic, placement, and
//! scheduling modules.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Lower clamp for the diagnostic ability estimate
pub const ABILITY_MIN: f64 = -3.0;

/// Upper clamp for the diagnostic ability estimate
pub const ABILITY_MAX: f64 = 3.0;

/// Lower clamp for per-skill mastery theta
pub const THETA_MIN: f64 = -2.0;

/// Upper clamp for per-skill mastery theta
pub const THETA_MAX: f64 = 2.0;

/// Plan items at or above this priority are spaced reviews, never new lessons
pub const REVIEW_PRIORITY_OFFSET: i32 = 1000;

/// Neutral mood on the 1..=5 check-in scale
pub const DEFAULT_MOOD: i32 = 3;

// ==================== Subjects ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    Reading,
    Science,
    SocialStudies,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Reading => "reading",
            Self::Science => "science",
            Self::SocialStudies => "socialstudies",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "math" => Some(Self::Math),
            "reading" => Some(Self::Reading),
            "science" => Some(Self::Science),
            "socialstudies" | "social-studies" => Some(Self::SocialStudies),
            _ => None,
        }
    }

    pub fn all() -> [Subject; 4] {
        [
            Self::Math,
            Self::Reading,
            Self::Science,
            Self::SocialStudies,
        ]
    }
}

// ==================== Items ====================

/// Per-kind payload; required fields are enforced at deserialization time
/// so a record missing them never enters the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Mcq { choices: Vec<String> },
    Count { target: u32 },
    Phoneme { word: String },
    Map { region: String },
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mcq { .. } => "mcq",
            Self::Count { .. } => "count",
            Self::Phoneme { .. } => "phoneme",
            Self::Map { .. } => "map",
        }
    }
}

/// One diagnostic question. Immutable once loaded from the bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub subject: Subject,
    pub skill: String,
    pub difficulty: f64,
    #[serde(flatten)]
    pub kind: ItemKind,
    pub prompt: String,
    pub correct_answer: String,
}

// ==================== Diagnostic session ====================

/// One answered item in a diagnostic session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub item_id: String,
    pub skill: String,
    pub difficulty: f64,
    pub correct: bool,
    pub ability_after: f64,
    pub streak_after: i32,
    pub answered_at_ms: i64,
}

/// State of one active diagnostic attempt. Owned by the caller and passed
/// into each component; mutated only by the ability estimator and the
/// break-trigger rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub subject: Subject,
    pub ability: f64,
    pub items_asked: Vec<String>,
    pub skills_seen: BTreeSet<String>,
    pub correct_count: i32,
    pub attempts: i32,
    /// Positive for a run of correct answers, negative for a run of
    /// incorrect answers, reset to +/-1 on a sign change.
    pub streak: i32,
    /// Learner mood check-in, 1..=5
    pub mood: i32,
    pub needs_break: bool,
    /// Latch: the mindful break fires at most once per session
    pub break_triggered: bool,
    pub attempt_log: Vec<AttemptRecord>,
}

impl SessionState {
    pub fn new(subject: Subject, start_difficulty: f64) -> Self {
        Self {
            subject,
            ability: start_difficulty.clamp(ABILITY_MIN, ABILITY_MAX),
            items_asked: Vec::new(),
            skills_seen: BTreeSet::new(),
            correct_count: 0,
            attempts: 0,
            streak: 0,
            mood: DEFAULT_MOOD,
            needs_break: false,
            break_triggered: false,
            attempt_log: Vec::new(),
        }
    }
}

// ==================== Placement ====================

/// Terminal result of a diagnostic session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub subject: Subject,
    pub ability: f64,
    pub standard_error: f64,
    pub label: String,
    pub recommended_grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_unit: Option<String>,
}

/// Placement plus the raw attempt log, as archived under
/// `placement:{subject}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementArchive {
    pub placement: Placement,
    pub attempt_log: Vec<AttemptRecord>,
}

/// Durable summary consumed by downstream plan generation, stored under
/// `level:{subject}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    pub subject: Subject,
    pub grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub ability: f64,
    pub confidence: f64,
}

impl LevelRecord {
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            subject: placement.subject,
            grade: placement.recommended_grade.clone(),
            unit: placement.recommended_unit.clone(),
            ability: placement.ability,
            confidence: (1.0 - placement.standard_error).clamp(0.0, 1.0),
        }
    }
}

// ==================== Mastery ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum MasteryLevel {
    #[default]
    Beginning,
    Developing,
    Proficient,
    Advanced,
}

impl MasteryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginning => "beginning",
            Self::Developing => "developing",
            Self::Proficient => "proficient",
            Self::Advanced => "advanced",
        }
    }

    pub fn from_theta(theta: f64) -> Self {
        if theta >= 1.5 {
            Self::Advanced
        } else if theta >= 0.5 {
            Self::Proficient
        } else if theta >= -0.5 {
            Self::Developing
        } else {
            Self::Beginning
        }
    }
}

/// One learner x skill mastery record. Created on first practice, updated
/// on every subsequent practice, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    pub skill_id: String,
    pub theta: f64,
    pub attempts: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<NaiveDate>,
    pub mastery_level: MasteryLevel,
}

impl MasteryRecord {
    /// A skill that has never been practiced: theta 0, no history.
    pub fn new(skill_id: impl Into<String>) -> Self {
        Self {
            skill_id: skill_id.into(),
            theta: 0.0,
            attempts: 0,
            last_practiced_at: None,
            next_review_at: None,
            mastery_level: MasteryLevel::from_theta(0.0),
        }
    }
}

// ==================== Plan ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum PlanItemStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Locked,
}

impl PlanItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
            Self::Locked => "locked",
        }
    }
}

/// One lesson on the learning plan. Status transitions are owned by the
/// caller; `priority` is owned by the scheduler and recomputed on each
/// playlist build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub lesson_id: String,
    pub title: String,
    pub skills: Vec<String>,
    pub minutes: i32,
    pub scheduled_for: NaiveDate,
    pub status: PlanItemStatus,
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDate>,
}

impl PlanItem {
    pub fn is_review(&self) -> bool {
        self.priority >= REVIEW_PRIORITY_OFFSET
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_roundtrip() {
        for subject in Subject::all() {
            assert_eq!(Subject::from_str(subject.as_str()), Some(subject));
        }
        assert_eq!(Subject::from_str("social-studies"), Some(Subject::SocialStudies));
        assert_eq!(Subject::from_str("history"), None);
    }

    #[test]
    fn test_item_kind_tagged_deserialization() {
        let raw = serde_json::json!({
            "id": "m-001",
            "subject": "math",
            "skill": "counting",
            "difficulty": -1.5,
            "type": "count",
            "target": 12,
            "prompt": "How many apples?",
            "correctAnswer": "12"
        });
        let item: Item = serde_json::from_value(raw).unwrap();
        assert_eq!(item.kind, ItemKind::Count { target: 12 });
        assert_eq!(item.kind.as_str(), "count");
    }

    #[test]
    fn test_item_kind_missing_variant_field_rejected() {
        // An mcq record without choices must not deserialize
        let raw = serde_json::json!({
            "id": "m-002",
            "subject": "math",
            "skill": "fractions",
            "difficulty": 0.5,
            "type": "mcq",
            "prompt": "Pick one",
            "correctAnswer": "a"
        });
        assert!(serde_json::from_value::<Item>(raw).is_err());
    }

    #[test]
    fn test_mastery_level_thresholds() {
        assert_eq!(MasteryLevel::from_theta(1.5), MasteryLevel::Advanced);
        assert_eq!(MasteryLevel::from_theta(1.49), MasteryLevel::Proficient);
        assert_eq!(MasteryLevel::from_theta(0.5), MasteryLevel::Proficient);
        assert_eq!(MasteryLevel::from_theta(0.0), MasteryLevel::Developing);
        assert_eq!(MasteryLevel::from_theta(-0.5), MasteryLevel::Developing);
        assert_eq!(MasteryLevel::from_theta(-0.51), MasteryLevel::Beginning);
    }

    #[test]
    fn test_new_session_state() {
        let state = SessionState::new(Subject::Reading, 0.4);
        assert_eq!(state.attempts, 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.mood, DEFAULT_MOOD);
        assert!(!state.needs_break);
        assert!((state.ability - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_start_ability_is_clamped() {
        let state = SessionState::new(Subject::Math, 9.0);
        assert!((state.ability - ABILITY_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn test_level_record_confidence() {
        let placement = Placement {
            subject: Subject::Math,
            ability: 1.0,
            standard_error: 0.25,
            label: "Advancing".to_string(),
            recommended_grade: "7".to_string(),
            recommended_unit: None,
        };
        let level = LevelRecord::from_placement(&placement);
        assert!((level.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_review_priority_convention() {
        let item = PlanItem {
            lesson_id: "l1".to_string(),
            title: "Lesson".to_string(),
            skills: vec![],
            minutes: 10,
            scheduled_for: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            status: PlanItemStatus::Todo,
            priority: 1000,
            completed_at: None,
        };
        assert!(item.is_review());
    }
}
