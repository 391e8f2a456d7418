//! Synchronous diagnostic session engine.
//!
//! Strings the pure components together for hosts that do not want to
//! hand-roll the loop: select -> grade -> update -> stop-check, strictly
//! sequential per learner. The engine holds no I/O; persisting the state
//! between answers is the host's job via [`crate::store`].

use serde::{Deserialize, Serialize};

use crate::blueprint::Blueprint;
use crate::diagnostic::{maybe_trigger_break, select_next, should_stop, update_ability};
use crate::placement::place;
use crate::types::{Item, LevelRecord, Placement, PlacementArchive, SessionState, Subject};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SessionError {
    #[error("item {0} is not in this session's bank")]
    UnknownItem(String),
    #[error("session is already complete")]
    AlreadyComplete,
}

/// What the host should do after submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Ask for the next item.
    Continue,
    /// Ask for the next item, but offer a mindful break first.
    BreakSuggested,
    /// The session ended; present the placement.
    Complete(Placement),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub placement: Placement,
    pub level: LevelRecord,
    pub state: SessionState,
}

impl SessionReport {
    pub fn archive(&self) -> PlacementArchive {
        PlacementArchive {
            placement: self.placement.clone(),
            attempt_log: self.state.attempt_log.clone(),
        }
    }
}

pub struct DiagnosticSession {
    blueprint: Blueprint,
    bank: Vec<Item>,
    state: SessionState,
    complete: bool,
}

impl DiagnosticSession {
    pub fn start(subject: Subject, blueprint: Blueprint, bank: Vec<Item>) -> Self {
        let state = SessionState::new(subject, blueprint.start_difficulty);
        Self {
            blueprint,
            bank,
            state,
            complete: false,
        }
    }

    /// Resume a session from persisted state, e.g. after an app restart.
    pub fn resume(blueprint: Blueprint, bank: Vec<Item>, state: SessionState) -> Self {
        let complete = should_stop(&state, &blueprint);
        Self {
            blueprint,
            bank,
            state,
            complete,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The next item to present, or `None` once the session is complete or
    /// the bank is exhausted (in which case `finish` yields the placement).
    pub fn next_item(&self) -> Option<&Item> {
        if self.complete {
            return None;
        }
        select_next(&self.state, &self.bank)
    }

    /// Record the learner's mood check-in (1..=5); a low mood may suggest
    /// a break.
    pub fn set_mood(&mut self, mood: i32) {
        self.state.mood = mood.clamp(1, 5);
        maybe_trigger_break(&mut self.state, &self.blueprint);
    }

    /// Acknowledge that the break prompt was shown or declined.
    pub fn dismiss_break(&mut self) {
        self.state.needs_break = false;
    }

    /// Grade and fold in one answer. The raw answer is normalized at this
    /// boundary; anything unparsable grades as incorrect rather than
    /// erroring.
    pub fn submit(&mut self, item_id: &str, raw_answer: &str) -> Result<SubmitOutcome, SessionError> {
        if self.complete {
            return Err(SessionError::AlreadyComplete);
        }
        let item = self
            .bank
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownItem(item_id.to_string()))?;

        let correct = grade_response(&item, raw_answer);
        update_ability(&mut self.state, correct, &item);
        let break_raised = maybe_trigger_break(&mut self.state, &self.blueprint);

        let exhausted = select_next(&self.state, &self.bank).is_none();
        if should_stop(&self.state, &self.blueprint) || exhausted {
            self.complete = true;
            let placement = place(self.state.ability, self.state.subject);
            tracing::info!(
                subject = self.state.subject.as_str(),
                ability = self.state.ability,
                attempts = self.state.attempts,
                grade = %placement.recommended_grade,
                exhausted,
                "diagnostic session complete"
            );
            return Ok(SubmitOutcome::Complete(placement));
        }

        if break_raised {
            Ok(SubmitOutcome::BreakSuggested)
        } else {
            Ok(SubmitOutcome::Continue)
        }
    }

    /// Terminal report for a session, whether it stopped naturally or was
    /// cut short by the caller. Valid at any point; uses the current
    /// ability estimate.
    pub fn finish(&self) -> SessionReport {
        let placement = place(self.state.ability, self.state.subject);
        let level = LevelRecord::from_placement(&placement);
        SessionReport {
            placement,
            level,
            state: self.state.clone(),
        }
    }
}

/// Normalize and score a raw answer against the item key. Comparison is
/// case- and whitespace-insensitive.
pub fn grade_response(item: &Item, raw_answer: &str) -> bool {
    let given = raw_answer.trim().to_lowercase();
    if given.is_empty() {
        return false;
    }
    given == item.correct_answer.trim().to_lowercase()
}
