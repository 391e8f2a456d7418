//! Daily playlist construction.
//!
//! Merges plan items that are due with spaced reviews synthesized from
//! completed lessons, de-duplicates per lesson, and orders by priority.
//! Reviews carry the +1000 priority offset so they never masquerade as
//! new lessons.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::types::{MasteryRecord, PlanItem, PlanItemStatus, REVIEW_PRIORITY_OFFSET};

/// Canonical spacing checkpoints, in days since completion.
const REVIEW_INTERVALS: [f64; 5] = [1.0, 2.0, 4.0, 7.0, 14.0];

/// How far (in days) from a scaled checkpoint a lesson still counts as due
/// for review.
const REVIEW_TOLERANCE_DAYS: f64 = 1.0;

/// Floor on the interval scale so weak skills still get spacing rather
/// than daily hammering.
const MIN_INTERVAL_SCALE: f64 = 0.5;

/// Mean mastery theta over a lesson's skills; an unpracticed skill
/// contributes the zero default.
fn mastery_scale(skills: &[String], mastery: &HashMap<String, MasteryRecord>) -> f64 {
    if skills.is_empty() {
        return MIN_INTERVAL_SCALE;
    }
    let mean = skills
        .iter()
        .map(|skill| mastery.get(skill).map(|r| r.theta).unwrap_or(0.0))
        .sum::<f64>()
        / skills.len() as f64;
    mean.max(MIN_INTERVAL_SCALE)
}

/// Whether a completed lesson sits close enough to one of its scaled
/// spacing checkpoints to be reviewed today.
fn review_due(days_since_completion: i64, scale: f64) -> bool {
    let days = days_since_completion as f64;
    REVIEW_INTERVALS
        .iter()
        .any(|interval| (days - interval * scale).abs() <= REVIEW_TOLERANCE_DAYS)
}

/// Build today's ordered playlist:
/// 1. every plan item scheduled on or before `today` and not yet done;
/// 2. a synthesized review for each completed lesson whose age matches a
///    mastery-scaled spacing checkpoint;
/// 3. de-duplicated by lesson (first occurrence wins, so a due lesson
///    beats its own review), sorted ascending by priority.
///
/// Callers truncate to a session-sized subset if desired.
pub fn build_daily_playlist(
    plan_items: &[PlanItem],
    mastery: &HashMap<String, MasteryRecord>,
    today: NaiveDate,
) -> Vec<PlanItem> {
    let mut playlist: Vec<PlanItem> = plan_items
        .iter()
        .filter(|item| item.status != PlanItemStatus::Done && item.scheduled_for <= today)
        .cloned()
        .collect();
    let due = playlist.len();

    let mut reviews = 0usize;
    for item in plan_items {
        if item.status != PlanItemStatus::Done {
            continue;
        }
        let completed = item.completed_at.unwrap_or(item.scheduled_for);
        let days = (today - completed).num_days();
        if days <= 0 {
            continue;
        }
        let scale = mastery_scale(&item.skills, mastery);
        if review_due(days, scale) {
            let mut review = item.clone();
            review.scheduled_for = today;
            review.status = PlanItemStatus::Todo;
            review.priority = item.priority + REVIEW_PRIORITY_OFFSET;
            review.completed_at = None;
            playlist.push(review);
            reviews += 1;
        }
    }

    let mut seen = HashSet::new();
    playlist.retain(|item| seen.insert(item.lesson_id.clone()));
    playlist.sort_by_key(|item| item.priority);

    tracing::debug!(due, reviews, total = playlist.len(), "daily playlist built");
    playlist
}

/// In-session pacing: alternate new lessons and reviews instead of playing
/// the strict priority order, preserving relative order within each group.
pub fn optimize_session_order(playlist: &[PlanItem]) -> Vec<PlanItem> {
    let (new_items, reviews): (Vec<PlanItem>, Vec<PlanItem>) = playlist
        .iter()
        .cloned()
        .partition(|item| !item.is_review());

    let mut ordered = Vec::with_capacity(playlist.len());
    let mut new_iter = new_items.into_iter();
    let mut review_iter = reviews.into_iter();
    loop {
        match (new_iter.next(), review_iter.next()) {
            (Some(n), Some(r)) => {
                ordered.push(n);
                ordered.push(r);
            }
            (Some(n), None) => {
                ordered.push(n);
                ordered.extend(new_iter.by_ref());
            }
            (None, Some(r)) => {
                ordered.push(r);
                ordered.extend(review_iter.by_ref());
            }
            (None, None) => break,
        }
    }
    ordered
}
