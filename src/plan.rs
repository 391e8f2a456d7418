//! Plan seeding.
//!
//! Turns a fresh placement into an initial learning plan: the host picks
//! the lesson sequence for the recommended grade/unit, this module dates
//! and prioritizes it and decorates each entry from the content catalog.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{lesson_meta_or_default, ContentCatalog};
use crate::types::{Placement, PlanItem, PlanItemStatus};

/// A lesson chosen for the plan, with the skills it practices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedLesson {
    pub lesson_id: String,
    pub skills: Vec<String>,
}

/// Seed a plan from a placement: sequential priorities in the given lesson
/// order, `lessons_per_day` lessons scheduled per day starting at `start`.
/// Catalog misses fall back to the documented defaults, never an error.
pub fn seed_plan(
    placement: &Placement,
    lessons: &[PlannedLesson],
    catalog: &impl ContentCatalog,
    start: NaiveDate,
    lessons_per_day: usize,
) -> Vec<PlanItem> {
    let per_day = lessons_per_day.max(1);

    let items: Vec<PlanItem> = lessons
        .iter()
        .enumerate()
        .map(|(index, lesson)| {
            let meta = lesson_meta_or_default(catalog, &lesson.lesson_id);
            PlanItem {
                lesson_id: lesson.lesson_id.clone(),
                title: meta.title,
                skills: lesson.skills.clone(),
                minutes: meta.minutes,
                scheduled_for: start + Duration::days((index / per_day) as i64),
                status: PlanItemStatus::Todo,
                priority: index as i32,
                completed_at: None,
            }
        })
        .collect();

    tracing::info!(
        subject = placement.subject.as_str(),
        grade = %placement.recommended_grade,
        unit = placement.recommended_unit.as_deref().unwrap_or(""),
        lessons = items.len(),
        "plan seeded from placement"
    );
    items
}
