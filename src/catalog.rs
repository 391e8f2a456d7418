//! Content catalog lookup.
//!
//! Read-only lesson metadata used to decorate plan items for display.
//! A missing lesson yields documented defaults, never an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback duration when the catalog has no entry for a lesson.
pub const DEFAULT_LESSON_MINUTES: i32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonMeta {
    pub title: String,
    pub minutes: i32,
    pub standards: Vec<String>,
    pub difficulty: f64,
}

pub trait ContentCatalog {
    fn find_lesson_meta(&self, lesson_id: &str) -> Option<LessonMeta>;
}

/// Catalog lookup with defaults: the lesson id doubles as the title,
/// 10 minutes, no standards, neutral difficulty.
pub fn lesson_meta_or_default(catalog: &impl ContentCatalog, lesson_id: &str) -> LessonMeta {
    catalog
        .find_lesson_meta(lesson_id)
        .unwrap_or_else(|| LessonMeta {
            title: lesson_id.to_string(),
            minutes: DEFAULT_LESSON_MINUTES,
            standards: Vec::new(),
            difficulty: 0.0,
        })
}

/// In-memory catalog, e.g. deserialized from bundled content.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    lessons: HashMap<String, LessonMeta>,
}

impl StaticCatalog {
    pub fn new(lessons: HashMap<String, LessonMeta>) -> Self {
        Self { lessons }
    }

    pub fn insert(&mut self, lesson_id: impl Into<String>, meta: LessonMeta) {
        self.lessons.insert(lesson_id.into(), meta);
    }
}

impl ContentCatalog for StaticCatalog {
    fn find_lesson_meta(&self, lesson_id: &str) -> Option<LessonMeta> {
        self.lessons.get(lesson_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lesson_returned() {
        let mut catalog = StaticCatalog::default();
        catalog.insert(
            "math-5-fractions-01",
            LessonMeta {
                title: "Comparing Fractions".to_string(),
                minutes: 15,
                standards: vec!["5.NF.2".to_string()],
                difficulty: 0.4,
            },
        );
        let meta = lesson_meta_or_default(&catalog, "math-5-fractions-01");
        assert_eq!(meta.title, "Comparing Fractions");
        assert_eq!(meta.minutes, 15);
    }

    #[test]
    fn test_missing_lesson_falls_back() {
        let catalog = StaticCatalog::default();
        let meta = lesson_meta_or_default(&catalog, "ghost-lesson");
        assert_eq!(meta.title, "ghost-lesson");
        assert_eq!(meta.minutes, DEFAULT_LESSON_MINUTES);
        assert!(meta.standards.is_empty());
    }
}
