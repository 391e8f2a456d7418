//! Benchmark suite for brightpath-algo
//!
//! Run with: cargo bench

use std::collections::HashMap;
use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use brightpath_algo::diagnostic::update_ability;
use brightpath_algo::scheduler::build_daily_playlist;
use brightpath_algo::types::{
    Item, ItemKind, MasteryRecord, PlanItem, PlanItemStatus, SessionState, Subject,
};

fn bench_update_ability(c: &mut Criterion) {
    let item = Item {
        id: "i0".to_string(),
        subject: Subject::Math,
        skill: "counting".to_string(),
        difficulty: 0.3,
        kind: ItemKind::Count { target: 5 },
        prompt: String::new(),
        correct_answer: "5".to_string(),
    };

    c.bench_function("update_ability x20", |b| {
        b.iter(|| {
            let mut state = SessionState::new(Subject::Math, 0.0);
            for i in 0..20 {
                update_ability(&mut state, i % 3 != 0, black_box(&item));
            }
            state.ability
        })
    });
}

fn bench_build_daily_playlist(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
    let items: Vec<PlanItem> = (0..200)
        .map(|i| PlanItem {
            lesson_id: format!("lesson-{i}"),
            title: format!("Lesson {i}"),
            skills: vec![format!("skill-{}", i % 20)],
            minutes: 10,
            scheduled_for: today - chrono::Duration::days(i % 14),
            status: if i % 3 == 0 {
                PlanItemStatus::Done
            } else {
                PlanItemStatus::Todo
            },
            priority: i as i32,
            completed_at: Some(today - chrono::Duration::days(i % 14)),
        })
        .collect();
    let mastery: HashMap<String, MasteryRecord> = (0..20)
        .map(|i| {
            let mut record = MasteryRecord::new(format!("skill-{i}"));
            record.theta = (i as f64 / 10.0) - 1.0;
            (format!("skill-{i}"), record)
        })
        .collect();

    c.bench_function("build_daily_playlist 200 items", |b| {
        b.iter(|| build_daily_playlist(black_box(&items), black_box(&mastery), today))
    });
}

criterion_group!(benches, bench_update_ability, bench_build_daily_playlist);
criterion_main!(benches);
