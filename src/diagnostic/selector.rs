//! Diagnostic item selection.

use crate::types::{Item, SessionState};

/// Score bonus for items whose skill has not been probed yet; favors
/// breadth early in the session.
const NOVEL_SKILL_BONUS: f64 = 0.1;

/// Pick the unasked item whose difficulty sits closest to the current
/// ability estimate, with a small bonus for unseen skills. Returns `None`
/// when the bank is exhausted, which the caller must treat as forced
/// session completion.
pub fn select_next<'a>(state: &SessionState, bank: &'a [Item]) -> Option<&'a Item> {
    let mut best: Option<(&Item, f64)> = None;

    for item in bank {
        if state.items_asked.iter().any(|id| id == &item.id) {
            continue;
        }

        let mut score = (item.difficulty - state.ability).abs();
        if !state.skills_seen.contains(&item.skill) {
            score -= NOVEL_SKILL_BONUS;
        }

        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((item, score)),
        }
    }

    if let Some((item, score)) = best {
        tracing::debug!(
            item_id = %item.id,
            skill = %item.skill,
            score,
            ability = state.ability,
            "selected next item"
        );
    }

    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemKind, Subject};
    use proptest::prelude::*;

    fn item(id: &str, skill: &str, difficulty: f64) -> Item {
        Item {
            id: id.to_string(),
            subject: Subject::Math,
            skill: skill.to_string(),
            difficulty,
            kind: ItemKind::Count { target: 3 },
            prompt: String::new(),
            correct_answer: "3".to_string(),
        }
    }

    #[test]
    fn test_picks_closest_difficulty() {
        // All candidates share a skill, so the novelty bonus cancels out
        let mut state = SessionState::new(Subject::Math, 0.0);
        state.skills_seen.insert("s1".to_string());
        let bank = vec![item("a", "s1", 1.5), item("b", "s1", 0.2), item("c", "s1", -1.0)];
        assert_eq!(select_next(&state, &bank).unwrap().id, "b");
    }

    #[test]
    fn test_excludes_asked_items() {
        let mut state = SessionState::new(Subject::Math, 0.0);
        state.items_asked.push("b".to_string());
        let bank = vec![item("a", "s1", 1.5), item("b", "s1", 0.2), item("c", "s1", -1.0)];
        let next = select_next(&state, &bank).unwrap();
        assert_ne!(next.id, "b");
        assert_eq!(next.id, "c");
    }

    #[test]
    fn test_novel_skill_wins_near_tie() {
        let mut state = SessionState::new(Subject::Math, 0.0);
        state.skills_seen.insert("seen".to_string());
        // 0.25 away but novel beats 0.20 away but already probed
        let bank = vec![item("a", "seen", 0.20), item("b", "novel", 0.25)];
        assert_eq!(select_next(&state, &bank).unwrap().id, "b");
    }

    #[test]
    fn test_exhausted_bank_returns_none() {
        let mut state = SessionState::new(Subject::Math, 0.0);
        state.items_asked.push("a".to_string());
        let bank = vec![item("a", "s1", 0.0)];
        assert!(select_next(&state, &bank).is_none());
    }

    #[test]
    fn test_first_wins_on_exact_tie() {
        let state = SessionState::new(Subject::Math, 0.0);
        let bank = vec![item("a", "s1", 0.3), item("b", "s2", -0.3)];
        assert_eq!(select_next(&state, &bank).unwrap().id, "a");
    }

    proptest! {
        #[test]
        fn prop_never_repeats_an_asked_item(
            ability in -3.0f64..3.0,
            difficulties in proptest::collection::vec(-2.0f64..2.0, 1..30),
            asked_mask in proptest::collection::vec(any::<bool>(), 30)
        ) {
            let bank: Vec<Item> = difficulties
                .iter()
                .enumerate()
                .map(|(i, d)| item(&format!("i{i}"), &format!("s{}", i % 5), *d))
                .collect();
            let mut state = SessionState::new(Subject::Math, ability);
            for (i, asked) in asked_mask.iter().take(bank.len()).enumerate() {
                if *asked {
                    state.items_asked.push(format!("i{i}"));
                }
            }
            if let Some(next) = select_next(&state, &bank) {
                prop_assert!(!state.items_asked.contains(&next.id));
            } else {
                prop_assert_eq!(state.items_asked.len(), bank.len());
            }
        }
    }
}
