//! Adaptive diagnostic loop: item selection, ability estimation, and the
//! stop rule. All three are pure functions over caller-owned state; the
//! [`crate::session`] module strings them together.

pub mod estimator;
pub mod selector;
pub mod stop_rule;

pub use estimator::{expected_probability, update_ability};
pub use selector::select_next;
pub use stop_rule::{maybe_trigger_break, should_stop};
