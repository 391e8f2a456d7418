use crate::types::Subject;

pub fn session_key(subject: Subject) -> String {
    format!("session:{}", subject.as_str())
}

pub fn placement_key(subject: Subject) -> String {
    format!("placement:{}", subject.as_str())
}

pub fn level_key(subject: Subject) -> String {
    format!("level:{}", subject.as_str())
}

pub fn mastery_key(subject: Subject) -> String {
    format!("mastery:{}", subject.as_str())
}

pub fn plan_key(subject: Subject) -> String {
    format!("plan:{}", subject.as_str())
}
