//! Placement mapping.
//!
//! Converts a terminal ability estimate into a human-facing band, grade,
//! and starting unit. Pure lookup, no I/O. Each subject carries its own
//! grade/unit table over the shared ability bands.

use serde::{Deserialize, Serialize};

use crate::types::{Placement, Subject, ABILITY_MAX, ABILITY_MIN};

/// Measurement error reported with every placement. Held constant rather
/// than derived from accumulated Fisher information; the attempt log
/// retains everything needed to change that without breaking the
/// interface.
pub const STANDARD_ERROR: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementBand {
    Foundation,
    Emerging,
    Developing,
    OnLevel,
    Advancing,
    Secondary,
    Advanced,
}

impl PlacementBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Foundation => "Foundation",
            Self::Emerging => "Emerging",
            Self::Developing => "Developing",
            Self::OnLevel => "On Level",
            Self::Advancing => "Advancing",
            Self::Secondary => "Secondary",
            Self::Advanced => "College/Advanced",
        }
    }

    pub fn for_ability(ability: f64) -> Self {
        if ability <= -2.5 {
            Self::Foundation
        } else if ability <= -1.5 {
            Self::Emerging
        } else if ability <= -0.5 {
            Self::Developing
        } else if ability <= 0.5 {
            Self::OnLevel
        } else if ability <= 1.4 {
            Self::Advancing
        } else if ability <= 2.3 {
            Self::Secondary
        } else {
            Self::Advanced
        }
    }
}

fn grade_unit(band: PlacementBand, subject: Subject) -> (&'static str, &'static str) {
    use PlacementBand::*;
    match subject {
        Subject::Math => match band {
            Foundation => ("K", "counting-and-cardinality"),
            Emerging => ("1", "addition-within-20"),
            Developing => ("3", "multiplication-foundations"),
            OnLevel => ("5", "fractions-and-decimals"),
            Advancing => ("7", "proportional-reasoning"),
            Secondary => ("9", "algebra-1"),
            Advanced => ("12+", "precalculus"),
        },
        Subject::Reading => match band {
            Foundation => ("K", "letter-sounds"),
            Emerging => ("1", "decoding-cvc-words"),
            Developing => ("3", "fluency-and-vocabulary"),
            OnLevel => ("5", "chapter-comprehension"),
            Advancing => ("7", "literary-analysis"),
            Secondary => ("9", "rhetoric-and-argument"),
            Advanced => ("12+", "college-composition"),
        },
        Subject::Science => match band {
            Foundation => ("K", "senses-and-seasons"),
            Emerging => ("1", "living-things"),
            Developing => ("3", "forces-and-motion"),
            OnLevel => ("5", "ecosystems"),
            Advancing => ("7", "cells-and-genetics"),
            Secondary => ("9", "biology-1"),
            Advanced => ("12+", "advanced-science-survey"),
        },
        Subject::SocialStudies => match band {
            Foundation => ("K", "my-community"),
            Emerging => ("1", "maps-and-globes"),
            Developing => ("3", "regions-and-resources"),
            OnLevel => ("5", "early-civilizations"),
            Advancing => ("7", "world-geography"),
            Secondary => ("9", "civics-and-government"),
            Advanced => ("12+", "modern-history"),
        },
    }
}

pub fn place(ability: f64, subject: Subject) -> Placement {
    let ability = ability.clamp(ABILITY_MIN, ABILITY_MAX);
    let band = PlacementBand::for_ability(ability);
    let (grade, unit) = grade_unit(band, subject);

    Placement {
        subject,
        ability,
        standard_error: STANDARD_ERROR,
        label: band.label().to_string(),
        recommended_grade: grade.to_string(),
        recommended_unit: Some(unit.to_string()),
    }
}
