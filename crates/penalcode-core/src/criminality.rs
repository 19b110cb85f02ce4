//! Criminality check: does a raw record denote a chargeable offense?
//!
//! Rules are evaluated in order and the first match decides:
//!
//! 1. `name` or `classificationDescription` contains a structural marker
//!    (`definition`, `purpose`, `general`, case-insensitive) → not criminal.
//! 2. `class` is a sentinel (`Variable`, `Unknown`, empty, missing) → not criminal.
//! 3. `class` is canonical, a bare grade letter `A`..`E` optionally followed by
//!    ` Misd`, or one of the always-recognised labels → criminal. Anything else,
//!    including the coarse `Felony` and `Misdemeanor`, is unrecognised.

use std::sync::LazyLock;

use regex::Regex;

use crate::offense::RawOffense;
use crate::registry::ReferenceRegistry;

/// Lowercase substrings marking definitional or structural entries.
pub const STRUCTURAL_MARKERS: &[&str] = &["definition", "purpose", "general"];

/// Class values that carry no classification signal.
pub const SENTINEL_CLASSES: &[&str] = &["Variable", "Unknown", ""];

/// Labels accepted regardless of the registry's canonical set.
pub const RECOGNISED_CLASSES: &[&str] = &["Unclassified Misd", "Violation", "Infraction", "A-I", "A-II"];

static GRADE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-E]( Misd)?$").unwrap());

/// Outcome of the criminality check, naming the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criminality {
    Criminal,
    /// Rule 1: title or description marks a definitional entry.
    Structural,
    /// Rule 2: sentinel class value.
    NoClassSignal,
    /// Rule 3: class value not recognised.
    UnrecognisedClass,
}

impl Criminality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Criminal => "criminal",
            Self::Structural => "structural",
            Self::NoClassSignal => "no_class_signal",
            Self::UnrecognisedClass => "unrecognised_class",
        }
    }

    pub fn is_criminal(&self) -> bool {
        matches!(self, Self::Criminal)
    }
}

/// Evaluate the criminality rules against a record.
pub fn assess(registry: &ReferenceRegistry, offense: &RawOffense) -> Criminality {
    if has_structural_marker(offense.name()) || has_structural_marker(offense.classification_description()) {
        return Criminality::Structural;
    }

    let class = offense.class();
    if SENTINEL_CLASSES.contains(&class) {
        return Criminality::NoClassSignal;
    }

    if registry.is_canonical(class) || GRADE_RE.is_match(class) || RECOGNISED_CLASSES.contains(&class) {
        Criminality::Criminal
    } else {
        Criminality::UnrecognisedClass
    }
}

/// Whether the record is a genuine criminal offense entry.
pub fn is_criminal(registry: &ReferenceRegistry, offense: &RawOffense) -> bool {
    assess(registry, offense).is_criminal()
}

fn has_structural_marker(text: &str) -> bool {
    let lower = text.to_lowercase();
    STRUCTURAL_MARKERS.iter().any(|m| lower.contains(m))
}
