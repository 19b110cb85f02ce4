//! Classification normalisation: map raw class fields onto a canonical label.
//!
//! Source data mixes fine-grained grades (`"D"`, `"B Misd"`) with coarse labels
//! (`"Felony"`, `"Misdemeanor"`). For a coarse label the grade is recovered
//! from, in order:
//!
//! 1. `offenseLevel`, when it is itself canonical;
//! 2. the first canonical label of the same family (registry order) that
//!    appears as a whole token in `classificationDescription`;
//! 3. a fallback: `"Felony"` (not canonical) or `"A Misd"`.
//!
//! Any other value is returned unchanged.

use crate::offense::RawOffense;
use crate::registry::{LabelFamily, ReferenceRegistry};

pub const COARSE_FELONY: &str = "Felony";
pub const COARSE_MISDEMEANOR: &str = "Misdemeanor";

/// Fallback for a coarse misdemeanor with no recoverable grade.
pub const DEFAULT_MISDEMEANOR: &str = "A Misd";

/// Normalise the record's class. Total: never fails.
pub fn normalize_class(registry: &ReferenceRegistry, offense: &RawOffense) -> String {
    let class = offense.class();
    if registry.is_canonical(class) {
        return class.to_string();
    }

    match class {
        COARSE_FELONY => recover_grade(registry, offense, LabelFamily::Felony)
            .unwrap_or_else(|| COARSE_FELONY.to_string()),
        COARSE_MISDEMEANOR => recover_grade(registry, offense, LabelFamily::Misdemeanor)
            .unwrap_or_else(|| DEFAULT_MISDEMEANOR.to_string()),
        other => other.to_string(),
    }
}

fn recover_grade(
    registry: &ReferenceRegistry,
    offense: &RawOffense,
    family: LabelFamily,
) -> Option<String> {
    let level = offense.offense_level();
    if registry.is_canonical(level) {
        return Some(level.to_string());
    }

    let description = offense.classification_description();
    registry
        .canonical_classes()
        .iter()
        .filter(|label| LabelFamily::of(label) == family)
        .find(|label| contains_token(description, label))
        .cloned()
}

/// Case-sensitive substring match that is not flanked by alphanumerics.
///
/// `"C"` does not match inside `"Class"`; `"A-I"` does not match inside `"A-II"`.
fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, m)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + m.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
