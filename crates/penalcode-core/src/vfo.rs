//! Violent felony offense (VFO) designation.

use crate::offense::{CleanedOffense, RawOffense};
use crate::registry::ReferenceRegistry;

pub const VFO_LEGAL_BASIS: &str = "PL § 70.02";
pub const VFO_NOTE: &str = "Violent Felony Offense per NYS Penal Law § 70.02";

/// Produce the cleaned record with its VFO block set from the registry.
///
/// VFO sections get `vfo = true` plus legal basis and notes. Every other
/// record gets `vfo = false` and no basis or notes, whatever the input carried.
pub fn tag_vfo(registry: &ReferenceRegistry, offense: RawOffense) -> CleanedOffense {
    let statute_location_id = offense.statute_location_id.unwrap_or_default();
    let vfo = registry.is_vfo_section(&statute_location_id);

    let (vfo_legal_basis, vfo_notes) = if vfo {
        (Some(VFO_LEGAL_BASIS.to_string()), Some(vec![VFO_NOTE.to_string()]))
    } else {
        (None, None)
    };

    CleanedOffense {
        name: offense.name,
        classification_description: offense.classification_description,
        class: offense.class.unwrap_or_default(),
        offense_level: offense.offense_level,
        statute_location_id,
        vfo,
        vfo_legal_basis,
        vfo_notes,
        extra: offense.extra,
    }
}
