//! Statute locator validation.

use crate::offense::RawOffense;
use crate::registry::ReferenceRegistry;

/// Whether the record's `statuteLocationId` is in the registry's valid-section set.
///
/// Exact string match: `"120.04-a"` and `"120.04a"` are different locators.
/// A missing locator is never valid.
pub fn is_valid_section(registry: &ReferenceRegistry, offense: &RawOffense) -> bool {
    offense
        .statute_location_id
        .as_deref()
        .is_some_and(|id| registry.is_valid_section(id))
}
