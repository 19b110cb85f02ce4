//! Reference registry: valid statute locators, VFO locators, canonical class labels.
//!
//! The registry is constructed once and passed into the pipeline. Nothing in
//! the pipeline mutates it, so a test suite can hand in a three-entry registry
//! where production uses the full New York Penal Law tables.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical New York offense classes, in description-scan order.
pub const CANONICAL_CLASSES: &[&str] = &[
    "A-I",
    "A-II",
    "B",
    "C",
    "D",
    "E",
    "A Misd",
    "B Misd",
    "Unclassified Misd",
    "Violation",
    "Infraction",
];

/// Penal Law sections recognised as chargeable offenses (partial table).
pub const NYS_VALID_SECTIONS: &[&str] = &[
    "100.00", "100.05", "100.08", "100.10", "100.13",
    "105.00", "105.05", "105.10", "105.13", "105.15", "105.17",
    "110.00",
    "115.00", "115.01", "115.05", "115.08",
    "120.00", "120.01", "120.02", "120.03", "120.04", "120.04-a", "120.05", "120.06",
    "120.07", "120.08", "120.09", "120.10", "120.11", "120.12", "120.13", "120.14",
    "120.15", "120.16", "120.17", "120.18", "120.19", "120.20", "120.23", "120.25",
    "120.26", "120.27", "120.30", "120.35", "120.45", "120.50", "120.55", "120.60",
    "120.70",
    "121.11", "121.12", "121.13",
    "125.10", "125.11", "125.12", "125.13", "125.14", "125.15", "125.20", "125.21",
    "125.22", "125.25", "125.26", "125.27",
];

/// Violent felony offense sections listed in PL § 70.02 (partial table).
pub const NYS_VFO_SECTIONS: &[&str] = &[
    "120.05", "120.06", "120.07", "120.08", "120.09", "120.10", "120.11", "120.12",
    "120.13", "120.70",
    "121.12", "121.13",
    "125.10", "125.11", "125.12", "125.13", "125.14", "125.15", "125.20", "125.21",
    "125.22", "125.25", "125.26", "125.27",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("canonical class list is empty")]
    EmptyCanonicalClasses,

    #[error("blank entry in {0}")]
    BlankEntry(&'static str),

    #[error("canonical class listed twice: {0}")]
    DuplicateClass(String),
}

/// Severity family of a class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFamily {
    /// Felony grades: `A-I`, `A-II`, `B` .. `E`.
    Felony,
    /// Any `… Misd` label.
    Misdemeanor,
    /// `Violation` and `Infraction`.
    Petty,
}

impl LabelFamily {
    pub fn of(label: &str) -> Self {
        if label.ends_with("Misd") {
            Self::Misdemeanor
        } else if matches!(label, "Violation" | "Infraction") {
            Self::Petty
        } else {
            Self::Felony
        }
    }
}

/// Immutable lookup tables shared by every pipeline stage.
///
/// Serialised as `{"validSections": [..], "vfoSections": [..], "canonicalClasses": [..]}`.
/// `canonicalClasses` is ordered: the classification normaliser scans
/// descriptions for labels in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RegistryTables")]
pub struct ReferenceRegistry {
    valid_sections: BTreeSet<String>,
    vfo_sections: BTreeSet<String>,
    canonical_classes: Vec<String>,
}

/// Unvalidated wire form of [`ReferenceRegistry`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryTables {
    valid_sections: Vec<String>,
    #[serde(default)]
    vfo_sections: Vec<String>,
    canonical_classes: Vec<String>,
}

impl TryFrom<RegistryTables> for ReferenceRegistry {
    type Error = RegistryError;

    fn try_from(t: RegistryTables) -> Result<Self, Self::Error> {
        Self::new(t.valid_sections, t.vfo_sections, t.canonical_classes)
    }
}

impl ReferenceRegistry {
    /// Build a registry from explicit tables.
    ///
    /// Rejects an empty class list, blank entries, and duplicate classes.
    /// Section lists may repeat entries; they collapse into sets.
    pub fn new<V, F, C>(
        valid_sections: V,
        vfo_sections: F,
        canonical_classes: C,
    ) -> Result<Self, RegistryError>
    where
        V: IntoIterator,
        V::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let valid_sections = collect_set(valid_sections, "validSections")?;
        let vfo_sections = collect_set(vfo_sections, "vfoSections")?;

        let mut classes: Vec<String> = Vec::new();
        for class in canonical_classes {
            let class = class.into();
            if class.trim().is_empty() {
                return Err(RegistryError::BlankEntry("canonicalClasses"));
            }
            if classes.contains(&class) {
                return Err(RegistryError::DuplicateClass(class));
            }
            classes.push(class);
        }
        if classes.is_empty() {
            return Err(RegistryError::EmptyCanonicalClasses);
        }

        Ok(Self {
            valid_sections,
            vfo_sections,
            canonical_classes: classes,
        })
    }

    /// The New York Penal Law tables shipped with the cleaner.
    pub fn builtin() -> Self {
        Self {
            valid_sections: NYS_VALID_SECTIONS.iter().map(|s| s.to_string()).collect(),
            vfo_sections: NYS_VFO_SECTIONS.iter().map(|s| s.to_string()).collect(),
            canonical_classes: CANONICAL_CLASSES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Exact, verbatim membership in the valid-section set.
    pub fn is_valid_section(&self, section: &str) -> bool {
        self.valid_sections.contains(section)
    }

    pub fn is_vfo_section(&self, section: &str) -> bool {
        self.vfo_sections.contains(section)
    }

    pub fn is_canonical(&self, label: &str) -> bool {
        self.canonical_classes.iter().any(|c| c == label)
    }

    /// Canonical labels in scan order.
    pub fn canonical_classes(&self) -> &[String] {
        &self.canonical_classes
    }

    pub fn valid_sections(&self) -> impl Iterator<Item = &str> {
        self.valid_sections.iter().map(String::as_str)
    }

    pub fn vfo_sections(&self) -> impl Iterator<Item = &str> {
        self.vfo_sections.iter().map(String::as_str)
    }

    /// VFO sections that are missing from the valid-section set.
    ///
    /// Records on these sections are rejected before VFO tagging, so their
    /// VFO entry is unreachable.
    pub fn unreachable_vfo_sections(&self) -> Vec<&str> {
        self.vfo_sections
            .difference(&self.valid_sections)
            .map(String::as_str)
            .collect()
    }
}

fn collect_set<I>(items: I, table: &'static str) -> Result<BTreeSet<String>, RegistryError>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out = BTreeSet::new();
    for item in items {
        let item = item.into();
        if item.trim().is_empty() {
            return Err(RegistryError::BlankEntry(table));
        }
        out.insert(item);
    }
    Ok(out)
}
