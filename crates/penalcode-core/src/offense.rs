//! Offense record types: raw input, cleaned output, and rejection entries.
//!
//! Field names on the wire are camelCase (`classificationDescription`,
//! `statuteLocationId`, ...). Any field not modelled here is kept in `extra`
//! and written back out untouched.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A loosely structured offense record as supplied by the upstream dataset.
///
/// Every field is optional. Reading never fails on a single record: a field
/// that is missing, `null`, or of the wrong JSON type is treated as absent,
/// and a text field then reads as `""` through the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct RawOffense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offense_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statute_location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vfo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vfo_legal_basis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vfo_notes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The record as it was read, when it came from JSON. Used for the
    /// rejection report.
    #[serde(skip)]
    pub source: Option<Value>,
}

impl From<Value> for RawOffense {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value.clone() else {
            return Self {
                source: Some(value),
                ..Default::default()
            };
        };

        Self {
            name: take_string(&mut map, "name"),
            classification_description: take_string(&mut map, "classificationDescription"),
            class: take_string(&mut map, "class"),
            offense_level: take_string(&mut map, "offenseLevel"),
            statute_location_id: take_string(&mut map, "statuteLocationId"),
            vfo: map.shift_remove("vfo").and_then(|v| v.as_bool()),
            vfo_legal_basis: take_string(&mut map, "vfoLegalBasis"),
            vfo_notes: map.shift_remove("vfoNotes").and_then(string_list),
            extra: map,
            source: Some(value),
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.shift_remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn string_list(value: Value) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        return None;
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

impl RawOffense {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn classification_description(&self) -> &str {
        self.classification_description.as_deref().unwrap_or_default()
    }

    pub fn class(&self) -> &str {
        self.class.as_deref().unwrap_or_default()
    }

    pub fn offense_level(&self) -> &str {
        self.offense_level.as_deref().unwrap_or_default()
    }

    pub fn statute_location_id(&self) -> &str {
        self.statute_location_id.as_deref().unwrap_or_default()
    }
}

/// An accepted offense: canonical class, validated locator, VFO designation.
///
/// `vfo_legal_basis` and `vfo_notes` are present only when `vfo` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedOffense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_description: Option<String>,
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offense_level: Option<String>,
    pub statute_location_id: String,
    pub vfo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vfo_legal_basis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vfo_notes: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CleanedOffense {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Feed a cleaned record back through the pipeline as raw input.
impl From<CleanedOffense> for RawOffense {
    fn from(c: CleanedOffense) -> Self {
        Self {
            name: c.name,
            classification_description: c.classification_description,
            class: Some(c.class),
            offense_level: c.offense_level,
            statute_location_id: Some(c.statute_location_id),
            vfo: Some(c.vfo),
            vfo_legal_basis: c.vfo_legal_basis,
            vfo_notes: c.vfo_notes,
            extra: c.extra,
            source: None,
        }
    }
}

/// Why a record was excluded from the cleaned set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    /// Definitional entry, sentinel class, or unrecognised class.
    NotCriminal,
    /// Statute locator not in the registry's valid-section set.
    InvalidSection,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotCriminal => "NOT_CRIMINAL",
            Self::InvalidSection => "INVALID_SECTION",
        }
    }
}

/// One entry of the rejection report.
///
/// The offense is written as it was read (nulls, wrong-typed fields and key
/// order included) when it came from JSON, and from its fields otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: RejectionReason,
    #[serde(serialize_with = "serialize_as_read")]
    pub offense: RawOffense,
}

fn serialize_as_read<S: Serializer>(
    offense: &RawOffense,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match &offense.source {
        Some(source) => source.serialize(serializer),
        None => offense.serialize(serializer),
    }
}
