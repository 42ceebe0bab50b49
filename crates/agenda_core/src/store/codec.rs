//! JSON codec for the stored agenda collection.
//!
//! Decoding is lenient: every field falls back to a typed default instead of
//! rejecting the record, and sequence fields remember whether they were
//! present so normalization stays an explicit step.
//!
//! Sequence elements are decoded field by field. Numbers and booleans are
//! kept as text, unknown status labels become the default status, and an
//! element is only skipped when it carries no value at all (`null`, nested
//! arrays, or non-object agenda items and actions).

use crate::model::agenda::{
    ActionStatus, AgendaItem, AgendaRecord, FollowUpAction, MeetingType, Priority,
};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One record as read from storage, before normalization.
///
/// Sequence fields are `None` when the stored value was absent or was not a
/// JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredAgenda {
    #[serde(deserialize_with = "lenient_text")]
    pub meeting_date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub meeting_time: String,
    #[serde(deserialize_with = "lenient_text")]
    pub meeting_title: String,
    #[serde(deserialize_with = "lenient_label")]
    pub meeting_type: Option<MeetingType>,
    #[serde(deserialize_with = "lenient_priority")]
    pub priority: Priority,
    #[serde(deserialize_with = "lenient_sequence")]
    pub attendees: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_sequence")]
    pub agenda_items: Option<Vec<AgendaItem>>,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: String,
    #[serde(deserialize_with = "lenient_sequence")]
    pub follow_up_actions: Option<Vec<FollowUpAction>>,
}

impl StoredAgenda {
    /// Whether any sequence field had to be defaulted.
    pub fn needs_normalization(&self) -> bool {
        self.attendees.is_none() || self.agenda_items.is_none() || self.follow_up_actions.is_none()
    }

    /// Produces a well-typed record; missing sequences become empty.
    pub fn normalize(self) -> AgendaRecord {
        AgendaRecord {
            meeting_date: self.meeting_date,
            meeting_time: self.meeting_time,
            meeting_title: self.meeting_title,
            meeting_type: self.meeting_type,
            priority: self.priority,
            attendees: self.attendees.unwrap_or_default(),
            agenda_items: self.agenda_items.unwrap_or_default(),
            notes: self.notes,
            follow_up_actions: self.follow_up_actions.unwrap_or_default(),
        }
    }
}

impl From<AgendaRecord> for StoredAgenda {
    fn from(record: AgendaRecord) -> Self {
        Self {
            meeting_date: record.meeting_date,
            meeting_time: record.meeting_time,
            meeting_title: record.meeting_title,
            meeting_type: record.meeting_type,
            priority: record.priority,
            attendees: Some(record.attendees),
            agenda_items: Some(record.agenda_items),
            notes: record.notes,
            follow_up_actions: Some(record.follow_up_actions),
        }
    }
}

/// Decodes a stored collection blob.
///
/// Returns an empty list when the blob is not a JSON array. Elements that are
/// not JSON objects are skipped.
pub fn decode_collection(raw: &str) -> Vec<StoredAgenda> {
    let Ok(Value::Array(elements)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };

    elements
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|element| serde_json::from_value(element).ok())
        .collect()
}

/// Encodes the full collection in its stored JSON shape.
pub fn encode_collection(records: &[AgendaRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Element of a stored sequence field.
trait SequenceElement: Sized {
    fn from_stored(value: Value) -> Option<Self>;
}

impl SequenceElement for String {
    fn from_stored(value: Value) -> Option<Self> {
        scalar_text(&value)
    }
}

impl SequenceElement for AgendaItem {
    fn from_stored(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        Some(AgendaItem::new(
            field_text(&fields, "topic"),
            field_text(&fields, "duration"),
        ))
    }
}

impl SequenceElement for FollowUpAction {
    fn from_stored(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };
        let status = fields
            .get("status")
            .and_then(Value::as_str)
            .and_then(|label| label.parse::<ActionStatus>().ok())
            .unwrap_or_default();
        Some(FollowUpAction::new(field_text(&fields, "task"), status))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn field_text(fields: &Map<String, Value>, name: &str) -> String {
    fields.get(name).and_then(scalar_text).unwrap_or_default()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<MeetingType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|label| label.parse().ok()))
}

fn lenient_priority<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|label| label.parse().ok())
        .unwrap_or_default())
}

fn lenient_sequence<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: SequenceElement,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(elements) = value else {
        return Ok(None);
    };
    Ok(Some(
        elements
            .into_iter()
            .filter_map(T::from_stored)
            .collect(),
    ))
}
