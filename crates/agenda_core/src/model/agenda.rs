//! Agenda domain model.
//!
//! # Responsibility
//! - Define the canonical record captured by one form submission.
//! - Keep the serialized field names identical to the persisted JSON shape.
//!
//! # Invariants
//! - `attendees`, `agenda_items` and `follow_up_actions` are always present.
//! - An empty meeting type serializes as the empty string.
//! - Records are immutable once committed; there is no edit path.

use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error returned when a label does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl Display for UnknownLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for UnknownLabel {}

/// Fixed set of meeting categories offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MeetingType {
    Standup,
    #[serde(rename = "Client Call")]
    ClientCall,
    #[serde(rename = "Weekly Sync")]
    WeeklySync,
    #[serde(rename = "Project Kickoff")]
    ProjectKickoff,
}

impl MeetingType {
    pub const ALL: [MeetingType; 4] = [
        MeetingType::Standup,
        MeetingType::ClientCall,
        MeetingType::WeeklySync,
        MeetingType::ProjectKickoff,
    ];

    /// Display label, identical to the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standup => "Standup",
            Self::ClientCall => "Client Call",
            Self::WeeklySync => "Weekly Sync",
            Self::ProjectKickoff => "Project Kickoff",
        }
    }
}

impl FromStr for MeetingType {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel {
                kind: "meeting type",
                value: value.to_string(),
            })
    }
}

/// Meeting priority. New records start at `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel {
                kind: "priority",
                value: value.to_string(),
            })
    }
}

/// Progress of one follow-up action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ActionStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl ActionStatus {
    pub const ALL: [ActionStatus; 3] = [
        ActionStatus::NotStarted,
        ActionStatus::InProgress,
        ActionStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl FromStr for ActionStatus {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownLabel {
                kind: "action status",
                value: value.to_string(),
            })
    }
}

impl Display for MeetingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ActionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discussion topic with its planned duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgendaItem {
    pub topic: String,
    /// Minutes, kept as entered text.
    pub duration: String,
}

impl AgendaItem {
    pub fn new(topic: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            duration: duration.into(),
        }
    }

    /// Planned minutes for this item.
    ///
    /// Reads the leading decimal digits of `duration`; text without a
    /// leading number counts as zero.
    pub fn duration_minutes(&self) -> u32 {
        let digits: String = self
            .duration
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse::<u32>().unwrap_or(0)
    }
}

/// One task agreed during the meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowUpAction {
    pub task: String,
    pub status: ActionStatus,
}

impl FollowUpAction {
    pub fn new(task: impl Into<String>, status: ActionStatus) -> Self {
        Self {
            task: task.into(),
            status,
        }
    }
}

/// Canonical record for one saved meeting agenda.
///
/// Field names serialize in camelCase to match the stored collection shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaRecord {
    pub meeting_date: String,
    pub meeting_time: String,
    pub meeting_title: String,
    /// `None` when no type was selected.
    #[serde(serialize_with = "serialize_meeting_type")]
    pub meeting_type: Option<MeetingType>,
    pub priority: Priority,
    pub attendees: Vec<String>,
    pub agenda_items: Vec<AgendaItem>,
    pub notes: String,
    pub follow_up_actions: Vec<FollowUpAction>,
}

impl AgendaRecord {
    /// Sum of planned minutes over all agenda items.
    pub fn total_duration_minutes(&self) -> u32 {
        self.agenda_items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.duration_minutes()))
    }

    /// Case-insensitive substring match on title or notes.
    ///
    /// An empty needle matches every record.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.meeting_title.to_lowercase().contains(&needle)
            || self.notes.to_lowercase().contains(&needle)
    }
}

fn serialize_meeting_type<S: Serializer>(
    value: &Option<MeetingType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.map_or("", MeetingType::as_str))
}
