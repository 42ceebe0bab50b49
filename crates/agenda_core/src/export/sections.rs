//! Per-section export content, with optional placeholder substitution.
//!
//! # Invariants
//! - Substitution applies per section: a filled section is never replaced.
//! - With substitution off, content mirrors the record verbatim.

use crate::model::agenda::{
    ActionStatus, AgendaItem, AgendaRecord, FollowUpAction, MeetingType,
};

/// Title used when a record has none.
pub const PLACEHOLDER_TITLE: &str = "Sprint Review and Planning";
const PLACEHOLDER_DATE: &str = "2025-07-16";
const PLACEHOLDER_TIME: &str = "18:00";
const PLACEHOLDER_MEETING_TYPE: MeetingType = MeetingType::Standup;
const PLACEHOLDER_ATTENDEES: [&str; 3] = ["John Doe", "Jane Smith", "Alex Johnson"];
const PLACEHOLDER_AGENDA_ITEMS: [(&str, &str); 3] = [
    ("Review progress of the previous sprint", "30"),
    ("Discuss current sprint goals", "20"),
    ("Identify blockers and assign tasks", "10"),
];
const PLACEHOLDER_NOTES: &str = "The team reviewed the completed tasks from the last sprint. \
Most objectives were met, except one pending feature. Alex raised a technical issue to be \
resolved. Jane shared updates on the new design. All members aligned on next steps.";
const PLACEHOLDER_ACTIONS: [(&str, ActionStatus); 3] = [
    (
        "Backend team to resolve database sync issue",
        ActionStatus::InProgress,
    ),
    ("Jane to finalize UI mockups by Friday", ActionStatus::NotStarted),
    (
        "Alex to schedule API integration review meeting",
        ActionStatus::Done,
    ),
];

/// Text and rows rendered by each document section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionContent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub meeting_type: String,
    pub priority: String,
    pub attendees: Vec<String>,
    pub agenda_items: Vec<AgendaItem>,
    pub notes: String,
    pub follow_up_actions: Vec<FollowUpAction>,
}

impl SectionContent {
    /// Resolves section content for `record`.
    pub fn resolve(record: &AgendaRecord, placeholders: bool) -> Self {
        let verbatim = Self {
            title: record.meeting_title.clone(),
            date: record.meeting_date.clone(),
            time: record.meeting_time.clone(),
            meeting_type: record
                .meeting_type
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
            priority: record.priority.as_str().to_string(),
            attendees: record.attendees.clone(),
            agenda_items: record.agenda_items.clone(),
            notes: record.notes.clone(),
            follow_up_actions: record.follow_up_actions.clone(),
        };
        if placeholders {
            verbatim.with_placeholders()
        } else {
            verbatim
        }
    }

    fn with_placeholders(mut self) -> Self {
        if self.title.trim().is_empty() {
            self.title = PLACEHOLDER_TITLE.to_string();
        }
        if self.date.trim().is_empty() {
            self.date = PLACEHOLDER_DATE.to_string();
        }
        if self.time.trim().is_empty() {
            self.time = PLACEHOLDER_TIME.to_string();
        }
        if self.meeting_type.is_empty() {
            self.meeting_type = PLACEHOLDER_MEETING_TYPE.as_str().to_string();
        }
        if self.attendees.is_empty() {
            self.attendees = PLACEHOLDER_ATTENDEES.map(str::to_string).to_vec();
        }
        if self.agenda_items.is_empty() {
            self.agenda_items = PLACEHOLDER_AGENDA_ITEMS
                .iter()
                .map(|(topic, duration)| AgendaItem::new(*topic, *duration))
                .collect();
        }
        if self.notes.trim().is_empty() {
            self.notes = PLACEHOLDER_NOTES.to_string();
        }
        if self.follow_up_actions.is_empty() {
            self.follow_up_actions = PLACEHOLDER_ACTIONS
                .iter()
                .map(|(task, status)| FollowUpAction::new(*task, *status))
                .collect();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{SectionContent, PLACEHOLDER_TITLE};
    use crate::model::agenda::{AgendaRecord, Priority};

    #[test]
    fn placeholders_fill_only_empty_sections() {
        let record = AgendaRecord {
            meeting_title: "Retro".to_string(),
            attendees: vec!["Ana".to_string()],
            notes: "  ".to_string(),
            priority: Priority::Low,
            ..AgendaRecord::default()
        };

        let content = SectionContent::resolve(&record, true);
        assert_eq!(content.title, "Retro");
        assert_eq!(content.attendees, vec!["Ana".to_string()]);
        assert_eq!(content.agenda_items.len(), 3);
        assert_eq!(content.follow_up_actions.len(), 3);
        assert!(!content.notes.trim().is_empty());
        assert_eq!(content.priority, "Low");
        assert_eq!(content.meeting_type, "Standup");
    }

    #[test]
    fn disabled_placeholders_keep_record_verbatim() {
        let content = SectionContent::resolve(&AgendaRecord::default(), false);
        assert_eq!(content.title, "");
        assert!(content.attendees.is_empty());
        assert!(content.agenda_items.is_empty());
        assert!(content.follow_up_actions.is_empty());
        assert_eq!(content.meeting_type, "");

        let filled = SectionContent::resolve(&AgendaRecord::default(), true);
        assert_eq!(filled.title, PLACEHOLDER_TITLE);
    }
}
