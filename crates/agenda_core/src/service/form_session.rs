//! Form session for composing one agenda record.
//!
//! # Responsibility
//! - Hold uncommitted field values and pending list inputs.
//! - Hand a completed record to [`AgendaService::add`] on commit.
//!
//! # Invariants
//! - Pending-item adds with blank required text are silent no-ops.
//! - A rejected commit leaves every field and pending input untouched.
//! - A successful commit resets the session to its defaults.

use crate::model::agenda::{
    ActionStatus, AgendaItem, AgendaRecord, FollowUpAction, MeetingType, Priority,
};
use crate::service::agenda_service::{AgendaService, AgendaServiceError};
use crate::store::AgendaStore;
use chrono::{NaiveDate, NaiveTime};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Date format produced by the form's date input.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";
/// Time format produced by the form's time input.
pub const FORM_TIME_FORMAT: &str = "%H:%M";

/// Required form field names used in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Date,
    Time,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "meetingTitle",
            Self::Date => "meetingDate",
            Self::Time => "meetingTime",
        }
    }
}

/// Errors returned by [`FormSession::commit`].
#[derive(Debug)]
pub enum FormError {
    MissingField(FormField),
    InvalidDate(String),
    InvalidTime(String),
    Service(AgendaServiceError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{}` is required", field.as_str()),
            Self::InvalidDate(value) => {
                write!(f, "invalid meeting date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid meeting time `{value}`; expected HH:MM"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AgendaServiceError> for FormError {
    fn from(value: AgendaServiceError) -> Self {
        Self::Service(value)
    }
}

/// Pending agenda item inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaItemInput {
    pub topic: String,
    pub duration: String,
}

/// Pending follow-up action inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionInput {
    pub task: String,
    pub status: ActionStatus,
}

/// Transient state behind the agenda form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSession {
    draft: AgendaRecord,
    attendee_input: String,
    agenda_input: AgendaItemInput,
    action_input: ActionInput,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record under construction.
    pub fn draft(&self) -> &AgendaRecord {
        &self.draft
    }

    pub fn set_meeting_date(&mut self, value: impl Into<String>) {
        self.draft.meeting_date = value.into();
    }

    pub fn set_meeting_time(&mut self, value: impl Into<String>) {
        self.draft.meeting_time = value.into();
    }

    pub fn set_meeting_title(&mut self, value: impl Into<String>) {
        self.draft.meeting_title = value.into();
    }

    pub fn set_meeting_type(&mut self, value: Option<MeetingType>) {
        self.draft.meeting_type = value;
    }

    pub fn set_priority(&mut self, value: Priority) {
        self.draft.priority = value;
    }

    pub fn set_notes(&mut self, value: impl Into<String>) {
        self.draft.notes = value.into();
    }

    pub fn attendee_input(&self) -> &str {
        &self.attendee_input
    }

    pub fn set_attendee_input(&mut self, value: impl Into<String>) {
        self.attendee_input = value.into();
    }

    /// Moves the pending attendee into the draft.
    ///
    /// Returns `false` and changes nothing when the input is blank.
    pub fn add_attendee(&mut self) -> bool {
        let name = self.attendee_input.trim();
        if name.is_empty() {
            return false;
        }
        self.draft.attendees.push(name.to_string());
        self.attendee_input.clear();
        true
    }

    pub fn remove_attendee(&mut self, index: usize) -> Option<String> {
        (index < self.draft.attendees.len()).then(|| self.draft.attendees.remove(index))
    }

    pub fn agenda_input(&self) -> &AgendaItemInput {
        &self.agenda_input
    }

    pub fn set_agenda_input(&mut self, topic: impl Into<String>, duration: impl Into<String>) {
        self.agenda_input = AgendaItemInput {
            topic: topic.into(),
            duration: duration.into(),
        };
    }

    /// Moves the pending agenda item into the draft.
    ///
    /// Both topic and duration must be non-blank.
    pub fn add_agenda_item(&mut self) -> bool {
        let topic = self.agenda_input.topic.trim();
        let duration = self.agenda_input.duration.trim();
        if topic.is_empty() || duration.is_empty() {
            return false;
        }
        self.draft.agenda_items.push(AgendaItem::new(topic, duration));
        self.agenda_input = AgendaItemInput::default();
        true
    }

    pub fn remove_agenda_item(&mut self, index: usize) -> Option<AgendaItem> {
        (index < self.draft.agenda_items.len()).then(|| self.draft.agenda_items.remove(index))
    }

    pub fn action_input(&self) -> &ActionInput {
        &self.action_input
    }

    pub fn set_action_input(&mut self, task: impl Into<String>, status: ActionStatus) {
        self.action_input = ActionInput {
            task: task.into(),
            status,
        };
    }

    /// Moves the pending follow-up action into the draft.
    ///
    /// The pending status resets to `Not Started` afterwards.
    pub fn add_follow_up_action(&mut self) -> bool {
        let task = self.action_input.task.trim();
        if task.is_empty() {
            return false;
        }
        self.draft
            .follow_up_actions
            .push(FollowUpAction::new(task, self.action_input.status));
        self.action_input = ActionInput::default();
        true
    }

    pub fn remove_follow_up_action(&mut self, index: usize) -> Option<FollowUpAction> {
        (index < self.draft.follow_up_actions.len())
            .then(|| self.draft.follow_up_actions.remove(index))
    }

    /// Estimated meeting length over the draft's agenda items.
    pub fn total_duration_minutes(&self) -> u32 {
        self.draft.total_duration_minutes()
    }

    /// Checks required fields without consuming the draft.
    pub fn validate(&self) -> Result<(), FormError> {
        let draft = &self.draft;
        if draft.meeting_title.trim().is_empty() {
            return Err(FormError::MissingField(FormField::Title));
        }

        let date = draft.meeting_date.trim();
        if date.is_empty() {
            return Err(FormError::MissingField(FormField::Date));
        }
        NaiveDate::parse_from_str(date, FORM_DATE_FORMAT)
            .map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let time = draft.meeting_time.trim();
        if time.is_empty() {
            return Err(FormError::MissingField(FormField::Time));
        }
        NaiveTime::parse_from_str(time, FORM_TIME_FORMAT)
            .map_err(|_| FormError::InvalidTime(time.to_string()))?;

        Ok(())
    }

    /// Saves the draft through `service` and resets the session.
    ///
    /// Returns the collection index of the saved record.
    pub fn commit<S: AgendaStore>(
        &mut self,
        service: &mut AgendaService<S>,
    ) -> Result<usize, FormError> {
        self.validate()?;
        let index = service.add(self.draft.clone())?;
        debug!(
            "event=form_commit module=service status=ok attendees={} items={} actions={}",
            self.draft.attendees.len(),
            self.draft.agenda_items.len(),
            self.draft.follow_up_actions.len()
        );
        self.reset();
        Ok(index)
    }

    /// Restores every field and pending input to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, FormField, FormSession};
    use crate::model::agenda::{ActionStatus, Priority};

    #[test]
    fn blank_pending_inputs_are_ignored() {
        let mut session = FormSession::new();
        session.set_attendee_input("   ");
        assert!(!session.add_attendee());

        session.set_agenda_input("Budget", " ");
        assert!(!session.add_agenda_item());
        assert_eq!(session.agenda_input().topic, "Budget");

        session.set_action_input("", ActionStatus::Done);
        assert!(!session.add_follow_up_action());

        assert!(session.draft().attendees.is_empty());
        assert!(session.draft().agenda_items.is_empty());
        assert!(session.draft().follow_up_actions.is_empty());
    }

    #[test]
    fn pending_inputs_reset_after_add() {
        let mut session = FormSession::new();
        session.set_attendee_input(" Ana ");
        assert!(session.add_attendee());
        assert_eq!(session.draft().attendees, vec!["Ana".to_string()]);
        assert_eq!(session.attendee_input(), "");

        session.set_action_input("Send notes", ActionStatus::InProgress);
        assert!(session.add_follow_up_action());
        assert_eq!(session.action_input().status, ActionStatus::NotStarted);
        assert_eq!(
            session.draft().follow_up_actions[0].status,
            ActionStatus::InProgress
        );
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut session = FormSession::new();
        session.set_attendee_input("Ana");
        session.add_attendee();
        assert_eq!(session.remove_attendee(3), None);
        assert_eq!(session.remove_agenda_item(0), None);
        assert_eq!(session.remove_attendee(0).as_deref(), Some("Ana"));
    }

    #[test]
    fn total_duration_sums_draft_items() {
        let mut session = FormSession::new();
        session.set_agenda_input("Intro", "5");
        session.add_agenda_item();
        session.set_agenda_input("Demo", "25");
        session.add_agenda_item();
        assert_eq!(session.total_duration_minutes(), 30);
    }

    #[test]
    fn validate_reports_first_missing_or_malformed_field() {
        let mut session = FormSession::new();
        assert!(matches!(
            session.validate(),
            Err(FormError::MissingField(FormField::Title))
        ));

        session.set_meeting_title("Sync");
        assert!(matches!(
            session.validate(),
            Err(FormError::MissingField(FormField::Date))
        ));

        session.set_meeting_date("16/07/2025");
        assert!(matches!(session.validate(), Err(FormError::InvalidDate(_))));

        session.set_meeting_date("2025-07-16");
        session.set_meeting_time("6pm");
        assert!(matches!(session.validate(), Err(FormError::InvalidTime(_))));

        session.set_meeting_time("18:00");
        assert!(session.validate().is_ok());
        assert_eq!(session.draft().priority, Priority::Medium);
    }
}
