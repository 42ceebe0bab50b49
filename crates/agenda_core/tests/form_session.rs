use agenda_core::db::open_db_in_memory;
use agenda_core::{
    ActionStatus, AgendaItem, AgendaService, FormError, FormField, FormSession, MeetingType,
    SqliteAgendaStore,
};

fn filled_session() -> FormSession {
    let mut session = FormSession::new();
    session.set_meeting_title("Standup");
    session.set_meeting_date("2025-07-16");
    session.set_meeting_time("09:00");
    session.set_meeting_type(Some(MeetingType::Standup));
    session.set_attendee_input("Ana");
    assert!(session.add_attendee());
    session.set_agenda_input("Blockers", "10");
    assert!(session.add_agenda_item());
    session.set_action_input("Unblock deploy", ActionStatus::InProgress);
    assert!(session.add_follow_up_action());
    session
}

#[test]
fn commit_saves_draft_and_resets_session() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    let mut session = filled_session();
    assert_eq!(session.total_duration_minutes(), 10);

    let index = session.commit(&mut service).unwrap();
    assert_eq!(index, 0);
    assert_eq!(session, FormSession::new());

    let reloaded = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    let saved = reloaded.get(0).unwrap();
    assert_eq!(saved.meeting_title, "Standup");
    assert_eq!(saved.attendees, vec!["Ana".to_string()]);
    assert_eq!(saved.agenda_items, vec![AgendaItem::new("Blockers", "10")]);
    assert_eq!(saved.follow_up_actions[0].status, ActionStatus::InProgress);
}

#[test]
fn rejected_commit_keeps_session_and_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    let mut session = filled_session();
    session.set_meeting_time("");
    let before = session.clone();

    let err = session.commit(&mut service).unwrap_err();
    assert!(matches!(err, FormError::MissingField(FormField::Time)));
    assert_eq!(session, before);
    assert!(service.is_empty());
}

#[test]
fn malformed_date_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    let mut session = filled_session();
    session.set_meeting_date("16/07/2025");

    let err = session.commit(&mut service).unwrap_err();
    assert!(matches!(err, FormError::InvalidDate(_)));
    assert!(service.is_empty());
}

#[test]
fn removed_entries_do_not_reach_the_saved_record() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    let mut session = filled_session();
    session.set_attendee_input("Bo");
    session.add_attendee();

    assert_eq!(session.remove_attendee(0), Some("Ana".to_string()));
    assert_eq!(session.remove_agenda_item(3), None);
    session.commit(&mut service).unwrap();

    assert_eq!(service.get(0).unwrap().attendees, vec!["Bo".to_string()]);
}
