use agenda_core::db::open_db_in_memory;
use agenda_core::{
    ActionStatus, AgendaItem, AgendaRecord, AgendaService, AgendaServiceError, AgendaStore,
    FollowUpAction, MeetingType, Priority, SqliteAgendaStore,
};
use proptest::prelude::*;

fn titled(title: &str, notes: &str) -> AgendaRecord {
    AgendaRecord {
        meeting_date: "2025-07-16".to_string(),
        meeting_time: "09:30".to_string(),
        meeting_title: title.to_string(),
        notes: notes.to_string(),
        ..AgendaRecord::default()
    }
}

fn titles(records: &[AgendaRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.meeting_title.as_str())
        .collect()
}

#[test]
fn added_records_survive_reload() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    service.add(titled("Kickoff", "scope")).unwrap();
    service.add(titled("Retro", "")).unwrap();
    let before = service.agendas().to_vec();

    let reloaded = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    assert_eq!(reloaded.agendas(), before.as_slice());
}

#[test]
fn empty_filter_returns_full_collection_in_order() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    for title in ["c", "a", "b"] {
        service.add(titled(title, "")).unwrap();
    }

    let all: Vec<usize> = service.filter("").iter().map(|entry| entry.index).collect();
    assert_eq!(all, vec![0, 1, 2]);

    service.set_filter("");
    let view: Vec<&str> = service
        .filtered()
        .iter()
        .map(|entry| entry.record.meeting_title.as_str())
        .collect();
    assert_eq!(view, vec!["c", "a", "b"]);
}

#[test]
fn filter_is_case_insensitive_on_title_or_notes() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    service.add(titled("Budget Review", "")).unwrap();
    service.add(titled("Standup", "discussed the BUDGET")).unwrap();
    service.add(titled("Design sync", "mockups")).unwrap();

    let matched: Vec<usize> = service
        .filter("budget")
        .iter()
        .map(|entry| entry.index)
        .collect();
    assert_eq!(matched, vec![0, 1]);
    assert!(service.filter("nothing matches").is_empty());
}

#[test]
fn filtering_does_not_touch_collection_or_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);
    let mut service = AgendaService::initialize(&store);
    service.add(titled("Alpha", "")).unwrap();
    service.add(titled("Beta", "")).unwrap();
    let stored_before = store.read_raw().unwrap();

    service.set_filter("alpha");
    assert_eq!(service.filtered().len(), 1);
    assert_eq!(service.len(), 2);
    assert_eq!(store.read_raw().unwrap(), stored_before);
}

#[test]
fn remove_at_persists_remaining_records_in_order() {
    let conn = open_db_in_memory().unwrap();
    let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    for title in ["one", "two", "three"] {
        service.add(titled(title, "")).unwrap();
    }

    let removed = service.remove_at(1).unwrap();
    assert_eq!(removed.meeting_title, "two");

    let reloaded = AgendaService::initialize(SqliteAgendaStore::new(&conn));
    assert_eq!(titles(reloaded.agendas()), vec!["one", "three"]);
}

#[test]
fn out_of_bounds_remove_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);
    let mut service = AgendaService::initialize(&store);
    service.add(titled("only", "")).unwrap();
    let stored_before = store.read_raw().unwrap();

    let err = service.remove_at(5).unwrap_err();
    assert!(matches!(
        err,
        AgendaServiceError::IndexOutOfBounds { index: 5, len: 1 }
    ));
    assert_eq!(service.len(), 1);
    assert_eq!(store.read_raw().unwrap(), stored_before);
}

#[test]
fn initialize_normalizes_records_missing_sequences() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);
    store
        .write_raw(
            r#"[{"meetingTitle": "Old", "notes": "kept", "priority": "High",
                 "agendaItems": [{"topic": "Intro", "duration": "5"}]}]"#,
        )
        .unwrap();

    let service = AgendaService::initialize(&store);
    let record = service.get(0).unwrap();
    assert!(record.attendees.is_empty());
    assert!(record.follow_up_actions.is_empty());
    assert_eq!(record.agenda_items, vec![AgendaItem::new("Intro", "5")]);
    assert_eq!(record.meeting_title, "Old");
    assert_eq!(record.notes, "kept");
    assert_eq!(record.priority, Priority::High);
}

#[test]
fn standup_scenario_adds_then_empties_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteAgendaStore::new(&conn);
    let mut service = AgendaService::initialize(&store);

    let record = AgendaRecord {
        meeting_title: "Standup".to_string(),
        attendees: vec!["Ana".to_string()],
        agenda_items: vec![AgendaItem::new("Blockers", "10")],
        ..titled("", "")
    };
    let index = service.add(record).unwrap();
    assert_eq!(index, 0);
    assert_eq!(service.get(0).unwrap().total_duration_minutes(), 10);

    service.remove_at(0).unwrap();
    assert!(service.is_empty());
    assert!(service.filtered().is_empty());
    assert_eq!(store.read_raw().unwrap().as_deref(), Some("[]"));
    assert!(store.load().is_empty());
}

fn arb_record() -> impl Strategy<Value = AgendaRecord> {
    let meeting_type = prop_oneof![
        Just(None),
        proptest::sample::select(MeetingType::ALL.to_vec()).prop_map(Some),
    ];
    let item = ("[a-zA-Z ]{0,12}", "[0-9]{1,3}")
        .prop_map(|(topic, duration)| AgendaItem::new(topic, duration));
    let action = (
        ".{0,16}",
        proptest::sample::select(ActionStatus::ALL.to_vec()),
    )
        .prop_map(|(task, status)| FollowUpAction::new(task, status));

    (
        ("[0-9-]{0,10}", "[0-9:]{0,5}", ".{0,24}"),
        meeting_type,
        proptest::sample::select(Priority::ALL.to_vec()),
        proptest::collection::vec(".{0,12}", 0..4),
        proptest::collection::vec(item, 0..4),
        ".{0,40}",
        proptest::collection::vec(action, 0..4),
    )
        .prop_map(
            |((date, time, title), meeting_type, priority, attendees, items, notes, actions)| {
                AgendaRecord {
                    meeting_date: date,
                    meeting_time: time,
                    meeting_title: title,
                    meeting_type,
                    priority,
                    attendees,
                    agenda_items: items,
                    notes,
                    follow_up_actions: actions,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_add_sequence_round_trips_through_reload(
        records in proptest::collection::vec(arb_record(), 0..6)
    ) {
        let conn = open_db_in_memory().unwrap();
        let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
        for record in &records {
            service.add(record.clone()).unwrap();
        }

        let reloaded = AgendaService::initialize(SqliteAgendaStore::new(&conn));
        prop_assert_eq!(reloaded.agendas(), records.as_slice());
    }

    #[test]
    fn remove_then_reload_drops_exactly_one(
        records in proptest::collection::vec(arb_record(), 1..6),
        pick in any::<prop::sample::Index>()
    ) {
        let conn = open_db_in_memory().unwrap();
        let mut service = AgendaService::initialize(SqliteAgendaStore::new(&conn));
        for record in &records {
            service.add(record.clone()).unwrap();
        }

        let index = pick.index(records.len());
        service.remove_at(index).unwrap();

        let mut expected = records.clone();
        expected.remove(index);
        let reloaded = AgendaService::initialize(SqliteAgendaStore::new(&conn));
        prop_assert_eq!(reloaded.agendas(), expected.as_slice());
    }
}
