use std::fs;
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, Timelike};
use reminder_tui::{
    JsonLinesCodec, PipeCodec, Priority, RecordCodec, Reminder, ReminderDraft, ReminderStore,
    StoreError, ValidationError,
};

fn tomorrow() -> NaiveDateTime {
    let t = Local::now().naive_local() + Duration::days(1);
    t.with_second(0).unwrap().with_nanosecond(0).unwrap()
}

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2031, 7, 9)
        .unwrap()
        .and_hms_opt(18, 45, 0)
        .unwrap()
}

fn titles(store: &ReminderStore) -> Vec<String> {
    store.reminders().map(|(_, r)| r.title.clone()).collect()
}

fn file_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn add_add_add_remove_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    assert!(store.is_empty());

    store
        .add(Reminder::new("Pay rent", "Due monthly", tomorrow(), Priority::High, "Finance"))
        .unwrap();
    store
        .add(Reminder::new("Call Bob", "Re: project", tomorrow(), Priority::Low, "Work"))
        .unwrap();
    assert_eq!(titles(&store), ["Pay rent", "Call Bob"]);

    let milk = store
        .add(Reminder::new("Buy milk", "2 litres", tomorrow(), Priority::Medium, "Errands"))
        .unwrap();
    assert_eq!(titles(&store), ["Pay rent", "Buy milk", "Call Bob"]);

    let removed = store.remove(milk).unwrap();
    assert_eq!(removed.title, "Buy milk");
    assert_eq!(titles(&store), ["Pay rent", "Call Bob"]);

    let lines = file_lines(&path);
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.split('|').count(), 5, "{line}");
    }
    assert!(lines[0].starts_with("Pay rent|Due monthly|"));
    assert!(lines[0].ends_with("|High|Finance"));
    assert!(lines[1].starts_with("Call Bob|Re: project|"));
    assert!(lines[1].ends_with("|Low|Work"));
}

#[test]
fn saved_collection_loads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let originals = vec![
        Reminder::new("Dentist", "Check-up", fixed_time(), Priority::Medium, "Health"),
        Reminder::new("Taxes", "File return", fixed_time(), Priority::High, "Finance"),
        Reminder::new("Plants", "Water them", fixed_time() + Duration::hours(13), Priority::Low, "Home"),
        Reminder::new("Gym", "Leg day", fixed_time(), Priority::Medium, "Health"),
    ];

    let mut store = ReminderStore::open_pipe(&path).unwrap();
    for r in &originals {
        store.add(r.clone()).unwrap();
    }
    let written = fs::read_to_string(&path).unwrap();

    let reopened = ReminderStore::open_pipe(&path).unwrap();
    let loaded: Vec<Reminder> = reopened.reminders().map(|(_, r)| r.clone()).collect();
    let expected: Vec<Reminder> = store.reminders().map(|(_, r)| r.clone()).collect();
    assert_eq!(loaded.len(), originals.len());
    assert_eq!(loaded, expected);

    reopened.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn malformed_lines_are_skipped_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let lines = [
        "First|one|7/9/2031 6:45 PM|Low|A",
        "",
        "lonely",
        "a|b|7/9/2031 6:45 PM|High",
        "Second|two|7/9/2031 6:45 PM|Low|B",
        "a|b|7/9/2031 6:45 PM|High|c|d",
        "Third|three|7/9/2031 6:45 PM|High|C\r",
    ];
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let store = ReminderStore::open_pipe(&path).unwrap();
    assert_eq!(titles(&store), ["Third", "First", "Second"]);
}

#[test]
fn invalid_drafts_leave_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    let id = store
        .add(Reminder::new("Keep", "me", fixed_time(), Priority::Low, "Misc"))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let now = fixed_time() - Duration::days(1);
    let valid = ReminderDraft::from_reminder(store.get(id).unwrap());

    let mut empty = valid.clone();
    empty.category.clear();
    let mut past = valid.clone();
    past.date = "2020-01-01".to_string();

    for (draft, expected) in [
        (empty, ValidationError::MissingField),
        (past, ValidationError::InPast),
    ] {
        let err = draft.validate(now).unwrap_err();
        assert_eq!(err, expected);
    }

    let incomplete = Reminder::new("", "x", fixed_time(), Priority::High, "y");
    assert!(matches!(
        store.add(incomplete.clone()),
        Err(StoreError::Validation(ValidationError::MissingField))
    ));
    assert!(matches!(
        store.update(id, incomplete),
        Err(StoreError::Validation(_))
    ));

    assert_eq!(titles(&store), ["Keep"]);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn update_by_identity_leaves_twin_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    let twin = Reminder::new("Same", "same", fixed_time(), Priority::Medium, "Same");
    let first = store.add(twin.clone()).unwrap();
    let second = store.add(twin.clone()).unwrap();
    assert_ne!(first, second);

    let edited = Reminder::new("Changed", "same", fixed_time(), Priority::Medium, "Same");
    store.update(first, edited.clone()).unwrap();

    assert_eq!(store.get(first), Some(&edited));
    assert_eq!(store.get(second), Some(&twin));
    assert_eq!(titles(&store), ["Changed", "Same"]);
}

#[test]
fn remove_by_identity_takes_only_that_twin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    let twin = Reminder::new("Same", "same", fixed_time(), Priority::High, "Same");
    store.add(twin.clone()).unwrap();
    let second = store.add(twin.clone()).unwrap();
    let third = store.add(twin).unwrap();

    store.remove(second).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.position(third), Some(1));
    assert_eq!(file_lines(&path).len(), 2);
}

#[test]
fn load_replaces_memory_with_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    store
        .add(Reminder::new("Old", "x", fixed_time(), Priority::Low, "y"))
        .unwrap();

    let codec = PipeCodec::default();
    let replacement = Reminder::new("New", "x", fixed_time(), Priority::High, "y");
    fs::write(&path, format!("{}\n", codec.encode(&replacement).unwrap())).unwrap();

    assert_eq!(store.load().unwrap(), 1);
    assert_eq!(titles(&store), ["New"]);
}

#[test]
fn hand_edited_latin1_line_does_not_cost_other_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    for title in ["one", "two"] {
        store
            .add(Reminder::new(title, "d", fixed_time(), Priority::Low, "c"))
            .unwrap();
    }

    let mut bytes = fs::read(&path).unwrap();
    bytes.extend_from_slice(b"Caf\xe9|d|7/9/2031 6:45 PM|Low|c\n");
    fs::write(&path, bytes).unwrap();

    assert_eq!(store.load().unwrap(), 2);
    store
        .add(Reminder::new("three", "d", fixed_time(), Priority::Low, "c"))
        .unwrap();

    let reopened = ReminderStore::open_pipe(&path).unwrap();
    assert_eq!(titles(&reopened), ["one", "two", "three"]);
}

#[test]
fn seconds_never_split_memory_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.txt");
    let mut store = ReminderStore::open_pipe(&path).unwrap();
    let precise = fixed_time() + Duration::seconds(45);
    let id = store
        .add(Reminder {
            time: precise,
            ..Reminder::new("a", "d", fixed_time(), Priority::High, "c")
        })
        .unwrap();

    let reopened = ReminderStore::open_pipe(&path).unwrap();
    assert_eq!(store.get(id), reopened.reminders().next().map(|(_, r)| r));
}

#[test]
fn json_lines_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reminders.jsonl");
    let mut store = ReminderStore::open(&path, Box::new(JsonLinesCodec)).unwrap();
    store
        .add(Reminder::new("Pipes | welcome", "multi\nline", fixed_time(), Priority::Low, "Misc"))
        .unwrap();

    let reopened = ReminderStore::open(&path, Box::new(JsonLinesCodec)).unwrap();
    let (_, loaded) = reopened.reminders().next().unwrap();
    assert_eq!(loaded.title, "Pipes | welcome");
    assert_eq!(loaded.description, "multi\nline");
    assert_eq!(file_lines(&path).len(), 1);
}
