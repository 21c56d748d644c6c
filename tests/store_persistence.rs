// File: tests/store_persistence.rs
use std::fs;
use taskflow::context::{AppContext, TestContext};
use taskflow::error::{CommandError, StorageError};
use taskflow::model::{Event, TimeRange};
use taskflow::storage::EventStorage;
use taskflow::store::{EventStore, RemoveAllOutcome};

fn storage(ctx: &TestContext) -> EventStorage {
    EventStorage::new(ctx.get_events_path().unwrap())
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn yes() -> impl FnMut(&str, &str) -> bool {
    |_: &str, _: &str| true
}

#[test]
fn test_sort_invariant_after_every_add() {
    let ctx = TestContext::new();
    let mut store = EventStore::open(storage(&ctx));
    let inputs = [
        ("e", "15:00-16:00"),
        ("a", "08:00-09:00"),
        ("c", "12:00-12:30"),
        ("b", "08:00-08:15"),
        ("d", "12:00-13:00"),
        ("f", "00:00-00:30"),
    ];
    for (title, range) in inputs {
        store.add(Some(title), Some(range), &[]).unwrap();
        let starts: Vec<_> = store.list_all().iter().map(|e| e.time_range.start).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }
    let order: Vec<_> = store.list_all().iter().map(|e| e.title.as_str()).collect();
    // Ties (a/b at 08:00, c/d at 12:00) keep insertion order.
    assert_eq!(order, vec!["f", "a", "b", "c", "d", "e"]);
}

#[test]
fn test_round_trip_through_file() {
    let ctx = TestContext::new();
    let mut store = EventStore::open(storage(&ctx));
    store.add(Some("Lunch"), Some("12:00-13:00"), &tags(&["food", "food"])).unwrap();
    store.add(Some("Standup"), Some("09:00-09:15"), &tags(&["work"])).unwrap();
    store.add(Some("Late shift"), Some("22:00-06:00"), &[]).unwrap();

    let reloaded = EventStore::open(storage(&ctx));
    assert_eq!(reloaded.list_all(), store.list_all());
    assert_eq!(reloaded.list_all()[1].tags, tags(&["food", "food"]));
}

#[test]
fn test_save_then_load_is_independent_of_build_order() {
    let ctx = TestContext::new();
    let s = storage(&ctx);
    let a = Event::new("A", TimeRange::parse("07:00-08:00").unwrap(), tags(&["x"]));
    let b = Event::new("B", TimeRange::parse("09:00-10:00").unwrap(), vec![]);

    s.save(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(s.load().unwrap(), vec![a.clone(), b.clone()]);

    s.save(&[b.clone(), a.clone()]).unwrap();
    assert_eq!(s.load().unwrap(), vec![b, a]);
}

#[test]
fn test_remove_all_is_idempotent_and_writes_empty_list() {
    let ctx = TestContext::new();
    let mut store = EventStore::open(storage(&ctx));

    assert_eq!(store.remove_all(&mut yes()).unwrap(), RemoveAllOutcome::Cleared(0));
    let path = ctx.get_events_path().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");

    store.add(Some("A"), Some("07:00-08:00"), &[]).unwrap();
    store.remove_all(&mut yes()).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    store.remove_all(&mut yes()).unwrap();
    let second = fs::read_to_string(&path).unwrap();
    assert_eq!(first, second);
    assert!(store.is_empty());
    assert!(EventStore::open(storage(&ctx)).is_empty());
}

#[test]
fn test_filter_is_exact_intersection() {
    let mut store = EventStore::new();
    store.add(Some("a"), Some("07:00-08:00"), &tags(&["x", "y"])).unwrap();
    store.add(Some("b"), Some("08:00-09:00"), &tags(&["y"])).unwrap();
    store.add(Some("c"), Some("09:00-10:00"), &tags(&["z"])).unwrap();
    store.add(Some("d"), Some("10:00-11:00"), &[]).unwrap();

    let query = tags(&["y", "z"]);
    let expected: Vec<Event> = store
        .list_all()
        .iter()
        .filter(|e| e.tags.iter().any(|t| query.contains(t)))
        .cloned()
        .collect();
    assert_eq!(store.filter_by_tags(&query), expected);
    assert_eq!(store.filter_by_tags(&query).len(), 3);
    assert!(store.filter_by_tags(&[]).is_empty());
}

#[test]
fn test_unparseable_timestamp_empties_whole_store() {
    let ctx = TestContext::new();
    let s = storage(&ctx);
    fs::write(
        s.path(),
        r#"[
            {"title":"Good","datetime":{"start":"1900-01-01T09:00:00","end":"1900-01-01T10:00:00"},"tags":[]},
            {"title":"Bad","datetime":{"start":"9 o'clock","end":"1900-01-01T10:00:00"},"tags":[]}
        ]"#,
    )
    .unwrap();

    assert!(matches!(s.load(), Err(StorageError::Corrupt { .. })));
    let store = EventStore::open(s);
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_file_is_kept_aside_before_overwrite() {
    let ctx = TestContext::new();
    let s = storage(&ctx);
    fs::write(s.path(), "this is not json").unwrap();

    let mut store = EventStore::open(s.clone());
    assert!(store.is_empty());
    store.add(Some("Fresh"), Some("09:00-10:00"), &[]).unwrap();

    let mut aside = s.path().as_os_str().to_os_string();
    aside.push(".corrupt");
    assert_eq!(fs::read_to_string(aside).unwrap(), "this is not json");
    assert_eq!(s.load().unwrap().len(), 1);
}

#[test]
fn test_failed_add_does_not_write() {
    let ctx = TestContext::new();
    let mut store = EventStore::open(storage(&ctx));
    assert!(matches!(
        store.add(Some("No time"), None, &[]),
        Err(CommandError::MissingTimeRange)
    ));
    assert!(!ctx.get_events_path().unwrap().exists());
}

#[test]
fn test_unwritable_target_keeps_change_in_memory() {
    let ctx = TestContext::new();
    let target = ctx.root.join("events_dir");
    fs::create_dir_all(&target).unwrap();

    let mut store = EventStore::open(EventStorage::new(&target));
    assert!(store.is_empty());
    let err = store
        .add(Some("A"), Some("09:00-10:00"), &[])
        .unwrap_err();
    assert!(matches!(err, CommandError::Persistence(StorageError::Io { .. })));
    assert_eq!(store.len(), 1);
    assert!(!target.with_extension("tmp").exists());
}
