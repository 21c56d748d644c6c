// File: tests/dispatch_flow.rs
use std::fs;
use taskflow::config::Config;
use taskflow::context::{AppContext, TestContext};
use taskflow::controller::{Dispatcher, Signal, View};

fn answer(value: bool) -> impl FnMut(&str, &str) -> bool {
    move |_: &str, _: &str| value
}

fn titles(view: &View) -> Vec<String> {
    match view {
        View::Events(events) => events.iter().map(|e| e.title.clone()).collect(),
        View::Unchanged => panic!("expected an event list"),
    }
}

#[test]
fn test_add_view_and_reload() {
    let ctx = TestContext::new();
    let config = Config::default();
    let mut d = Dispatcher::from_config(&ctx, &config).unwrap();

    let r = d.execute("/addevent 'Team meeting' 14:00-15:00 #work", &mut answer(false));
    assert_eq!(r.status, "Event added");
    let r = d.execute("/addevent 'Breakfast' 07:30-08:00", &mut answer(false));
    assert_eq!(titles(&r.view), vec!["Breakfast", "Team meeting"]);

    let saved = fs::read_to_string(ctx.get_events_path().unwrap()).unwrap();
    assert!(saved.contains("\"datetime\""));
    assert!(saved.contains("1900-01-01T14:00:00"));

    let mut again = Dispatcher::from_config(&ctx, &config).unwrap();
    let r = again.execute("/view", &mut answer(false));
    assert_eq!(r.status, "All events");
    assert_eq!(titles(&r.view), vec!["Breakfast", "Team meeting"]);
}

#[test]
fn test_tag_filter_then_back_to_all() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    d.execute("/addevent 'Gym' 06:00-07:00 #health", &mut answer(false));
    d.execute("/addevent 'Standup' 09:00-09:15 #work", &mut answer(false));
    d.execute("/addevent 'Review' 16:00-17:00 #work #code", &mut answer(false));

    let r = d.execute("/tagged #work", &mut answer(false));
    assert_eq!(
        r.status,
        "Events with tag(s): work. Enter /view to display all events."
    );
    assert_eq!(titles(&r.view), vec!["Standup", "Review"]);

    let r = d.execute("/tagged #nothing", &mut answer(false));
    assert!(titles(&r.view).is_empty());

    let r = d.execute("/view", &mut answer(false));
    assert_eq!(titles(&r.view).len(), 3);
}

#[test]
fn test_remove_asks_first_and_respects_no() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    d.execute("/addevent 'Lunch' 12:00-13:00", &mut answer(false));

    let mut asked = Vec::new();
    let r = d.execute("/removeevent 'LUNCH'", &mut |_: &str, prompt: &str| {
        asked.push(prompt.to_string());
        false
    });
    assert_eq!(asked, vec!["Are you sure you want to remove 'Lunch'?".to_string()]);
    assert_eq!(r.status, "Kept 'Lunch'");
    assert_eq!(d.store().len(), 1);

    let r = d.execute("/removeevent 'lunch'", &mut answer(true));
    assert_eq!(r.status, "Event removed");
    assert!(d.store().is_empty());
    assert!(Dispatcher::from_config(&ctx, &Config::default())
        .unwrap()
        .store()
        .is_empty());
}

#[test]
fn test_errors_leave_store_untouched() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();

    let r = d.execute("/removeevent 'Ghost'", &mut answer(true));
    assert!(r.status.contains("no events"), "status was {:?}", r.status);

    d.execute("/addevent 'Lunch' 12:00-13:00", &mut answer(false));
    for line in [
        "/addevent 12:00-13:00",
        "/addevent 'No time'",
        "/addevent 'Bad' 25:00-26:00",
        "/removeevent 'Ghost'",
        "/frobnicate",
        "hello",
    ] {
        let r = d.execute(line, &mut answer(true));
        assert_eq!(r.view, View::Unchanged, "line {:?}", line);
        assert_eq!(d.store().len(), 1, "line {:?}", line);
    }
}

#[test]
fn test_edit_updates_and_resorts() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    d.execute("/addevent 'A' 08:00-09:00", &mut answer(false));
    d.execute("/addevent 'B' 10:00-11:00", &mut answer(false));

    let r = d.execute("/editevent 'a' 12:00-13:00 #moved", &mut answer(false));
    assert_eq!(r.status, "Event updated");
    assert_eq!(titles(&r.view), vec!["B", "A"]);
    assert_eq!(d.store().list_all()[1].tags, vec!["moved".to_string()]);
}

#[test]
fn test_time_only_edit_keeps_tags_when_title_has_hash() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    d.execute("/addevent 'Bug #7' 13:00-14:00 #work #urgent", &mut answer(false));
    let before = d.store().list_all()[0].tags.clone();

    let r = d.execute("/editevent 'Bug #7' 15:00-16:00", &mut answer(false));
    assert_eq!(r.status, "Event updated");
    let event = &d.store().list_all()[0];
    assert_eq!(event.time_range.to_string(), "15:00-16:00");
    assert_eq!(event.tags, before);

    d.execute("/editevent 'Bug #7' #done", &mut answer(false));
    assert_eq!(d.store().list_all()[0].tags, vec!["done".to_string()]);
}

#[test]
fn test_strict_ranges_from_config() {
    let ctx = TestContext::new();
    let config = Config {
        reject_inverted_ranges: true,
        ..Config::default()
    };
    let mut d = Dispatcher::from_config(&ctx, &config).unwrap();
    let r = d.execute("/addevent 'Night' 22:00-06:00", &mut answer(false));
    assert_eq!(r.view, View::Unchanged);
    assert!(d.store().is_empty());

    let mut lenient = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    let r = lenient.execute("/addevent 'Night' 22:00-06:00", &mut answer(false));
    assert_eq!(r.status, "Event added");
}

#[test]
fn test_remove_all_cancel_and_confirm() {
    let ctx = TestContext::new();
    let mut d = Dispatcher::from_config(&ctx, &Config::default()).unwrap();
    d.execute("/addevent 'A' 08:00-09:00", &mut answer(false));
    d.execute("/addevent 'B' 10:00-11:00", &mut answer(false));

    let r = d.execute("/removeall", &mut answer(false));
    assert_eq!(r.status, "Nothing was removed");
    assert_eq!(d.store().len(), 2);

    let r = d.execute("/removeall", &mut answer(true));
    assert_eq!(r.status, "All events removed");
    let saved = fs::read_to_string(ctx.get_events_path().unwrap()).unwrap();
    assert_eq!(saved.trim(), "[]");
}

#[test]
fn test_help_and_exit_are_signals() {
    let mut d = Dispatcher::from_config(&TestContext::new(), &Config::default()).unwrap();
    let r = d.execute("/help", &mut answer(false));
    assert_eq!(r.signal, Signal::ShowHelp);
    let r = d.execute("/exit", &mut answer(false));
    assert_eq!(r.signal, Signal::ExitRequested);
    let r = d.execute("/search 'x'", &mut answer(false));
    assert_eq!(r.signal, Signal::None);
    assert_eq!(r.view, View::Unchanged);
}

#[test]
fn test_unsaved_change_is_reported() {
    let ctx = TestContext::new();
    let target = ctx.root.join("events_dir");
    fs::create_dir_all(&target).unwrap();
    let config = Config {
        events_file: Some(target),
        ..Config::default()
    };
    let mut d = Dispatcher::from_config(&ctx, &config).unwrap();

    let r = d.execute("/addevent 'Lunch' 12:00-13:00", &mut answer(false));
    assert!(
        r.status.starts_with("Change applied but not saved"),
        "status was {:?}",
        r.status
    );
    assert_eq!(titles(&r.view), vec!["Lunch"]);
}
