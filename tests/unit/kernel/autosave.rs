use super::*;
use crate::kernel::document::{Document, LanguageMode};
use crate::kernel::services::ports::NotificationLevel;
use crate::kernel::testing::{FakeWidget, FlakyTable, RecordingNotifier};

struct Fixture {
    autosave: AutosaveCoordinator,
    widget: Arc<FakeWidget>,
    table: Arc<FlakyTable>,
    notifier: Arc<RecordingNotifier>,
}

fn fixture(policy: AutosavePolicy) -> Fixture {
    let doc = Document::new("notes.md", LanguageMode::Markdown, 0);
    let id = doc.id;
    let table = FlakyTable::new(vec![doc]);
    let store = DocumentStore::new(table.clone());
    let widget = FakeWidget::new();
    let notifier = RecordingNotifier::new();
    let autosave =
        AutosaveCoordinator::new(id, store, widget.clone(), notifier.clone(), policy);
    Fixture {
        autosave,
        widget,
        table,
        notifier,
    }
}

fn enabled(secs: u64) -> AutosavePolicy {
    AutosavePolicy {
        enabled: true,
        delay: Duration::from_secs(secs),
    }
}

async fn sleep_secs(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_produces_exactly_one_save_after_quiet_period() {
    let f = fixture(enabled(10));

    f.widget.type_text("a");
    f.autosave.on_change();
    sleep_secs(5).await;
    f.widget.type_text("ab");
    f.autosave.on_change();
    assert!(f.autosave.is_dirty());

    sleep_secs(9).await;
    assert!(f.table.text_updates().is_empty());

    sleep_secs(2).await;
    let saves = f.table.text_updates();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].1, "ab");
    assert!(!f.autosave.is_dirty());
    assert!(!f.autosave.has_pending_save());

    sleep_secs(60).await;
    assert_eq!(f.table.text_updates().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn change_keeps_a_single_pending_timer() {
    let f = fixture(enabled(10));
    for _ in 0..5 {
        f.autosave.on_change();
    }
    assert!(f.autosave.has_pending_save());
    sleep_secs(11).await;
    assert_eq!(f.autosave.save_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn disabled_policy_never_saves_on_its_own() {
    let f = fixture(AutosavePolicy::disabled());
    f.widget.type_text("draft");
    f.autosave.on_change();
    assert!(!f.autosave.has_pending_save());

    sleep_secs(3600).await;
    assert!(f.table.text_updates().is_empty());
    assert!(f.autosave.is_dirty());

    f.autosave.save(SaveTrigger::Explicit).await.unwrap();
    assert!(!f.autosave.is_dirty());
    assert_eq!(f.table.text_updates()[0].1, "draft");
}

#[tokio::test(start_paused = true)]
async fn disabling_cancels_the_pending_timer_but_keeps_dirty() {
    let f = fixture(enabled(10));
    f.autosave.on_change();
    f.autosave.set_policy(AutosavePolicy::disabled());
    assert!(!f.autosave.has_pending_save());
    assert!(f.autosave.is_dirty());

    sleep_secs(30).await;
    assert!(f.table.text_updates().is_empty());

    f.autosave.set_policy(enabled(1));
    assert!(!f.autosave.has_pending_save());
    f.autosave.on_change();
    sleep_secs(2).await;
    assert_eq!(f.table.text_updates().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failed_save_stays_dirty_notifies_and_is_not_retried() {
    let f = fixture(enabled(10));
    f.table.fail_updates(true);
    f.widget.type_text("lost?");
    f.autosave.on_change();

    sleep_secs(11).await;
    assert!(f.autosave.is_dirty());
    assert_eq!(f.notifier.count(NotificationLevel::Error), 1);

    sleep_secs(120).await;
    assert_eq!(f.notifier.count(NotificationLevel::Error), 1);

    f.table.fail_updates(false);
    let err = f.autosave.save(SaveTrigger::Explicit).await;
    assert!(err.is_ok());
    assert!(!f.autosave.is_dirty());
}

#[tokio::test]
async fn explicit_save_failure_returns_error_for_document() {
    let f = fixture(AutosavePolicy::disabled());
    f.table.fail_updates(true);
    f.autosave.on_change();

    let err = f.autosave.save(SaveTrigger::Explicit).await.unwrap_err();
    assert_eq!(err.document, f.autosave.document());
    assert!(f.autosave.is_dirty());
}

#[tokio::test]
async fn successful_save_sends_info_notification() {
    let f = fixture(AutosavePolicy::disabled());
    f.autosave.on_change();
    f.autosave.save(SaveTrigger::Explicit).await.unwrap();

    let notes = f.notifier.all();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Info);
}

#[tokio::test]
async fn save_if_dirty_skips_clean_documents() {
    let f = fixture(AutosavePolicy::disabled());
    assert!(!f.autosave.save_if_dirty(SaveTrigger::Forced).await.unwrap());
    assert!(f.table.text_updates().is_empty());

    f.autosave.on_change();
    assert!(f.autosave.save_if_dirty(SaveTrigger::Forced).await.unwrap());
    assert_eq!(f.table.text_updates().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn explicit_save_cancels_pending_timer() {
    let f = fixture(enabled(10));
    f.autosave.on_change();
    f.autosave.save(SaveTrigger::Explicit).await.unwrap();
    assert!(!f.autosave.has_pending_save());

    sleep_secs(20).await;
    assert_eq!(f.table.text_updates().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn dispose_cancels_timer_and_ignores_late_saves() {
    let f = fixture(enabled(10));
    f.widget.type_text("first doc");
    f.autosave.on_change();
    f.autosave.dispose();
    assert!(!f.autosave.has_pending_save());

    f.widget.type_text("someone else's content");
    sleep_secs(20).await;
    f.autosave.save(SaveTrigger::Explicit).await.unwrap();
    assert!(f.table.text_updates().is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_last_handle_aborts_the_timer() {
    let f = fixture(enabled(10));
    f.autosave.on_change();
    drop(f.autosave);

    sleep_secs(20).await;
    assert!(f.table.text_updates().is_empty());
}

#[test]
fn change_without_runtime_marks_dirty_without_timer() {
    let f = fixture(enabled(10));
    f.autosave.on_change();
    assert!(f.autosave.is_dirty());
    assert!(!f.autosave.has_pending_save());
}

#[test]
fn policy_follows_settings() {
    let mut settings = EditorSettings::default();
    settings.auto_save_delay = 3.0;
    let policy = AutosavePolicy::from_settings(&settings);
    assert!(policy.enabled);
    assert_eq!(policy.delay, Duration::from_secs(3));

    settings.auto_save = false;
    assert!(!AutosavePolicy::from_settings(&settings).enabled);
}

#[tokio::test(start_paused = true)]
async fn edit_during_in_flight_save_keeps_document_dirty() {
    let f = fixture(AutosavePolicy::disabled());
    f.table.delay_updates(Duration::from_secs(5));

    f.widget.type_text("one");
    f.autosave.on_change();
    let autosave = f.autosave.clone();
    let write = tokio::spawn(async move { autosave.save(SaveTrigger::Explicit).await });

    sleep_secs(1).await;
    f.widget.type_text("two");
    f.autosave.on_change();

    write.await.unwrap().unwrap();
    assert!(f.autosave.is_dirty());
    assert_eq!(f.autosave.save_count(), 1);
    let id = f.autosave.document();
    assert_eq!(f.table.text_updates(), vec![(id, "one".to_string())]);

    f.autosave.save(SaveTrigger::Explicit).await.unwrap();
    assert!(!f.autosave.is_dirty());
    assert_eq!(f.table.text_updates()[1], (id, "two".to_string()));
}
