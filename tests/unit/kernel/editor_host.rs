use super::*;
use crate::core::{Key, KeyCode};
use crate::kernel::document::LanguageMode;
use crate::kernel::services::kernel_bus;
use crate::kernel::services::ports::{EditorSettings, PaletteMode};
use crate::kernel::testing::{FakeWidget, FlakyTable, RecordingNotifier, WidgetEvent};

struct Fixture {
    ctx: HostContext,
    widget: Arc<FakeWidget>,
    table: Arc<FlakyTable>,
    rx: crate::kernel::services::KernelBusReceiver,
    doc: Document,
}

fn fixture() -> Fixture {
    let doc = Document::new("notes.md", LanguageMode::Markdown, 0).with_text("# hi");
    let table = FlakyTable::new(vec![doc.clone()]);
    let widget = FakeWidget::new();
    let (bus, rx) = kernel_bus();
    let ctx = HostContext {
        store: DocumentStore::new(table.clone()),
        widget: widget.clone(),
        notifier: RecordingNotifier::new(),
        bus,
    };
    Fixture {
        ctx,
        widget,
        table,
        rx,
        doc,
    }
}

fn config() -> WidgetConfig {
    WidgetConfig::new(
        &EditorSettings::default(),
        PaletteMode::Light,
        LanguageMode::Markdown,
    )
}

fn mount(f: &Fixture) -> EditorHost {
    EditorHost::mount(
        &f.ctx,
        &f.doc,
        &config(),
        AutosavePolicy::disabled(),
        &KeybindingService::with_defaults(),
    )
}

#[test]
fn mount_configures_loads_text_and_focuses() {
    let f = fixture();
    let host = mount(&f);

    let events = f.widget.events();
    assert!(matches!(events[0], WidgetEvent::Configured(_)));
    assert_eq!(events[1], WidgetEvent::SetValue("# hi".to_string()));
    assert_eq!(events[2], WidgetEvent::Focus);
    assert_eq!(host.document(), f.doc.id);
    assert!(!host.is_dirty());
}

#[test]
fn mount_registers_widget_scoped_commands_with_their_keys() {
    let f = fixture();
    let host = mount(&f);

    assert_eq!(
        host.registered_commands(),
        vec![
            Command::EditFile,
            Command::NewFile,
            Command::OpenSettings,
            Command::Save
        ]
    );
    assert_eq!(
        f.widget.keys_for(&Command::Save),
        vec![Key::ctrl(KeyCode::Char('s'))]
    );
    assert_eq!(
        f.widget.keys_for(&Command::EditFile),
        vec![Key::simple(KeyCode::F(2))]
    );
}

#[test]
fn pressing_a_bound_key_posts_the_command_for_this_document() {
    let mut f = fixture();
    let _host = mount(&f);

    assert!(f.widget.press(Key::ctrl(KeyCode::Char('s'))));
    assert!(!f.widget.press(Key::ctrl(KeyCode::Char('q'))));

    let drained = f.rx.drain();
    assert_eq!(drained.commands, vec![(f.doc.id, Command::Save)]);
}

#[test]
fn dropping_the_host_disposes_every_registration() {
    let f = fixture();
    let host = mount(&f);
    assert_eq!(f.widget.active_commands().len(), 4);

    drop(host);
    assert!(f.widget.active_commands().is_empty());
}

#[test]
fn rebinding_replaces_registrations() {
    let f = fixture();
    let mut host = mount(&f);

    let mut keys = KeybindingService::with_defaults();
    keys.unbind(KeybindingContext::Global, &Key::simple(KeyCode::F(2)));
    keys.bind(
        KeybindingContext::Editor,
        Key::ctrl(KeyCode::Char('e')),
        Command::EditFile,
    );
    host.bind_commands(&keys);

    assert_eq!(f.widget.active_commands().len(), 4);
    assert_eq!(
        f.widget.keys_for(&Command::EditFile),
        vec![Key::ctrl(KeyCode::Char('e'))]
    );
}

#[tokio::test]
async fn handle_save_writes_widget_buffer() {
    let f = fixture();
    let host = mount(&f);

    f.widget.type_text("# edited");
    host.on_change();
    assert!(host.is_dirty());

    DocumentEditorHandle::save(&host).await.unwrap();
    assert!(!host.is_dirty());
    assert_eq!(f.table.text_updates(), vec![(f.doc.id, "# edited".to_string())]);
}

#[tokio::test]
async fn handle_can_be_shared_with_another_task() {
    let f = fixture();
    let host: Arc<dyn DocumentEditorHandle> = Arc::new(mount(&f));

    f.widget.type_text("# from task");
    let handle = host.clone();
    tokio::spawn(async move { handle.save().await })
        .await
        .unwrap()
        .unwrap();

    assert!(!host.is_dirty());
    assert_eq!(
        f.table.text_updates(),
        vec![(f.doc.id, "# from task".to_string())]
    );
}

#[test]
fn undo_redo_find_delegate_to_the_widget() {
    let f = fixture();
    let host = mount(&f);
    f.widget.clear_events();

    host.undo();
    host.redo();
    host.find();

    assert_eq!(
        f.widget.events(),
        vec![
            WidgetEvent::Trigger(WidgetCommand::Undo),
            WidgetEvent::Trigger(WidgetCommand::Redo),
            WidgetEvent::Trigger(WidgetCommand::Find),
        ]
    );
}

#[test]
fn reconfigure_updates_widget_and_policy() {
    let f = fixture();
    let host = mount(&f);
    let policy = AutosavePolicy {
        enabled: true,
        delay: std::time::Duration::from_secs(3),
    };

    host.reconfigure(&config(), policy);

    assert_eq!(host.autosave().policy(), policy);
    assert!(f.widget.last_config().is_some());
}
