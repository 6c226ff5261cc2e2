//! Keybindings: key chord to command, per focus context.

use crate::core::event::{Key, KeyCode, KeyModifiers};
use crate::core::Command;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    /// Captured regardless of where focus is.
    Global,
    /// Active while the editing widget has focus.
    Editor,
}

impl KeybindingContext {
    pub fn parse(value: &str) -> Option<Self> {
        let v = value.trim().to_ascii_lowercase();
        match v.as_str() {
            "global" => Some(Self::Global),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    editor: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        Self {
            global: default_global_keybindings(),
            editor: default_editor_keybindings(),
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<&Command> {
        match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Editor => self.editor.get(key).or_else(|| self.global.get(key)),
        }
    }

    pub fn bindings(&self, context: KeybindingContext) -> &FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &self.global,
            KeybindingContext::Editor => &self.editor,
        }
    }

    /// Every key bound to `command` in `context` (including global fallbacks
    /// for the editor context), sorted for stable registration.
    pub fn keys_for(&self, context: KeybindingContext, command: &Command) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .bindings(context)
            .iter()
            .filter(|(_, c)| *c == command)
            .map(|(k, _)| *k)
            .collect();
        if context == KeybindingContext::Editor {
            keys.extend(
                self.global
                    .iter()
                    .filter(|(k, c)| *c == command && !self.editor.contains_key(*k))
                    .map(|(k, _)| *k),
            );
        }
        keys.sort_by_key(|k| k.to_string());
        keys.dedup();
        keys
    }

    pub fn bind(&mut self, context: KeybindingContext, key: Key, command: Command) {
        self.map_mut(context).insert(key, command);
    }

    pub fn unbind(&mut self, context: KeybindingContext, key: &Key) -> Option<Command> {
        self.map_mut(context).remove(key)
    }

    /// Applies `(key, command, context)` rules such as `("ctrl+s", "save", None)`.
    /// Unparseable keys or contexts are skipped.
    pub fn apply_rules<'a>(
        &mut self,
        rules: impl IntoIterator<Item = (&'a str, &'a str, Option<&'a str>)>,
    ) {
        for (key, command, context) in rules {
            let Some(parsed) = parse_keybinding(key) else {
                tracing::warn!(key, "ignoring unparseable keybinding");
                continue;
            };
            let context = match context {
                Some(ctx) => match KeybindingContext::parse(ctx) {
                    Some(ctx) => ctx,
                    None => {
                        tracing::warn!(context = ctx, "ignoring keybinding with unknown context");
                        continue;
                    }
                },
                None => KeybindingContext::Global,
            };
            self.bind(context, parsed, Command::from_name(command));
        }
    }

    fn map_mut(&mut self, context: KeybindingContext) -> &mut FxHashMap<Key, Command> {
        match context {
            KeybindingContext::Global => &mut self.global,
            KeybindingContext::Editor => &mut self.editor,
        }
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(8);

    bindings.insert(Key::ctrl(KeyCode::Char('s')), Command::Save);
    bindings.insert(Key::ctrl(KeyCode::Char('n')), Command::NewFile);
    bindings.insert(Key::ctrl(KeyCode::Char(',')), Command::OpenSettings);
    bindings.insert(Key::simple(KeyCode::F(2)), Command::EditFile);

    bindings
}

fn default_editor_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(4);

    bindings.insert(Key::ctrl(KeyCode::Char('z')), Command::Undo);
    bindings.insert(Key::ctrl(KeyCode::Char('y')), Command::Redo);
    bindings.insert(Key::ctrl_shift(KeyCode::Char('z')), Command::Redo);
    bindings.insert(Key::ctrl(KeyCode::Char('f')), Command::Find);

    bindings
}

pub fn parse_keybinding(value: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut key_part: Option<&str> = None;
    // "ctrl+," and "ctrl++" keep their punctuation key
    let parts: Vec<&str> = if let Some(stripped) = value.strip_suffix("++") {
        stripped.split('+').chain(std::iter::once("+")).collect()
    } else {
        value.split('+').collect()
    };
    for part in parts.into_iter().map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" | "option" => modifiers |= KeyModifiers::ALT,
            "super" | "meta" | "cmd" | "command" => modifiers |= KeyModifiers::SUPER,
            _ => key_part = Some(part),
        }
    }
    let code = parse_key_code(key_part?)?;
    Some(Key::new(code, modifiers))
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    let v_lc = v.to_ascii_lowercase();
    let code = match v_lc.as_str() {
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ if v_lc.len() > 1 && v_lc.starts_with('f') => {
            let n = v_lc.strip_prefix('f')?.parse::<u8>().ok()?;
            KeyCode::F(n)
        }
        _ => {
            let mut chars = v_lc.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(code)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
