//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Only consulted while the table has focus; the search input consumes
/// printable keys itself.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Event kind and state are ignored so that terminals reporting
    /// press/repeat details still match.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Search
        keys.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('l'), KeyModifiers::CONTROL, KeyAction::ClearSearch);
        keys.bind(KeyCode::Esc, none, KeyAction::ClearSearch);

        // Paging
        keys.bind(KeyCode::Char('n'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Right, none, KeyAction::NextPage);
        keys.bind(KeyCode::PageDown, none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('p'), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevPage);
        keys.bind(KeyCode::PageUp, none, KeyAction::PrevPage);
        keys.bind(KeyCode::Char('g'), none, KeyAction::FirstPage);
        keys.bind(KeyCode::Home, none, KeyAction::FirstPage);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastPage);
        keys.bind(KeyCode::End, none, KeyAction::LastPage);
        keys.bind(KeyCode::Char('z'), none, KeyAction::CyclePageSize);

        // Columns
        keys.bind(KeyCode::Char('l'), none, KeyAction::NextColumn);
        keys.bind(KeyCode::Tab, none, KeyAction::NextColumn);
        keys.bind(KeyCode::Char('h'), none, KeyAction::PrevColumn);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevColumn);
        keys.bind(KeyCode::Char('s'), none, KeyAction::ToggleSort);
        keys.bind(KeyCode::Enter, none, KeyAction::ToggleSort);
        keys.bind(KeyCode::Char('S'), KeyModifiers::SHIFT, KeyAction::ClearSort);
        keys.bind(KeyCode::Char('v'), none, KeyAction::ToggleColumn);

        // Application
        keys.bind(KeyCode::Char('r'), none, KeyAction::Reload);
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn slash_starts_search() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(press(KeyCode::Char('/'), KeyModifiers::NONE)),
            Some(KeyAction::StartSearch)
        );
    }

    #[test]
    fn ctrl_l_clears_search_but_l_moves_column() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(press(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(KeyAction::ClearSearch)
        );
        assert_eq!(
            keys.get(press(KeyCode::Char('l'), KeyModifiers::NONE)),
            Some(KeyAction::NextColumn)
        );
    }

    #[test]
    fn shift_g_jumps_to_last_page() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.get(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(KeyAction::LastPage)
        );
    }

    #[test]
    fn repeat_events_still_match() {
        let keys = KeyBindings::default();
        let mut event = press(KeyCode::Char('n'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Repeat;
        event.state = KeyEventState::NUM_LOCK;

        assert_eq!(keys.get(event), Some(KeyAction::NextPage));
    }

    #[test]
    fn unbound_key_returns_none() {
        let keys = KeyBindings::default();
        assert_eq!(keys.get(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }
}
