//! Keybindings for folio TUI.
//!
//! Navigation keys are layered by focus: arrows, Home and End only drive
//! view switches while the navigation bar has focus. Global bindings apply
//! everywhere unless a focus layer overrides them.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::NavKey;

use crate::state::FocusArea;

/// Actions that can be triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Navigation bar
    Navigate(NavKey),
    Select,
    ToggleFocus,

    // Calls to action
    NextCallToAction,
    PrevCallToAction,

    // Address bar history
    HistoryBack,
    HistoryForward,

    // Jump (1-based, like the visible nav numbering)
    JumpToView(usize),
}

/// Keybindings with a global layer and one layer per focus area.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub global: HashMap<KeyEvent, Action>,
    pub focus_specific: HashMap<FocusArea, HashMap<KeyEvent, Action>>,
}

impl KeyBindings {
    /// Resolve a key press; the focus layer takes precedence over global.
    pub fn resolve(&self, key: KeyEvent, focus: FocusArea) -> Option<Action> {
        if let Some(layer) = self.focus_specific.get(&focus)
            && let Some(action) = layer.get(&key)
        {
            return Some(*action);
        }
        self.global.get(&key).copied()
    }

    pub fn add_focus_binding(&mut self, focus: FocusArea, key: KeyEvent, action: Action) {
        self.focus_specific
            .entry(focus)
            .or_default()
            .insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut global = HashMap::new();

        global.insert(key('q'), Action::Quit);
        global.insert(key_code(KeyCode::Tab), Action::ToggleFocus);
        global.insert(key_code(KeyCode::BackTab), Action::ToggleFocus);
        global.insert(
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Action::ToggleFocus,
        );
        global.insert(key_code(KeyCode::Enter), Action::Select);

        // Browser-style back/forward
        global.insert(key('['), Action::HistoryBack);
        global.insert(key(']'), Action::HistoryForward);
        global.insert(
            KeyEvent::new(KeyCode::Left, KeyModifiers::ALT),
            Action::HistoryBack,
        );
        global.insert(
            KeyEvent::new(KeyCode::Right, KeyModifiers::ALT),
            Action::HistoryForward,
        );

        for (digit, index) in ('1'..='9').zip(1..) {
            global.insert(key(digit), Action::JumpToView(index));
        }

        let mut bindings = Self {
            global,
            focus_specific: HashMap::new(),
        };

        let nav_keys = [
            (KeyCode::Right, NavKey::Next),
            (KeyCode::Down, NavKey::Next),
            (KeyCode::Left, NavKey::Previous),
            (KeyCode::Up, NavKey::Previous),
            (KeyCode::Home, NavKey::First),
            (KeyCode::End, NavKey::Last),
        ];
        for (code, nav) in nav_keys {
            bindings.add_focus_binding(FocusArea::Nav, key_code(code), Action::Navigate(nav));
        }

        for code in [KeyCode::Right, KeyCode::Down] {
            bindings.add_focus_binding(FocusArea::Content, key_code(code), Action::NextCallToAction);
        }
        for code in [KeyCode::Left, KeyCode::Up] {
            bindings.add_focus_binding(FocusArea::Content, key_code(code), Action::PrevCallToAction);
        }

        bindings
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
