//! Keyboard shortcut handling.
//!
//! Key routing is focus-aware: while the input bar has focus, printable keys
//! edit text and only chords or Esc reach the application; in the other
//! panels single-letter shortcuts apply.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The text input bar.
    #[default]
    Input,
    /// The token strip of the attention heat-map.
    Tokens,
    /// The catalog tiles.
    Tiles,
}

impl Focus {
    /// The next panel in Tab order.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Input => Self::Tokens,
            Self::Tokens => Self::Tiles,
            Self::Tiles => Self::Input,
        }
    }
}

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Cancel,
    CycleFocus,
    InsertChar(char),
    Backspace,
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Submit,
    SelectLeft,
    SelectRight,
    ToggleToken,
    LoadExample,
    Refresh,
    ToggleLogs,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Home,
    End,
    None,
}

/// Map a key event to an action for the focused panel.
#[must_use]
pub fn map_key(key: KeyEvent, focus: Focus) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Cancel,
            KeyCode::Char('e') => KeyAction::LoadExample,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('l') => KeyAction::ToggleLogs,
            _ => KeyAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Tab => return KeyAction::CycleFocus,
        KeyCode::PageUp => return KeyAction::PageUp,
        KeyCode::PageDown => return KeyAction::PageDown,
        _ => {}
    }

    match focus {
        Focus::Input => match key.code {
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Delete => KeyAction::DeleteChar,
            KeyCode::Left => KeyAction::CursorLeft,
            KeyCode::Right => KeyAction::CursorRight,
            KeyCode::Home => KeyAction::CursorHome,
            KeyCode::End => KeyAction::CursorEnd,
            KeyCode::Up => KeyAction::ScrollUp,
            KeyCode::Down => KeyAction::ScrollDown,
            KeyCode::Char(c) => KeyAction::InsertChar(c),
            _ => KeyAction::None,
        },
        Focus::Tokens | Focus::Tiles => match key.code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('e') => KeyAction::LoadExample,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('l') => KeyAction::ToggleLogs,
            KeyCode::Left => KeyAction::SelectLeft,
            KeyCode::Right => KeyAction::SelectRight,
            KeyCode::Enter | KeyCode::Char(' ') if focus == Focus::Tokens => {
                KeyAction::ToggleToken
            }
            KeyCode::Up => KeyAction::ScrollUp,
            KeyCode::Down => KeyAction::ScrollDown,
            KeyCode::Home => KeyAction::Home,
            KeyCode::End => KeyAction::End,
            _ => KeyAction::None,
        },
    }
}
