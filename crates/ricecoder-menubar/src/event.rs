//! Event handling for the menu bar
//!
//! Terminal input is converted from crossterm into a small, framework-owned
//! event model so widgets never depend on crossterm types directly.

use std::time::Duration;

use crossterm::event as crossterm_event;

use crate::error::{MenuError, MenuResult};

/// Event types delivered to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Mouse input event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize { width: u16, height: u16 },
    /// Tick event for periodic updates
    Tick,
}

/// Keyboard event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    /// Create a key event without modifiers
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers {
                shift: false,
                ctrl: false,
                alt: false,
            },
        }
    }

    /// Create a key event with the control modifier held
    pub const fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers {
                shift: false,
                ctrl: true,
                alt: false,
            },
        }
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Character key
    Char(char),
    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Function keys
    F(u8),
    /// Other keys
    Other,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    /// Shift key
    pub shift: bool,
    /// Control key
    pub ctrl: bool,
    /// Alt key
    pub alt: bool,
}

/// Mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate
    pub x: u16,
    /// Y coordinate
    pub y: u16,
    /// What happened
    pub kind: MouseEventKind,
}

impl MouseEvent {
    /// A left-button press at the given cell
    pub const fn left_click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::Press(MouseButton::Left),
        }
    }

    /// Pointer motion with no button held
    pub const fn moved(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::Moved,
        }
    }

    /// Whether any button went down
    pub fn is_press(&self) -> bool {
        matches!(self.kind, MouseEventKind::Press(_))
    }

    /// Whether this is pointer motion without a press
    pub fn is_motion(&self) -> bool {
        matches!(self.kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
    }
}

/// Mouse event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press(MouseButton),
    Release(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl Event {
    /// Poll the terminal for the next event, waiting at most `timeout`
    ///
    /// Returns `Ok(None)` on timeout or when the terminal event has no
    /// counterpart here (focus changes, pastes, key releases).
    pub fn poll(timeout: Duration) -> MenuResult<Option<Event>> {
        let ready = crossterm_event::poll(timeout)
            .map_err(|e| MenuError::terminal(format!("Failed to poll events: {}", e)))?;
        if !ready {
            return Ok(None);
        }
        let event = crossterm_event::read()
            .map_err(|e| MenuError::terminal(format!("Failed to read event: {}", e)))?;
        Ok(Self::from_crossterm(event))
    }

    /// Convert a crossterm event
    pub fn from_crossterm(event: crossterm_event::Event) -> Option<Event> {
        match event {
            crossterm_event::Event::Key(key) => {
                if key.kind == crossterm_event::KeyEventKind::Release {
                    return None;
                }
                Some(Event::Key(convert_key_event(key)))
            }
            crossterm_event::Event::Mouse(mouse) => {
                convert_mouse_event(mouse).map(Event::Mouse)
            }
            crossterm_event::Event::Resize(width, height) => {
                Some(Event::Resize { width, height })
            }
            crossterm_event::Event::FocusGained | crossterm_event::Event::FocusLost => None,
            crossterm_event::Event::Paste(_) => None,
        }
    }

    /// Whether this is the conventional quit chord (Ctrl+C)
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers { ctrl: true, .. },
            })
        )
    }
}

fn convert_key_event(key: crossterm_event::KeyEvent) -> KeyEvent {
    let code = match key.code {
        crossterm_event::KeyCode::Char(c) => KeyCode::Char(c),
        crossterm_event::KeyCode::Enter => KeyCode::Enter,
        crossterm_event::KeyCode::Esc => KeyCode::Esc,
        crossterm_event::KeyCode::Tab => KeyCode::Tab,
        crossterm_event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm_event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm_event::KeyCode::Up => KeyCode::Up,
        crossterm_event::KeyCode::Down => KeyCode::Down,
        crossterm_event::KeyCode::Left => KeyCode::Left,
        crossterm_event::KeyCode::Right => KeyCode::Right,
        crossterm_event::KeyCode::Home => KeyCode::Home,
        crossterm_event::KeyCode::End => KeyCode::End,
        crossterm_event::KeyCode::F(n) => KeyCode::F(n),
        _ => KeyCode::Other,
    };

    let modifiers = KeyModifiers {
        shift: key.modifiers.contains(crossterm_event::KeyModifiers::SHIFT),
        ctrl: key.modifiers.contains(crossterm_event::KeyModifiers::CONTROL),
        alt: key.modifiers.contains(crossterm_event::KeyModifiers::ALT),
    };

    KeyEvent { code, modifiers }
}

fn convert_mouse_button(button: crossterm_event::MouseButton) -> MouseButton {
    match button {
        crossterm_event::MouseButton::Left => MouseButton::Left,
        crossterm_event::MouseButton::Right => MouseButton::Right,
        crossterm_event::MouseButton::Middle => MouseButton::Middle,
    }
}

fn convert_mouse_event(mouse: crossterm_event::MouseEvent) -> Option<MouseEvent> {
    let kind = match mouse.kind {
        crossterm_event::MouseEventKind::Down(btn) => {
            MouseEventKind::Press(convert_mouse_button(btn))
        }
        crossterm_event::MouseEventKind::Up(btn) => {
            MouseEventKind::Release(convert_mouse_button(btn))
        }
        crossterm_event::MouseEventKind::Drag(btn) => {
            MouseEventKind::Drag(convert_mouse_button(btn))
        }
        crossterm_event::MouseEventKind::Moved => MouseEventKind::Moved,
        crossterm_event::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
        crossterm_event::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
        // Horizontal scrolling has no meaning for a vertical menu
        _ => return None,
    };

    Some(MouseEvent {
        x: mouse.column,
        y: mouse.row,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_key_press() {
        let key = crossterm_event::KeyEvent::new(
            crossterm_event::KeyCode::Char('x'),
            crossterm_event::KeyModifiers::CONTROL,
        );
        let event = Event::from_crossterm(crossterm_event::Event::Key(key));
        assert_eq!(event, Some(Event::Key(KeyEvent::ctrl(KeyCode::Char('x')))));
    }

    #[test]
    fn test_key_release_is_dropped() {
        let key = crossterm_event::KeyEvent::new_with_kind(
            crossterm_event::KeyCode::Enter,
            crossterm_event::KeyModifiers::NONE,
            crossterm_event::KeyEventKind::Release,
        );
        assert_eq!(Event::from_crossterm(crossterm_event::Event::Key(key)), None);
    }

    #[test]
    fn test_convert_mouse_down() {
        let mouse = crossterm_event::MouseEvent {
            kind: crossterm_event::MouseEventKind::Down(crossterm_event::MouseButton::Left),
            column: 3,
            row: 7,
            modifiers: crossterm_event::KeyModifiers::NONE,
        };
        let event = Event::from_crossterm(crossterm_event::Event::Mouse(mouse));
        assert_eq!(event, Some(Event::Mouse(MouseEvent::left_click(3, 7))));
    }

    #[test]
    fn test_convert_mouse_moved() {
        let mouse = crossterm_event::MouseEvent {
            kind: crossterm_event::MouseEventKind::Moved,
            column: 1,
            row: 2,
            modifiers: crossterm_event::KeyModifiers::NONE,
        };
        match Event::from_crossterm(crossterm_event::Event::Mouse(mouse)) {
            Some(Event::Mouse(m)) => {
                assert!(m.is_motion());
                assert!(!m.is_press());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_focus_and_paste_ignored() {
        assert_eq!(Event::from_crossterm(crossterm_event::Event::FocusGained), None);
        assert_eq!(
            Event::from_crossterm(crossterm_event::Event::Paste("x".into())),
            None
        );
    }

    #[test]
    fn test_resize_conversion() {
        assert_eq!(
            Event::from_crossterm(crossterm_event::Event::Resize(100, 30)),
            Some(Event::Resize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn test_interrupt_detection() {
        assert!(Event::Key(KeyEvent::ctrl(KeyCode::Char('c'))).is_interrupt());
        assert!(!Event::Key(KeyEvent::new(KeyCode::Char('c'))).is_interrupt());
    }
}
