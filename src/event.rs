// RustPixel
// copyright zipxing@hotmail.com 2022～2025


//! This module provides a unified input Event, describing keyboard input and
//! window lifecycle changes.
//! Input events produced by render adapters (winit or headless) are converted
//! here to unified Event and then handled by the viewer model.


use bitflags::bitflags;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Event {
    /// A single key press with the modifiers held at that time.
    Key(KeyEvent),
    /// The drawable area changed to the given size in pixels.
    Resize(u32, u32),
    /// The window was closed.
    Quit,
}

bitflags! {
    /// Represents key modifiers (shift, control, alt, super).
    #[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
        const SUPER = 0b0000_1000;
        const NONE = 0b0000_0000;
    }
}

/// Represents a key.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    /// A character.
    /// `KeyCode::Char('c')` represents `c` character, etc.
    Char(char),
    /// Space bar.
    Space,
    /// Escape key.
    Esc,
    /// Any key the viewer does not care about.
    Other,
}

/// Represents a key event.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct KeyEvent {
    /// The key itself.
    pub code: KeyCode,
    /// Additional key modifiers.
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent { code, modifiers }
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }
}

/// Shorthand used by scripted input and tests.
pub fn key(c: char) -> Event {
    Event::Key(KeyEvent::from(KeyCode::Char(c)))
}

/// Shorthand for a key pressed together with modifiers.
pub fn key_with(c: char, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), modifiers))
}
