// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Keyboard shortcut table.
//!
//! Plain keys:
//!
//! ```text
//! q / Esc   quit
//! c         toggle colors on/off
//! space     pick new colors (when colors are on)
//! t         next text block
//! g         reload glyphs from the font file
//! ```
//!
//! Command modifier (Cmd on macOS, Ctrl elsewhere) held alone:
//!
//! ```text
//! s / e     save the current text block as PNG
//! x         delete every saved PNG
//! =         increase point size
//! -         decrease point size
//! ```

use crate::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Quit,
    ToggleColors,
    Recolor,
    CycleText,
    ReloadGlyphs,
    Save,
    DeleteSaved,
    IncreaseSize,
    DecreaseSize,
}

/// True when exactly one command modifier is held and nothing else.
fn command_only(modifiers: KeyModifiers) -> bool {
    modifiers == KeyModifiers::SUPER || modifiers == KeyModifiers::CONTROL
}

/// Maps a key press to a viewer command.
pub fn dispatch(key: &KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Some(Command::Quit),
        _ => {}
    }

    if command_only(key.modifiers) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('e') => Some(Command::Save),
            KeyCode::Char('x') => Some(Command::DeleteSaved),
            KeyCode::Char('=') => Some(Command::IncreaseSize),
            KeyCode::Char('-') => Some(Command::DecreaseSize),
            _ => None,
        };
    }

    if key.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Char('c') => Some(Command::ToggleColors),
        KeyCode::Space => Some(Command::Recolor),
        KeyCode::Char('t') => Some(Command::CycleText),
        KeyCode::Char('g') => Some(Command::ReloadGlyphs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(c: char, m: KeyModifiers) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), m)
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(dispatch(&k('c', KeyModifiers::NONE)), Some(Command::ToggleColors));
        assert_eq!(dispatch(&k('t', KeyModifiers::NONE)), Some(Command::CycleText));
        assert_eq!(dispatch(&k('g', KeyModifiers::NONE)), Some(Command::ReloadGlyphs));
        assert_eq!(
            dispatch(&KeyEvent::from(KeyCode::Space)),
            Some(Command::Recolor)
        );
        assert_eq!(dispatch(&k('z', KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_quit_ignores_modifiers() {
        assert_eq!(dispatch(&k('q', KeyModifiers::NONE)), Some(Command::Quit));
        assert_eq!(dispatch(&k('q', KeyModifiers::SUPER)), Some(Command::Quit));
        assert_eq!(dispatch(&KeyEvent::from(KeyCode::Esc)), Some(Command::Quit));
    }

    #[test]
    fn test_command_modifier_keys() {
        for m in [KeyModifiers::SUPER, KeyModifiers::CONTROL] {
            assert_eq!(dispatch(&k('s', m)), Some(Command::Save));
            assert_eq!(dispatch(&k('e', m)), Some(Command::Save));
            assert_eq!(dispatch(&k('x', m)), Some(Command::DeleteSaved));
            assert_eq!(dispatch(&k('=', m)), Some(Command::IncreaseSize));
            assert_eq!(dispatch(&k('-', m)), Some(Command::DecreaseSize));
        }
        // without the modifier these keys do nothing
        assert_eq!(dispatch(&k('s', KeyModifiers::NONE)), None);
        assert_eq!(dispatch(&k('=', KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_extra_modifiers_block_commands() {
        let m = KeyModifiers::SUPER | KeyModifiers::SHIFT;
        assert_eq!(dispatch(&k('s', m)), None);
        assert_eq!(dispatch(&k('c', KeyModifiers::CONTROL)), None);
        // shift alone does not block plain keys
        assert_eq!(dispatch(&k('t', KeyModifiers::SHIFT)), Some(Command::CycleText));
    }
}
