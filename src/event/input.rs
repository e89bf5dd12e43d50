// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Unified input events. The window adapter converts winit events to these
//! before the model sees them.

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Event {
    Key(KeyEvent),
    /// Raw pointer motion, independent of cursor position
    MouseMotion { dx: f32, dy: f32 },
    /// New framebuffer size in physical pixels
    Resized { width: u32, height: u32 },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyEventKind {
    Press,
    Repeat,
    Release,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    pub const fn new(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            kind: KeyEventKind::Press,
        }
    }

    pub const fn new_with_kind(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent { code, kind }
    }

    /// Press or auto repeat
    pub fn is_down(&self) -> bool {
        self.kind != KeyEventKind::Release
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum KeyCode {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Tab,
    Esc,
    /// Lower case letters, digits and space
    Char(char),
}
