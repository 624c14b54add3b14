use std::fmt;

pub mod clipboard;
pub mod keyboard;
pub mod window;

pub use clipboard::{ClipboardPayload, ClipboardSnapshot};
pub use keyboard::{KeyCode, KeyState, KeyStroke, Modifiers};
pub use window::ForegroundWindow;

/// События для виртуальной клавиатуры
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualKeyEvent {
    pub key_code: KeyCode,
    pub state: KeyState,
    pub timestamp: std::time::Instant,
}

impl VirtualKeyEvent {
    pub fn new(key_code: KeyCode, state: KeyState) -> Self {
        Self {
            key_code,
            state,
            timestamp: std::time::Instant::now(),
        }
    }

    pub fn press(key_code: KeyCode) -> Self {
        Self::new(key_code, KeyState::Pressed)
    }

    pub fn release(key_code: KeyCode) -> Self {
        Self::new(key_code, KeyState::Released)
    }
}

impl fmt::Display for VirtualKeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} ({}ms)",
            self.key_code,
            self.state,
            self.timestamp.elapsed().as_millis()
        )
    }
}
