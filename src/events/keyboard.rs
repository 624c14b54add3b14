use serde::{Deserialize, Serialize};
use std::fmt;

/// Состояние клавиши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Код клавиши (evdev коды)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCode(pub u16);

impl KeyCode {
    #[allow(dead_code)]
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KEY_{}", self.0)
    }
}

/// Модификаторы клавиш
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }

    #[allow(dead_code)]
    pub fn with_alt(mut self, alt: bool) -> Self {
        self.alt = alt;
        self
    }

    #[allow(dead_code)]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.super_key
    }

    pub fn to_vec(&self) -> Vec<String> {
        let mut result = Vec::new();
        if self.ctrl { result.push("ctrl".to_string()); }
        if self.alt { result.push("alt".to_string()); }
        if self.shift { result.push("shift".to_string()); }
        if self.super_key { result.push("super".to_string()); }
        result
    }

    pub fn from_vec(modifiers: &[String]) -> Self {
        let mut result = Self::new();
        for modifier in modifiers {
            match modifier.as_str() {
                "ctrl" => result.ctrl = true,
                "alt" => result.alt = true,
                "shift" => result.shift = true,
                "super" => result.super_key = true,
                _ => {}
            }
        }
        result
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.to_vec();
        if modifiers.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", modifiers.join("+"))
        }
    }
}

/// Одна логическая клавиша: пара событий нажатие+отпускание
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key_code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyStroke {
    /// Клавиша без модификаторов
    pub fn plain(key_code: KeyCode) -> Self {
        Self {
            key_code,
            modifiers: Modifiers::new(),
        }
    }

    pub fn with_modifiers(key_code: KeyCode, modifiers: Modifiers) -> Self {
        Self { key_code, modifiers }
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key_code)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_creation() {
        let modifiers = Modifiers::new()
            .with_ctrl(true)
            .with_shift(true);

        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.super_key);
        assert!(!modifiers.is_empty());
    }

    #[test]
    fn test_modifiers_to_from_vec() {
        let original = Modifiers::new()
            .with_ctrl(true)
            .with_alt(true);

        let vec = original.to_vec();
        let restored = Modifiers::from_vec(&vec);

        assert_eq!(original, restored);
    }

    #[test]
    fn test_key_stroke_display() {
        let plain = KeyStroke::plain(KeyCode::new(15));
        let combo = KeyStroke::with_modifiers(KeyCode::new(47), Modifiers::new().with_ctrl(true));

        assert_eq!(plain.to_string(), "KEY_15");
        assert_eq!(combo.to_string(), "ctrl+KEY_47");
    }
}
