use once_cell::sync::Lazy;
use smallvec::SmallVec;
use std::collections::HashMap;

use crate::error::{ClipshipError, Result};
use crate::events::{KeyCode, Modifiers};

/// Маппинг между именами клавиш и кодами evdev
pub struct KeycodeMap;

// Статическая таблица основных клавиш: имя → код evdev
const KEY_TABLE: &[(&str, u16)] = &[
    // Буквенные клавиши
    ("a", 30), ("b", 48), ("c", 46), ("d", 32), ("e", 18), ("f", 33),
    ("g", 34), ("h", 35), ("i", 23), ("j", 36), ("k", 37), ("l", 38),
    ("m", 50), ("n", 49), ("o", 24), ("p", 25), ("q", 16), ("r", 19),
    ("s", 31), ("t", 20), ("u", 22), ("v", 47), ("w", 17), ("x", 45),
    ("y", 21), ("z", 44),
    // Цифровые клавиши (верхний ряд)
    ("1", 2), ("2", 3), ("3", 4), ("4", 5), ("5", 6),
    ("6", 7), ("7", 8), ("8", 9), ("9", 10), ("0", 11),
    // Специальные клавиши
    ("space", 57),
    ("enter", 28),
    ("escape", 1),
    ("backspace", 14),
    ("tab", 15),
    // Модификаторы
    ("ctrl", 29),
    ("alt", 56),
    ("shift", 42),
    ("super", 125),
];

static KEY_NAME_TO_CODE: Lazy<HashMap<&'static str, u16>> =
    Lazy::new(|| KEY_TABLE.iter().copied().collect());

static CODE_TO_KEY_NAME: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| KEY_NAME_TO_CODE.iter().map(|(&name, &code)| (code, name)).collect());

impl KeycodeMap {
    /// Получить код клавиши по её имени
    pub fn get_keycode(key_name: &str) -> Result<KeyCode> {
        let normalized = key_name.to_lowercase();
        KEY_NAME_TO_CODE
            .get(normalized.as_str())
            .map(|&code| KeyCode(code))
            .ok_or_else(|| ClipshipError::MalformedTarget(format!("Неизвестная клавиша: {}", key_name)))
    }

    /// Получить имя клавиши по её коду
    #[allow(dead_code)]
    pub fn get_key_name(key_code: KeyCode) -> Option<&'static str> {
        CODE_TO_KEY_NAME.get(&key_code.value()).copied()
    }

    /// Проверить, является ли клавиша модификатором
    pub fn is_modifier(key_name: &str) -> bool {
        let normalized = key_name.to_lowercase();
        matches!(normalized.as_str(), "ctrl" | "alt" | "shift" | "super")
    }

    /// Коды клавиш-модификаторов в порядке нажатия
    pub fn modifier_codes(modifiers: &Modifiers) -> SmallVec<[KeyCode; 4]> {
        let mut codes = SmallVec::new();
        if modifiers.ctrl {
            codes.push(KeyCode(29)); // KEY_LEFTCTRL
        }
        if modifiers.alt {
            codes.push(KeyCode(56)); // KEY_LEFTALT
        }
        if modifiers.shift {
            codes.push(KeyCode(42)); // KEY_LEFTSHIFT
        }
        if modifiers.super_key {
            codes.push(KeyCode(125)); // KEY_LEFTMETA
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_key_mapping() {
        assert_eq!(KeycodeMap::get_keycode("tab").unwrap(), KeyCode(15));
        assert_eq!(KeycodeMap::get_keycode("v").unwrap(), KeyCode(47));
        assert_eq!(KeycodeMap::get_keycode("enter").unwrap(), KeyCode(28));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(KeycodeMap::get_keycode("TAB").unwrap(), KeyCode(15));
        assert_eq!(KeycodeMap::get_keycode("Enter").unwrap(), KeyCode(28));
    }

    #[test]
    fn test_reverse_mapping() {
        assert_eq!(KeycodeMap::get_key_name(KeyCode(15)), Some("tab"));
        assert_eq!(KeycodeMap::get_key_name(KeyCode(28)), Some("enter"));
    }

    #[test]
    fn test_invalid_key() {
        assert!(KeycodeMap::get_keycode("invalid_key").is_err());
    }

    #[test]
    fn test_modifier_detection() {
        assert!(KeycodeMap::is_modifier("ctrl"));
        assert!(KeycodeMap::is_modifier("SHIFT"));
        assert!(!KeycodeMap::is_modifier("v"));
        assert!(!KeycodeMap::is_modifier("tab"));
    }

    #[test]
    fn test_modifier_codes_order() {
        let modifiers = Modifiers::new().with_ctrl(true).with_shift(true);
        let codes = KeycodeMap::modifier_codes(&modifiers);
        assert_eq!(codes.as_slice(), &[KeyCode(29), KeyCode(42)]);
    }
}
