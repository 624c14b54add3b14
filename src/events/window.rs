use serde::{Deserialize, Serialize};
use std::fmt;

/// Информация об окне переднего плана
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForegroundWindow {
    pub title: String,
    pub class: String,
}

impl ForegroundWindow {
    pub fn new(title: String) -> Self {
        Self {
            title,
            class: String::new(),
        }
    }

    pub fn with_class(mut self, class: String) -> Self {
        self.class = class;
        self
    }

    /// Проверить, принадлежит ли окно указанному классу (регистронезависимо).
    /// Пустой идентификатор не совпадает ни с чем.
    pub fn matches_class(&self, identifier: &str) -> bool {
        if identifier.is_empty() {
            return false;
        }
        let identifier_lower = identifier.to_lowercase();
        self.class.to_lowercase().contains(&identifier_lower)
    }
}

impl fmt::Display for ForegroundWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "\"{}\"", self.title)
        } else {
            write!(f, "\"{}\" ({})", self.title, self.class)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreground_window_creation() {
        let window = ForegroundWindow::new("Telegram".to_string())
            .with_class("TelegramDesktop".to_string());

        assert_eq!(window.title, "Telegram");
        assert_eq!(window.class, "TelegramDesktop");
    }

    #[test]
    fn test_class_matching() {
        let window = ForegroundWindow::new("Telegram".to_string())
            .with_class("TelegramDesktop".to_string());

        assert!(window.matches_class("telegramdesktop"));
        assert!(window.matches_class("Telegram"));
        assert!(!window.matches_class("firefox"));
        assert!(!window.matches_class(""));
    }
}
