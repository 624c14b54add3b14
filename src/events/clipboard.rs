use std::fmt;

/// Монотонно растущий счётчик изменений хранилища буфера обмена
pub type ChangeToken = u64;

/// Короткое представление текста для логов (не длиннее 50 символов)
pub fn preview(text: &str) -> String {
    let mut short: String = text.chars().take(50).collect();
    if short.len() < text.len() {
        short.push_str("...");
    }
    short
}

/// Классифицированное содержимое буфера обмена
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    /// Непустой текст, обрезанный по краям
    Text(String),
    /// Содержимое, состоящее только из пробельных символов
    Empty,
    /// Нетекстовое содержимое (изображение, файлы и т.п.)
    NonText,
}

impl ClipboardPayload {
    /// Классифицировать сырое текстовое содержимое
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    #[allow(dead_code)]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Полное представление для строки состояния
    pub fn status_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Empty => "<empty>".to_string(),
            Self::NonText => "<non-text>".to_string(),
        }
    }
}

impl fmt::Display for ClipboardPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{}'", preview(text)),
            Self::Empty => write!(f, "<empty>"),
            Self::NonText => write!(f, "<non-text>"),
        }
    }
}

/// Снимок буфера обмена, создаваемый при каждом обнаруженном изменении
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    pub change_token: ChangeToken,
    pub payload: ClipboardPayload,
}

impl ClipboardSnapshot {
    pub fn new(change_token: ChangeToken, payload: ClipboardPayload) -> Self {
        Self {
            change_token,
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_trims_whitespace() {
        assert_eq!(
            ClipboardPayload::classify("  x  "),
            ClipboardPayload::classify("x")
        );
        assert_eq!(
            ClipboardPayload::classify("  x  "),
            ClipboardPayload::Text("x".to_string())
        );
    }

    #[test]
    fn test_classify_whitespace_only_is_empty() {
        assert_eq!(ClipboardPayload::classify("   \n\t "), ClipboardPayload::Empty);
        assert_eq!(ClipboardPayload::classify(""), ClipboardPayload::Empty);
    }

    #[test]
    fn test_empty_and_non_text_are_distinct() {
        assert_ne!(ClipboardPayload::Empty, ClipboardPayload::NonText);
        assert_ne!(
            ClipboardPayload::Empty.status_text(),
            ClipboardPayload::NonText.status_text()
        );
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "a".repeat(120);
        let short = preview(&long);
        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 53);
        assert_eq!(preview("short"), "short");
    }
}
