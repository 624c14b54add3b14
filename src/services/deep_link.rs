use std::fmt;

use crate::error::{ClipshipError, Result};

/// Deep-link URI для запуска/фокусировки целевого приложения,
/// вида `tg://resolve?domain=<имя>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    uri: String,
}

impl DeepLink {
    /// Построить ссылку `<схема>://resolve?domain=<имя>`. Некорректные
    /// схема или имя — ошибка конструирования, открытие не предпринимается.
    pub fn resolve(scheme: &str, username: &str) -> Result<Self> {
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ClipshipError::MalformedTarget(format!(
                "Некорректная URI-схема: '{}'",
                scheme
            )));
        }

        if username.is_empty() {
            return Err(ClipshipError::MalformedTarget(
                "Имя пользователя не задано".to_string(),
            ));
        }

        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ClipshipError::MalformedTarget(format!(
                "Недопустимые символы в имени пользователя: '{}'",
                username
            )));
        }

        Ok(Self {
            uri: format!("{}://resolve?domain={}", scheme, username),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builds_uri() {
        let link = DeepLink::resolve("tg", "alice_99").unwrap();
        assert_eq!(link.as_str(), "tg://resolve?domain=alice_99");
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(DeepLink::resolve("tg", "").is_err());
    }

    #[test]
    fn test_unsafe_characters_rejected() {
        assert!(DeepLink::resolve("tg", "alice bob").is_err());
        assert!(DeepLink::resolve("tg", "alice&x=1").is_err());
        assert!(DeepLink::resolve("tg://", "alice").is_err());
    }
}
