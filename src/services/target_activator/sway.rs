use std::process::Command;
use tracing::debug;

use crate::clipship_error;
use crate::error::{ClipshipError, Result};
use crate::events::ForegroundWindow;

pub struct SwayBackend;

impl SwayBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("swaymsg").args(&["-t", "get_tree"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ClipshipError::Internal("sway failed".to_string()))
        }
    }

    pub async fn get_foreground(&self) -> Result<ForegroundWindow> {
        let output = Command::new("swaymsg")
            .args(&["-t", "get_tree"])
            .output()
            .map_err(|e| clipship_error!(target_unavailable, "swaymsg не найден: {}", e))?;

        if !output.status.success() {
            return Err(clipship_error!(target_unavailable, "swaymsg вернул ошибку"));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);

        // swaymsg выводит JSON; выделяем фокусированный узел без полного парсера
        let focus_position = stdout
            .find("\"focused\": true")
            .or_else(|| stdout.find("\"focused\":true"));

        let Some(position) = focus_position else {
            return Err(clipship_error!(target_unavailable, "Фокусированное окно в Sway не найдено"));
        };

        let before = &stdout[..position];
        let title = Self::last_string_value(before, "\"name\":").unwrap_or_default();
        let class = Self::last_string_value(before, "\"app_id\":")
            .or_else(|| Self::last_string_value(before, "\"class\":"))
            .unwrap_or_default();

        debug!("swaymsg получил окно: '{}' ({})", title, class);
        Ok(ForegroundWindow::new(title).with_class(class))
    }

    /// Активировать окно по критерию; false — критерий не совпал ни с одним окном
    pub async fn activate(&self, window_class: &str) -> Result<bool> {
        // сначала app_id (нативный Wayland), затем class (XWayland)
        let criteria = [
            format!("[app_id=\"{}\"] focus", window_class),
            format!("[class=\"{}\"] focus", window_class),
        ];

        for command in &criteria {
            let output = Command::new("swaymsg")
                .arg(command)
                .output()
                .map_err(|e| clipship_error!(target_unavailable, "swaymsg не найден: {}", e))?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            if output.status.success() && stdout.contains("\"success\": true") {
                return Ok(true);
            }
        }

        debug!("Окно '{}' не найдено в Sway", window_class);
        Ok(false)
    }

    // Последнее строковое значение ключа перед позицией фокуса
    fn last_string_value(haystack: &str, key: &str) -> Option<String> {
        let key_start = haystack.rfind(key)?;
        let after = &haystack[key_start + key.len()..];
        let quote_start = after.find('"')?;
        let rest = &after[quote_start + 1..];
        let quote_end = rest.find('"')?;
        Some(rest[..quote_end].to_string())
    }
}
