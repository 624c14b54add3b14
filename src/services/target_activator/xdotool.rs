use std::process::Command;
use tracing::debug;

use crate::clipship_error;
use crate::error::{ClipshipError, Result};
use crate::events::ForegroundWindow;

pub struct XdotoolBackend;

impl XdotoolBackend {
    pub fn new() -> Self {
        Self
    }

    pub async fn test(&self) -> Result<()> {
        let output = Command::new("xdotool").args(&["getactivewindow"]).output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ClipshipError::Internal("xdotool failed".to_string()))
        }
    }

    pub async fn get_foreground(&self) -> Result<ForegroundWindow> {
        debug!("Запрос окна переднего плана через xdotool");
        let output = Command::new("xdotool")
            .args(&["getactivewindow", "getwindowclassname"])
            .output()
            .map_err(|e| clipship_error!(target_unavailable, "xdotool не найден: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(clipship_error!(target_unavailable, "xdotool вернул ошибку: {}", stderr));
        }

        let class = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("xdotool получил класс окна: '{}'", class);

        let title_output = Command::new("xdotool")
            .args(&["getactivewindow", "getwindowname"])
            .output();

        let title = match title_output {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => {
                debug!("Не удалось получить заголовок окна");
                String::new()
            }
        };

        Ok(ForegroundWindow::new(title).with_class(class))
    }

    /// Активировать первое найденное окно класса; false — окно не найдено
    pub async fn activate(&self, window_class: &str) -> Result<bool> {
        let search = Command::new("xdotool")
            .args(&["search", "--class", window_class])
            .output()
            .map_err(|e| clipship_error!(target_unavailable, "xdotool не найден: {}", e))?;

        // xdotool search завершается с ошибкой, когда окон нет — это не сбой
        let stdout = String::from_utf8_lossy(&search.stdout);
        let Some(window_id) = stdout.lines().next().map(str::trim).filter(|id| !id.is_empty())
        else {
            debug!("Окно класса '{}' не найдено", window_class);
            return Ok(false);
        };

        let status = Command::new("xdotool")
            .args(&["windowactivate", window_id])
            .status()?;

        Ok(status.success())
    }
}
