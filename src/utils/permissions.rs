use crate::error::{ClipshipError, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::process::Command;
use tracing::{info, warn};

/// Проверить права доступа к необходимым ресурсам
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    // Проверка доступа к /dev/uinput
    check_uinput_access()?;

    // Проверка наличия утилит управления окнами
    check_window_tools();

    // Проверка, что не запущен от root (рекомендация безопасности)
    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

/// Неблокирующий запрос права инъекции: доступность /dev/uinput
pub fn uinput_accessible() -> bool {
    match fs::metadata("/dev/uinput") {
        Ok(metadata) => {
            let mode = metadata.permissions().mode();
            // Обычно 660 или 666
            mode & 0o006 != 0 || mode & 0o060 != 0
        }
        Err(_) => false,
    }
}

fn check_uinput_access() -> Result<()> {
    let uinput_device = "/dev/uinput";

    if !std::path::Path::new(uinput_device).exists() {
        warn!("{} не существует, возможно модуль uinput не загружен", uinput_device);
        return Ok(()); // Не критичная ошибка, модуль может быть загружен позже
    }

    if !uinput_accessible() {
        return Err(ClipshipError::Permission(format!(
            "Нет прав доступа к {}. Добавьте пользователя в группу 'uinput' или 'input'",
            uinput_device
        )));
    }

    info!("Доступ к {} подтвержден", uinput_device);
    Ok(())
}

fn check_window_tools() {
    // для проверки окна переднего плана нужна хотя бы одна утилита
    let available = ["xdotool", "swaymsg"].iter().any(|tool| {
        Command::new(tool)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    });

    if !available {
        warn!("Не найдены ни xdotool, ни swaymsg — проверка окна переднего плана будет недоступна");
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группы 'input' и 'uinput'");
            warn!("   и запускать приложение от имени обычного пользователя");
        }
        Ok(user) => {
            info!("Приложение запущено от имени пользователя: {}", user);
        }
        Err(_) => {
            warn!("Не удалось определить пользователя");
        }
    }
}

/// Получить рекомендуемые команды для настройки прав доступа
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "# Добавить пользователя в необходимые группы:".to_string(),
        "sudo usermod -a -G input,uinput $USER".to_string(),
        "".to_string(),
        "# Загрузить модуль uinput:".to_string(),
        "sudo modprobe uinput".to_string(),
        "".to_string(),
        "# Автоматическая загрузка модуля при загрузке системы:".to_string(),
        "echo 'uinput' | sudo tee /etc/modules-load.d/uinput.conf".to_string(),
        "".to_string(),
        "# После выполнения команд перезайдите в систему".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_commands() {
        let commands = get_setup_commands();
        assert!(!commands.is_empty());
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
        assert!(commands.iter().any(|cmd| cmd.contains("modprobe")));
    }
}
