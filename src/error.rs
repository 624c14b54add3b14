use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipshipError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка uinput: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("Ошибка D-Bus: {0}")]
    DBus(#[from] zbus::Error),

    #[error("Ошибка буфера обмена: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Целевое приложение недоступно: {0}")]
    TargetUnavailable(String),

    #[error("Некорректная цель автоматизации: {0}")]
    MalformedTarget(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ClipshipError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! clipship_error {
    (permission, $($arg:tt)*) => {
        $crate::error::ClipshipError::Permission(format!($($arg)*))
    };
    (target_unavailable, $($arg:tt)*) => {
        $crate::error::ClipshipError::TargetUnavailable(format!($($arg)*))
    };
    (malformed_target, $($arg:tt)*) => {
        $crate::error::ClipshipError::MalformedTarget(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::ClipshipError::Internal(format!($($arg)*))
    };
}
