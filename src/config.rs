use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::events::{KeyStroke, Modifiers};
use crate::services::keycode_map::KeycodeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            filter: "clipship_rust=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Интервал опроса буфера обмена
    pub poll_interval_ms: u64,
    /// Запускать мониторинг сразу при старте приложения
    pub autostart: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            autostart: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Имя пользователя для deep-link (без '@'); пустое — автоматизация отключена
    pub username: String,
    /// Класс окна целевого приложения для проверки переднего плана
    pub window_class: String,
    /// URI-схема целевого приложения
    pub uri_scheme: String,
    /// Число повторных активаций после несовпадения переднего плана
    pub activation_retries: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            window_class: String::new(),
            uri_scheme: "tg".to_string(),
            activation_retries: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeysConfig {
    /// Клавиша фокусировки поля ввода сообщения
    pub focus_key: String,
    /// Клавиша вставки
    pub paste_key: String,
    /// Модификатор вставки
    pub paste_modifier: String,
    /// Клавиша отправки сообщения
    pub submit_key: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            focus_key: "tab".to_string(),
            paste_key: "v".to_string(),
            paste_modifier: "ctrl".to_string(),
            submit_key: "enter".to_string(),
        }
    }
}

impl KeysConfig {
    pub fn focus_stroke(&self) -> crate::error::Result<KeyStroke> {
        Ok(KeyStroke::plain(KeycodeMap::get_keycode(&self.focus_key)?))
    }

    pub fn paste_stroke(&self) -> crate::error::Result<KeyStroke> {
        if !KeycodeMap::is_modifier(&self.paste_modifier) {
            return Err(crate::error::ClipshipError::MalformedTarget(format!(
                "'{}' не является модификатором",
                self.paste_modifier
            )));
        }
        let modifiers = Modifiers::from_vec(&[self.paste_modifier.to_lowercase()]);
        Ok(KeyStroke::with_modifiers(
            KeycodeMap::get_keycode(&self.paste_key)?,
            modifiers,
        ))
    }

    pub fn submit_stroke(&self) -> crate::error::Result<KeyStroke> {
        Ok(KeyStroke::plain(KeycodeMap::get_keycode(&self.submit_key)?))
    }
}

/// Временные константы пайплайна автоматизации. Значения подобраны
/// эмпирически под реакцию UI целевого приложения.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Пауза после открытия deep-link до первой проверки фокуса
    pub settle_delay_ms: u64,
    /// Пауза после повторной активации окна
    pub activate_delay_ms: u64,
    /// Задержка между нажатием и отпусканием клавиши
    pub inter_key_delay_ms: u64,
    /// Пауза после фокусировки поля ввода
    pub focus_delay_ms: u64,
    /// Пауза после вставки до отправки
    pub paste_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 250,
            activate_delay_ms: 1000,
            inter_key_delay_ms: 50,
            focus_delay_ms: 300,
            paste_delay_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn activate_delay(&self) -> Duration {
        Duration::from_millis(self.activate_delay_ms)
    }

    pub fn inter_key_delay(&self) -> Duration {
        Duration::from_millis(self.inter_key_delay_ms)
    }

    pub fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            monitor: MonitorConfig::default(),
            target: TargetConfig::default(),
            keys: KeysConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CLIPSHIP_"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек мониторинга
        if self.monitor.poll_interval_ms < 100 {
            anyhow::bail!("poll_interval_ms должно быть минимум 100");
        }

        // Валидация цели автоматизации
        if self.target.activation_retries > 10 {
            anyhow::bail!("activation_retries не может превышать 10");
        }

        if self.target.uri_scheme.is_empty()
            || !self.target.uri_scheme.chars().all(|c| c.is_ascii_alphanumeric())
        {
            anyhow::bail!("Неверная URI-схема: '{}'", self.target.uri_scheme);
        }

        let username = self.target.username.trim();
        if !username.is_empty()
            && !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            anyhow::bail!("Недопустимые символы в target.username: '{}'", username);
        }

        // Валидация клавиш: все имена должны разрешаться в коды
        self.keys.focus_stroke()?;
        self.keys.paste_stroke()?;
        self.keys.submit_stroke()?;

        // Валидация временных констант
        if self.timing.inter_key_delay_ms == 0 {
            anyhow::bail!("inter_key_delay_ms должно быть больше 0");
        }

        Ok(())
    }
}
