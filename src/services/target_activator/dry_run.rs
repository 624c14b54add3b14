use tracing::info;

use super::r#trait::TargetActivator;
use crate::error::Result;
use crate::services::deep_link::DeepLink;

/// Dry-run режим — активатор только логирует и сообщает об успехе
pub struct DryRunActivator;

impl DryRunActivator {
    pub fn new() -> Self {
        info!("Dry-run режим - TargetActivator работает в режиме эмуляции");
        Self
    }
}

#[async_trait::async_trait]
impl TargetActivator for DryRunActivator {
    async fn foreground_matches(&self, window_class: &str) -> Result<bool> {
        info!("Dry-run: окно '{}' считаем окном переднего плана", window_class);
        Ok(true)
    }

    async fn activate(&self, window_class: &str) -> Result<bool> {
        info!("Dry-run: эмулируем активацию окна '{}'", window_class);
        Ok(true)
    }

    async fn open_deep_link(&self, link: &DeepLink) -> Result<bool> {
        info!("Dry-run: эмулируем открытие deep-link {}", link);
        Ok(true)
    }
}
