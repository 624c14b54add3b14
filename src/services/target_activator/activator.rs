use parking_lot::Mutex;
use std::collections::HashMap;
use std::process::Command;
use tracing::{debug, info, warn};
use zbus::Connection;

use super::sway::SwayBackend;
use super::xdotool::XdotoolBackend;
use super::r#trait::TargetActivator;
use crate::error::{ClipshipError, Result};
use crate::events::ForegroundWindow;
use crate::services::deep_link::DeepLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkingMethod {
    Xdotool,
    Sway,
}

/// Активатор поверх внешних утилит управления окнами. Рабочий метод
/// определяется при первом обращении и переопределяется после сбоя.
pub struct RealTargetActivator {
    working_method: Mutex<Option<WorkingMethod>>,

    // Бэкенды утилит
    xdotool: XdotoolBackend,
    sway: SwayBackend,
}

impl RealTargetActivator {
    pub fn new() -> Result<Self> {
        info!("Инициализация RealTargetActivator");

        Ok(Self {
            working_method: Mutex::new(None),
            xdotool: XdotoolBackend::new(),
            sway: SwayBackend::new(),
        })
    }

    async fn detect_working_method(&self) -> Result<WorkingMethod> {
        info!("Определяем рабочий метод работы с окнами...");

        if self.xdotool.test().await.is_ok() {
            info!("Используем xdotool");
            return Ok(WorkingMethod::Xdotool);
        }

        if self.sway.test().await.is_ok() {
            info!("Используем swaymsg");
            return Ok(WorkingMethod::Sway);
        }

        Err(ClipshipError::Internal(
            "Ни один метод работы с окнами не работает".to_string(),
        ))
    }

    async fn working_method(&self) -> Result<WorkingMethod> {
        if let Some(method) = *self.working_method.lock() {
            return Ok(method);
        }
        let method = self.detect_working_method().await?;
        *self.working_method.lock() = Some(method);
        Ok(method)
    }

    async fn get_foreground_by(&self, method: WorkingMethod) -> Result<ForegroundWindow> {
        match method {
            WorkingMethod::Xdotool => self.xdotool.get_foreground().await,
            WorkingMethod::Sway => self.sway.get_foreground().await,
        }
    }

    async fn get_foreground(&self) -> Result<ForegroundWindow> {
        let method = self.working_method().await?;

        match self.get_foreground_by(method).await {
            Ok(window) => Ok(window),
            Err(e) => {
                warn!("Рабочий метод {:?} перестал работать: {}. Переопределяем...", method, e);
                *self.working_method.lock() = None;
                let method = self.working_method().await?;
                self.get_foreground_by(method).await
            }
        }
    }

    async fn open_via_portal(&self, link: &DeepLink) -> Result<()> {
        let connection = Connection::session().await?;
        let proxy = zbus::Proxy::new(
            &connection,
            "org.freedesktop.portal.Desktop",
            "/org/freedesktop/portal/desktop",
            "org.freedesktop.portal.OpenURI",
        )
        .await?;

        let options: HashMap<&str, zbus::zvariant::Value<'_>> = HashMap::new();
        proxy.call_method("OpenURI", &("", link.as_str(), options)).await?;
        Ok(())
    }

    fn open_via_xdg(&self, link: &DeepLink) -> Result<bool> {
        let status = Command::new("xdg-open").arg(link.as_str()).status()?;
        Ok(status.success())
    }
}

#[async_trait::async_trait]
impl TargetActivator for RealTargetActivator {
    async fn foreground_matches(&self, window_class: &str) -> Result<bool> {
        let window = self.get_foreground().await?;
        debug!("Окно переднего плана: {}", window);
        Ok(window.matches_class(window_class))
    }

    async fn activate(&self, window_class: &str) -> Result<bool> {
        let method = self.working_method().await?;
        match method {
            WorkingMethod::Xdotool => self.xdotool.activate(window_class).await,
            WorkingMethod::Sway => self.sway.activate(window_class).await,
        }
    }

    async fn open_deep_link(&self, link: &DeepLink) -> Result<bool> {
        info!("Открываем deep-link: {}", link);

        match self.open_via_portal(link).await {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!("Портал OpenURI недоступен ({}), пробуем xdg-open", e);
                self.open_via_xdg(link)
            }
        }
    }
}
