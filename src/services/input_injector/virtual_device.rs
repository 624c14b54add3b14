use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::r#trait::InputSink;
use crate::config::Config;
use crate::error::{ClipshipError, Result};
use crate::events::{KeyState, KeyStroke, VirtualKeyEvent};
use crate::services::keycode_map::KeycodeMap;
use crate::utils::permissions;

pub struct VirtualDevice {
    device: Mutex<Option<uinput::Device>>,
    device_name: String,
    inter_key_delay: Duration,
    dry_run: bool,
}

impl VirtualDevice {
    pub fn new(device_name: &str, config: Arc<Config>, dry_run: bool) -> Self {
        info!("Инициализация VirtualDevice '{}' (dry_run: {})", device_name, dry_run);

        let device = if dry_run {
            None
        } else {
            match Self::create_virtual_device(device_name) {
                Ok(device) => Some(device),
                Err(e) => {
                    // без устройства работаем дальше: мониторинг не останавливается,
                    // инъекция будет отклоняться через permission_granted()
                    warn!("Не удалось создать виртуальное устройство: {}", e);
                    None
                }
            }
        };

        Self {
            device: Mutex::new(device),
            device_name: device_name.to_string(),
            inter_key_delay: config.timing.inter_key_delay(),
            dry_run,
        }
    }

    fn create_virtual_device(device_name: &str) -> Result<uinput::Device> {
        info!("Создание виртуального устройства uinput '{}' для инъекции клавиш", device_name);

        let device = uinput::default()?
            .name(device_name)
            .map_err(|e| ClipshipError::Internal(format!("Не удалось задать имя устройства '{}': {}", device_name, e)))?
            .event(uinput::event::Keyboard::All)
            .map_err(|e| ClipshipError::Internal(format!("Не удалось включить клавиатурные события: {}", e)))?
            .create()
            .map_err(|e| ClipshipError::Internal(format!("Не удалось создать виртуальное устройство '{}': {}", device_name, e)))?;

        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(device)
    }

    fn write_event(&self, event: VirtualKeyEvent) -> Result<()> {
        let mut guard = self.device.lock();
        let Some(device) = guard.as_mut() else {
            return Err(ClipshipError::Permission(
                "Виртуальное устройство недоступно".to_string(),
            ));
        };

        let keycode = event.key_code.value() as i32;
        let value = match event.state {
            KeyState::Pressed => 1,
            KeyState::Released => 0,
        };

        // Отправляем событие клавиши
        if let Err(e) = device.write(1, keycode, value) {
            return Err(ClipshipError::Internal(format!(
                "Не удалось отправить событие клавиши {}: {}",
                keycode, e
            )));
        }

        // Синхронизируем события
        if let Err(e) = device.write(0, 0, 0) {
            return Err(ClipshipError::Internal(format!(
                "Не удалось синхронизировать события: {}",
                e
            )));
        }

        debug!("Виртуальное событие {} отправлено", event);
        Ok(())
    }
}

#[async_trait::async_trait]
impl InputSink for VirtualDevice {
    fn permission_granted(&self) -> bool {
        if self.dry_run {
            return true;
        }
        if self.device.lock().is_some() {
            return true;
        }
        permissions::uinput_accessible()
    }

    fn request_permission(&self) {
        warn!("Нет права инъекции синтетического ввода, инструкции по настройке:");
        for line in permissions::get_setup_commands() {
            warn!("  {}", line);
        }
    }

    async fn send(&self, stroke: KeyStroke) -> Result<()> {
        if self.dry_run {
            info!("[DRY RUN] Нажатие клавиши: {}", stroke);
            return Ok(());
        }

        debug!("Отправка нажатия: {}", stroke);

        let modifier_codes = KeycodeMap::modifier_codes(&stroke.modifiers);
        for &code in &modifier_codes {
            self.write_event(VirtualKeyEvent::press(code))?;
        }
        self.write_event(VirtualKeyEvent::press(stroke.key_code))?;

        // межклавишная задержка между нажатием и отпусканием
        sleep(self.inter_key_delay).await;

        self.write_event(VirtualKeyEvent::release(stroke.key_code))?;
        for &code in modifier_codes.iter().rev() {
            self.write_event(VirtualKeyEvent::release(code))?;
        }

        Ok(())
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        if !self.dry_run {
            info!("Закрытие виртуального устройства '{}'", self.device_name);
        }
    }
}
