use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crate::config::Config;
use crate::debug_if_enabled;
use crate::events::clipboard::preview;
use crate::events::ClipboardPayload;
use crate::services::clipboard_watcher::ClipboardWatcher;
use crate::services::input_injector::InputSink;
use crate::services::sequencer::AutomationSequencer;

/// Владелец состояния мониторинга: таймер опроса, последний скопированный
/// текст, единственный одновременный прогон автоматизации.
pub struct MonitorController {
    config: Arc<Config>,
    watcher: Arc<tokio::sync::Mutex<ClipboardWatcher>>,
    sequencer: Arc<AutomationSequencer>,
    input: Arc<dyn InputSink>,
    // Состояние компонента
    is_running: AtomicBool,
    last_content: Arc<RwLock<String>>,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
    automation_in_flight: Arc<AtomicBool>,
}

impl MonitorController {
    pub fn new(
        config: Arc<Config>,
        watcher: ClipboardWatcher,
        sequencer: Arc<AutomationSequencer>,
        input: Arc<dyn InputSink>,
    ) -> Self {
        info!("Инициализация MonitorController");

        Self {
            config,
            watcher: Arc::new(tokio::sync::Mutex::new(watcher)),
            sequencer,
            input,
            is_running: AtomicBool::new(false),
            last_content: Arc::new(RwLock::new(String::new())),
            poll_handle: Mutex::new(None),
            automation_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Запустить мониторинг. Идемпотентно: старый таймер всегда гасится первым.
    pub fn start(&self) {
        let mut handle = self.poll_handle.lock();
        if let Some(previous) = handle.take() {
            previous.abort();
        }

        let watcher = Arc::clone(&self.watcher);
        let sequencer = Arc::clone(&self.sequencer);
        let last_content = Arc::clone(&self.last_content);
        let in_flight = Arc::clone(&self.automation_in_flight);
        let poll_interval = Duration::from_millis(self.config.monitor.poll_interval_ms);

        *handle = Some(tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            // первый tick interval'а срабатывает мгновенно — пропускаем
            ticker.tick().await;
            loop {
                ticker.tick().await;
                Self::tick(&watcher, &sequencer, &last_content, &in_flight).await;
            }
        }));

        self.is_running.store(true, Ordering::SeqCst);
        info!(
            "Мониторинг буфера обмена запущен (интервал: {}мс)",
            self.config.monitor.poll_interval_ms
        );
    }

    /// Остановить мониторинг. Уже начавшийся прогон автоматизации не отзывается.
    pub fn stop(&self) {
        if let Some(handle) = self.poll_handle.lock().take() {
            handle.abort();
        }
        self.is_running.store(false, Ordering::SeqCst);
        info!("Мониторинг буфера обмена остановлен");
    }

    /// Переключить мониторинг; возвращает новое состояние
    #[allow(dead_code)]
    pub fn toggle(&self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    /// Последний скопированный текст (для строки состояния)
    #[allow(dead_code)]
    pub fn last_content(&self) -> String {
        self.last_content.read().clone()
    }

    /// Проверить право инъекции; при отсутствии инициировать запрос.
    /// Запрос не блокирует вызывающего и не гасит мониторинг.
    pub fn check_permissions(&self) -> bool {
        let granted = self.input.permission_granted();
        if granted {
            info!("Право инъекции синтетического ввода подтверждено");
        } else {
            self.input.request_permission();
        }
        granted
    }

    async fn tick(
        watcher: &tokio::sync::Mutex<ClipboardWatcher>,
        sequencer: &Arc<AutomationSequencer>,
        last_content: &RwLock<String>,
        in_flight: &Arc<AtomicBool>,
    ) {
        let snapshot = watcher.lock().await.poll();
        let Some(snapshot) = snapshot else { return };

        debug_if_enabled!("Изменение буфера обмена: token={}", snapshot.change_token);

        match snapshot.payload {
            ClipboardPayload::Text(text) => {
                info!("Скопирован текст: '{}'", preview(&text));
                *last_content.write() = text.clone();
                Self::spawn_automation(sequencer, in_flight, text);
            }
            payload => {
                info!("Скопировано содержимое без текста: {}", payload);
                *last_content.write() = payload.status_text();
            }
        }
    }

    /// Запустить прогон автоматизации; одновременно допускается только один
    fn spawn_automation(
        sequencer: &Arc<AutomationSequencer>,
        in_flight: &Arc<AtomicBool>,
        text: String,
    ) {
        if in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Предыдущий прогон автоматизации ещё не завершён, новый пропущен");
            return;
        }

        let sequencer = Arc::clone(sequencer);
        let in_flight = Arc::clone(in_flight);
        tokio::spawn(async move {
            sequencer.run(&text).await;
            in_flight.store(false, Ordering::SeqCst);
        });
    }

    /// Ручной запуск автоматизации для последнего скопированного текста
    #[allow(dead_code)]
    pub fn run_now(&self) {
        let text = self.last_content.read().clone();
        if text.is_empty() {
            warn!("Нечего отправлять: буфер обмена ещё не наблюдался");
            return;
        }
        Self::spawn_automation(&self.sequencer, &self.automation_in_flight, text);
    }

    /// Прямой тест инъекции: только последовательность клавиш, без активации
    #[allow(dead_code)]
    pub async fn inject_test(&self) {
        info!("Тест прямой вставки...");
        if !self.check_permissions() {
            return;
        }
        if let Err(e) = self.sequencer.inject_sequence().await {
            warn!("Тест прямой вставки не удался: {}", e);
        }
    }

    /// Дождаться завершения текущего прогона автоматизации
    pub async fn wait_idle(&self) {
        while self.automation_in_flight.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }
}
