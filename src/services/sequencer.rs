use smallvec::SmallVec;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{ClipshipError, Result};
use crate::events::clipboard::preview;
use crate::events::KeyStroke;
use crate::services::deep_link::DeepLink;
use crate::services::input_injector::InputSink;
use crate::services::target_activator::TargetActivator;

/// Один шаг фиксированной последовательности действий
#[derive(Debug, Clone, Copy)]
pub struct ActionStep {
    pub stroke: KeyStroke,
    pub post_delay: Duration,
}

type ActionSequence = SmallVec<[ActionStep; 3]>;

/// Оркестратор одного прогона автоматизации: deep-link → подтверждение
/// фокуса с ограниченными повторами → фиксированная последовательность
/// клавиш. Текст в прогон не передаётся повторно — вставка идёт из
/// системного буфера обмена.
pub struct AutomationSequencer {
    config: Arc<Config>,
    activator: Arc<dyn TargetActivator>,
    input: Arc<dyn InputSink>,
}

impl AutomationSequencer {
    pub fn new(
        config: Arc<Config>,
        activator: Arc<dyn TargetActivator>,
        input: Arc<dyn InputSink>,
    ) -> Self {
        info!("Инициализация AutomationSequencer");
        Self {
            config,
            activator,
            input,
        }
    }

    /// Фиксированная последовательность: фокус поля → вставка → отправка
    fn action_sequence(&self) -> Result<ActionSequence> {
        let keys = &self.config.keys;
        let timing = &self.config.timing;

        let mut sequence = ActionSequence::new();
        sequence.push(ActionStep {
            stroke: keys.focus_stroke()?,
            post_delay: timing.focus_delay(),
        });
        sequence.push(ActionStep {
            stroke: keys.paste_stroke()?,
            post_delay: timing.paste_delay(),
        });
        sequence.push(ActionStep {
            stroke: keys.submit_stroke()?,
            post_delay: Duration::ZERO,
        });
        Ok(sequence)
    }

    /// Один прогон автоматизации. Любой сбой локален: логируется и
    /// никогда не попадает в цикл опроса.
    pub async fn run(&self, text: &str) {
        info!("Запуск автоматизации для текста: '{}'", preview(text));
        if let Err(e) = self.run_inner().await {
            warn!("Прогон автоматизации прерван: {}", e);
        }
    }

    async fn run_inner(&self) -> Result<()> {
        let target = &self.config.target;

        let username = target.username.trim();
        if username.is_empty() {
            return Err(ClipshipError::MalformedTarget(
                "target.username не задан, автоматизация пропущена".to_string(),
            ));
        }

        let link = DeepLink::resolve(&target.uri_scheme, username)?;
        if !self.activator.open_deep_link(&link).await? {
            return Err(ClipshipError::TargetUnavailable(format!(
                "ОС отклонила запрос на открытие {}",
                link
            )));
        }

        // даём целевому приложению время получить фокус
        sleep(self.config.timing.settle_delay()).await;

        let window_class = target.window_class.trim();
        if window_class.is_empty() {
            warn!("target.window_class не задан, пропускаем проверку фокуса");
        } else {
            self.confirm_foreground(window_class).await;
        }

        if !self.input.permission_granted() {
            self.input.request_permission();
            return Err(ClipshipError::Permission(
                "нет права инъекции синтетического ввода".to_string(),
            ));
        }

        self.inject_sequence().await
    }

    /// Подтверждение фокуса с ограниченным числом повторных активаций.
    /// После исчерпания бюджета продолжаем без подтверждения (best-effort).
    async fn confirm_foreground(&self, window_class: &str) {
        let mut confirmed = self.foreground_confirmed(window_class).await;
        let mut attempts_remaining = self.config.target.activation_retries;

        while !confirmed && attempts_remaining > 0 {
            attempts_remaining -= 1;
            warn!(
                "Цель '{}' не на переднем плане, пробуем активировать (осталось попыток: {})",
                window_class, attempts_remaining
            );

            match self.activator.activate(window_class).await {
                Ok(true) => info!("Окно '{}' активировано", window_class),
                Ok(false) => warn!("Запущенное окно '{}' не найдено", window_class),
                Err(e) => warn!("Не удалось активировать '{}': {}", window_class, e),
            }

            sleep(self.config.timing.activate_delay()).await;
            confirmed = self.foreground_confirmed(window_class).await;
        }

        if confirmed {
            info!("Цель на переднем плане, продолжаем");
        } else {
            warn!("Фокус цели не подтверждён, продолжаем без подтверждения");
        }
    }

    async fn foreground_confirmed(&self, window_class: &str) -> bool {
        match self.activator.foreground_matches(window_class).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Не удалось проверить окно переднего плана: {}", e);
                false
            }
        }
    }

    /// Выполнить последовательность действий без активации (прямой тест вставки)
    pub async fn inject_sequence(&self) -> Result<()> {
        for step in self.action_sequence()? {
            // инъекция fire-and-forget: ошибки логируются, без повторов
            if let Err(e) = self.input.send(step.stroke).await {
                error!("Не удалось отправить {}: {}", step.stroke, e);
            }
            if !step.post_delay.is_zero() {
                sleep(step.post_delay).await;
            }
        }
        info!("Последовательность действий отправлена");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::events::{KeyCode, Modifiers};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum ActivatorCall {
        OpenDeepLink(String),
        ForegroundCheck(String),
        Activate(String),
    }

    /// Активатор-регистратор с настраиваемым ответом о переднем плане
    pub(crate) struct FakeActivator {
        pub calls: Mutex<Vec<ActivatorCall>>,
        pub foreground: AtomicBool,
    }

    impl FakeActivator {
        pub fn new(foreground: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                foreground: AtomicBool::new(foreground),
            })
        }

        pub fn activate_calls(&self) -> usize {
            self.calls
                .lock()
                .iter()
                .filter(|call| matches!(call, ActivatorCall::Activate(_)))
                .count()
        }
    }

    #[async_trait::async_trait]
    impl TargetActivator for FakeActivator {
        async fn foreground_matches(&self, window_class: &str) -> Result<bool> {
            self.calls
                .lock()
                .push(ActivatorCall::ForegroundCheck(window_class.to_string()));
            Ok(self.foreground.load(Ordering::SeqCst))
        }

        async fn activate(&self, window_class: &str) -> Result<bool> {
            self.calls
                .lock()
                .push(ActivatorCall::Activate(window_class.to_string()));
            Ok(true)
        }

        async fn open_deep_link(&self, link: &DeepLink) -> Result<bool> {
            self.calls
                .lock()
                .push(ActivatorCall::OpenDeepLink(link.as_str().to_string()));
            Ok(true)
        }
    }

    /// Приёмник-регистратор нажатий с настраиваемым правом инъекции
    pub(crate) struct FakeSink {
        pub strokes: Mutex<Vec<KeyStroke>>,
        pub permitted: AtomicBool,
        pub permission_requests: AtomicUsize,
    }

    impl FakeSink {
        pub fn new(permitted: bool) -> Arc<Self> {
            Arc::new(Self {
                strokes: Mutex::new(Vec::new()),
                permitted: AtomicBool::new(permitted),
                permission_requests: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl InputSink for FakeSink {
        fn permission_granted(&self) -> bool {
            self.permitted.load(Ordering::SeqCst)
        }

        fn request_permission(&self) {
            self.permission_requests.fetch_add(1, Ordering::SeqCst);
        }

        async fn send(&self, stroke: KeyStroke) -> Result<()> {
            self.strokes.lock().push(stroke);
            Ok(())
        }
    }

    pub(crate) fn test_config(username: &str) -> Arc<Config> {
        let mut config = Config::default();
        config.target.username = username.to_string();
        config.target.window_class = "telegram-desktop".to_string();
        Arc::new(config)
    }

    fn expected_sequence() -> Vec<KeyStroke> {
        vec![
            KeyStroke::plain(KeyCode(15)),
            KeyStroke::with_modifiers(KeyCode(47), Modifiers::new().with_ctrl(true)),
            KeyStroke::plain(KeyCode(28)),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_injects_fixed_sequence() {
        let activator = FakeActivator::new(true);
        let sink = FakeSink::new(true);
        let sequencer =
            AutomationSequencer::new(test_config("alice"), activator.clone(), sink.clone());

        sequencer.run("hello world").await;

        {
            let calls = activator.calls.lock();
            assert_eq!(
                calls[0],
                ActivatorCall::OpenDeepLink("tg://resolve?domain=alice".to_string())
            );
        }
        assert_eq!(activator.activate_calls(), 0);
        assert_eq!(*sink.strokes.lock(), expected_sequence());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_budget_allows_single_reactivation() {
        // передний план никогда не совпадает
        let activator = FakeActivator::new(false);
        let sink = FakeSink::new(true);
        let sequencer =
            AutomationSequencer::new(test_config("alice"), activator.clone(), sink.clone());

        sequencer.run("text").await;

        assert_eq!(activator.activate_calls(), 1);
        // после исчерпания бюджета вставка всё равно выполняется
        assert_eq!(sink.strokes.lock().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_username_short_circuits() {
        let activator = FakeActivator::new(true);
        let sink = FakeSink::new(true);
        let sequencer =
            AutomationSequencer::new(test_config(""), activator.clone(), sink.clone());

        sequencer.run("anything").await;

        assert!(activator.calls.lock().is_empty());
        assert!(sink.strokes.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_denied_blocks_injection() {
        let activator = FakeActivator::new(true);
        let sink = FakeSink::new(false);
        let sequencer =
            AutomationSequencer::new(test_config("alice"), activator.clone(), sink.clone());

        sequencer.run("text").await;

        assert!(sink.strokes.lock().is_empty());
        assert_eq!(sink.permission_requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_configurable_retry_budget() {
        let activator = FakeActivator::new(false);
        let sink = FakeSink::new(true);
        let mut config = Config::default();
        config.target.username = "alice".to_string();
        config.target.window_class = "telegram-desktop".to_string();
        config.target.activation_retries = 3;
        let sequencer = AutomationSequencer::new(Arc::new(config), activator.clone(), sink.clone());

        sequencer.run("text").await;

        assert_eq!(activator.activate_calls(), 3);
        assert_eq!(sink.strokes.lock().len(), 3);
    }
}
