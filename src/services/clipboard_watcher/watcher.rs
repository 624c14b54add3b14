use tracing::{debug, warn};

use super::r#trait::ClipboardStore;
use crate::debug_if_enabled;
use crate::events::{ClipboardPayload, ClipboardSnapshot};

/// Опрашивает хранилище буфера обмена и выдаёт снимок при изменении токена.
/// Между опросами хранится только последний наблюдавшийся токен.
pub struct ClipboardWatcher {
    store: Box<dyn ClipboardStore>,
    last_token: Option<u64>,
}

impl ClipboardWatcher {
    pub fn new(mut store: Box<dyn ClipboardStore>) -> Self {
        // Фиксируем текущий токен, чтобы содержимое, скопированное
        // до запуска, не запускало автоматизацию
        let last_token = store.change_token().ok();
        Self { store, last_token }
    }

    /// Один опрос. `None` — токен не изменился либо хранилище недоступно.
    pub fn poll(&mut self) -> Option<ClipboardSnapshot> {
        let token = match self.store.change_token() {
            Ok(token) => token,
            Err(e) => {
                // недоступное хранилище трактуем как «нет изменений»
                debug!("Хранилище буфера обмена недоступно: {}", e);
                return None;
            }
        };

        match self.last_token {
            Some(previous) if previous == token => return None,
            None => {
                self.last_token = Some(token);
                return None;
            }
            Some(_) => {}
        }
        self.last_token = Some(token);

        let payload = match self.store.read_text() {
            Ok(Some(raw)) => ClipboardPayload::classify(&raw),
            Ok(None) => ClipboardPayload::NonText,
            Err(e) => {
                warn!("Не удалось прочитать буфер обмена: {}", e);
                return None;
            }
        };

        debug_if_enabled!("Изменение буфера: token={}, payload={}", token, payload);
        Some(ClipboardSnapshot::new(token, payload))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{ClipshipError, Result};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    pub(crate) struct FakeStoreState {
        pub token: u64,
        pub text: Option<String>,
        pub fail_token: bool,
        pub token_queries: u64,
    }

    /// Хранилище с общим состоянием — тест мутирует его через второй handle
    #[derive(Clone)]
    pub(crate) struct FakeStore {
        pub state: Arc<Mutex<FakeStoreState>>,
    }

    impl FakeStore {
        pub fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeStoreState {
                    text: Some(String::new()),
                    ..FakeStoreState::default()
                })),
            }
        }
    }

    impl ClipboardStore for FakeStore {
        fn change_token(&mut self) -> Result<u64> {
            let mut state = self.state.lock();
            state.token_queries += 1;
            if state.fail_token {
                return Err(ClipshipError::Internal("store down".to_string()));
            }
            Ok(state.token)
        }

        fn read_text(&mut self) -> Result<Option<String>> {
            Ok(self.state.lock().text.clone())
        }
    }

    fn set_clipboard(store: &FakeStore, token: u64, text: Option<&str>) {
        let mut state = store.state.lock();
        state.token = token;
        state.text = text.map(str::to_string);
    }

    #[test]
    fn test_unchanged_token_yields_none() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store));
        for _ in 0..5 {
            assert!(watcher.poll().is_none());
        }
    }

    #[test]
    fn test_change_detected_on_first_poll_after_mutation() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store.clone()));
        assert!(watcher.poll().is_none());

        set_clipboard(&store, 1, Some("hello world"));

        let snapshot = watcher.poll().expect("изменение должно быть замечено");
        assert_eq!(snapshot.change_token, 1);
        assert_eq!(
            snapshot.payload,
            ClipboardPayload::Text("hello world".to_string())
        );

        // повторный опрос без новых изменений — тишина
        assert!(watcher.poll().is_none());
    }

    #[test]
    fn test_intermediate_changes_collapse_into_one() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store.clone()));
        assert!(watcher.poll().is_none());

        // токен прыгнул сразу на 5 — виден только последний снимок
        set_clipboard(&store, 5, Some("latest"));

        let snapshot = watcher.poll().unwrap();
        assert_eq!(snapshot.change_token, 5);
        assert!(watcher.poll().is_none());
    }

    #[test]
    fn test_trimming_is_idempotent() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store.clone()));

        set_clipboard(&store, 1, Some("  x  "));
        let padded = watcher.poll().unwrap();

        set_clipboard(&store, 2, Some("x"));
        let bare = watcher.poll().unwrap();

        assert_eq!(padded.payload, bare.payload);
    }

    #[test]
    fn test_empty_and_non_text_variants() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store.clone()));

        set_clipboard(&store, 1, Some("   \n "));
        assert_eq!(watcher.poll().unwrap().payload, ClipboardPayload::Empty);

        set_clipboard(&store, 2, None);
        assert_eq!(watcher.poll().unwrap().payload, ClipboardPayload::NonText);
    }

    #[test]
    fn test_inaccessible_store_is_no_change() {
        let store = FakeStore::new();
        let mut watcher = ClipboardWatcher::new(Box::new(store.clone()));
        store.state.lock().fail_token = true;
        assert!(watcher.poll().is_none());

        // после восстановления изменение всё ещё детектируется
        store.state.lock().fail_token = false;
        set_clipboard(&store, 3, Some("recovered"));
        assert!(watcher.poll().is_some());
    }
}
