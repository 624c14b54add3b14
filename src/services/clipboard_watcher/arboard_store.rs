use arboard::Clipboard;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{debug, info};

use super::r#trait::ClipboardStore;
use crate::error::Result;

/// Хранилище буфера обмена поверх arboard.
///
/// arboard не даёт нативного счётчика изменений, поэтому токен
/// синтезируется: содержимое хешируется при каждом опросе, и счётчик
/// растёт при каждом отличии отпечатка от предыдущего. Смена одного
/// нетекстового содержимого на другое не различается — нетекстовые
/// копии всё равно не запускают автоматизацию.
pub struct ArboardStore {
    clipboard: Clipboard,
    token: u64,
    last_fingerprint: Option<u64>,
}

impl ArboardStore {
    pub fn new() -> Result<Self> {
        info!("Инициализация ArboardStore");
        Ok(Self {
            clipboard: Clipboard::new()?,
            token: 0,
            last_fingerprint: None,
        })
    }

    fn fingerprint(&mut self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match self.clipboard.get_text() {
            Ok(text) => {
                0u8.hash(&mut hasher);
                text.hash(&mut hasher);
            }
            Err(_) => {
                1u8.hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

impl ClipboardStore for ArboardStore {
    fn change_token(&mut self) -> Result<u64> {
        let fingerprint = self.fingerprint();
        if self.last_fingerprint != Some(fingerprint) {
            self.last_fingerprint = Some(fingerprint);
            self.token += 1;
            debug!("Отпечаток буфера обмена изменился, token={}", self.token);
        }
        Ok(self.token)
    }

    fn read_text(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
