use tracing::info;

use super::r#trait::ClipboardStore;
use crate::error::Result;

const FAKE_PHRASES: &[&str] = &[
    "hello from dry_run",
    "copied text - dry_run",
    "one more copy - dry_run",
];

// Каждый N-й опрос эмулирует новую копию в буфер
const POLLS_PER_CHANGE: u64 = 10;

/// Dry-run режим — хранилище эмулирует периодические копирования
pub struct DryRunStore {
    token: u64,
    polls: u64,
    phrase_index: usize,
}

impl DryRunStore {
    pub fn new() -> Self {
        info!("Dry-run режим - ClipboardStore работает в режиме эмуляции");
        Self {
            token: 0,
            polls: 0,
            phrase_index: 0,
        }
    }
}

impl ClipboardStore for DryRunStore {
    fn change_token(&mut self) -> Result<u64> {
        self.polls += 1;
        if self.polls % POLLS_PER_CHANGE == 0 {
            self.token += 1;
            self.phrase_index = (self.phrase_index + 1) % FAKE_PHRASES.len();
            info!(
                "Dry-run: эмулируем новую копию: '{}'",
                FAKE_PHRASES[self.phrase_index]
            );
        }
        Ok(self.token)
    }

    fn read_text(&mut self) -> Result<Option<String>> {
        Ok(Some(FAKE_PHRASES[self.phrase_index].to_string()))
    }
}
