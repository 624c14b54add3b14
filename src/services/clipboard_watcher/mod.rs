//! ClipboardWatcher service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for observing the
//! system clipboard store (change token + current payload) and producing
//! ClipboardSnapshot(s). It MUST NOT contain any automation logic or
//! decide what happens with the copied text. All automation decisions are
//! made exclusively by AutomationSequencer, driven by MonitorController.

mod arboard_store;
mod dry_run;
mod watcher;
mod r#trait;

pub use self::r#trait::{create_clipboard_store, ClipboardStore};
pub use self::watcher::ClipboardWatcher;

#[cfg(test)]
pub(crate) use self::watcher::tests::FakeStore;
