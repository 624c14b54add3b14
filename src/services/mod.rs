pub mod clipboard_watcher;
pub mod deep_link;
pub mod input_injector;
pub mod keycode_map;
pub mod monitor;
pub mod sequencer;
pub mod target_activator;

pub use clipboard_watcher::{create_clipboard_store, ClipboardWatcher};
pub use input_injector::create_input_sink;
pub use monitor::MonitorController;
pub use sequencer::AutomationSequencer;
pub use target_activator::create_target_activator;
