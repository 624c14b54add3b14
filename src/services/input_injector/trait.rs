use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::events::KeyStroke;

/// Trait for input sinks that deliver synthetic key strokes to the OS
#[async_trait::async_trait]
pub trait InputSink: Send + Sync {
    /// Whether the process currently holds the right to inject input
    fn permission_granted(&self) -> bool;

    /// Issue the OS-level permission request (here: logged setup instructions)
    fn request_permission(&self);

    /// Deliver one press+release pair with the configured inter-key delay
    async fn send(&self, stroke: KeyStroke) -> Result<()>;
}

/// Factory function to create the uinput-backed input sink
pub fn create_input_sink(config: Arc<Config>, dry_run: bool) -> Result<Arc<dyn InputSink>> {
    Ok(Arc::new(super::virtual_device::VirtualDevice::new(
        "ClipShip Virtual Device",
        config,
        dry_run,
    )))
}
