use std::sync::Arc;

use crate::error::Result;
use crate::services::deep_link::DeepLink;

/// Trait for target activators that can run in different modes
#[async_trait::async_trait]
pub trait TargetActivator: Send + Sync {
    /// True iff the foreground window belongs to `window_class`
    async fn foreground_matches(&self, window_class: &str) -> Result<bool>;

    /// Bring a running window of `window_class` to the foreground;
    /// false when no such window exists (nothing gets launched)
    async fn activate(&self, window_class: &str) -> Result<bool>;

    /// Ask the OS to resolve and open a deep-link URI
    async fn open_deep_link(&self, link: &DeepLink) -> Result<bool>;
}

/// Factory function to create an appropriate target activator based on the dry_run flag
pub fn create_target_activator(dry_run: bool) -> Result<Arc<dyn TargetActivator>> {
    if dry_run {
        Ok(Arc::new(super::dry_run::DryRunActivator::new()))
    } else {
        Ok(Arc::new(super::activator::RealTargetActivator::new()?))
    }
}
