use crate::error::Result;

/// Trait for clipboard stores that can run in different modes
pub trait ClipboardStore: Send {
    /// Current change token; grows on every content mutation
    fn change_token(&mut self) -> Result<u64>;

    /// Current textual content; `None` when the store holds non-text data
    fn read_text(&mut self) -> Result<Option<String>>;
}

/// Factory function to create an appropriate clipboard store based on the dry_run flag
pub fn create_clipboard_store(dry_run: bool) -> Result<Box<dyn ClipboardStore>> {
    if dry_run {
        Ok(Box::new(super::dry_run::DryRunStore::new()))
    } else {
        Ok(Box::new(super::arboard_store::ArboardStore::new()?))
    }
}
