//! TargetActivator service: responsibility and boundaries
//!
//! This module and its submodules are responsible ONLY for talking to the
//! window manager and the URI-open service: foreground queries, window
//! activation and deep-link opening. It MUST NOT decide when to retry or
//! when to inject keys. All retry/injection policy is made exclusively by
//! AutomationSequencer.

mod activator;
mod dry_run;
mod sway;
mod xdotool;
mod r#trait;

pub use self::r#trait::{create_target_activator, TargetActivator};
