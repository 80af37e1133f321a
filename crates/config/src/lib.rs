//! Configuration management for the cluster administration pipeline.
//!
//! This crate provides the defaults and loaders that shape administrative
//! requests: per-operation timeouts, the coordinating-node timeout, and
//! guard rails for destructive actions.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{AdminConfig, TimeoutDefaults};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
