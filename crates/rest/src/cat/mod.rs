//! Compact `_cat` endpoints.
//!
//! Every cat endpoint answers with a table, honours `v`, `h`, `help` and
//! `format`, and contributes one documentation line to `GET /_cat`.

pub mod health;
pub mod help;

pub use health::{HEALTH_COLUMNS, RestHealthAction, health_projector};
pub use help::RestCatAction;

use crate::controller::RestHandler;

/// A handler listed by `GET /_cat`.
pub trait CatAction: RestHandler {
    /// Usage line shown in the cat index, e.g. `/_cat/health`.
    fn documentation(&self) -> &'static str;
}
