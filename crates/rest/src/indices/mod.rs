//! Index management endpoints.

pub mod delete;

pub use delete::{DELETE_COLUMNS, DeleteIndexProjector, IndexAck, RestDeleteIndexAction};
