//! Centralized constants for the cluster administration workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication.

// =============================================================================
// Request Timeout Defaults
// =============================================================================

/// Default acknowledgement timeout for destructive operations (index deletion).
pub const DEFAULT_DESTRUCTIVE_TIMEOUT_SECS: u64 = 60;

/// Default timeout for read operations (cluster health).
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Default time allowed to reach the coordinating node.
pub const DEFAULT_MASTER_NODE_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Timeout Configuration Bounds
// =============================================================================

/// Maximum allowed configured timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

// =============================================================================
// Table Rendering
// =============================================================================

/// `strftime` pattern for the wall-clock column of cat tables.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Placeholder rendered for cells without a value.
pub const DEFAULT_MISSING_VALUE: &str = "-";

// =============================================================================
// Environment Variables
// =============================================================================

/// Destructive operation timeout override, in seconds.
pub const ENV_DESTRUCTIVE_TIMEOUT: &str = "ADMIN_DESTRUCTIVE_TIMEOUT";

/// Read operation timeout override, in seconds.
pub const ENV_READ_TIMEOUT: &str = "ADMIN_READ_TIMEOUT";

/// Coordinating-node timeout override, in seconds.
pub const ENV_MASTER_TIMEOUT: &str = "ADMIN_MASTER_TIMEOUT";

/// Require explicit index names for destructive operations (`true`/`false`).
pub const ENV_DESTRUCTIVE_REQUIRES_NAME: &str = "ADMIN_DESTRUCTIVE_REQUIRES_NAME";
