//! Property-based tests for configuration bounds.
//!
//! Test coverage:
//! - Any timeout within bounds is accepted verbatim by the loader
//! - Any timeout above the maximum is rejected
//! - The per-operation default selector always returns the matching field

use proptest::prelude::*;
use std::time::Duration;

use admin_config::constants::MAX_TIMEOUT_SECS;
use admin_config::{ConfigError, ConfigLoader, TimeoutDefaults};

fn valid_secs() -> impl Strategy<Value = u64> {
    1u64..=MAX_TIMEOUT_SECS
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_in_bounds_timeouts_preserved(
        destructive in valid_secs(),
        read in valid_secs(),
        master in valid_secs(),
    ) {
        let config = ConfigLoader::new()
            .with_destructive_timeout(Duration::from_secs(destructive))
            .with_read_timeout(Duration::from_secs(read))
            .with_master_node_timeout(Duration::from_secs(master))
            .build()
            .expect("in-bounds timeouts must build");

        prop_assert_eq!(config.timeouts.destructive, Duration::from_secs(destructive));
        prop_assert_eq!(config.timeouts.read, Duration::from_secs(read));
        prop_assert_eq!(config.master_node_timeout, Duration::from_secs(master));
    }

    #[test]
    fn test_out_of_bounds_timeouts_rejected(secs in (MAX_TIMEOUT_SECS + 1)..(MAX_TIMEOUT_SECS * 10)) {
        let result = ConfigLoader::new()
            .with_destructive_timeout(Duration::from_secs(secs))
            .build();

        let is_invalid_timeout = matches!(result, Err(ConfigError::InvalidTimeout { .. }));
        prop_assert!(is_invalid_timeout);
    }

    #[test]
    fn test_for_operation_selects_field(destructive in valid_secs(), read in valid_secs()) {
        let defaults = TimeoutDefaults {
            destructive: Duration::from_secs(destructive),
            read: Duration::from_secs(read),
        };

        prop_assert_eq!(defaults.for_operation(true), Duration::from_secs(destructive));
        prop_assert_eq!(defaults.for_operation(false), Duration::from_secs(read));
    }
}
