//! Environment variable tests for the configuration loader.

use serial_test::serial;
use std::time::Duration;

use super::env_lock;
use crate::loader::builder::ConfigLoader;
use crate::loader::env::env_var_or_none;
use crate::loader::error::ConfigError;

#[test]
#[serial]
fn test_env_overrides_defaults() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("ADMIN_DESTRUCTIVE_TIMEOUT", Some("120")),
            ("ADMIN_READ_TIMEOUT", Some("3")),
            ("ADMIN_MASTER_TIMEOUT", Some("15")),
            ("ADMIN_DESTRUCTIVE_REQUIRES_NAME", Some("true")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.timeouts.destructive, Duration::from_secs(120));
            assert_eq!(config.timeouts.read, Duration::from_secs(3));
            assert_eq!(config.master_node_timeout, Duration::from_secs(15));
            assert!(config.destructive_requires_name);
        },
    );
}

#[test]
#[serial]
fn test_builder_after_env_takes_precedence() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("ADMIN_READ_TIMEOUT", Some("3"))], || {
        let config = ConfigLoader::new()
            .from_env()
            .unwrap()
            .with_read_timeout(Duration::from_secs(7))
            .build()
            .unwrap();

        assert_eq!(config.timeouts.read, Duration::from_secs(7));
    });
}

#[test]
#[serial]
fn test_invalid_timeout_env_rejected() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("ADMIN_DESTRUCTIVE_TIMEOUT", Some("sixty"))], || {
        let result = ConfigLoader::new().from_env();

        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "ADMIN_DESTRUCTIVE_TIMEOUT");
            }
            other => panic!("Expected InvalidValue, got {:?}", other.map(|_| ())),
        }
    });
}

#[test]
#[serial]
fn test_invalid_bool_env_rejected() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars([("ADMIN_DESTRUCTIVE_REQUIRES_NAME", Some("yes"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    });
}

#[test]
#[serial]
fn test_empty_env_vars_ignored() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_vars(
        [
            ("ADMIN_READ_TIMEOUT", Some("")),
            ("ADMIN_MASTER_TIMEOUT", Some("   ")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.timeouts.read, Duration::from_secs(10));
            assert_eq!(config.master_node_timeout, Duration::from_secs(30));
        },
    );
}

#[test]
#[serial]
fn test_env_var_or_none_trims() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("ADMIN_TEST_TRIM", Some("  42  "), || {
        assert_eq!(env_var_or_none("ADMIN_TEST_TRIM"), Some("42".to_string()));
    });
    temp_env::with_var("ADMIN_TEST_TRIM", None::<&str>, || {
        assert_eq!(env_var_or_none("ADMIN_TEST_TRIM"), None);
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_is_noop() {
    let _lock = env_lock().lock().unwrap();

    temp_env::with_var("DOTENV_DISABLED", Some("1"), || {
        let result = ConfigLoader::new().load_dotenv();
        assert!(result.is_ok());
    });
}
