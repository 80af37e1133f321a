//! Property-based tests for request building.
//!
//! Test coverage:
//! - Setters are last-write-wins for timeouts and indices options
//! - Malformed time values never change the previous timeout
//! - Formatting a duration and parsing it back is lossless

use proptest::prelude::*;
use std::time::Duration;

use admin_client::{
    AdminError, ExpandWildcards, IndicesOptions, RequestBuilder, format_time_value,
    parse_time_value,
};
use admin_config::AdminConfig;

fn positive_duration() -> impl Strategy<Value = Duration> {
    (1u64..=86_400_000).prop_map(Duration::from_millis)
}

fn expand_wildcards() -> impl Strategy<Value = ExpandWildcards> {
    prop_oneof![
        Just(ExpandWildcards::None),
        Just(ExpandWildcards::Open),
        Just(ExpandWildcards::Closed),
        Just(ExpandWildcards::All),
    ]
}

fn consistent_options() -> impl Strategy<Value = IndicesOptions> {
    (any::<bool>(), any::<bool>(), expand_wildcards()).prop_map(
        |(ignore_unavailable, allow_no_indices, expand)| {
            IndicesOptions::strict_expand_open()
                .with_ignore_unavailable(ignore_unavailable)
                .with_allow_no_indices(allow_no_indices)
                .with_expand_wildcards(expand)
        },
    )
}

/// Strings that are not valid time values: letters only, a number with an
/// unknown unit, or a negative amount.
fn malformed_time_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        (1u32..1000, "[xyzqkj]{1,3}").prop_map(|(n, unit)| format!("{}{}", n, unit)),
        (1u32..1000).prop_map(|n| format!("-{}s", n)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_timeout_last_write_wins(values in prop::collection::vec(positive_duration(), 1..8)) {
        let mut builder = RequestBuilder::delete_index(["logs"], &AdminConfig::default());
        for value in &values {
            builder.with_timeout(*value);
        }

        let request = builder.build().expect("positive timeouts must build");
        prop_assert_eq!(request.timeout(), *values.last().unwrap());
    }

    #[test]
    fn test_indices_options_last_write_wins(
        values in prop::collection::vec(consistent_options(), 1..8),
    ) {
        let mut builder = RequestBuilder::cluster_health(["logs"], &AdminConfig::default());
        for value in &values {
            builder.with_indices_options(*value);
        }

        let request = builder.build().expect("consistent options must build");
        prop_assert_eq!(request.indices_options(), *values.last().unwrap());
    }

    #[test]
    fn test_malformed_timeout_keeps_previous(
        previous in positive_duration(),
        input in malformed_time_value(),
    ) {
        let mut builder = RequestBuilder::delete_index(["logs"], &AdminConfig::default());
        builder.with_timeout(previous);

        let result = builder.with_timeout_str(&input).map(|_| ());
        let is_parse_error = matches!(result, Err(AdminError::Parse { .. }));
        prop_assert!(is_parse_error, "input {:?} was accepted", input);
        prop_assert_eq!(builder.timeout(), previous);
    }

    #[test]
    fn test_format_then_parse_is_lossless(nanos in 1u64..=4_000_000_000_000_000) {
        let duration = Duration::from_nanos(nanos);
        let text = format_time_value(duration);
        prop_assert_eq!(parse_time_value(&text, "timeout").unwrap(), duration);
    }
}
