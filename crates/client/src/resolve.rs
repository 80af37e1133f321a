//! Resolution of index patterns against cluster state.
//!
//! Responsibilities:
//! - Turn a request's patterns into concrete index names under an
//!   [`IndicesOptions`] policy.
//!
//! Invariants:
//! - The result is de-duplicated and keeps first-seen order.
//! - `_all` or an empty selector selects every index in an expanded state.
//! - A pattern starting with `-` removes its matches from what earlier
//!   patterns selected; it never adds indices.

use crate::error::DispatchError;
use crate::indices_options::IndicesOptions;
use crate::request::{is_wildcard, targets_all};

/// Lifecycle state of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexState {
    Open,
    Closed,
}

/// Read-only view of the indices a coordinator knows about.
pub trait IndexCatalog {
    /// Every index with its state, in a stable order.
    fn index_states(&self) -> Vec<(String, IndexState)>;

    /// State of a single index, if it exists.
    fn index_state(&self, name: &str) -> Option<IndexState>;
}

impl IndexCatalog for [(String, IndexState)] {
    fn index_states(&self) -> Vec<(String, IndexState)> {
        self.to_vec()
    }

    fn index_state(&self, name: &str) -> Option<IndexState> {
        self.iter()
            .find(|(index, _)| index == name)
            .map(|(_, state)| *state)
    }
}

/// Resolve `patterns` to concrete index names.
///
/// # Errors
///
/// - `index_not_found` when a concrete name is missing and unavailable
///   indices are not ignored, or when nothing resolves and
///   `allow_no_indices` is off.
/// - `index_closed` when a concrete name is closed, closed indices are
///   forbidden and unavailable indices are not ignored.
pub fn resolve_indices<C>(
    patterns: &[String],
    options: IndicesOptions,
    catalog: &C,
) -> Result<Vec<String>, DispatchError>
where
    C: IndexCatalog + ?Sized,
{
    let mut resolved: Vec<String> = Vec::new();

    if targets_all(patterns) {
        for (name, state) in catalog.index_states() {
            if expands_to(options, state) {
                push_unique(&mut resolved, name);
            }
        }
    } else {
        for (position, pattern) in patterns.iter().enumerate() {
            if let Some(excluded) = pattern.strip_prefix('-').filter(|_| position > 0) {
                resolved.retain(|name| !glob_matches(excluded, name));
                continue;
            }

            if is_wildcard(pattern) {
                for (name, state) in catalog.index_states() {
                    if expands_to(options, state) && glob_matches(pattern, &name) {
                        push_unique(&mut resolved, name);
                    }
                }
                continue;
            }

            match catalog.index_state(pattern) {
                None if options.ignore_unavailable() => {}
                None => return Err(DispatchError::index_not_found(pattern)),
                Some(IndexState::Closed) if options.forbid_closed() => {
                    if !options.ignore_unavailable() {
                        return Err(DispatchError::index_closed(pattern));
                    }
                }
                Some(_) => push_unique(&mut resolved, pattern.clone()),
            }
        }
    }

    if resolved.is_empty() && !options.allow_no_indices() {
        let selector = if patterns.is_empty() {
            "_all".to_string()
        } else {
            patterns.join(",")
        };
        return Err(DispatchError::index_not_found(&selector));
    }

    Ok(resolved)
}

fn expands_to(options: IndicesOptions, state: IndexState) -> bool {
    match state {
        IndexState::Open => options.expand_open(),
        IndexState::Closed => options.expand_closed() && !options.forbid_closed(),
    }
}

fn push_unique(resolved: &mut Vec<String>, name: String) {
    if !resolved.contains(&name) {
        resolved.push(name);
    }
}

/// Simple glob: `*` matches any run of characters, everything else is literal.
pub fn glob_matches(pattern: &str, name: &str) -> bool {
    let mut segments = pattern.split('*');
    let Some(first) = segments.next() else {
        return name.is_empty();
    };
    let Some(mut rest) = name.strip_prefix(first) else {
        return false;
    };

    let remaining: Vec<&str> = segments.collect();
    let Some((last, middle)) = remaining.split_last() else {
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(at) => rest = &rest[at + segment.len()..],
            None => return false,
        }
    }
    rest.len() >= last.len() && rest.ends_with(last)
}
