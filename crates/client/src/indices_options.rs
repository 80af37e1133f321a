//! Index resolution policy for administrative requests.
//!
//! [`IndicesOptions`] controls how target patterns resolve against cluster
//! state: whether unavailable indices are ignored, whether an empty result is
//! acceptable, which index states wildcards expand to, and whether closed
//! indices may be targeted at all.
//!
//! Invariants:
//! - Options are plain `Copy` values; every `with_*` setter returns a new value.
//! - `validate()` rejects contradictory combinations; builders call it before
//!   a request can be produced.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AdminError, Result};

bitflags! {
    /// Raw option flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct OptionFlags: u8 {
        const IGNORE_UNAVAILABLE = 1;
        const ALLOW_NO_INDICES = 1 << 1;
        const EXPAND_OPEN = 1 << 2;
        const EXPAND_CLOSED = 1 << 3;
        const FORBID_CLOSED = 1 << 4;
    }
}

/// Index states a wildcard expression expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpandWildcards {
    None,
    Open,
    Closed,
    All,
}

impl ExpandWildcards {
    fn from_flags(open: bool, closed: bool) -> Self {
        match (open, closed) {
            (true, true) => ExpandWildcards::All,
            (true, false) => ExpandWildcards::Open,
            (false, true) => ExpandWildcards::Closed,
            (false, false) => ExpandWildcards::None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ExpandWildcards::None => "none",
            ExpandWildcards::Open => "open",
            ExpandWildcards::Closed => "closed",
            ExpandWildcards::All => "all",
        }
    }

    const fn open(&self) -> bool {
        matches!(self, ExpandWildcards::Open | ExpandWildcards::All)
    }

    const fn closed(&self) -> bool {
        matches!(self, ExpandWildcards::Closed | ExpandWildcards::All)
    }
}

impl fmt::Display for ExpandWildcards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolution policy applied to a request's target patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndicesOptions {
    flags: OptionFlags,
}

impl Default for IndicesOptions {
    fn default() -> Self {
        Self::strict_expand_open()
    }
}

impl IndicesOptions {
    /// Build options from raw flags.
    pub const fn from_flags(flags: OptionFlags) -> Self {
        Self { flags }
    }

    /// Build options from the four classic switches.
    pub fn from_options(
        ignore_unavailable: bool,
        allow_no_indices: bool,
        expand_open: bool,
        expand_closed: bool,
    ) -> Self {
        let mut flags = OptionFlags::empty();
        flags.set(OptionFlags::IGNORE_UNAVAILABLE, ignore_unavailable);
        flags.set(OptionFlags::ALLOW_NO_INDICES, allow_no_indices);
        flags.set(OptionFlags::EXPAND_OPEN, expand_open);
        flags.set(OptionFlags::EXPAND_CLOSED, expand_closed);
        Self { flags }
    }

    /// Missing indices fail, empty results are allowed, wildcards expand to open indices.
    pub fn strict_expand_open() -> Self {
        Self::from_options(false, true, true, false)
    }

    /// Missing indices are ignored, empty results are allowed, wildcards expand to open indices.
    pub fn lenient_expand_open() -> Self {
        Self::from_options(true, true, true, false)
    }

    /// Missing indices fail, empty results are allowed, wildcards expand to every index.
    pub fn strict_expand_open_closed() -> Self {
        Self::from_options(false, true, true, true)
    }

    /// A single concrete, open index is required.
    pub fn strict_single_index_no_expand_forbid_closed() -> Self {
        Self::from_flags(OptionFlags::FORBID_CLOSED)
    }

    pub fn flags(&self) -> OptionFlags {
        self.flags
    }

    pub fn ignore_unavailable(&self) -> bool {
        self.flags.contains(OptionFlags::IGNORE_UNAVAILABLE)
    }

    /// Whether a missing or unavailable concrete index is an error.
    pub fn error_on_unavailable(&self) -> bool {
        !self.ignore_unavailable()
    }

    pub fn allow_no_indices(&self) -> bool {
        self.flags.contains(OptionFlags::ALLOW_NO_INDICES)
    }

    pub fn expand_wildcards(&self) -> ExpandWildcards {
        ExpandWildcards::from_flags(
            self.flags.contains(OptionFlags::EXPAND_OPEN),
            self.flags.contains(OptionFlags::EXPAND_CLOSED),
        )
    }

    pub fn expand_open(&self) -> bool {
        self.flags.contains(OptionFlags::EXPAND_OPEN)
    }

    pub fn expand_closed(&self) -> bool {
        self.flags.contains(OptionFlags::EXPAND_CLOSED)
    }

    pub fn forbid_closed(&self) -> bool {
        self.flags.contains(OptionFlags::FORBID_CLOSED)
    }

    fn with_flag(mut self, flag: OptionFlags, value: bool) -> Self {
        self.flags.set(flag, value);
        self
    }

    pub fn with_ignore_unavailable(self, value: bool) -> Self {
        self.with_flag(OptionFlags::IGNORE_UNAVAILABLE, value)
    }

    pub fn with_allow_no_indices(self, value: bool) -> Self {
        self.with_flag(OptionFlags::ALLOW_NO_INDICES, value)
    }

    pub fn with_expand_wildcards(self, expand: ExpandWildcards) -> Self {
        self.with_flag(OptionFlags::EXPAND_OPEN, expand.open())
            .with_flag(OptionFlags::EXPAND_CLOSED, expand.closed())
    }

    pub fn with_forbid_closed(self, value: bool) -> Self {
        self.with_flag(OptionFlags::FORBID_CLOSED, value)
    }

    /// Check that the flags form a consistent combination.
    ///
    /// Returns every problem found, one message each.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.expand_closed() && self.forbid_closed() {
            errors.push(
                "indices options cannot expand wildcards to closed indices while forbidding closed indices"
                    .to_string(),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overlay request parameters on top of `defaults`.
    ///
    /// `expand_wildcards` is a comma separated list of `open`, `closed`, `all`
    /// and `none`. Boolean parameters accept `true` and `false`; an empty value
    /// means `true`. Absent parameters keep the default.
    pub fn from_parameters(
        expand_wildcards: Option<&str>,
        ignore_unavailable: Option<&str>,
        allow_no_indices: Option<&str>,
        defaults: IndicesOptions,
    ) -> Result<Self> {
        let mut options = defaults;

        if let Some(value) = expand_wildcards {
            options = options.with_expand_wildcards(parse_expand_wildcards(value)?);
        }
        if let Some(value) = ignore_unavailable {
            options = options.with_ignore_unavailable(parse_flag("ignore_unavailable", value)?);
        }
        if let Some(value) = allow_no_indices {
            options = options.with_allow_no_indices(parse_flag("allow_no_indices", value)?);
        }

        Ok(options)
    }
}

fn parse_expand_wildcards(value: &str) -> Result<ExpandWildcards> {
    let mut open = false;
    let mut closed = false;
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token {
            "open" => open = true,
            "closed" => closed = true,
            "all" => {
                open = true;
                closed = true;
            }
            "none" => {
                open = false;
                closed = false;
            }
            other => {
                return Err(AdminError::parse(
                    "expand_wildcards",
                    value,
                    format!("no valid expand wildcard value [{}]", other),
                ));
            }
        }
    }
    Ok(ExpandWildcards::from_flags(open, closed))
}

/// Parse a boolean request flag; an empty value counts as `true`.
pub fn parse_flag(setting: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "" | "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AdminError::parse(
            setting,
            value,
            "expected [true] or [false]",
        )),
    }
}

impl fmt::Display for IndicesOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IndicesOptions[ignore_unavailable={}, allow_no_indices={}, expand_wildcards={}, forbid_closed={}]",
            self.ignore_unavailable(),
            self.allow_no_indices(),
            self.expand_wildcards(),
            self.forbid_closed()
        )
    }
}
