//! Menu item records and `EX` reply parsing
//!
//! Menu traffic is the bulk of preset handling: presets are ordered
//! (code, value) records applied with `EX{code}{value};`, and a snapshot
//! reads every known code back with `EX{code};`. Values are opaque ASCII
//! passed through verbatim; per-menu range checking stays on the radio.

use crate::menu_table;

/// Placeholder recorded when a menu query yields nothing usable
pub const MENU_SENTINEL: &str = "----";

/// One preset entry: a menu code and the value to program
///
/// Order-significant; duplicates are allowed and the last write wins on the
/// device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetRecord {
    /// Three-digit menu code
    pub code: String,
    /// Value text, passed through verbatim
    pub value: String,
}

impl PresetRecord {
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }

    /// Records with an empty code or value are skipped, not applied
    pub fn is_well_formed(&self) -> bool {
        !self.code.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// One row of a menu snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuReading {
    /// Three-digit menu code
    pub code: String,
    /// Human-readable description from the static menu table
    pub description: String,
    /// Value text, or [`MENU_SENTINEL`] when the query failed
    pub value: String,
}

impl MenuReading {
    /// Build a reading for `code`, labeling it from the menu table
    pub fn new(code: &str, value: impl Into<String>) -> Self {
        let description = menu_table::describe(code)
            .map(|d| d.description.to_string())
            .unwrap_or_default();
        Self {
            code: code.to_string(),
            description,
            value: value.into(),
        }
    }

    /// Returns true if the query behind this reading failed
    pub fn is_sentinel(&self) -> bool {
        self.value == MENU_SENTINEL
    }
}

/// Pull the value out of a (terminator-stripped) `EX` reply
///
/// The reply must echo `EX` plus the queried code; the value is whatever
/// follows and may legitimately be empty. A wrong echo or foreign frame
/// yields `None`.
pub fn parse_value(reply: &str, code: &str) -> Option<String> {
    reply
        .strip_prefix("EX")?
        .strip_prefix(code)
        .map(|value| value.to_string())
}
