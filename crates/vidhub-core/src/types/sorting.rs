//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parse a `sortType` query value. Anything other than `asc` is descending.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }
}

/// A sort specification: a whitelisted SQL column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// SQL column to sort by. Only ever taken from a whitelist.
    pub column: &'static str,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Resolve a client-supplied field name against a whitelist of
    /// `(wire name, column)` pairs, falling back to `default`.
    pub fn resolve(
        requested: Option<&str>,
        direction: SortDirection,
        allowed: &[(&str, &'static str)],
        default: &'static str,
    ) -> Self {
        let column = requested
            .and_then(|r| allowed.iter().find(|(name, _)| *name == r.trim()))
            .map(|(_, column)| *column)
            .unwrap_or(default);
        Self { column, direction }
    }

    /// Render as an `ORDER BY` fragment.
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.direction.as_sql())
    }
}
