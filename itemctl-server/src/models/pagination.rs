//! Offset/limit window for the list operation

use serde::Deserialize;

use super::ValidationError;

/// Default number of rows returned by a list call
pub const DEFAULT_LIMIT: u64 = 100;

/// Rows to skip and the maximum to return.
///
/// `limit` has no upper bound; callers may ask for arbitrarily large pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub skip: u64,
    pub limit: u64,
}

impl ListWindow {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// SQL OFFSET value, saturated to SQLite's integer range.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.skip).unwrap_or(i64::MAX)
    }

    /// SQL LIMIT value, saturated to SQLite's integer range.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Raw query parameters, parsed into a [`ListWindow`] so a bad value can
/// be reported against its field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<ListParams> for ListWindow {
    type Error = ValidationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        Ok(Self {
            skip: parse_count("skip", params.skip.as_deref())?.unwrap_or(defaults.skip),
            limit: parse_count("limit", params.limit.as_deref())?.unwrap_or(defaults.limit),
        })
    }
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<Option<u64>, ValidationError> {
    raw.map(|value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidValue {
                field,
                reason: "must be a non-negative integer",
            })
    })
    .transpose()
}
