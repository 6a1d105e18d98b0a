//! Page size bound.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidArgumentError};

/// Maximum number of items returned by one page fetch.
///
/// Always within [`Limit::MIN`]`..=`[`Limit::MAX`]. Out-of-range values are
/// rejected, never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Limit(u8);

impl Limit {
    /// Smallest accepted page size.
    pub const MIN: u8 = 1;
    /// Largest accepted page size.
    pub const MAX: u8 = 100;
    /// Page size used when the caller does not name one.
    pub const DEFAULT: Limit = Limit(10);

    /// Validate a page size.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is outside `1..=100`.
    pub fn new(value: i64) -> Result<Self, Error> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(InvalidArgumentError::Limit {
                value,
                min: Self::MIN,
                max: Self::MAX,
            }
            .into());
        }
        Ok(Self(value as u8))
    }

    /// Validate an optional page size, falling back to [`Limit::DEFAULT`].
    pub fn resolve(value: Option<i64>) -> Result<Self, Error> {
        value.map_or(Ok(Self::DEFAULT), Self::new)
    }

    /// Returns the page size.
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Number of rows to request from the store: one extra to detect a next page.
    pub fn over_fetch(self) -> usize {
        self.get() + 1
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Limit {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Limit> for i64 {
    fn from(limit: Limit) -> Self {
        i64::from(limit.0)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
