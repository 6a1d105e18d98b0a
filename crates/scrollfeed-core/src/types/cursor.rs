//! Opaque pagination cursor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidArgumentError};

/// An item that has a position in a strictly ordered collection.
///
/// The position is the store-assigned identifier; collections are walked
/// in descending position order.
pub trait Positioned {
    /// Returns the ordering key of this item.
    fn position(&self) -> i64;
}

/// An opaque marker for a position in an ordered collection.
///
/// A cursor is produced by a page fetch and is only meant to be echoed
/// back on the next request. It marks the last item already delivered in
/// the walk direction: the next page holds items strictly before it.
///
/// On the wire a cursor is a bare number, and its `Display` form is the
/// same decimal token, so a cursor printed by one tool can be pasted into
/// another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(i64);

impl Cursor {
    /// The cursor pointing just past `item` in the walk direction.
    pub fn after<T: Positioned + ?Sized>(item: &T) -> Self {
        Self(item.position())
    }

    /// The exclusive upper bound this cursor stands for.
    pub(crate) fn bound(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|e| {
            InvalidArgumentError::Cursor {
                value: s.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
