//! Country identity and reporting types.
//!
//! A country is a faction owning a set of units, identified by a unique name
//! and a numeric id assigned in enlistment order. The country record itself
//! carries no unit lists: the [`Battlefield`](crate::Battlefield)'s flat unit
//! collection is the single source of truth, and per-country soldier/tank
//! views are derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric country identifier, assigned in enlistment order.
///
/// Ids are strictly increasing and never reused, even after the country is
/// eliminated. They only restart from [`CountryId::FIRST`] when the whole
/// battlefield is cleared.
///
/// # Example
///
/// ```
/// use skirmish_core::CountryId;
///
/// let first = CountryId::FIRST;
/// let second = first.next();
///
/// assert!(first < second);
/// assert_eq!(second.get(), 2);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryId(u32);

impl CountryId {
    /// The id handed to the first country enlisted on a fresh battlefield.
    pub const FIRST: Self = Self(1);

    /// Creates a `CountryId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw numeric value of this id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the id that follows this one in enlistment order.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryId({})", self.0)
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry record for an enlisted country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    name: String,
    id: CountryId,
}

impl Country {
    /// Creates a registry record with the given name and id.
    #[must_use]
    pub fn new(name: &str, id: CountryId) -> Self {
        Self {
            name: name.to_owned(),
            id,
        }
    }

    /// Returns the country's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the country's numeric id.
    #[must_use]
    pub const fn id(&self) -> CountryId {
        self.id
    }
}

/// Active unit counts for one country, as reported to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryState {
    /// Number of soldiers still on the field.
    pub soldiers: usize,
    /// Number of tanks still on the field.
    pub tanks: usize,
}
