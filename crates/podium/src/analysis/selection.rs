//! Filter values with an "Overall" sentinel.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The sentinel meaning "no restriction on this dimension".
pub const OVERALL: &str = "Overall";

/// A filter on one dimension: everything, or one concrete value.
///
/// `Overall` orders before every concrete value, so a sorted list of
/// selections always starts with the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Selection<T> {
    #[default]
    Overall,
    Only(T),
}

impl<T> Selection<T> {
    pub fn only(value: impl Into<T>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Selection::Overall => None,
            Selection::Only(value) => Some(value),
        }
    }

    /// Whether `candidate` passes this filter.
    pub fn admits<Q>(&self, candidate: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        match self {
            Selection::Overall => true,
            Selection::Only(value) => value.borrow() == candidate,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::Overall, Selection::Only)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == OVERALL {
            Ok(Selection::Overall)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Overall => f.write_str(OVERALL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Overall => serializer.serialize_str(OVERALL),
            Selection::Only(value) => value.serialize(serializer),
        }
    }
}
