//! Sorting

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::predicate::Filterable;

/// Storefront sort modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Oldest products first.
    Curated,

    /// Products by name. Stands in for a popularity signal the catalog does not have.
    Trending,

    /// Newest products first.
    HotAndNew,
}

impl SortMode {
    /// Every sort mode, in display order.
    pub const ALL: [Self; 3] = [Self::Curated, Self::Trending, Self::HotAndNew];

    /// Wire name of the sort mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Curated => "curated",
            Self::Trending => "trending",
            Self::HotAndNew => "hot_and_new",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown sort mode.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort \"{0}\", expected one of: curated, trending, hot_and_new")]
pub struct SortModeError(String);

impl FromStr for SortMode {
    type Err = SortModeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == value)
            .ok_or_else(|| SortModeError(value.to_owned()))
    }
}

/// Product field a listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Creation time.
    CreatedAt,

    /// Product name, compared lexicographically.
    Name,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,

    /// Largest first.
    Descending,
}

/// Resolved listing order. Equal keys fall back to ascending product id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    /// Field to order by.
    pub field: SortField,

    /// Direction to order in.
    pub direction: SortDirection,
}

impl ProductSort {
    /// Newest first, the order used when no sort mode is given.
    pub const NEWEST_FIRST: Self = Self {
        field: SortField::CreatedAt,
        direction: SortDirection::Descending,
    };

    /// Compare two products under this order.
    pub fn compare<P: Filterable>(&self, a: &P, b: &P) -> Ordering {
        let ordering = match self.field {
            SortField::CreatedAt => a.created_at().cmp(&b.created_at()),
            SortField::Name => a.name().cmp(b.name()),
        };

        let ordering = match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        };

        ordering.then_with(|| a.id().cmp(&b.id()))
    }
}

impl Default for ProductSort {
    fn default() -> Self {
        Self::NEWEST_FIRST
    }
}

impl From<SortMode> for ProductSort {
    fn from(mode: SortMode) -> Self {
        match mode {
            SortMode::Curated => Self {
                field: SortField::CreatedAt,
                direction: SortDirection::Ascending,
            },
            SortMode::Trending => Self {
                field: SortField::Name,
                direction: SortDirection::Ascending,
            },
            SortMode::HotAndNew => Self::NEWEST_FIRST,
        }
    }
}

impl From<Option<SortMode>> for ProductSort {
    fn from(mode: Option<SortMode>) -> Self {
        mode.map_or(Self::NEWEST_FIRST, Self::from)
    }
}
