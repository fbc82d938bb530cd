//! Categories
//!
//! A category page lists the products of the category itself and of its direct subcategories.
//! [`CategoryScope`] is the flat set of category slugs a product's category must be one of.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// The set of category slugs matched by a category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryScope {
    slugs: SmallVec<[String; 4]>,
}

impl CategoryScope {
    /// A scope for a category that could not be found.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the scope of a category and its immediate children.
    ///
    /// The category's own slug comes first, followed by each child slug in the order given.
    /// Repeated slugs are listed once and a child carrying the parent's slug is ignored.
    pub fn from_family<I, S>(slug: &str, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = FxHashSet::default();
        let mut slugs = SmallVec::new();

        seen.insert(slug.to_owned());
        slugs.push(slug.to_owned());

        for child in children {
            let child = child.into();

            if seen.insert(child.clone()) {
                slugs.push(child);
            }
        }

        Self { slugs }
    }

    /// Slugs in this scope.
    pub fn slugs(&self) -> &[String] {
        &self.slugs
    }

    /// Whether the scope matches no category at all.
    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    /// Whether `slug` is a member of this scope.
    pub fn contains(&self, slug: &str) -> bool {
        self.slugs.iter().any(|candidate| candidate == slug)
    }
}

/// What a category filter does when its slug matches no category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Drop the category constraint and list products as if no category was requested.
    #[default]
    MatchAll,

    /// Keep the constraint, so the listing is empty.
    MatchNone,
}

impl UnknownCategoryPolicy {
    /// Policy name as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MatchAll => "match_all",
            Self::MatchNone => "match_none",
        }
    }
}

impl fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category policy \"{0}\", expected one of: match_all, match_none")]
pub struct UnknownCategoryPolicyError(String);

impl FromStr for UnknownCategoryPolicy {
    type Err = UnknownCategoryPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "match_all" | "matchAll" => Ok(Self::MatchAll),
            "match_none" | "matchNone" => Ok(Self::MatchNone),
            other => Err(UnknownCategoryPolicyError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_parent_scope_lists_parent_then_children() {
        let scope = CategoryScope::from_family("mens-clothing", ["mens-shoes", "mens-shirts"]);

        assert_eq!(
            scope.slugs(),
            ["mens-clothing", "mens-shoes", "mens-shirts"],
            "parent slug should lead the scope"
        );
    }

    #[test]
    fn test_leaf_scope_is_self_only() {
        let scope = CategoryScope::from_family("mens-shoes", Vec::<String>::new());

        assert_eq!(scope.slugs(), ["mens-shoes"], "leaf scope should be itself");
        assert!(scope.contains("mens-shoes"), "leaf scope should contain itself");
    }

    #[test]
    fn test_scope_drops_duplicates_and_self_parenting() {
        let scope = CategoryScope::from_family("design", ["design", "ui", "ui", "ux"]);

        assert_eq!(scope.slugs(), ["design", "ui", "ux"], "slugs should be unique");
    }

    #[test]
    fn test_empty_scope() {
        let scope = CategoryScope::empty();

        assert!(scope.is_empty(), "empty scope should have no slugs");
        assert!(!scope.contains("design"), "empty scope should contain nothing");
    }

    #[test]
    fn test_policy_parses_both_spellings() -> TestResult {
        assert_eq!("match_all".parse::<UnknownCategoryPolicy>()?, UnknownCategoryPolicy::MatchAll);
        assert_eq!("matchNone".parse::<UnknownCategoryPolicy>()?, UnknownCategoryPolicy::MatchNone);

        Ok(())
    }

    #[test]
    fn test_policy_rejects_unknown_names() {
        assert!(
            "strict".parse::<UnknownCategoryPolicy>().is_err(),
            "unknown names should not parse"
        );
    }

    #[test]
    fn test_policy_defaults_to_match_all() {
        assert_eq!(UnknownCategoryPolicy::default(), UnknownCategoryPolicy::MatchAll);
    }
}
