//! Product Predicates
//!
//! A [`ProductPredicate`] is the conjunction of every active listing filter. Stores either
//! evaluate it directly with [`ProductPredicate::matches`] or translate its [`Condition`]s into
//! their own query language.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::categories::CategoryScope;

/// The view of a product a predicate needs in order to be evaluated in memory.
pub trait Filterable {
    /// Stable identifier, used to break sort ties.
    type Id: Ord;

    /// Product identifier.
    fn id(&self) -> Self::Id;

    /// Product name.
    fn name(&self) -> &str;

    /// Product price.
    fn price(&self) -> Decimal;

    /// Creation time.
    fn created_at(&self) -> Timestamp;

    /// Slug of the product's category, if it has one.
    fn category_slug(&self) -> Option<&str>;

    /// Slug of the product's tenant, if it has one.
    fn tenant_slug(&self) -> Option<&str>;

    /// Whether the product carries a tag with exactly this name.
    fn has_tag_named(&self, name: &str) -> bool;
}

/// A price bound exactly as the caller supplied it.
///
/// Bounds are not validated when a query is compiled. A bound that is not a decimal number
/// matches no product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBound(String);

impl PriceBound {
    /// Wrap a raw price bound.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw bound.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bound as a decimal, when it parses as one.
    pub fn value(&self) -> Option<Decimal> {
        Decimal::from_str(self.0.trim()).ok()
    }
}

/// An inclusive price range with at least one bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRange {
    min: Option<PriceBound>,
    max: Option<PriceBound>,
}

impl PriceRange {
    /// Build a range from optional bounds. Returns `None` when neither bound is present.
    pub fn new(min: Option<PriceBound>, max: Option<PriceBound>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }

        Some(Self { min, max })
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> Option<&PriceBound> {
        self.min.as_ref()
    }

    /// Inclusive upper bound.
    pub fn max(&self) -> Option<&PriceBound> {
        self.max.as_ref()
    }

    /// Whether `price` lies within the range.
    pub fn contains(&self, price: Decimal) -> bool {
        let above_min = self
            .min
            .as_ref()
            .is_none_or(|bound| bound.value().is_some_and(|min| price >= min));

        let below_max = self
            .max
            .as_ref()
            .is_none_or(|bound| bound.value().is_some_and(|max| price <= max));

        above_min && below_max
    }
}

/// A single listing constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Price lies within an inclusive range.
    Price(PriceRange),

    /// Tenant slug equals the given slug exactly.
    TenantSlug(String),

    /// Category slug is a member of the scope.
    CategorySlugIn(CategoryScope),

    /// At least one tag carries one of the given names.
    AnyTagNamed(SmallVec<[String; 3]>),

    /// Matches no product.
    Nothing,
}

impl Condition {
    /// Evaluate the condition against a product.
    pub fn matches<P: Filterable>(&self, product: &P) -> bool {
        match self {
            Self::Price(range) => range.contains(product.price()),
            Self::TenantSlug(slug) => product.tenant_slug() == Some(slug.as_str()),
            Self::CategorySlugIn(scope) => product
                .category_slug()
                .is_some_and(|slug| scope.contains(slug)),
            Self::AnyTagNamed(names) => names.iter().any(|name| product.has_tag_named(name)),
            Self::Nothing => false,
        }
    }
}

/// Conjunction of listing constraints. With no conditions it matches every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPredicate {
    conditions: SmallVec<[Condition; 4]>,
}

impl ProductPredicate {
    /// A predicate matching every product.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a condition to the conjunction.
    #[must_use]
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);

        self
    }

    /// Active conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Whether the predicate places no constraint on products.
    pub fn is_unconstrained(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the predicate against a product.
    pub fn matches<P: Filterable>(&self, product: &P) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition.matches(product))
    }
}
