//! Query Compiler
//!
//! Folds a [`FilterParams`] request into a [`CompiledQuery`]: one predicate combining every
//! active filter with logical AND, the resolved sort order, and the requested page.
//!
//! Category filters need the category's scope, which lives in a store. Callers resolve the scope
//! first and hand it in, so compiling stays a pure function of its inputs.

use smallvec::SmallVec;

use crate::{
    categories::{CategoryScope, UnknownCategoryPolicy},
    filters::FilterParams,
    pagination::PageRequest,
    predicate::{Condition, PriceBound, PriceRange, ProductPredicate},
    sorting::ProductSort,
};

/// A product listing query ready for a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Products to include.
    pub predicate: ProductPredicate,

    /// Listing order.
    pub sort: ProductSort,

    /// Requested page.
    pub page: PageRequest,
}

/// Compiles listing requests into store queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCompiler {
    policy: UnknownCategoryPolicy,
}

impl QueryCompiler {
    /// Create a compiler applying `policy` to unknown category slugs.
    #[must_use]
    pub fn new(policy: UnknownCategoryPolicy) -> Self {
        Self { policy }
    }

    /// Policy applied when a requested category does not exist.
    pub fn policy(&self) -> UnknownCategoryPolicy {
        self.policy
    }

    /// Compile a listing request.
    ///
    /// `scope` is the resolved scope of the requested category. It is ignored when the request
    /// names no category, and an empty scope is handled according to the compiler's
    /// [`UnknownCategoryPolicy`]. Malformed price bounds are carried through unvalidated.
    pub fn compile(&self, params: &FilterParams, scope: Option<CategoryScope>) -> CompiledQuery {
        let mut predicate = ProductPredicate::all();

        if let Some(range) = PriceRange::new(
            params.min_price().map(PriceBound::new),
            params.max_price().map(PriceBound::new),
        ) {
            predicate = predicate.and(Condition::Price(range));
        }

        if let Some(tenant) = params.tenant_slug() {
            predicate = predicate.and(Condition::TenantSlug(tenant.to_owned()));
        }

        if params.category().is_some() {
            match (scope, self.policy) {
                (Some(scope), _) if !scope.is_empty() => {
                    predicate = predicate.and(Condition::CategorySlugIn(scope));
                }
                (_, UnknownCategoryPolicy::MatchAll) => {}
                (_, UnknownCategoryPolicy::MatchNone) => {
                    predicate = predicate.and(Condition::Nothing);
                }
            }
        }

        if !params.tags().is_empty() {
            let names: SmallVec<[String; 3]> = params.tags().iter().cloned().collect();

            predicate = predicate.and(Condition::AnyTagNamed(names));
        }

        CompiledQuery {
            predicate,
            sort: params.sort.into(),
            page: params.page_request(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        filters::DEFAULT_LIMIT,
        sorting::{SortDirection, SortField, SortMode},
    };

    use super::*;

    #[test]
    fn test_empty_request_is_unconstrained() {
        let query = QueryCompiler::default().compile(&FilterParams::default(), None);

        assert!(query.predicate.is_unconstrained(), "nothing should be filtered");
        assert_eq!(query.sort, ProductSort::NEWEST_FIRST);
        assert_eq!(query.page, PageRequest::new(1, DEFAULT_LIMIT));
    }

    #[test]
    fn test_category_uses_resolved_scope() {
        let scope = CategoryScope::from_family("design", ["ui", "ux"]);
        let params = FilterParams::default().with_category("design");

        let query = QueryCompiler::default().compile(&params, Some(scope.clone()));

        assert_eq!(query.predicate.conditions(), [Condition::CategorySlugIn(scope)]);
    }

    #[test]
    fn test_scope_without_category_request_is_ignored() {
        let scope = CategoryScope::from_family("design", ["ui"]);

        let query = QueryCompiler::default().compile(&FilterParams::default(), Some(scope));

        assert!(query.predicate.is_unconstrained(), "scope alone should not filter");
    }

    #[test]
    fn test_unknown_category_matches_all_by_default() {
        let params = FilterParams::default().with_category("does-not-exist");

        let query = QueryCompiler::default().compile(&params, Some(CategoryScope::empty()));

        assert!(
            query.predicate.is_unconstrained(),
            "unknown category should drop the constraint"
        );
    }

    #[test]
    fn test_unknown_category_can_match_none() {
        let params = FilterParams::default().with_category("does-not-exist");

        let query = QueryCompiler::new(UnknownCategoryPolicy::MatchNone)
            .compile(&params, Some(CategoryScope::empty()));

        assert_eq!(query.predicate.conditions(), [Condition::Nothing]);
    }

    #[test]
    fn test_price_bounds_form_one_range() {
        let params = FilterParams::default().with_price(Some("10"), Some("15"));

        let query = QueryCompiler::default().compile(&params, None);

        let expected = PriceRange::new(Some(PriceBound::new("10")), Some(PriceBound::new("15")))
            .map(Condition::Price);

        assert_eq!(query.predicate.conditions().first(), expected.as_ref());
        assert_eq!(query.predicate.conditions().len(), 1);
    }

    #[test]
    fn test_malformed_price_compiles_without_error() {
        let params = FilterParams::default().with_price(Some("ten"), None);

        let query = QueryCompiler::default().compile(&params, None);

        assert_eq!(query.predicate.conditions().len(), 1);
    }

    #[test]
    fn test_all_filters_are_combined() {
        let scope = CategoryScope::from_family("design", ["ui"]);
        let params = FilterParams::default()
            .with_category("design")
            .with_price(None, Some("50"))
            .with_tags(["figma", "icons"])
            .with_tenant("store-x")
            .with_sort(SortMode::Trending)
            .with_page(2, 12);

        let query = QueryCompiler::default().compile(&params, Some(scope));

        let conditions = query.predicate.conditions();

        assert_eq!(conditions.len(), 4);
        assert!(matches!(conditions.first(), Some(Condition::Price(_))));
        assert_eq!(
            conditions.get(1),
            Some(&Condition::TenantSlug("store-x".to_string()))
        );
        assert!(matches!(conditions.get(2), Some(Condition::CategorySlugIn(_))));
        assert!(matches!(conditions.get(3), Some(Condition::AnyTagNamed(names)) if names.len() == 2));
        assert_eq!(
            query.sort,
            ProductSort {
                field: SortField::Name,
                direction: SortDirection::Ascending,
            }
        );
        assert_eq!(query.page, PageRequest::new(2, 12));
    }
}
