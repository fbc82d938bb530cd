//! Filter Parameters
//!
//! The product listing request as a storefront sends it. Every field is optional; empty strings
//! and empty tag lists count as absent.

use serde::{Deserialize, Serialize};

use crate::{pagination::PageRequest, sorting::SortMode};

/// Default number of products on a listing page.
pub const DEFAULT_LIMIT: u32 = 8;

/// Product listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    /// 1-based page cursor.
    pub cursor: u32,

    /// Page size.
    pub limit: u32,

    /// Category slug.
    pub category: Option<String>,

    /// Inclusive minimum price, unparsed.
    pub min_price: Option<String>,

    /// Inclusive maximum price, unparsed.
    pub max_price: Option<String>,

    /// Tag names, any of which a product must carry.
    pub tags: Option<Vec<String>>,

    /// Sort mode.
    pub sort: Option<SortMode>,

    /// Slug of the tenant whose catalog is listed.
    pub tenant_slug: Option<String>,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            cursor: 1,
            limit: DEFAULT_LIMIT,
            category: None,
            min_price: None,
            max_price: None,
            tags: None,
            sort: None,
            tenant_slug: None,
        }
    }
}

impl FilterParams {
    /// Requested category slug, if any.
    pub fn category(&self) -> Option<&str> {
        non_empty(self.category.as_deref())
    }

    /// Requested minimum price, if any.
    pub fn min_price(&self) -> Option<&str> {
        non_empty(self.min_price.as_deref())
    }

    /// Requested maximum price, if any.
    pub fn max_price(&self) -> Option<&str> {
        non_empty(self.max_price.as_deref())
    }

    /// Requested tag names. Empty when no tag filter applies.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    /// Requested tenant slug, if any.
    pub fn tenant_slug(&self) -> Option<&str> {
        non_empty(self.tenant_slug.as_deref())
    }

    /// Requested page.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.cursor, self.limit)
    }

    /// Restrict the listing to a category.
    #[must_use]
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category = Some(slug.into());
        self
    }

    /// Restrict the listing to a price range.
    #[must_use]
    pub fn with_price(mut self, min: Option<&str>, max: Option<&str>) -> Self {
        self.min_price = min.map(str::to_owned);
        self.max_price = max.map(str::to_owned);
        self
    }

    /// Restrict the listing to products carrying any of these tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Order the listing.
    #[must_use]
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Restrict the listing to one tenant's catalog.
    #[must_use]
    pub fn with_tenant(mut self, slug: impl Into<String>) -> Self {
        self.tenant_slug = Some(slug.into());
        self
    }

    /// Request a specific page.
    #[must_use]
    pub fn with_page(mut self, cursor: u32, limit: u32) -> Self {
        self.cursor = cursor;
        self.limit = limit;
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_empty_request_uses_defaults() -> TestResult {
        let params: FilterParams = serde_json::from_str("{}")?;

        assert_eq!(params, FilterParams::default());
        assert_eq!(params.cursor, 1);
        assert_eq!(params.limit, DEFAULT_LIMIT);

        Ok(())
    }

    #[test]
    fn test_request_fields_are_camel_case_and_nullable() -> TestResult {
        let params: FilterParams = serde_json::from_str(
            r#"{
                "cursor": 3,
                "limit": 20,
                "category": "design",
                "minPrice": "10",
                "maxPrice": null,
                "tags": ["figma"],
                "sort": "hot_and_new",
                "tenantSlug": null
            }"#,
        )?;

        assert_eq!(params.cursor, 3);
        assert_eq!(params.limit, 20);
        assert_eq!(params.category(), Some("design"));
        assert_eq!(params.min_price(), Some("10"));
        assert_eq!(params.max_price(), None);
        assert_eq!(params.tags(), ["figma"]);
        assert_eq!(params.sort, Some(SortMode::HotAndNew));
        assert_eq!(params.tenant_slug(), None);

        Ok(())
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let params = FilterParams::default()
            .with_category("")
            .with_price(Some(""), Some(""))
            .with_tenant("")
            .with_tags(Vec::<String>::new());

        assert_eq!(params.category(), None);
        assert_eq!(params.min_price(), None);
        assert_eq!(params.max_price(), None);
        assert_eq!(params.tenant_slug(), None);
        assert!(params.tags().is_empty(), "no tags should be requested");
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let result = serde_json::from_str::<FilterParams>(r#"{"sort": "popular"}"#);

        assert!(result.is_err(), "unknown sort should fail to deserialize");
    }
}
