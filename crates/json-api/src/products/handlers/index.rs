//! Product Index Handler

use salvo::{oapi::ToParameters, prelude::*};
use serde::Deserialize;

use dabro::{
    filters::{DEFAULT_LIMIT, FilterParams},
    sorting::SortMode,
};

use crate::{
    extensions::*,
    observability::observe_catalog_query,
    products::{errors::into_status_error, responses::ProductsResponse},
};

/// Product listing query string. Every parameter is optional.
#[derive(Debug, Deserialize, ToParameters)]
#[serde(rename_all = "camelCase")]
#[salvo(parameters(default_parameter_in = Query, rename_all = "camelCase"))]
pub(crate) struct ProductsQuery {
    /// Page number, starting at 1
    cursor: Option<String>,

    /// Page size
    limit: Option<String>,

    /// Category slug. A parent category also lists its subcategories' products
    category: Option<String>,

    /// Inclusive minimum price
    min_price: Option<String>,

    /// Inclusive maximum price
    max_price: Option<String>,

    /// Tag names, any of which a product must carry. Repeat the parameter for several tags
    tags: Option<Vec<String>>,

    /// One of `curated`, `trending` or `hot_and_new`
    sort: Option<String>,

    /// Only list this tenant's products
    tenant_slug: Option<String>,
}

impl ProductsQuery {
    fn into_filter_params(self) -> Result<FilterParams, StatusError> {
        let sort = self
            .sort
            .filter(|sort| !sort.is_empty())
            .map(|sort| sort.parse::<SortMode>())
            .transpose()
            .or_400("invalid sort")?;

        Ok(FilterParams {
            cursor: parse_number(self.cursor, "invalid cursor")?.unwrap_or(1),
            limit: parse_number(self.limit, "invalid limit")?.unwrap_or(DEFAULT_LIMIT),
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            tags: self.tags,
            sort,
            tenant_slug: self.tenant_slug,
        })
    }
}

fn parse_number(value: Option<String>, brief: &str) -> Result<Option<u32>, StatusError> {
    value
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<u32>())
        .transpose()
        .or_400(brief)
}

/// Product Index Handler
///
/// Returns one page of the products matching the query.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    query: ProductsQuery,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let params = query.into_filter_params()?;

    observe_catalog_query(params.sort, params.category().is_some());

    let page = state
        .app
        .products
        .list_products(params)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
