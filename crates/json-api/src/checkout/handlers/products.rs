//! Checkout Products Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use dabro_app::domain::checkout::{CheckoutServiceError, records::CheckoutSummary};

use crate::{extensions::*, products::responses::ProductResponse};

/// Products in a cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutProductsRequest {
    /// Product identifiers. Repeated identifiers count once
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutProductsResponse {
    pub products: Vec<ProductResponse>,

    /// Sum of the product prices as a decimal string
    pub total_price: String,
}

impl From<CheckoutSummary> for CheckoutProductsResponse {
    fn from(summary: CheckoutSummary) -> Self {
        Self {
            products: summary.products.into_iter().map(Into::into).collect(),
            total_price: summary.total_price.to_string(),
        }
    }
}

fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::ProductsNotFound { missing } => {
            StatusError::not_found().brief(format!("{missing} product(s) not found"))
        }
        CheckoutServiceError::Total(_) | CheckoutServiceError::Store(_) => {
            error!("failed to fetch checkout products: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Checkout Products Handler
///
/// Returns the products in a cart with their total price.
#[endpoint(tags("checkout"), summary = "Get Checkout Products")]
pub(crate) async fn handler(
    json: JsonBody<CheckoutProductsRequest>,
    depot: &mut Depot,
) -> Result<Json<CheckoutProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let ids = json.into_inner().ids.into_iter().map(Into::into).collect();

    let summary = state
        .app
        .checkout
        .get_products(ids)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_product};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("checkout/products").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_returns_products_and_total() -> TestResult {
        let mut mocks = Mocks::default();
        let first = make_product("A", 5);
        let second = make_product("B", 7);
        let ids = [Uuid::from(first.uuid), Uuid::from(second.uuid)];

        mocks
            .checkout
            .expect_get_products()
            .once()
            .withf(move |requested| {
                requested
                    .iter()
                    .copied()
                    .map(Uuid::from)
                    .eq(ids.iter().copied())
            })
            .return_once(move |_| {
                Ok(CheckoutSummary {
                    products: vec![first, second],
                    total_price: Decimal::new(12, 0),
                })
            });

        let response: CheckoutProductsResponse =
            TestClient::post("http://example.com/checkout/products")
                .json(&json!({ "ids": ids }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.products.len(), 2, "expected both products");
        assert_eq!(response.total_price, "12");

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .checkout
            .expect_get_products()
            .once()
            .return_once(|_| Err(CheckoutServiceError::ProductsNotFound { missing: 1 }));

        let res = TestClient::post("http://example.com/checkout/products")
            .json(&json!({ "ids": [Uuid::now_v7()] }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_malformed_body_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/checkout/products")
            .json(&json!({ "ids": ["not-a-uuid"] }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
