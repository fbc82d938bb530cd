//! App Router

use salvo::Router;

use crate::{
    categories, checkout, healthcheck, observability::metrics_handler, products, tags, tenants,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(Router::with_path("tags").get(tags::index::handler))
        .push(Router::with_path("tenants/{slug}").get(tenants::get::handler))
        .push(Router::with_path("checkout/products").post(checkout::products::handler))
}
