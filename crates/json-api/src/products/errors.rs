//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use dabro_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::TenantNotFound => StatusError::not_found().brief("Tenant not found"),
        ProductsServiceError::CategoryNotFound => {
            StatusError::not_found().brief("Category not found")
        }
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::TenantNotOnboarded => {
            StatusError::conflict().brief("Tenant has not completed payment onboarding")
        }
        ProductsServiceError::NegativePrice
        | ProductsServiceError::PriceTooPrecise
        | ProductsServiceError::EmptyName
        | ProductsServiceError::InvalidReference
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product data")
        }
        ProductsServiceError::Categories(_)
        | ProductsServiceError::Tenants(_)
        | ProductsServiceError::Store(_) => {
            error!("product lookup failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use dabro_app::store::StoreError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn test_errors_map_to_status_codes() {
        let cases = [
            (ProductsServiceError::NotFound, StatusCode::NOT_FOUND),
            (ProductsServiceError::InvalidData, StatusCode::BAD_REQUEST),
            (ProductsServiceError::PriceTooPrecise, StatusCode::BAD_REQUEST),
            (ProductsServiceError::AlreadyExists, StatusCode::CONFLICT),
            (
                ProductsServiceError::Store(StoreError::InvalidData),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, code) in cases {
            assert_eq!(into_status_error(error).code, code);
        }
    }
}
