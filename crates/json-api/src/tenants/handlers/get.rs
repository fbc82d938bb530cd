//! Get Tenant Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use dabro_app::domain::tenants::{TenantsServiceError, records::TenantRecord};

use crate::{extensions::*, products::responses::MediaResponse};

/// A storefront. Payment account details are never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TenantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<MediaResponse>,

    /// Whether the store can sell products yet
    pub onboarded: bool,

    pub created_at: String,
}

impl From<TenantRecord> for TenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        Self {
            uuid: tenant.uuid.into(),
            name: tenant.name,
            slug: tenant.slug,
            image: tenant.image.map(Into::into),
            onboarded: tenant.stripe_details_submitted,
            created_at: tenant.created_at.to_string(),
        }
    }
}

fn into_status_error(error: TenantsServiceError) -> StatusError {
    match error {
        TenantsServiceError::NotFound => StatusError::not_found().brief("Tenant not found"),
        TenantsServiceError::EmptySlug | TenantsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid tenant slug")
        }
        TenantsServiceError::AlreadyExists | TenantsServiceError::Store(_) => {
            error!("failed to fetch tenant: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Get Tenant Handler
///
/// Returns the storefront with the given slug.
#[endpoint(tags("tenants"), summary = "Get Tenant")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<TenantResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let tenant = state
        .app
        .tenants
        .get_tenant(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}
