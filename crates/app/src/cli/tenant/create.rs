use clap::Args;
use dabro_app::domain::tenants::{data::NewTenant, records::TenantUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTenantArgs {
    /// Store name shown to shoppers
    #[arg(long)]
    name: String,

    /// Unique storefront slug
    #[arg(long)]
    slug: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional tenant UUID; generated when omitted
    #[arg(long)]
    tenant_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateTenantArgs) -> Result<(), String> {
    let app = crate::cli::connect(&args.database_url).await?;

    let tenant = app
        .tenants
        .create_tenant(NewTenant {
            uuid: args
                .tenant_uuid
                .map_or_else(TenantUuid::new, TenantUuid::from_uuid),
            name: args.name,
            slug: args.slug,
        })
        .await
        .map_err(|error| format!("failed to create tenant: {error}"))?;

    println!("tenant_uuid: {}", tenant.uuid);
    println!("tenant_slug: {}", tenant.slug);

    Ok(())
}
