use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct OnboardTenantArgs {
    /// Storefront slug of the tenant
    #[arg(long)]
    slug: String,

    /// Connected payment account identifier
    #[arg(long)]
    stripe_account_id: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: OnboardTenantArgs) -> Result<(), String> {
    if args.stripe_account_id.trim().is_empty() {
        return Err("stripe_account_id cannot be empty".to_string());
    }

    let app = crate::cli::connect(&args.database_url).await?;

    let tenant = app
        .tenants
        .complete_onboarding(&args.slug, &args.stripe_account_id)
        .await
        .map_err(|error| format!("failed to onboard tenant: {error}"))?;

    println!("tenant_slug: {}", tenant.slug);
    println!("details_submitted: {}", tenant.stripe_details_submitted);

    Ok(())
}
