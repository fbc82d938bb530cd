use clap::Args;
use dabro_app::domain::categories::{data::NewCategory, records::CategoryUuid};

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Unique category slug
    #[arg(long)]
    slug: String,

    /// Parent category slug; creates a subcategory
    #[arg(long)]
    parent: Option<String>,

    /// Display color, e.g. `#FFB347`
    #[arg(long)]
    color: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let app = crate::cli::connect(&args.database_url).await?;

    let category = app
        .categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            slug: args.slug,
            color: args.color,
            parent: args.parent,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}
