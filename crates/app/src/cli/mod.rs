use clap::{Parser, Subcommand};

mod category;
mod db;
mod tenant;

#[derive(Debug, Parser)]
#[command(name = "dabro-app", about = "Dabro catalog administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Tenant(tenant::TenantCommand),
    Category(category::CategoryCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Tenant(command) => tenant::run(command).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Build the catalog services over the database at `url`.
async fn connect(url: &str) -> Result<dabro_app::context::AppContext, String> {
    let pool = dabro_app::database::connect(url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(dabro_app::context::AppContext::from_pool(
        pool,
        dabro::categories::UnknownCategoryPolicy::default(),
    ))
}
