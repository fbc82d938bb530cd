use clap::{Args, Subcommand};

mod create;
mod onboard;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    Create(create::CreateTenantArgs),
    Onboard(onboard::OnboardTenantArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Create(args) => create::run(args).await,
        TenantSubcommand::Onboard(args) => onboard::run(args).await,
    }
}
