use super::config::cmd_config;
use super::env::CliArgs;
use super::fill::cmd_fill;
use super::listen::cmd_listen;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Fill(args) => cmd_fill(args, ctx).await,
        Commands::Listen(args) => cmd_listen(args, ctx).await,
        Commands::Config(args) => cmd_config(args, ctx).await,
    }
}
