//! Command executor for dispatching CLI commands

use super::handlers::ServeCommandHandler;
use super::parser::Cli;
use super::load_and_merge_config;

/// Load configuration for `cli` and run the requested command.
///
/// No subcommand behaves like `serve`.
pub async fn execute_command(cli: &Cli) -> anyhow::Result<()> {
    let settings = load_and_merge_config(cli)?;
    ServeCommandHandler::new(settings)
        .execute(cli.is_dry_run())
        .await
}
