use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = &cli.command {
        let mut ledger = open_ledger(cli, cfg)?;
        DeleteLogic::apply(&mut ledger, *id)?;
    }

    Ok(())
}
