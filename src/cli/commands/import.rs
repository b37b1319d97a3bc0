use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = &cli.command {
        let mut ledger = open_ledger(cli, cfg)?;
        ImportLogic::apply(&mut ledger, &expand_tilde(file))?;
    }

    Ok(())
}
