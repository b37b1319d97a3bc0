use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup { file, compress } = &cli.command {
        let ledger = open_ledger(cli, cfg)?;
        BackupLogic::backup(&ledger, file, *compress)?;
    }

    Ok(())
}
