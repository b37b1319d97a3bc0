use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::reset::ResetLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { yes } = &cli.command {
        let mut ledger = open_ledger(cli, cfg)?;

        if !*yes {
            info("Tip: `rledger backup --file <FILE>` keeps a copy first.");
            let question = format!(
                "Delete ALL expenses of {}? This cannot be undone.",
                ledger.session.label()
            );
            if !confirm(question)? {
                info("Reset cancelled.");
                return Ok(());
            }
        }

        ResetLogic::apply(&mut ledger)?;
    }

    Ok(())
}
