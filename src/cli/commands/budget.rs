use crate::cli::commands::{open_ledger, parse_amount_arg};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::budget::BudgetLogic;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Budget { set, clear } = &cli.command {
        let mut ledger = open_ledger(cli, cfg)?;

        match (set, clear) {
            (Some(amount), _) => {
                let amount = parse_amount_arg(amount)?;
                BudgetLogic::set(&mut ledger, Some(amount))?;
            }
            (None, true) => {
                BudgetLogic::set(&mut ledger, None)?;
            }
            (None, false) => BudgetLogic::show(&ledger)?,
        }
    }

    Ok(())
}
