use crate::cli::commands::{open_ledger, parse_amount_arg, parse_date_arg};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::errors::AppResult;
use crate::models::expense::ExpenseInput;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        category,
        amount,
        note,
    } = &cli.command
    {
        let input = ExpenseInput::new(
            parse_date_arg(date)?,
            category,
            parse_amount_arg(amount)?,
            note.as_deref().unwrap_or(""),
        );

        let mut ledger = open_ledger(cli, cfg)?;
        AddLogic::apply(&mut ledger, input)?;
    }

    Ok(())
}
