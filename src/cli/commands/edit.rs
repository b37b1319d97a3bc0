use crate::cli::commands::{open_ledger, parse_amount_arg, parse_date_arg};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::edit::{EditFields, EditLogic};
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        category,
        amount,
        note,
    } = &cli.command
    {
        if date.is_none() && category.is_none() && amount.is_none() && note.is_none() {
            warning("Nothing to change: use --date, --category, --amount or --note.");
            return Ok(());
        }

        let fields = EditFields {
            date: date.as_deref().map(parse_date_arg).transpose()?,
            category: category.clone(),
            amount: amount.as_deref().map(parse_amount_arg).transpose()?,
            note: note.clone(),
        };

        let mut ledger = open_ledger(cli, cfg)?;
        EditLogic::apply(&mut ledger, *id, fields)?;
    }

    Ok(())
}
