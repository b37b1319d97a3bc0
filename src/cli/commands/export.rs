use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::category::CategoryFilter;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        category,
        month,
        force,
    } = &cli.command
    {
        let ledger = open_ledger(cli, cfg)?;
        ExportLogic::export(
            &ledger,
            *format,
            file,
            range.as_deref(),
            &CategoryFilter::from_option(category.as_deref()),
            *month,
            *force,
        )?;
    }

    Ok(())
}
