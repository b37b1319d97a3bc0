use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::query::{aggregate_total, select, sort_by_date_desc};
use crate::errors::AppResult;
use crate::models::category::CategoryFilter;
use crate::ui::messages::{header, warning};
use crate::utils::table::{Column, Table};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, category } = &cli.command {
        let ledger = open_ledger(cli, cfg)?;
        let filter = CategoryFilter::from_option(category.as_deref());

        let mut rows = select(&ledger.records(), period.as_deref(), &filter)?;
        sort_by_date_desc(&mut rows);

        if rows.is_empty() {
            warning("No expenses found.");
            return Ok(());
        }

        header(format!(
            "Expenses of {} ({}, {})",
            ledger.session.label(),
            period.as_deref().unwrap_or("all time"),
            filter
        ));

        let mut table = Table::new(vec![
            Column::right("ID"),
            Column::left("Date"),
            Column::left("Category"),
            Column::right("Amount"),
            Column::left("Note"),
        ]);

        for r in &rows {
            table.add_row(vec![
                r.id.to_string(),
                r.date_str(),
                r.category.clone(),
                ledger.fmt(r.amount),
                r.note.clone(),
            ]);
        }

        print!("{}", table.render());
        println!(
            "\n{} expenses, total {}",
            rows.len(),
            ledger.fmt(aggregate_total(&rows))
        );
    }

    Ok(())
}
