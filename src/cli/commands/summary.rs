use crate::cli::commands::open_ledger;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::budget::report_alert;
use crate::core::query::{current_month_total, select, summarize};
use crate::errors::AppResult;
use crate::models::category::CategoryFilter;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{GREY, RESET, color_for_budget_usage};
use crate::utils::date::month_label;
use crate::utils::formatting::{bar, bold, percent};
use crate::utils::table::{Column, Table};
use rust_decimal::Decimal;

const BAR_WIDTH: usize = 30;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { period, category } = &cli.command {
        let mut ledger = open_ledger(cli, cfg)?;
        let filter = CategoryFilter::from_option(category.as_deref());
        let all = ledger.records();
        let rows = select(&all, period.as_deref(), &filter)?;
        let s = summarize(&rows, ledger.session.today);

        header(format!(
            "Summary for {} ({}, {})",
            ledger.session.label(),
            period.as_deref().unwrap_or("all time"),
            filter
        ));

        if s.count == 0 {
            warning("No expenses in this selection.");
        } else {
            let dash = || format!("{GREY}--{RESET}");
            println!("{} {}", bold("Expenses:     "), s.count);
            println!("{} {}", bold("Total:        "), ledger.fmt(s.total));
            println!(
                "{} {}",
                bold("Average:      "),
                s.mean.map(|m| ledger.fmt(m)).unwrap_or_else(dash)
            );
            println!(
                "{} {}",
                bold("Largest:      "),
                s.max.map(|m| ledger.fmt(m)).unwrap_or_else(dash)
            );
            if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
                println!("{} {} → {}", bold("Dates:        "), first, last);
            }

            println!("\n{}", bold("By category"));
            let mut cat_table = Table::new(vec![
                Column::left("Category"),
                Column::right("Total"),
                Column::right("Share"),
                Column::left(""),
            ]);
            let top = s.by_category.first().map(|(_, v)| *v).unwrap_or(Decimal::ZERO);
            for (name, total) in &s.by_category {
                cat_table.add_row(vec![
                    name.clone(),
                    ledger.fmt(*total),
                    percent(*total, s.total),
                    bar(*total, top, BAR_WIDTH),
                ]);
            }
            print!("{}", cat_table.render());

            println!("\n{}", bold("By month"));
            let mut month_table = Table::new(vec![
                Column::left("Month"),
                Column::right("Total"),
                Column::left(""),
            ]);
            let peak = s.by_month.iter().map(|(_, v)| *v).max().unwrap_or(Decimal::ZERO);
            for (month, total) in &s.by_month {
                month_table.add_row(vec![
                    month_label(*month),
                    ledger.fmt(*total),
                    bar(*total, peak, BAR_WIDTH),
                ]);
            }
            print!("{}", month_table.render());
        }

        // Budget status always covers the whole current month.
        println!();
        if let Ok((user_id, _)) = ledger.session.require_user() {
            let month_total = current_month_total(&all, ledger.session.today);
            match ledger.users.get_budget(user_id)? {
                Some(budget) => println!(
                    "{} {}{}{} of {} ({})",
                    bold(&format!("{}:", month_label(ledger.session.today))),
                    color_for_budget_usage(month_total, budget),
                    ledger.fmt(month_total),
                    RESET,
                    ledger.fmt(budget),
                    percent(month_total, budget)
                ),
                None => println!(
                    "{} {} (no budget set)",
                    bold(&format!("{}:", month_label(ledger.session.today))),
                    ledger.fmt(month_total)
                ),
            }
        } else {
            info("Budgets need a user: pass --user EMAIL or set default_user.");
        }

        let outcome = ledger.check_budget()?;
        report_alert(&ledger, &outcome);
    }

    Ok(())
}
