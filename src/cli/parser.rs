use crate::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rledger
/// CLI expense ledger with monthly budgets and one-shot alerts
#[derive(Parser)]
#[command(
    name = "rledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A personal expense ledger: record spending, query it by period and category, and get one alert per month when a budget is exceeded",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Keep expenses in a flat CSV file instead of the database
    #[arg(global = true, long = "csv", value_name = "FILE")]
    pub csv: Option<String>,

    /// Act as this user (email); defaults to `default_user` from the config
    #[arg(global = true, long = "user", value_name = "EMAIL")]
    pub user: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Add missing fields to the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record a new expense
    Add {
        /// Date of the expense (YYYY-MM-DD)
        date: String,

        /// Category (blank becomes "Misc")
        category: String,

        /// Amount, greater than zero (e.g. 1200.50)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        #[arg(long = "note", help = "Free-text note")]
        note: Option<String>,
    },

    /// Change fields of an existing expense
    Edit {
        /// Expense id (see `list`)
        id: i64,

        #[arg(long = "date", help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "category", help = "New category")]
        category: Option<String>,

        #[arg(long = "amount", allow_hyphen_values = true, help = "New amount")]
        amount: Option<String>,

        #[arg(long = "note", help = "New note (empty string clears it)")]
        note: Option<String>,
    },

    /// Delete an expense by id
    Del {
        /// Expense id (see `list`)
        id: i64,
    },

    /// List expenses, newest first
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, short, help = "Only this category (\"all\" for every category)")]
        category: Option<String>,
    },

    /// Totals, averages, category breakdown and monthly trend
    Summary {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, short, help = "Only this category (\"all\" for every category)")]
        category: Option<String>,
    },

    /// Merge expenses from a CSV file (date,category,amount[,note])
    Import {
        /// CSV file to import
        file: String,
    },

    /// Export expenses
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, help = "Only this category")]
        category: Option<String>,

        #[arg(long, help = "Add a month column (YYYY-MM-01)")]
        month: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show, set or clear the monthly budget of the current user
    #[command(group(ArgGroup::new("budget_action").args(["set", "clear"])))]
    Budget {
        #[arg(long, value_name = "AMOUNT", help = "Set the monthly budget")]
        set: Option<String>,

        #[arg(long, help = "Remove the monthly budget")]
        clear: bool,
    },

    /// Delete every expense of the current user
    Reset {
        #[arg(long, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Create a backup copy of the ledger
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },
}
