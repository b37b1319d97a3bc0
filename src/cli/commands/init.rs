use crate::cli::parser::Cli;
use crate::config::{Config, StorageBackend};
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::users::normalize_email;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file, remembering `--csv` and `--user` if given
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.clone(), cli.test)?;

    let mut changed = false;
    if let Some(csv) = &cli.csv {
        cfg.backend = StorageBackend::Csv;
        cfg.ledger_file = expand_tilde(csv).to_string_lossy().to_string();
        changed = true;
    }
    if let Some(email) = &cli.user {
        cfg.default_user = Some(normalize_email(email)?);
        changed = true;
    }
    if changed && !cli.test {
        cfg.save()?;
    }

    println!("⚙️  Initializing rledger…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &cfg.database);
    if cfg.backend == StorageBackend::Csv {
        println!("📒 Ledger file: {}", cfg.ledger_path().display());
    }

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &cfg.database);

    ttlog_quiet(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    );

    println!("🎉 rledger initialization completed!");
    Ok(())
}
