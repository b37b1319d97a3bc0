use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod check;

/// Where expense rows are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `expenses` table in the SQLite database.
    #[default]
    Sqlite,
    /// Flat CSV file (`ledger_file`).
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Allowed categories; empty means free text.
    #[serde(default)]
    pub categories: Vec<String>,
    /// JSON-lines outbox for budget alerts; alerts go to the terminal when unset.
    #[serde(default)]
    pub alert_outbox: Option<String>,
}

fn default_ledger_file() -> String {
    Config::config_dir()
        .join("expenses.csv")
        .to_string_lossy()
        .to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            backend: StorageBackend::default(),
            ledger_file: default_ledger_file(),
            default_user: None,
            currency_symbol: default_currency_symbol(),
            categories: Vec::new(),
            alert_outbox: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform.
    /// `RLEDGER_CONFIG_DIR` overrides it (used by tests and portable setups).
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var("RLEDGER_CONFIG_DIR")
            && !dir.trim().is_empty()
        {
            return expand_tilde(&dir);
        }

        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rledger")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rledger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rledger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rledger.sqlite")
    }

    /// Flat ledger path with `~` expanded.
    pub fn ledger_path(&self) -> PathBuf {
        expand_tilde(&self.ledger_file)
    }

    /// Outbox path with `~` expanded.
    pub fn outbox_path(&self) -> Option<PathBuf> {
        self.alert_outbox.as_deref().map(expand_tilde)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize the configuration directory and file.
    ///
    /// `custom_db` may be relative (resolved inside the config dir) or
    /// absolute. In test mode the config file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let mut config = if Self::config_file().exists() {
            Self::load()?
        } else {
            Config::default()
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
