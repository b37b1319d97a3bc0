#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rledger::core::ledger::Ledger;
use rledger::core::session::Session;
use rledger::db::users::UserDirectory;
use rledger::models::expense::ExpenseRecord;
use rledger::notify::{Notifier, TransportError};
use rledger::store::{CsvStore, SqliteStore};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

/// CLI runner isolated from the real configuration directory.
pub fn rl() -> Command {
    let mut cmd = cargo_bin_cmd!("rledger");
    cmd.env(
        "RLEDGER_CONFIG_DIR",
        env::temp_dir().join("rledger_tests_no_config"),
    );
    cmd
}

/// Empty directory under the system temp dir, unique per test name.
pub fn temp_dir_for(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("rledger_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small January/February dataset for `user`.
pub fn init_db_with_data(db_path: &str, user: &str) {
    rl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (date, category, amount, note) in [
        ("2024-01-05", "Food", "100", "groceries"),
        ("2024-01-20", "Travel", "50", "bus pass"),
        ("2024-02-01", "Food", "30", ""),
    ] {
        rl().args([
            "--db", db_path, "--user", user, "--today", "2024-02-10", "add", date, category,
            amount, "--note", note,
        ])
        .assert()
        .success();
    }
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid test amount")
}

/// In-memory record for query engine tests.
pub fn rec(id: i64, date: &str, category: &str, amount: &str) -> ExpenseRecord {
    ExpenseRecord {
        id,
        user_id: None,
        date: d(date),
        category: category.to_string(),
        amount: dec(amount),
        note: String::new(),
    }
}

pub fn sqlite_store(db_path: &str) -> SqliteStore {
    SqliteStore::open(db_path, &[]).expect("open sqlite store")
}

/// Fresh flat-ledger path: the file and its id sidecar are removed.
pub fn csv_ledger_path(name: &str) -> String {
    let path = temp_out(name, "csv");
    fs::remove_file(format!("{path}.seq")).ok();
    path
}

pub fn csv_store(name: &str) -> CsvStore {
    CsvStore::new(PathBuf::from(csv_ledger_path(name)), &[])
}

pub fn users(db_path: &str) -> UserDirectory {
    UserDirectory::open(db_path).expect("open user directory")
}

/// One alert as seen by a dispatcher.
pub type SentAlert = (String, Decimal, Decimal);

/// Dispatcher that keeps every alert it receives.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub sent: Rc<RefCell<Vec<SentAlert>>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, recipient: &str, total: Decimal, budget: Decimal) -> Result<(), TransportError> {
        self.sent
            .borrow_mut()
            .push((recipient.to_string(), total, budget));
        Ok(())
    }
}

/// Dispatcher whose transport is always down; counts the attempts.
#[derive(Clone, Default)]
pub struct FailingNotifier {
    pub attempts: Rc<RefCell<usize>>,
}

impl Notifier for FailingNotifier {
    fn send(&self, _: &str, _: Decimal, _: Decimal) -> Result<(), TransportError> {
        *self.attempts.borrow_mut() += 1;
        Err(TransportError("smtp unreachable".to_string()))
    }
}

/// SQLite-backed ledger for `email` (anonymous when `None`).
pub fn ledger_with(
    db_path: &str,
    email: Option<&str>,
    today: &str,
    notifier: Box<dyn Notifier>,
) -> Ledger {
    let mut directory = users(db_path);
    let session = Session::open(&mut directory, email, d(today)).expect("open session");
    Ledger::with_parts(
        Box::new(sqlite_store(db_path)),
        directory,
        notifier,
        session,
    )
}
