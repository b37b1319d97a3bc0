mod common;
use common::{csv_ledger_path, csv_store, d, dec, setup_test_db, sqlite_store, temp_out, users};
use rledger::core::query::aggregate_total;
use rledger::models::expense::MAX_AMOUNT;
use std::thread;
use rledger::errors::AppError;
use rledger::models::expense::{DEFAULT_CATEGORY, ExpenseInput};
use rledger::models::import_row::{ImportRow, ImportSummary};
use rledger::store::{CsvStore, RecordStore, SqliteStore};
use std::fs;

fn input(date: &str, category: &str, amount: &str, note: &str) -> ExpenseInput {
    ExpenseInput::new(d(date), category, dec(amount), note)
}

/// Behaviour every backend must share.
fn crud_contract(store: &mut dyn RecordStore) {
    assert!(store.list(None).unwrap().is_empty());

    let a = store
        .create(None, input("2024-01-05", "Food", "100", "groceries"))
        .unwrap();
    let b = store
        .create(None, input("2024-01-20", "  ", "50.50", ""))
        .unwrap();
    assert_ne!(a, b);

    let all = store.list(None).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, a);
    assert_eq!(all[1].category, DEFAULT_CATEGORY);
    assert_eq!(all[1].amount, dec("50.5"));

    // update replaces every mutable field
    store
        .update(a, input("2024-01-06", "Travel", "75", "taxi"))
        .unwrap();
    let updated = store.get(a).unwrap().unwrap();
    assert_eq!(updated.date, d("2024-01-06"));
    assert_eq!(updated.category, "Travel");
    assert_eq!(updated.amount, dec("75"));
    assert_eq!(updated.note, "taxi");

    store.delete(b).unwrap();
    assert!(store.get(b).unwrap().is_none());
    assert_eq!(store.list(None).unwrap().len(), 1);
}

fn validation_contract(store: &mut dyn RecordStore) {
    for bad in ["0", "-5"] {
        let err = store
            .create(None, input("2024-01-05", "Food", bad, ""))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)), "{bad}: {err}");
        assert!(err.is_validation());
    }

    let id = store
        .create(None, input("2024-01-05", "Food", "10", ""))
        .unwrap();
    let err = store
        .update(id, input("2024-01-05", "Food", "0", ""))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
    // the rejected update left the row alone
    assert_eq!(store.get(id).unwrap().unwrap().amount, dec("10"));

    assert!(matches!(
        store.update(9999, input("2024-01-05", "Food", "1", "")),
        Err(AppError::NotFound(9999))
    ));
    assert!(matches!(store.delete(9999), Err(AppError::NotFound(9999))));
}

fn import_contract(store: &mut dyn RecordStore) {
    let existing = store
        .create(None, input("2024-01-05", "Food", "100", "lunch"))
        .unwrap();

    let rows = vec![
        // exact copy of the existing row
        ImportRow::new("2024-01-05", "Food", "100.00", "lunch"),
        ImportRow::new("2024-01-06", "Travel", "50", ""),
        // duplicate of the previous one
        ImportRow::new("2024-01-06 18:30:00", "Travel", "50.0", " "),
        // zero is fine for imports
        ImportRow::new("2024-01-07", "Gift", "0", "voucher"),
        ImportRow::new("06/01/2024", "Food", "10", ""),
        ImportRow::new("2024-01-08", "", "10", ""),
        ImportRow::new("2024-01-08", "Food", "-3", ""),
        ImportRow {
            amount: None,
            ..ImportRow::new("2024-01-08", "Food", "", "")
        },
    ];

    let summary = store.import_merge(None, &rows).unwrap();
    assert_eq!(
        summary,
        ImportSummary {
            imported: 4,
            rejected: 4,
            duplicates_removed: 2,
        }
    );

    let all = store.list(None).unwrap();
    assert_eq!(all.len(), 3);
    // the oldest copy survives
    assert!(all.iter().any(|r| r.id == existing));
    assert_eq!(
        all.iter().filter(|r| r.category == "Travel").count(),
        1
    );
    assert!(all.iter().any(|r| r.amount.is_zero()));

    // importing the same file again changes nothing
    let mut before: Vec<_> = all.iter().map(|r| format!("{:?}", r.content_key())).collect();
    let again = store.import_merge(None, &rows).unwrap();
    assert_eq!(again.imported, 4);
    assert_eq!(again.duplicates_removed, 4);

    let mut after: Vec<_> = store
        .list(None)
        .unwrap()
        .iter()
        .map(|r| format!("{:?}", r.content_key()))
        .collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
    assert!(store.list(None).unwrap().iter().any(|r| r.id == existing));
}

fn id_contract(store: &mut dyn RecordStore) {
    let a = store
        .create(None, input("2024-01-05", "Food", "1", "a"))
        .unwrap();
    let b = store
        .create(None, input("2024-01-06", "Food", "2", "b"))
        .unwrap();
    store.delete(b).unwrap();

    let c = store
        .create(None, input("2024-01-07", "Food", "3", "c"))
        .unwrap();
    assert!(c > b, "id {b} of a deleted row was handed out again");
    assert_ne!(c, a);

    store.import_merge(None, &[ImportRow::new("2024-01-08", "Food", "4", "d")]).unwrap();
    let ids: Vec<_> = store.list(None).unwrap().iter().map(|r| r.id).collect();
    assert!(ids.iter().all(|id| *id != b));
    assert_eq!(ids.iter().filter(|id| **id > c).count(), 1);
}

fn amount_ceiling_contract(store: &mut dyn RecordStore) {
    let huge = "79228162514264337593543950335";

    let err = store
        .create(None, input("2024-01-05", "Food", huge, ""))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));

    let summary = store
        .import_merge(
            None,
            &[
                ImportRow::new("2024-01-05", "Food", huge, ""),
                ImportRow::new("2024-01-06", "Food", huge, ""),
                ImportRow::new("2024-01-07", "Food", &MAX_AMOUNT.to_string(), ""),
                ImportRow::new("2024-01-08", "Food", &MAX_AMOUNT.to_string(), "again"),
            ],
        )
        .unwrap();
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.imported, 2);

    let total = aggregate_total(&store.list(None).unwrap());
    assert_eq!(total, MAX_AMOUNT * dec("2"));
}

fn isolation_contract(store: &mut dyn RecordStore, alice: i64, bob: i64) {
    store
        .create(Some(alice), input("2024-01-05", "Food", "10", ""))
        .unwrap();
    store
        .create(Some(alice), input("2024-01-06", "Food", "20", ""))
        .unwrap();
    store
        .create(Some(bob), input("2024-01-05", "Food", "10", ""))
        .unwrap();

    assert_eq!(store.list(Some(alice)).unwrap().len(), 2);
    assert_eq!(store.list(Some(bob)).unwrap().len(), 1);
    assert!(store.list(None).unwrap().is_empty());

    // identical content owned by another user is not a duplicate
    let summary = store
        .import_merge(Some(bob), &[ImportRow::new("2024-01-06", "Food", "20", "")])
        .unwrap();
    assert_eq!(summary.duplicates_removed, 0);

    assert_eq!(store.reset(Some(alice)).unwrap(), 2);
    assert!(store.list(Some(alice)).unwrap().is_empty());
    assert_eq!(store.list(Some(bob)).unwrap().len(), 2);
}

#[test]
fn sqlite_store_crud() {
    let db = setup_test_db("store_sqlite_crud");
    crud_contract(&mut sqlite_store(&db));
}

#[test]
fn csv_store_crud() {
    crud_contract(&mut csv_store("store_csv_crud"));
}

#[test]
fn sqlite_store_validation() {
    let db = setup_test_db("store_sqlite_validation");
    validation_contract(&mut sqlite_store(&db));
}

#[test]
fn csv_store_validation() {
    validation_contract(&mut csv_store("store_csv_validation"));
}

#[test]
fn sqlite_store_import_merge() {
    let db = setup_test_db("store_sqlite_import");
    import_contract(&mut sqlite_store(&db));
}

#[test]
fn csv_store_import_merge() {
    import_contract(&mut csv_store("store_csv_import"));
}

#[test]
fn sqlite_store_user_isolation() {
    let db = setup_test_db("store_sqlite_isolation");
    let mut dir = users(&db);
    let alice = dir.resolve("alice@example.com").unwrap();
    let bob = dir.resolve("bob@example.com").unwrap();
    isolation_contract(&mut sqlite_store(&db), alice, bob);
}

#[test]
fn csv_store_user_isolation() {
    isolation_contract(&mut csv_store("store_csv_isolation"), 1, 2);
}

#[test]
fn sqlite_store_never_reuses_ids() {
    let db = setup_test_db("store_sqlite_ids");
    id_contract(&mut sqlite_store(&db));
}

#[test]
fn csv_store_never_reuses_ids() {
    id_contract(&mut csv_store("store_csv_ids"));
}

#[test]
fn sqlite_store_rejects_oversized_amounts() {
    let db = setup_test_db("store_sqlite_ceiling");
    amount_ceiling_contract(&mut sqlite_store(&db));
}

#[test]
fn csv_store_rejects_oversized_amounts() {
    amount_ceiling_contract(&mut csv_store("store_csv_ceiling"));
}

#[test]
fn csv_store_concurrent_writers_never_fail() {
    let path = csv_ledger_path("store_csv_concurrent");

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let path = path.clone();
            thread::spawn(move || {
                let mut store = CsvStore::new(&path, &[]);
                let mut errors = 0;
                for i in 0..50 {
                    let note = format!("t{t}-{i}");
                    if store
                        .create(None, input("2024-01-05", "Food", "1", &note))
                        .is_err()
                    {
                        errors += 1;
                    }
                }
                errors
            })
        })
        .collect();

    let errors: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(errors, 0);

    // the file is always a complete ledger, never a torn write
    let store = CsvStore::new(&path, &[]);
    let rows = store.list(None).unwrap();
    assert!(!rows.is_empty());
    assert!(rows.len() <= 200);
}

#[test]
fn csv_store_missing_file_is_empty_ledger() {
    let path = temp_out("store_csv_missing", "csv");
    let store = CsvStore::new(&path, &[]);
    assert!(store.list(None).unwrap().is_empty());
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn csv_store_file_layout() {
    let path = csv_ledger_path("store_csv_layout");
    let mut store = CsvStore::new(&path, &[]);
    store
        .create(None, input("2024-03-01", "Rent", "1200.50", "march"))
        .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("id,user_id,date,category,amount,note"));
    assert_eq!(lines.next(), Some("1,,2024-03-01,Rent,1200.5,march"));
    assert_eq!(fs::read_to_string(format!("{path}.seq")).unwrap().trim(), "1");
}

#[test]
fn configured_categories_are_enforced() {
    let db = setup_test_db("store_categories");
    let allowed = vec!["Food".to_string(), "Travel".to_string()];
    let mut store = SqliteStore::open(&db, &allowed).unwrap();

    store
        .create(None, input("2024-01-05", "Food", "10", ""))
        .unwrap();
    // blank still becomes Misc, which is always accepted
    store.create(None, input("2024-01-05", "", "10", "")).unwrap();

    let err = store
        .create(None, input("2024-01-05", "Gadgets", "10", ""))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCategory(_)));

    let summary = store
        .import_merge(None, &[ImportRow::new("2024-01-06", "Gadgets", "5", "")])
        .unwrap();
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.imported, 0);
}

#[test]
fn sqlite_store_survives_reopen() {
    let db = setup_test_db("store_sqlite_reopen");
    let id = {
        let mut store = sqlite_store(&db);
        store
            .create(None, input("2024-01-05", "Food", "19.99", "kept"))
            .unwrap()
    };

    let store = sqlite_store(&db);
    let rec = store.get(id).unwrap().unwrap();
    assert_eq!(rec.amount, dec("19.99"));
    assert_eq!(rec.note, "kept");
    assert_eq!(store.location(), db);
}
