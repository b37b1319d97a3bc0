mod common;
use common::{dec, setup_test_db, users};
use rledger::db::users::normalize_email;
use rledger::errors::AppError;
use rledger::models::user::AlertState;

#[test]
fn resolve_is_stable_and_case_insensitive() {
    let db = setup_test_db("dir_resolve");
    let mut dir = users(&db);

    let first = dir.resolve("Alice@Example.com").unwrap();
    let again = dir.resolve("  alice@example.COM ").unwrap();
    let other = dir.resolve("bob@example.com").unwrap();

    assert_eq!(first, again);
    assert_ne!(first, other);

    let user = dir.get(first).unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.budget, None);
    assert_eq!(user.alert_state(), AlertState::Armed);
}

#[test]
fn resolve_survives_reopen() {
    let db = setup_test_db("dir_reopen");
    let id = users(&db).resolve("carol@example.org").unwrap();
    assert_eq!(users(&db).resolve("carol@example.org").unwrap(), id);
}

#[test]
fn invalid_emails_are_rejected() {
    let db = setup_test_db("dir_invalid_email");
    let mut dir = users(&db);

    for bad in ["", "plainaddress", "a@b", "@example.com", "a b@example.com", "a@@example.com"] {
        let err = dir.resolve(bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidEmail(_)), "{bad:?}");
        assert!(err.is_validation());
    }

    assert_eq!(
        normalize_email(" First.Last-1@Mail.Example.co.uk ").unwrap(),
        "first.last-1@mail.example.co.uk"
    );
}

#[test]
fn unknown_user_is_not_found() {
    let db = setup_test_db("dir_unknown");
    let dir = users(&db);
    assert!(matches!(dir.get(42), Err(AppError::UserNotFound(42))));
}

#[test]
fn budget_set_clear_and_validation() {
    let db = setup_test_db("dir_budget");
    let mut dir = users(&db);
    let id = dir.resolve("dave@example.com").unwrap();

    dir.set_budget(id, Some(dec("1000.00"))).unwrap();
    assert_eq!(dir.get_budget(id).unwrap(), Some(dec("1000")));

    for bad in ["0", "-1"] {
        let err = dir.set_budget(id, Some(dec(bad))).unwrap_err();
        assert!(matches!(err, AppError::InvalidAmount(_)));
    }
    // rejected values leave the old budget in place
    assert_eq!(dir.get_budget(id).unwrap(), Some(dec("1000")));

    dir.set_budget(id, None).unwrap();
    assert_eq!(dir.get_budget(id).unwrap(), None);

    assert!(matches!(
        dir.set_budget(999, Some(dec("1"))),
        Err(AppError::UserNotFound(999))
    ));
}

#[test]
fn latch_fires_once_and_budget_change_rearms() {
    let db = setup_test_db("dir_latch");
    let mut dir = users(&db);
    let id = dir.resolve("erin@example.com").unwrap();
    dir.set_budget(id, Some(dec("500"))).unwrap();

    assert!(!dir.is_alert_sent(id).unwrap());
    assert!(dir.fire_if_armed(id).unwrap());
    assert!(!dir.fire_if_armed(id).unwrap());
    assert!(dir.is_alert_sent(id).unwrap());
    assert_eq!(dir.get(id).unwrap().alert_state(), AlertState::Fired);

    dir.set_budget(id, Some(dec("800"))).unwrap();
    assert!(!dir.is_alert_sent(id).unwrap());

    dir.mark_alert_sent(id).unwrap();
    assert!(dir.is_alert_sent(id).unwrap());
    assert!(!dir.fire_if_armed(id).unwrap());

    // clearing the budget re-arms as well
    dir.set_budget(id, None).unwrap();
    assert!(!dir.is_alert_sent(id).unwrap());
}

#[test]
fn latch_is_shared_between_connections() {
    let db = setup_test_db("dir_latch_shared");
    let mut first = users(&db);
    let mut second = users(&db);
    let id = first.resolve("frank@example.com").unwrap();

    // two evaluators racing: exactly one wins the transition
    let wins = [first.fire_if_armed(id).unwrap(), second.fire_if_armed(id).unwrap()];
    assert_eq!(wins.iter().filter(|w| **w).count(), 1);
}

#[test]
fn concurrent_first_resolve_creates_one_user() {
    let db = setup_test_db("dir_concurrent_resolve");
    // schema in place before the race
    drop(users(&db));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let db = db.clone();
            std::thread::spawn(move || users(&db).resolve("grace@example.com").unwrap())
        })
        .collect();

    let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(ids.iter().all(|id| *id == ids[0]));

    let conn = rusqlite::Connection::open(&db).unwrap();
    let rows: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE email = 'grace@example.com'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn budget_above_ceiling_is_rejected() {
    let db = setup_test_db("dir_budget_ceiling");
    let mut dir = users(&db);
    let id = dir.resolve("heidi@example.com").unwrap();

    let err = dir.set_budget(id, Some(dec("1000000000000.01"))).unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
    assert_eq!(dir.get_budget(id).unwrap(), None);

    dir.set_budget(id, Some(dec("1000000000000"))).unwrap();
    assert_eq!(dir.get_budget(id).unwrap(), Some(dec("1000000000000")));
}

#[test]
fn fresh_database_has_latch_column_and_only_real_migrations() {
    let db = setup_test_db("dir_schema");
    drop(users(&db));
    drop(users(&db));

    let conn = rusqlite::Connection::open(&db).unwrap();
    let mut stmt = conn.prepare("PRAGMA table_info('users')").unwrap();
    let cols: Vec<String> = stmt
        .query_map([], |r| r.get::<_, String>(1))
        .unwrap()
        .map(|c| c.unwrap())
        .collect();
    assert!(cols.iter().any(|c| c == "alert_sent"));

    let applied: Vec<String> = conn
        .prepare("SELECT target FROM log WHERE operation = 'migration_applied'")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|t| t.unwrap())
        .collect();
    assert_eq!(applied, vec!["20250301_0001_blank_categories_to_misc".to_string()]);
}
