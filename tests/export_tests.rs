mod common;
use common::{init_db_with_data, rl, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;
use std::io::Read;
use std::path::Path;

const USER: &str = "export@example.com";

#[test]
fn export_csv_all() {
    let db = setup_test_db("export_csv_all");
    init_db_with_data(&db, USER);
    let out = temp_out("export_csv_all", "csv");

    rl().args(["--db", &db, "--user", USER, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("3 expenses written"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "date,category,amount,note");
    assert_eq!(lines[1], "2024-01-05,Food,100,groceries");
    assert_eq!(lines[3], "2024-02-01,Food,30,");
    assert_eq!(lines.len(), 4);
}

#[test]
fn export_csv_range_category_and_month() {
    let db = setup_test_db("export_csv_filters");
    init_db_with_data(&db, USER);
    let out = temp_out("export_csv_filters", "csv");

    rl().args([
        "--db", &db, "--user", USER, "export", "--file", &out, "--range", "2024-01", "--category",
        "Travel", "--month",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(
        content,
        "date,category,amount,note,month\n2024-01-20,Travel,50,bus pass,2024-01-01\n"
    );
}

#[test]
fn export_json_rows() {
    let db = setup_test_db("export_json_rows");
    init_db_with_data(&db, USER);
    let out = temp_out("export_json_rows", "json");

    rl().args(["--db", &db, "--user", USER, "export", "--format", "json", "--file", &out, "--range", "2024-01-01:2024-01-31"])
        .assert()
        .success();

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2024-01-05");
    assert_eq!(rows[1]["amount"], "50");
    assert!(rows[0].get("month").is_none());
}

#[test]
fn export_xlsx_file() {
    let db = setup_test_db("export_xlsx_file");
    init_db_with_data(&db, USER);
    let out = temp_out("export_xlsx_file", "xlsx");

    rl().args(["--db", &db, "--user", USER, "export", "--format", "xlsx", "--file", &out, "--month"])
        .assert()
        .success()
        .stdout(contains("XLSX export completed"));

    let bytes = fs::read(&out).unwrap();
    // xlsx is a zip container
    assert!(bytes.starts_with(b"PK"));

    let mut book = zip::ZipArchive::new(fs::File::open(&out).unwrap()).unwrap();
    let mut strings = String::new();
    book.by_name("xl/sharedStrings.xml")
        .unwrap()
        .read_to_string(&mut strings)
        .unwrap();
    // amounts are exact text, and there is no summary line
    for amount in [">100<", ">50<", ">30<"] {
        assert!(strings.contains(amount), "{amount} missing");
    }
    assert!(!strings.contains("Total"));

    let mut sheet = String::new();
    book.by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut sheet)
        .unwrap();
    assert!(sheet.contains(r#"<row r="4""#));
    assert!(!sheet.contains(r#"<row r="5""#));
}

#[test]
fn export_requires_absolute_path() {
    let db = setup_test_db("export_relative");
    init_db_with_data(&db, USER);

    rl().args(["--db", &db, "--user", USER, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn export_empty_selection_writes_nothing() {
    let db = setup_test_db("export_empty");
    init_db_with_data(&db, USER);
    let out = temp_out("export_empty", "csv");

    rl().args(["--db", &db, "--user", USER, "export", "--file", &out, "--range", "2023"])
        .assert()
        .success()
        .stdout(contains("No expenses found"));

    assert!(!Path::new(&out).exists());
}

#[test]
fn export_existing_file_needs_force_or_confirmation() {
    let db = setup_test_db("export_overwrite");
    init_db_with_data(&db, USER);
    let out = temp_out("export_overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    rl().args(["--db", &db, "--user", USER, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rl().args(["--db", &db, "--user", USER, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("date,category"));
}

#[test]
fn export_then_import_round_trip() {
    let src = setup_test_db("export_round_trip_src");
    init_db_with_data(&src, USER);
    let out = temp_out("export_round_trip", "csv");

    rl().args(["--db", &src, "--user", USER, "export", "--file", &out, "--month"])
        .assert()
        .success();

    let dst = setup_test_db("export_round_trip_dst");
    rl().args(["--db", &dst, "--user", USER, "import", &out])
        .assert()
        .success()
        .stdout(contains("Imported 3 rows (0 rejected, 0 duplicates removed)"));

    // a second import of the same file only produces duplicates
    rl().args(["--db", &dst, "--user", USER, "import", &out])
        .assert()
        .success()
        .stdout(contains("Imported 3 rows (0 rejected, 3 duplicates removed)"));

    let listing = |db: &str| {
        let out = rl()
            .args(["--db", db, "--user", USER, "list"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).unwrap()
    };
    let (a, b) = (listing(&src), listing(&dst));
    assert!(b.contains("3 expenses, total ₹180.00"));
    for needle in ["groceries", "bus pass", "2024-02-01"] {
        assert!(a.contains(needle) && b.contains(needle));
    }
}
