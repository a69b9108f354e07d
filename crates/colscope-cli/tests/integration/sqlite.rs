//! SQLite integration tests for the colscope CLI.
//!
//! These tests create temporary SQLite databases and verify the CLI reads
//! tables, views and stored procedure bodies from them.

use rusqlite::Connection;
use tempfile::tempdir;

use crate::{edge_triples, node_names, parse_json, run_cli, run_cli_success};

/// Create a small HR database with one view and one stored procedure.
fn create_hr_db(path: &std::path::Path) {
    let conn = Connection::open(path).expect("open sqlite db");

    conn.execute_batch(
        r#"
        CREATE TABLE departments (
            department_id   INTEGER PRIMARY KEY,
            department_name TEXT NOT NULL
        );

        CREATE TABLE employees (
            employee_id   INTEGER PRIMARY KEY,
            first_name    TEXT,
            last_name     TEXT NOT NULL,
            salary        REAL,
            department_id INTEGER REFERENCES departments(department_id)
        );

        CREATE VIEW v_employee_names AS
        SELECT
            e.employee_id,
            e.first_name || ' ' || e.last_name AS full_name,
            d.department_name
        FROM employees e
        JOIN departments d ON e.department_id = d.department_id;

        CREATE TABLE stored_procedures (
            sp_id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL UNIQUE,
            body_sql TEXT NOT NULL
        );

        INSERT INTO stored_procedures (name, body_sql) VALUES (
            'sp_payroll',
            'SELECT d.department_name, SUM(e.salary) AS total_salary
             FROM employees e
             JOIN departments d ON e.department_id = d.department_id
             GROUP BY d.department_name'
        );
        "#,
    )
    .expect("create test schema");
}

fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

#[test]
fn test_sqlite_catalog_objects() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("hr.db");
    create_hr_db(&db_path);

    let output = run_cli_success(&["--metadata-url", &sqlite_url(&db_path), "-f", "json"]);
    let report = parse_json(&output);

    assert_eq!(
        node_names(&report),
        vec!["departments", "employees", "v_employee_names", "sp_payroll"]
    );
    assert_eq!(report["metadata"]["database"], "hr");
    assert_eq!(report["graph"]["nodes"][0]["type"], "table");
    assert_eq!(report["graph"]["nodes"][2]["type"], "view");
    assert_eq!(report["graph"]["nodes"][3]["type"], "procedure");

    let department_id = &report["graph"]["nodes"][0]["columns"][0];
    assert_eq!(department_id["name"], "department_id");
    assert_eq!(department_id["dataType"], "INTEGER");
    assert_eq!(department_id["isPrimaryKey"], true);
}

#[test]
fn test_sqlite_view_and_procedure_lineage() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("hr.db");
    create_hr_db(&db_path);

    let output = run_cli_success(&[
        "--metadata-url",
        &sqlite_url(&db_path),
        "-d",
        "sqlite",
        "-f",
        "json",
    ]);
    let report = parse_json(&output);

    let edge = |source: &str, target: &str, kind: &str| {
        (source.to_string(), target.to_string(), kind.to_string())
    };
    assert_eq!(
        edge_triples(&report),
        vec![
            edge("employees.employee_id", "v_employee_names.employee_id", "direct"),
            edge("employees.first_name", "v_employee_names.full_name", "concat"),
            edge("employees.last_name", "v_employee_names.full_name", "concat"),
            edge("departments.department_name", "v_employee_names.department_name", "direct"),
            edge("departments.department_name", "sp_payroll.department_name", "direct"),
            edge("employees.salary", "sp_payroll.total_salary", "aggregate"),
        ]
    );
    assert_eq!(report["metadata"]["parseWarnings"], serde_json::json!([]));
}

#[test]
fn test_sqlite_procedure_columns_are_inferred() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("hr.db");
    create_hr_db(&db_path);

    let output = run_cli_success(&["--metadata-url", &sqlite_url(&db_path), "--template"]);
    let template = parse_json(&output);

    let procedures = template["stored_procedures"].as_array().unwrap();
    assert_eq!(procedures.len(), 1);
    let columns: Vec<&str> = procedures[0]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|column| column["name"].as_str().unwrap())
        .collect();
    assert_eq!(columns, vec!["department_name", "total_salary"]);
    assert_eq!(procedures[0]["columns"][1]["data_type"], "ANY");

    let tables: Vec<&str> = template["tables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|table| table["name"].as_str().unwrap())
        .collect();
    assert_eq!(tables, vec!["departments", "employees"]);
}

#[test]
fn test_sqlite_without_procedures_table() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("plain.db");
    let conn = Connection::open(&db_path).expect("open sqlite db");
    conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);")
        .expect("create table");
    drop(conn);

    let output = run_cli_success(&[
        "--metadata-url",
        &sqlite_url(&db_path),
        "--label",
        "Users DB",
        "-f",
        "json",
    ]);
    let report = parse_json(&output);

    assert_eq!(node_names(&report), vec!["users"]);
    assert_eq!(report["metadata"]["database"], "Users DB");
    assert_eq!(report["metadata"]["edgeCount"], 0);
}

#[test]
fn test_sqlite_missing_database_is_config_error() {
    let dir = tempdir().expect("create temp dir");
    let db_path = dir.path().join("missing.db");

    let output = run_cli(&["--metadata-url", &sqlite_url(&db_path), "-f", "json"]);

    assert_eq!(output.status.code(), Some(66));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("colscope: error:"), "{stderr}");
    assert!(stderr.contains("catalog unavailable"), "{stderr}");
}
