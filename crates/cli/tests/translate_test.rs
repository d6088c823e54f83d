use std::io::Write;
use std::process::{Command, Stdio};

fn run_sqlbridge(args: &[&str], stdin_sql: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sqlbridge"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|error| panic!("failed to run sqlbridge: {error}"));

    let mut stdin = child.stdin.take().unwrap_or_else(|| panic!("failed to capture child stdin"));
    stdin
        .write_all(stdin_sql.as_bytes())
        .unwrap_or_else(|error| panic!("failed to write stdin payload: {error}"));
    drop(stdin);

    child.wait_with_output().unwrap_or_else(|error| panic!("failed to wait for sqlbridge: {error}"))
}

#[test]
fn translates_mysql_dump_to_postgres_on_stdout() {
    let output = run_sqlbridge(
        &["translate", "--from", "mysql", "--to", "postgres"],
        "CREATE TABLE users (id INT AUTO_INCREMENT PRIMARY KEY, email VARCHAR(255) NOT NULL) ENGINE=InnoDB;",
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.to_ascii_uppercase().contains("CREATE TABLE"));
    assert!(stdout.contains("users"));
}

#[test]
fn strict_mode_fails_on_an_unparseable_statement() {
    let output = run_sqlbridge(&["translate", "--from", "mysql", "--to", "postgres", "--strict"], "SELECT 1;");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[parse]"), "expected typed parse category, got: {stderr}");
}

#[test]
fn missing_required_to_flag_is_a_usage_error() {
    let output = run_sqlbridge(&["translate", "--from", "mysql"], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn auto_detection_warns_on_ambiguous_input() {
    let output = run_sqlbridge(&["translate", "--to", "postgres"], "CREATE TABLE t (id int);");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_ascii_lowercase().contains("detect"));
}

#[test]
fn writes_translated_sql_to_the_output_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("failed to create temp dir: {error}"));
    let output_path = dir.path().join("schema.sql");

    let output = run_sqlbridge(
        &[
            "translate",
            "--from",
            "mysql",
            "--to",
            "postgres",
            "--output",
            output_path.to_str().unwrap(),
        ],
        "CREATE TABLE users (id INT AUTO_INCREMENT PRIMARY KEY, email VARCHAR(255) NOT NULL) ENGINE=InnoDB;",
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty(), "SQL should go to the file, not stdout");

    let written = std::fs::read_to_string(&output_path).expect("output file should exist");
    assert!(written.to_ascii_uppercase().contains("CREATE TABLE"));
    assert!(written.contains("users"));
}
