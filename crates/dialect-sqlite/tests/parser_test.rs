use sqlbridge_core::ir::{ConstraintKind, DataType, ForeignKeyAction, IndexKind};
use sqlbridge_core::{Dialect, Schema};
use sqlbridge_dialect_sqlite::SqliteDialect;

fn parse(sql: &str) -> Schema {
    let dialect = SqliteDialect::default();
    let mut schema = Schema::new();
    dialect.parse_statement(sql, &mut schema).expect("statement should parse");
    schema
}

#[test]
fn integer_primary_key_with_autoincrement() {
    let schema = parse("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, email TEXT NOT NULL);");

    let table = schema.get("users").unwrap();
    let id = table.column("id").unwrap();
    assert_eq!(id.data_type, DataType::Int);
    assert!(id.auto_increment);
    assert!(id.primary_key);
}

#[test]
fn inline_foreign_key_with_on_delete_cascade() {
    let mut schema = Schema::new();
    let dialect = SqliteDialect::default();
    dialect.parse_statement("CREATE TABLE users (id INTEGER PRIMARY KEY);", &mut schema).unwrap();
    dialect
        .parse_statement(
            "CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER REFERENCES users (id) ON DELETE CASCADE);",
            &mut schema,
        )
        .unwrap();

    let orders = schema.get("orders").unwrap();
    let fk = orders.foreign_keys().next().expect("foreign key");
    assert_eq!(fk.referenced_table, "users");
    assert_eq!(fk.on_delete, Some(ForeignKeyAction::Cascade));
}

#[test]
fn multi_word_type_names_are_recognized() {
    let schema = parse("CREATE TABLE t (a VARYING CHARACTER(20), b UNSIGNED BIG INT, c DOUBLE PRECISION);");

    let table = schema.get("t").unwrap();
    assert_eq!(table.column("a").unwrap().data_type, DataType::Varchar);
    assert_eq!(table.column("b").unwrap().data_type, DataType::Int);
    assert_eq!(table.column("c").unwrap().data_type, DataType::Custom("REAL".to_string()));
}

#[test]
fn without_rowid_option_is_consumed() {
    let schema = parse("CREATE TABLE kv (key TEXT PRIMARY KEY, value TEXT) WITHOUT ROWID;");
    assert!(schema.get("kv").is_some());
}

#[test]
fn create_index_with_where_clause() {
    let mut schema = Schema::new();
    let dialect = SqliteDialect::default();
    dialect
        .parse_statement("CREATE TABLE documents (id INTEGER PRIMARY KEY, body TEXT);", &mut schema)
        .unwrap();
    dialect
        .parse_statement("CREATE INDEX idx_body ON documents (body) WHERE body IS NOT NULL;", &mut schema)
        .unwrap();

    let table = schema.get("documents").unwrap();
    let index = table.indexes.iter().find(|i| i.kind == IndexKind::Index).expect("index");
    assert!(index.where_clause.is_some());
}

#[test]
fn check_constraint_is_captured() {
    let schema = parse("CREATE TABLE products (id INTEGER PRIMARY KEY, price INTEGER, CHECK (price > 0));");

    let table = schema.get("products").unwrap();
    assert!(table.constraints.iter().any(|c| matches!(&c.kind, ConstraintKind::Check { .. })));
}

#[test]
fn pragma_and_transaction_statements_are_ignorable() {
    let mut schema = Schema::new();
    let dialect = SqliteDialect::default();
    dialect.parse_statement("PRAGMA foreign_keys=OFF;", &mut schema).expect("PRAGMA is ignorable");
    dialect.parse_statement("BEGIN TRANSACTION;", &mut schema).expect("BEGIN is ignorable");
    dialect.parse_statement("COMMIT;", &mut schema).expect("COMMIT is ignorable");
    assert!(schema.is_empty());
}
