use sqlbridge_core::ir::{ConstraintKind, DataType, ForeignKeyAction, IndexKind};
use sqlbridge_core::{Dialect, Schema};
use sqlbridge_dialect_mysql::MysqlDialect;

fn parse(sql: &str) -> Schema {
    let dialect = MysqlDialect::default();
    let mut schema = Schema::new();
    dialect.parse_statement(sql, &mut schema).expect("statement should parse");
    schema
}

#[test]
fn create_table_with_inline_primary_key_and_auto_increment() {
    let schema = parse("CREATE TABLE users (id INT NOT NULL AUTO_INCREMENT PRIMARY KEY, email VARCHAR(255) NOT NULL) ENGINE=InnoDB;");

    let table = schema.get("users").expect("users table");
    assert_eq!(table.columns.len(), 2);
    let id = table.column("id").unwrap();
    assert_eq!(id.data_type, DataType::Int);
    assert!(id.auto_increment);
    assert!(!id.nullable);

    let primary = table.primary_key_index().expect("primary index");
    assert_eq!(primary.columns.len(), 1);
    assert_eq!(primary.columns[0].name, "id");
    assert_eq!(table.options.engine.as_deref(), Some("InnoDB"));
}

#[test]
fn table_level_foreign_key_with_cascade() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect
        .parse_statement("CREATE TABLE users (id INT PRIMARY KEY);", &mut schema)
        .unwrap();
    dialect
        .parse_statement(
            "CREATE TABLE orders (id INT PRIMARY KEY, user_id INT, CONSTRAINT fk_orders_user FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE);",
            &mut schema,
        )
        .unwrap();

    let orders = schema.get("orders").unwrap();
    let fk = orders.foreign_keys().next().expect("foreign key");
    assert_eq!(fk.referenced_table, "users");
    assert_eq!(fk.on_delete, Some(ForeignKeyAction::Cascade));
}

#[test]
fn unsigned_and_enum_columns() {
    let schema = parse("CREATE TABLE widgets (id INT UNSIGNED NOT NULL, status ENUM('on', 'off') NOT NULL DEFAULT 'off');");

    let table = schema.get("widgets").unwrap();
    let id = table.column("id").unwrap();
    assert!(id.unsigned);

    let status = table.column("status").unwrap();
    match &status.data_type {
        DataType::Enum(values) => assert_eq!(values, &vec!["on".to_string(), "off".to_string()]),
        other => panic!("expected enum, got {other:?}"),
    }
}

#[test]
fn fulltext_index_is_recognized() {
    let schema = parse("CREATE TABLE articles (id INT PRIMARY KEY, body TEXT, FULLTEXT KEY idx_body (body));");

    let table = schema.get("articles").unwrap();
    let fulltext = table.indexes.iter().find(|i| i.kind == IndexKind::Fulltext).expect("fulltext index");
    assert_eq!(fulltext.columns[0].name, "body");
}

#[test]
fn insert_statement_appends_row() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect
        .parse_statement("CREATE TABLE tags (id INT PRIMARY KEY, name VARCHAR(50));", &mut schema)
        .unwrap();
    dialect
        .parse_statement("INSERT INTO tags (id, name) VALUES (1, 'rust'), (2, 'sql');", &mut schema)
        .unwrap();

    let tags = schema.get("tags").unwrap();
    assert_eq!(tags.data.len(), 2);
    assert_eq!(tags.data[0].get("name").unwrap(), &sqlbridge_core::ir::Value::String("rust".to_string()));
}

#[test]
fn check_constraint_is_captured_verbatim() {
    let schema = parse("CREATE TABLE products (id INT PRIMARY KEY, price INT, CHECK (`price` > 0));");

    let table = schema.get("products").unwrap();
    let has_check = table.constraints.iter().any(|c| matches!(&c.kind, ConstraintKind::Check { expression } if expression.contains("price")));
    assert!(has_check);
}

#[test]
fn alter_table_add_column_appends_a_new_column() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect
        .parse_statement("CREATE TABLE widgets (id INT PRIMARY KEY);", &mut schema)
        .unwrap();
    dialect
        .parse_statement("ALTER TABLE widgets ADD COLUMN label VARCHAR(64) NOT NULL;", &mut schema)
        .unwrap();

    let table = schema.get("widgets").unwrap();
    let label = table.column("label").expect("label column added");
    assert_eq!(label.data_type, DataType::Varchar);
    assert!(!label.nullable);
}

#[test]
fn alter_table_add_column_without_the_column_keyword() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect
        .parse_statement("CREATE TABLE widgets (id INT PRIMARY KEY);", &mut schema)
        .unwrap();
    dialect.parse_statement("ALTER TABLE widgets ADD price INT;", &mut schema).unwrap();

    let table = schema.get("widgets").unwrap();
    assert!(table.column("price").is_some());
}

#[test]
fn alter_table_against_an_unseen_table_is_deferred_not_an_error() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect
        .parse_statement("ALTER TABLE widgets ADD COLUMN label VARCHAR(64);", &mut schema)
        .expect("forward reference is deferred, not an error");
    assert!(schema.get("widgets").is_none());

    let deferred = schema.take_pending_alters();
    assert_eq!(deferred.len(), 1);

    dialect
        .parse_statement("CREATE TABLE widgets (id INT PRIMARY KEY);", &mut schema)
        .unwrap();
    for sql in deferred {
        dialect.parse_statement(&sql, &mut schema).unwrap();
    }

    let table = schema.get("widgets").unwrap();
    assert!(table.column("label").is_some());
}

#[test]
fn set_and_lock_statements_are_silently_ignored() {
    let mut schema = Schema::new();
    let dialect = MysqlDialect::default();
    dialect.parse_statement("SET FOREIGN_KEY_CHECKS=0;", &mut schema).expect("SET is ignorable");
    dialect.parse_statement("LOCK TABLES users WRITE;", &mut schema).expect("LOCK is ignorable");
    assert!(schema.is_empty());
}
