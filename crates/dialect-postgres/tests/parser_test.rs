use sqlbridge_core::ir::{ConstraintKind, DataType, ForeignKeyAction, IndexKind};
use sqlbridge_core::{Dialect, Schema};
use sqlbridge_dialect_postgres::PostgresDialect;

fn parse(sql: &str) -> Schema {
    let dialect = PostgresDialect::default();
    let mut schema = Schema::new();
    dialect.parse_statement(sql, &mut schema).expect("statement should parse");
    schema
}

#[test]
fn create_table_with_serial_primary_key() {
    let schema = parse("CREATE TABLE users (id SERIAL PRIMARY KEY, email VARCHAR(255) NOT NULL);");

    let table = schema.get("users").unwrap();
    let id = table.column("id").unwrap();
    assert_eq!(id.data_type, DataType::Serial);
    assert!(id.primary_key);

    let primary = table.primary_key_index().expect("primary index");
    assert_eq!(primary.columns[0].name, "id");
}

#[test]
fn generated_identity_column_sets_auto_increment() {
    let schema = parse("CREATE TABLE counters (id INTEGER GENERATED ALWAYS AS IDENTITY, name TEXT);");

    let table = schema.get("counters").unwrap();
    let id = table.column("id").unwrap();
    assert_eq!(id.data_type, DataType::Int);
    assert!(id.auto_increment);
}

#[test]
fn inline_foreign_key_with_on_delete_cascade() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect.parse_statement("CREATE TABLE users (id SERIAL PRIMARY KEY);", &mut schema).unwrap();
    dialect
        .parse_statement(
            "CREATE TABLE orders (id SERIAL PRIMARY KEY, user_id INTEGER REFERENCES users (id) ON DELETE CASCADE);",
            &mut schema,
        )
        .unwrap();

    let orders = schema.get("orders").unwrap();
    let fk = orders.foreign_keys().next().expect("foreign key");
    assert_eq!(fk.referenced_table, "users");
    assert_eq!(fk.on_delete, Some(ForeignKeyAction::Cascade));
}

#[test]
fn array_type_is_recognized() {
    let schema = parse("CREATE TABLE posts (id SERIAL PRIMARY KEY, tags TEXT[]);");

    let table = schema.get("posts").unwrap();
    let tags = table.column("tags").unwrap();
    assert!(tags.is_array());
}

#[test]
fn create_index_with_using_and_where_clause() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect
        .parse_statement("CREATE TABLE documents (id SERIAL PRIMARY KEY, body TEXT);", &mut schema)
        .unwrap();
    dialect
        .parse_statement("CREATE INDEX idx_body ON documents USING gin (body) WHERE body IS NOT NULL;", &mut schema)
        .unwrap();

    let table = schema.get("documents").unwrap();
    let index = table.indexes.iter().find(|i| i.kind == IndexKind::Index).expect("index");
    assert_eq!(index.method.as_deref(), Some("gin"));
    assert!(index.where_clause.is_some());
}

#[test]
fn check_constraint_and_owner_alter_are_handled() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect
        .parse_statement("CREATE TABLE products (id SERIAL PRIMARY KEY, price INTEGER, CHECK (price > 0));", &mut schema)
        .unwrap();
    dialect.parse_statement("ALTER TABLE products OWNER TO app_user;", &mut schema).expect("OWNER TO is ignorable");

    let table = schema.get("products").unwrap();
    assert!(table.constraints.iter().any(|c| matches!(&c.kind, ConstraintKind::Check { .. })));
}

#[test]
fn alter_table_add_column_appends_a_new_column() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect.parse_statement("CREATE TABLE widgets (id SERIAL PRIMARY KEY);", &mut schema).unwrap();
    dialect
        .parse_statement("ALTER TABLE widgets ADD COLUMN label TEXT NOT NULL;", &mut schema)
        .unwrap();

    let table = schema.get("widgets").unwrap();
    let label = table.column("label").expect("label column added");
    assert_eq!(label.data_type, DataType::Text);
    assert!(!label.nullable);
}

#[test]
fn alter_table_against_an_unseen_table_is_deferred_not_an_error() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect
        .parse_statement("ALTER TABLE widgets ADD COLUMN label TEXT;", &mut schema)
        .expect("forward reference is deferred, not an error");
    assert!(schema.get("widgets").is_none());

    let deferred = schema.take_pending_alters();
    assert_eq!(deferred.len(), 1);

    dialect.parse_statement("CREATE TABLE widgets (id SERIAL PRIMARY KEY);", &mut schema).unwrap();
    for sql in deferred {
        dialect.parse_statement(&sql, &mut schema).unwrap();
    }

    let table = schema.get("widgets").unwrap();
    assert!(table.column("label").is_some());
}

#[test]
fn session_and_sequence_statements_are_ignorable() {
    let mut schema = Schema::new();
    let dialect = PostgresDialect::default();
    dialect.parse_statement("SET statement_timeout = 0;", &mut schema).expect("SET is ignorable");
    dialect.parse_statement("CREATE SEQUENCE users_id_seq;", &mut schema).expect("CREATE SEQUENCE is ignorable");
    dialect
        .parse_statement("SELECT pg_catalog.setval('users_id_seq', 1, true);", &mut schema)
        .expect("SELECT is ignorable");
    assert!(schema.is_empty());
}
