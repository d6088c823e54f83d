//! Exercises the sorter and renderer's documented invariants directly,
//! using a minimal in-test [`Platform`] so the core crate doesn't need to
//! depend on any dialect crate to test itself.

use sqlbridge_core::{
    Column, Constraint, ConstraintKind, DataType, Dialect as DialectTag, ForeignKey, Ident, Index, IndexColumn,
    IndexKind, InsertConflictHandling, Options, Platform, Row, Schema, Table, Value,
};

struct PostgresLikePlatform;

impl Platform for PostgresLikePlatform {
    fn dialect(&self) -> DialectTag {
        DialectTag::PostgreSql
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn render_bool(&self, value: bool) -> String {
        if value { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    fn render_type(&self, data_type: &DataType, length: Option<u32>, _precision: Option<u32>, _scale: Option<u32>) -> String {
        match data_type {
            DataType::Int => "INTEGER".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Serial => "SERIAL".to_string(),
            DataType::BigSerial => "BIGSERIAL".to_string(),
            DataType::Varchar => format!("VARCHAR({})", length.unwrap_or(255)),
            DataType::Text => "TEXT".to_string(),
            DataType::Boolean => "BOOLEAN".to_string(),
            other => format!("{other:?}").to_uppercase(),
        }
    }

    fn supports_alter_add_foreign_key(&self) -> bool {
        true
    }
}

struct SqliteLikePlatform;

impl Platform for SqliteLikePlatform {
    fn dialect(&self) -> DialectTag {
        DialectTag::Sqlite
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn render_bool(&self, value: bool) -> String {
        if value { "1".to_string() } else { "0".to_string() }
    }

    fn render_type(&self, data_type: &DataType, length: Option<u32>, _precision: Option<u32>, _scale: Option<u32>) -> String {
        match data_type {
            DataType::Int | DataType::BigInt | DataType::Serial | DataType::BigSerial => "INTEGER".to_string(),
            DataType::Varchar => format!("VARCHAR({})", length.unwrap_or(255)),
            DataType::Text => "TEXT".to_string(),
            DataType::Boolean => "INTEGER".to_string(),
            other => format!("{other:?}").to_uppercase(),
        }
    }

    fn supports_alter_add_foreign_key(&self) -> bool {
        false
    }
}

fn users_table() -> Table {
    let mut table = Table::named("users");
    let mut id = Column::new("id", DataType::Serial);
    id.nullable = false;
    let mut email = Column::new("email", DataType::Varchar);
    email.length = Some(255);
    email.nullable = false;
    table.columns.push(id);
    table.columns.push(email);
    table.indexes.push(Index {
        name: None,
        kind: IndexKind::Primary,
        columns: vec![IndexColumn::simple("id")],
        method: None,
        where_clause: None,
    });
    table
}

fn orders_table() -> Table {
    let mut table = Table::named("orders");
    let mut id = Column::new("id", DataType::Serial);
    id.nullable = false;
    let user_id = Column::new("user_id", DataType::Int);
    table.columns.push(id);
    table.columns.push(user_id);
    table.indexes.push(Index {
        name: None,
        kind: IndexKind::Primary,
        columns: vec![IndexColumn::simple("id")],
        method: None,
        where_clause: None,
    });
    table.constraints.push(Constraint {
        name: Some("fk_orders_user".to_string()),
        kind: ConstraintKind::ForeignKey(ForeignKey {
            columns: vec!["user_id".to_string()],
            referenced_table: "users".to_string(),
            referenced_columns: vec!["id".to_string()],
            on_delete: Some(sqlbridge_core::ForeignKeyAction::Cascade),
            on_update: None,
        }),
    });
    table
}

#[test]
fn property_1_sort_for_drop_is_reverse_of_sort_for_create() {
    let orders = orders_table();
    let users = users_table();
    let tables = vec![&orders, &users];

    let create_order = sqlbridge_core::ordering::sort_for_create(&tables).order;
    let drop_order = sqlbridge_core::ordering::sort_for_drop(&tables).order;

    assert_eq!(create_order, vec!["users".to_string(), "orders".to_string()]);
    let mut reversed = create_order;
    reversed.reverse();
    assert_eq!(drop_order, reversed);
}

#[test]
fn property_2_check_expressions_have_no_backticks_on_non_mysql_target() {
    let mut table = Table::named("products");
    table.constraints.push(Constraint {
        name: Some("chk_price".to_string()),
        kind: ConstraintKind::Check {
            expression: "`price` > 0".to_string(),
        },
    });
    let mut schema = Schema::new();
    schema.insert(table);

    let names = vec!["products".to_string()];
    let platform = PostgresLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    assert!(!output.sql.contains('`'));
    assert!(output.sql.contains("CHECK (\"price\" > 0)"));
}

#[test]
fn property_4_foreign_keys_are_never_inline_and_appear_exactly_once() {
    let orders = orders_table();
    let users = users_table();
    let mut schema = Schema::new();
    schema.insert(users);
    schema.insert(orders);

    let names = vec!["users".to_string(), "orders".to_string()];
    let platform = PostgresLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    let create_table_orders = output.sql.split("CREATE TABLE \"orders\"").nth(1).unwrap();
    let before_next_statement = &create_table_orders[..create_table_orders.find(';').unwrap()];
    assert!(!before_next_statement.to_uppercase().contains("FOREIGN KEY"));

    assert_eq!(output.sql.matches("ADD CONSTRAINT").count(), 1);
    assert!(output.sql.contains("ALTER TABLE \"orders\" ADD CONSTRAINT"));
}

#[test]
fn scenario_mysql_to_sqlite_foreign_keys_are_inlined_not_altered() {
    let orders = orders_table();
    let users = users_table();
    let mut schema = Schema::new();
    schema.insert(users);
    schema.insert(orders);

    let names = vec!["users".to_string(), "orders".to_string()];
    let platform = SqliteLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    assert!(!output.sql.contains("ALTER TABLE"));
    assert!(!output.sql.contains("ADD CONSTRAINT"));

    let create_table_orders = output.sql.split("CREATE TABLE \"orders\"").nth(1).unwrap();
    let before_next_statement = &create_table_orders[..create_table_orders.find(';').unwrap()];
    assert!(before_next_statement.contains("FOREIGN KEY (\"user_id\") REFERENCES \"users\" (\"id\")"));
    assert_eq!(output.sql.matches("FOREIGN KEY").count(), 1);
}

#[test]
fn property_5_column_order_is_preserved() {
    let users = users_table();
    let mut schema = Schema::new();
    schema.insert(users);

    let names = vec!["users".to_string()];
    let platform = PostgresLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    let id_pos = output.sql.find("\"id\"").unwrap();
    let email_pos = output.sql.find("\"email\"").unwrap();
    assert!(id_pos < email_pos);
}

#[test]
fn property_6_update_trigger_emitted_exactly_once() {
    let mut table = Table::named("posts");
    table.columns.push(Column::new("id", DataType::Int));
    table.columns.push(Column::new("updated_at", DataType::Timestamp));
    table.needs_update_trigger = true;
    table.update_trigger_columns = vec!["updated_at".to_string()];
    table.indexes.push(Index {
        name: None,
        kind: IndexKind::Primary,
        columns: vec![IndexColumn::simple("id")],
        method: None,
        where_clause: None,
    });

    let mut schema = Schema::new();
    schema.insert(table);
    let names = vec!["posts".to_string()];
    let platform = PostgresLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    assert_eq!(output.sql.matches("CREATE TRIGGER").count(), 1);
    assert!(output.sql.contains("updated_at"));
}

#[test]
fn property_7_insert_batches_respect_batch_size() {
    let mut table = Table::named("tags");
    table.columns.push(Column::new("id", DataType::Int));
    table.indexes.push(Index {
        name: None,
        kind: IndexKind::Primary,
        columns: vec![IndexColumn::simple("id")],
        method: None,
        where_clause: None,
    });
    for i in 0..5 {
        let mut row = Row::new();
        row.insert("id".to_string(), Value::Integer(i));
        table.data.push(row);
    }

    let mut schema = Schema::new();
    schema.insert(table);
    let names = vec!["tags".to_string()];
    let platform = PostgresLikePlatform;
    let mut options = Options::default();
    options.insert_batch_size = 2;

    let output = sqlbridge_core::render::render(&schema, &names, &platform, &options);
    let insert_count = output.sql.matches("INSERT INTO").count();
    assert_eq!(insert_count, 3); // 2 + 2 + 1
}

#[test]
fn property_8_identifiers_use_target_quoting() {
    let users = users_table();
    let mut schema = Schema::new();
    schema.insert(users);
    let names = vec!["users".to_string()];
    let platform = PostgresLikePlatform;
    let output = sqlbridge_core::render::render(&schema, &names, &platform, &Options::default());

    assert!(output.sql.contains("\"users\""));
    assert!(!output.sql.contains('`'));
}

#[test]
fn scenario_insert_conflict_update_on_postgres_uses_excluded() {
    let mut table = Table::named("settings");
    table.columns.push(Column::new("id", DataType::Int));
    table.columns.push(Column::new("value", DataType::Text));
    table.indexes.push(Index {
        name: None,
        kind: IndexKind::Primary,
        columns: vec![IndexColumn::simple("id")],
        method: None,
        where_clause: None,
    });
    let mut row = Row::new();
    row.insert("id".to_string(), Value::Integer(1));
    row.insert("value".to_string(), Value::String("a".to_string()));
    table.data.push(row);

    let mut schema = Schema::new();
    schema.insert(table);
    let names = vec!["settings".to_string()];
    let platform = PostgresLikePlatform;
    let mut options = Options::default();
    options.on_conflict = InsertConflictHandling::Update;

    let output = sqlbridge_core::render::render(&schema, &names, &platform, &options);
    assert!(output.sql.contains("ON CONFLICT (\"id\") DO UPDATE SET"));
    assert!(output.sql.contains("EXCLUDED"));
}

#[test]
fn unreferenced_ident_type_is_plain_string() {
    let ident: Ident = "whatever".to_string();
    assert_eq!(ident, "whatever");
}
