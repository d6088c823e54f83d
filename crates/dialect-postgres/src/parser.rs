//! Recursive-descent parsing of PostgreSQL `CREATE TABLE`, `ALTER TABLE ...
//! ADD COLUMN`/`ADD CONSTRAINT`, `CREATE INDEX`, and `INSERT INTO`
//! statements into the shared schema IR.
//!
//! A `pg_dump` schema-plus-data file carries a lot of ceremony this dialect
//! never needs to translate: `SET`, session config, `CREATE SEQUENCE`,
//! `ALTER SEQUENCE ... OWNED BY`, `SELECT pg_catalog.setval(...)`, `ALTER
//! TABLE ... OWNER TO`, and `COMMENT ON`. Those are recognized and silently
//! skipped rather than treated as parse failures.

use sqlbridge_core::error::{ParseError, SourceLocation};
use sqlbridge_core::ir::{
    Column, Constraint, ConstraintKind, DataType, Expr, ForeignKey, ForeignKeyAction, Index, IndexColumn, IndexKind,
    Row, Schema, SortDirection, Table, Value,
};
use sqlbridge_core::{tokens_to_source, Error, Lexer, LexerDialect, Result, Token, TokenCursor};

pub(crate) fn parse_statement(sql: &str, schema: &mut Schema) -> Result<()> {
    let tokens = Lexer::new(sql, LexerDialect::PostgreSql).tokenize();
    let mut cursor = TokenCursor::new(&tokens);

    if cursor.eat_word("CREATE") {
        return parse_create(sql, &mut cursor, schema);
    }
    if cursor.eat_word("ALTER") {
        return parse_alter(sql, &mut cursor, schema);
    }
    if cursor.eat_word("INSERT") {
        return parse_insert(sql, &mut cursor, schema);
    }
    if is_ignorable_statement(&cursor) {
        return Ok(());
    }

    Err(statement_error(sql, "unrecognized statement"))
}

fn is_ignorable_statement(cursor: &TokenCursor<'_>) -> bool {
    const IGNORED_LEADERS: &[&str] = &[
        "SET", "SELECT", "BEGIN", "COMMIT", "GRANT", "REVOKE", "DROP", "COMMENT", "START", "VACUUM", "ANALYZE",
    ];
    IGNORED_LEADERS.iter().any(|word| cursor.peek().is_some_and(|t| t.is_word_ci(word)))
}

fn parse_create(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    if cursor.eat_word("TABLE") {
        return parse_create_table(sql, cursor, schema);
    }

    let unique = cursor.eat_word("UNIQUE");
    if cursor.eat_word("INDEX") {
        return parse_create_index(sql, cursor, schema, unique);
    }

    if cursor.eat_word("SEQUENCE")
        || cursor.eat_word("SCHEMA")
        || cursor.eat_word("EXTENSION")
        || cursor.eat_word("TYPE")
        || cursor.eat_word("FUNCTION")
    {
        return Ok(());
    }

    if cursor.eat_word("VIEW") || cursor.eat_word("TRIGGER") || cursor.eat_word("PROCEDURE") {
        return Err(unsupported(sql, "CREATE VIEW/TRIGGER/PROCEDURE"));
    }

    Err(statement_error(sql, "unrecognized CREATE statement"))
}

fn parse_create_table(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    if cursor.eat_word("IF") {
        cursor.eat_word("NOT");
        cursor.eat_word("EXISTS");
    }
    let name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;
    let mut table = Table::named(name);

    if !cursor.eat_punct('(') {
        return Err(statement_error(sql, "expected `(` after table name"));
    }

    let mut inline_primary: Vec<String> = Vec::new();
    loop {
        if cursor.eat_punct(')') {
            break;
        }
        if is_table_constraint_start(cursor) {
            parse_table_constraint(sql, cursor, &mut table)?;
        } else {
            parse_column_def(sql, cursor, &mut table, &mut inline_primary)?;
        }
        if cursor.eat_punct(',') {
            continue;
        }
        if cursor.eat_punct(')') {
            break;
        }
        return Err(statement_error(sql, "expected `,` or `)` in column list"));
    }

    if table.primary_key_index().is_none() && !inline_primary.is_empty() {
        table.indexes.push(Index {
            name: None,
            kind: IndexKind::Primary,
            columns: inline_primary.iter().map(|c| IndexColumn::simple(c.clone())).collect(),
            method: None,
            where_clause: None,
        });
    }

    while cursor.eat_word("WITH") || cursor.eat_word("TABLESPACE") || cursor.eat_word("INHERITS") {
        if matches!(cursor.peek(), Some(Token::Punct('('))) {
            cursor.advance();
            cursor.skip_balanced_parens();
        } else {
            cursor.eat_ident();
        }
    }

    schema.insert(table);
    Ok(())
}

fn is_table_constraint_start(cursor: &TokenCursor<'_>) -> bool {
    const STARTERS: &[&str] = &["PRIMARY", "UNIQUE", "CONSTRAINT", "FOREIGN", "CHECK"];
    STARTERS.iter().any(|word| cursor.peek().is_some_and(|t| t.is_word_ci(word)))
}

fn parse_column_def(sql: &str, cursor: &mut TokenCursor<'_>, table: &mut Table, inline_primary: &mut Vec<String>) -> Result<()> {
    let name = cursor.eat_ident().ok_or_else(|| statement_error(sql, "expected column name"))?;
    let (data_type, length, precision, scale) = parse_data_type(cursor);
    let mut column = Column::new(name.clone(), data_type);
    column.length = length;
    column.precision = precision;
    column.scale = scale;

    loop {
        match cursor.peek() {
            Some(Token::Punct(',')) | Some(Token::Punct(')')) | None => break,
            Some(t) if t.is_word_ci("NOT") => {
                cursor.advance();
                cursor.eat_word("NULL");
                column.nullable = false;
            }
            Some(t) if t.is_word_ci("NULL") => {
                cursor.advance();
                column.nullable = true;
            }
            Some(t) if t.is_word_ci("DEFAULT") => {
                cursor.advance();
                column.default = Some(parse_default_value(cursor));
            }
            Some(t) if t.is_word_ci("GENERATED") => {
                cursor.advance();
                cursor.eat_word("ALWAYS");
                cursor.eat_word("BY");
                cursor.eat_word("DEFAULT");
                cursor.eat_word("AS");
                if cursor.eat_word("IDENTITY") {
                    column.auto_increment = true;
                    if matches!(cursor.peek(), Some(Token::Punct('('))) {
                        cursor.advance();
                        cursor.skip_balanced_parens();
                    }
                } else if cursor.eat_word("AS") {
                    // GENERATED ALWAYS AS (expr) STORED
                    parse_parenthesized_expression(cursor);
                    cursor.eat_word("STORED");
                }
            }
            Some(t) if t.is_word_ci("PRIMARY") => {
                cursor.advance();
                cursor.eat_word("KEY");
                column.primary_key = true;
                inline_primary.push(name.clone());
            }
            Some(t) if t.is_word_ci("UNIQUE") => {
                cursor.advance();
                column.unique = true;
                table.constraints.push(Constraint {
                    name: None,
                    kind: ConstraintKind::Unique { columns: vec![name.clone()] },
                });
            }
            Some(t) if t.is_word_ci("REFERENCES") => {
                cursor.advance();
                let referenced_table = eat_table_name(cursor).unwrap_or_default();
                let referenced_columns = if matches!(cursor.peek(), Some(Token::Punct('('))) {
                    parse_plain_column_list(sql, cursor)?
                } else {
                    Vec::new()
                };
                let (on_delete, on_update) = parse_fk_actions(cursor);
                table.constraints.push(Constraint {
                    name: None,
                    kind: ConstraintKind::ForeignKey(ForeignKey {
                        columns: vec![name.clone()],
                        referenced_table,
                        referenced_columns,
                        on_delete,
                        on_update,
                    }),
                });
            }
            Some(t) if t.is_word_ci("CHECK") => {
                cursor.advance();
                let expression = parse_parenthesized_expression(cursor);
                table.constraints.push(Constraint {
                    name: None,
                    kind: ConstraintKind::Check { expression },
                });
            }
            Some(t) if t.is_word_ci("COLLATE") => {
                cursor.advance();
                cursor.eat_ident();
            }
            Some(_) => {
                cursor.advance();
            }
        }
    }

    table.columns.push(column);
    Ok(())
}

fn parse_default_value(cursor: &mut TokenCursor<'_>) -> Expr {
    match cursor.peek().cloned() {
        Some(Token::StringLiteral(s)) => {
            cursor.advance();
            Expr::Literal(Value::String(s))
        }
        Some(Token::Number(n)) => {
            cursor.advance();
            if n.contains('.') {
                Expr::Literal(Value::Float(n.parse().unwrap_or(0.0)))
            } else {
                Expr::Literal(Value::Integer(n.parse().unwrap_or(0)))
            }
        }
        Some(t) if t.is_word_ci("NULL") => {
            cursor.advance();
            Expr::Literal(Value::Null)
        }
        Some(t) if t.is_word_ci("TRUE") => {
            cursor.advance();
            Expr::Literal(Value::Bool(true))
        }
        Some(t) if t.is_word_ci("FALSE") => {
            cursor.advance();
            Expr::Literal(Value::Bool(false))
        }
        _ => {
            let mut tokens = cursor.collect_until_top_level(&[',', ')']);
            if tokens.is_empty()
                && let Some(token) = cursor.advance().cloned()
            {
                tokens.push(token);
            }
            Expr::Raw(tokens_to_source(&tokens, LexerDialect::PostgreSql))
        }
    }
}

fn parse_table_constraint(sql: &str, cursor: &mut TokenCursor<'_>, table: &mut Table) -> Result<()> {
    let name = if cursor.eat_word("CONSTRAINT") { eat_optional_name(cursor) } else { None };

    if cursor.eat_word("PRIMARY") {
        cursor.eat_word("KEY");
        let columns = parse_plain_column_list(sql, cursor)?;
        if columns.len() == 1
            && let Some(column) = table.columns.iter_mut().find(|c| c.name == columns[0])
        {
            column.primary_key = true;
        }
        table.indexes.push(Index {
            name,
            kind: IndexKind::Primary,
            columns: columns.into_iter().map(IndexColumn::simple).collect(),
            method: None,
            where_clause: None,
        });
        return Ok(());
    }

    if cursor.eat_word("UNIQUE") {
        let columns = parse_plain_column_list(sql, cursor)?;
        table.constraints.push(Constraint {
            name,
            kind: ConstraintKind::Unique { columns },
        });
        return Ok(());
    }

    if cursor.eat_word("CHECK") {
        let expression = parse_parenthesized_expression(cursor);
        table.constraints.push(Constraint {
            name,
            kind: ConstraintKind::Check { expression },
        });
        return Ok(());
    }

    if cursor.eat_word("FOREIGN") {
        cursor.eat_word("KEY");
        let columns = parse_plain_column_list(sql, cursor)?;
        if !cursor.eat_word("REFERENCES") {
            return Err(statement_error(sql, "expected REFERENCES in FOREIGN KEY constraint"));
        }
        let referenced_table = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected referenced table name"))?;
        let referenced_columns = parse_plain_column_list(sql, cursor)?;
        let (on_delete, on_update) = parse_fk_actions(cursor);
        table.constraints.push(Constraint {
            name,
            kind: ConstraintKind::ForeignKey(ForeignKey {
                columns,
                referenced_table,
                referenced_columns,
                on_delete,
                on_update,
            }),
        });
        return Ok(());
    }

    Err(statement_error(sql, "unrecognized table constraint"))
}

fn parse_fk_actions(cursor: &mut TokenCursor<'_>) -> (Option<ForeignKeyAction>, Option<ForeignKeyAction>) {
    let mut on_delete = None;
    let mut on_update = None;
    loop {
        if !cursor.eat_word("ON") {
            break;
        }
        let is_delete = cursor.eat_word("DELETE");
        if !is_delete {
            cursor.eat_word("UPDATE");
        }
        let action = parse_fk_action(cursor);
        if is_delete {
            on_delete = action;
        } else {
            on_update = action;
        }
    }
    (on_delete, on_update)
}

fn parse_fk_action(cursor: &mut TokenCursor<'_>) -> Option<ForeignKeyAction> {
    if cursor.eat_word("CASCADE") {
        return Some(ForeignKeyAction::Cascade);
    }
    if cursor.eat_word("RESTRICT") {
        return Some(ForeignKeyAction::Restrict);
    }
    if cursor.eat_word("SET") {
        if cursor.eat_word("NULL") {
            return Some(ForeignKeyAction::SetNull);
        }
        if cursor.eat_word("DEFAULT") {
            return Some(ForeignKeyAction::SetDefault);
        }
    }
    if cursor.eat_word("NO") {
        cursor.eat_word("ACTION");
        return Some(ForeignKeyAction::NoAction);
    }
    None
}

fn parse_plain_column_list(sql: &str, cursor: &mut TokenCursor<'_>) -> Result<Vec<String>> {
    if !cursor.eat_punct('(') {
        return Err(statement_error(sql, "expected `(` in column list"));
    }
    let mut columns = Vec::new();
    loop {
        let Some(name) = cursor.eat_ident() else {
            return Err(statement_error(sql, "expected column name"));
        };
        columns.push(name);
        if cursor.eat_punct(',') {
            continue;
        }
        break;
    }
    if !cursor.eat_punct(')') {
        return Err(statement_error(sql, "expected `)` closing column list"));
    }
    Ok(columns)
}

fn parse_index_column_list(sql: &str, cursor: &mut TokenCursor<'_>) -> Result<Vec<IndexColumn>> {
    if !cursor.eat_punct('(') {
        return Err(statement_error(sql, "expected `(` in index column list"));
    }
    let mut columns = Vec::new();
    loop {
        let Some(name) = cursor.eat_ident() else {
            return Err(statement_error(sql, "expected column name"));
        };
        let direction = if cursor.eat_word("ASC") {
            Some(SortDirection::Asc)
        } else if cursor.eat_word("DESC") {
            Some(SortDirection::Desc)
        } else {
            None
        };
        columns.push(IndexColumn { name, length: None, direction });
        if cursor.eat_punct(',') {
            continue;
        }
        break;
    }
    if !cursor.eat_punct(')') {
        return Err(statement_error(sql, "expected `)` closing index column list"));
    }
    Ok(columns)
}

fn parse_parenthesized_expression(cursor: &mut TokenCursor<'_>) -> String {
    if !cursor.eat_punct('(') {
        return String::new();
    }
    let inner = cursor.collect_until_top_level(&[')']);
    cursor.eat_punct(')');
    tokens_to_source(&inner, LexerDialect::PostgreSql)
}

fn eat_optional_name(cursor: &mut TokenCursor<'_>) -> Option<String> {
    if matches!(cursor.peek(), Some(Token::Punct('('))) {
        return None;
    }
    cursor.eat_ident()
}

fn eat_table_name(cursor: &mut TokenCursor<'_>) -> Option<String> {
    let first = cursor.eat_ident()?;
    if cursor.eat_punct('.') {
        return cursor.eat_ident();
    }
    Some(first)
}

fn parse_data_type(cursor: &mut TokenCursor<'_>) -> (DataType, Option<u32>, Option<u32>, Option<u32>) {
    let Some(name) = cursor.eat_ident() else {
        return (DataType::Custom(String::new()), None, None, None);
    };
    let mut upper = name.to_ascii_uppercase();

    if upper == "CHARACTER" {
        if cursor.eat_word("VARYING") {
            upper = "VARCHAR".to_string();
        } else {
            upper = "CHAR".to_string();
        }
    }
    if upper == "DOUBLE" {
        cursor.eat_word("PRECISION");
    }

    let (base, length, precision, scale) = match upper.as_str() {
        "INT" | "INTEGER" | "INT4" => (DataType::Int, None, None, None),
        "SMALLINT" | "INT2" => (DataType::SmallInt, None, None, None),
        "BIGINT" | "INT8" => (DataType::BigInt, None, None, None),
        "SERIAL" | "SERIAL4" => (DataType::Serial, None, None, None),
        "SMALLSERIAL" | "SERIAL2" => (DataType::SmallSerial, None, None, None),
        "BIGSERIAL" | "SERIAL8" => (DataType::BigSerial, None, None, None),
        "NUMERIC" | "DECIMAL" => {
            let (p, s) = parse_precision_scale(cursor);
            (DataType::Decimal, None, p, s)
        }
        "REAL" | "FLOAT4" => (DataType::Custom("REAL".to_string()), None, None, None),
        "DOUBLE" => (DataType::Custom("DOUBLE PRECISION".to_string()), None, None, None),
        "FLOAT8" => (DataType::Custom("DOUBLE PRECISION".to_string()), None, None, None),
        "BOOLEAN" | "BOOL" => (DataType::Boolean, None, None, None),
        "VARCHAR" => {
            let length = consume_parenthesized_literal(cursor).and_then(|n| n.parse().ok());
            (DataType::Varchar, length, None, None)
        }
        "CHAR" => {
            let length = consume_parenthesized_literal(cursor).and_then(|n| n.parse().ok());
            (DataType::Char, length, None, None)
        }
        "TEXT" => (DataType::Text, None, None, None),
        "BYTEA" => (DataType::Blob, None, None, None),
        "DATE" => (DataType::Date, None, None, None),
        "TIMESTAMP" => {
            let _ = cursor.eat_word("WITHOUT") || cursor.eat_word("WITH");
            cursor.eat_word("TIME");
            cursor.eat_word("ZONE");
            (DataType::Timestamp, None, None, None)
        }
        "TIME" => (DataType::Custom("TIME".to_string()), None, None, None),
        "JSON" => (DataType::Json, None, None, None),
        "JSONB" => (DataType::Json, None, None, None),
        "UUID" => (DataType::Uuid, None, None, None),
        other => (DataType::Custom(other.to_string()), None, None, None),
    };

    let mut base = base;
    while cursor.eat_punct('[') {
        cursor.eat_punct(']');
        base = DataType::Array(Box::new(base));
    }

    (base, length, precision, scale)
}

fn consume_parenthesized_literal(cursor: &mut TokenCursor<'_>) -> Option<String> {
    if !cursor.eat_punct('(') {
        return None;
    }
    let value = if let Some(Token::Number(n)) = cursor.peek().cloned() {
        cursor.advance();
        Some(n)
    } else {
        None
    };
    cursor.eat_punct(')');
    value
}

fn parse_precision_scale(cursor: &mut TokenCursor<'_>) -> (Option<u32>, Option<u32>) {
    if !cursor.eat_punct('(') {
        return (None, None);
    }
    let precision = if let Some(Token::Number(n)) = cursor.peek().cloned() {
        cursor.advance();
        n.parse().ok()
    } else {
        None
    };
    let scale = if cursor.eat_punct(',') {
        if let Some(Token::Number(n)) = cursor.peek().cloned() {
            cursor.advance();
            n.parse().ok()
        } else {
            None
        }
    } else {
        None
    };
    cursor.eat_punct(')');
    (precision, scale)
}

fn parse_create_index(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema, unique: bool) -> Result<()> {
    cursor.eat_word("CONCURRENTLY");
    let name = if cursor.eat_word("IF") {
        cursor.eat_word("NOT");
        cursor.eat_word("EXISTS");
        cursor.eat_ident()
    } else {
        cursor.eat_ident()
    };
    if !cursor.eat_word("ON") {
        return Err(statement_error(sql, "expected ON in CREATE INDEX"));
    }
    let table_name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;

    let method = if cursor.eat_word("USING") { cursor.eat_ident() } else { None };
    let columns = parse_index_column_list(sql, cursor)?;

    let where_clause = if cursor.eat_word("WHERE") {
        let remainder = cursor.collect_until_top_level(&[]);
        Some(tokens_to_source(&remainder, LexerDialect::PostgreSql))
    } else {
        None
    };

    let Some(table) = schema.get_mut(&table_name) else {
        return Err(statement_error(sql, &format!("CREATE INDEX references unknown table `{table_name}`")));
    };
    table.indexes.push(Index {
        name,
        kind: if unique { IndexKind::Unique } else { IndexKind::Index },
        columns,
        method,
        where_clause,
    });
    Ok(())
}

fn parse_alter(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    if cursor.eat_word("SEQUENCE") {
        return Ok(());
    }
    if !cursor.eat_word("TABLE") {
        return Err(statement_error(sql, "expected TABLE or SEQUENCE after ALTER"));
    }
    cursor.eat_word("IF");
    cursor.eat_word("EXISTS");
    cursor.eat_word("ONLY");
    let table_name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;

    if !schema.contains(&table_name) {
        schema.defer_alter(sql.to_string());
        return Ok(());
    }

    if cursor.eat_word("OWNER") {
        return Ok(());
    }

    if !cursor.eat_word("ADD") {
        return Err(statement_error(sql, "only ALTER TABLE ... ADD COLUMN/CONSTRAINT is supported"));
    }

    cursor.eat_word("COLUMN");
    if is_table_constraint_start(cursor) {
        let table = schema.get_mut(&table_name).expect("checked above");
        return parse_table_constraint(sql, cursor, table);
    }

    let mut inline_primary: Vec<String> = Vec::new();
    let table = schema.get_mut(&table_name).expect("checked above");
    parse_column_def(sql, cursor, table, &mut inline_primary)?;
    if table.primary_key_index().is_none() && !inline_primary.is_empty() {
        table.indexes.push(Index {
            name: None,
            kind: IndexKind::Primary,
            columns: inline_primary.into_iter().map(IndexColumn::simple).collect(),
            method: None,
            where_clause: None,
        });
    }
    Ok(())
}

fn parse_insert(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    if !cursor.eat_word("INTO") {
        return Err(statement_error(sql, "expected INTO after INSERT"));
    }
    let table_name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;

    let explicit_columns = if matches!(cursor.peek(), Some(Token::Punct('('))) {
        parse_plain_column_list(sql, cursor)?
    } else {
        Vec::new()
    };

    if !cursor.eat_word("VALUES") {
        return Err(statement_error(sql, "only INSERT ... VALUES is supported"));
    }

    let Some(table) = schema.get_mut(&table_name) else {
        return Err(statement_error(sql, &format!("INSERT references unknown table `{table_name}`")));
    };

    let columns: Vec<String> = if explicit_columns.is_empty() {
        table.columns.iter().map(|c| c.name.clone()).collect()
    } else {
        explicit_columns
    };

    loop {
        if !cursor.eat_punct('(') {
            break;
        }
        let mut row: Row = Row::new();
        for (index, column) in columns.iter().enumerate() {
            if index > 0 && !cursor.eat_punct(',') {
                break;
            }
            let value = parse_insert_value(cursor);
            row.insert(column.clone(), value);
        }
        cursor.eat_punct(')');
        table.data.push(row);
        if !cursor.eat_punct(',') {
            break;
        }
    }

    Ok(())
}

fn parse_insert_value(cursor: &mut TokenCursor<'_>) -> Value {
    match cursor.peek().cloned() {
        Some(Token::StringLiteral(s)) => {
            cursor.advance();
            Value::String(s)
        }
        Some(Token::Number(n)) => {
            cursor.advance();
            if n.contains('.') {
                Value::Float(n.parse().unwrap_or(0.0))
            } else {
                Value::Integer(n.parse().unwrap_or(0))
            }
        }
        Some(t) if t.is_word_ci("NULL") => {
            cursor.advance();
            Value::Null
        }
        Some(t) if t.is_word_ci("TRUE") => {
            cursor.advance();
            Value::Bool(true)
        }
        Some(t) if t.is_word_ci("FALSE") => {
            cursor.advance();
            Value::Bool(false)
        }
        _ => {
            cursor.advance();
            Value::Null
        }
    }
}

fn statement_error(sql: &str, reason: &str) -> Error {
    ParseError::Statement {
        statement_index: 0,
        location: SourceLocation::new(1, 1),
        near: sql.chars().take(40).collect(),
        reason: reason.to_string(),
    }
    .into()
}

fn unsupported(sql: &str, feature: &str) -> Error {
    sqlbridge_core::error::UnsupportedFeature {
        feature: feature.to_string(),
        location: SourceLocation::new(1, 1),
        hint: Some(sql.chars().take(40).collect()),
    }
    .into()
}
