//! Recursive-descent parsing of MySQL `CREATE TABLE`, `ALTER TABLE ... ADD
//! COLUMN`/`ADD CONSTRAINT`, `CREATE [UNIQUE|FULLTEXT] INDEX`, and `INSERT
//! INTO` statements into the shared schema IR, built on the hand-rolled
//! token cursor `sqlbridge-core` exposes for this purpose.
//!
//! Statements this dialect doesn't translate (`SET`, `LOCK TABLES`, `DROP
//! TABLE`, `/*! ... */` optimizer hints already stripped by the splitter's
//! comment handling) are silently skipped rather than treated as errors,
//! matching how a `mysqldump` file actually reads.

use sqlbridge_core::error::{ParseError, SourceLocation};
use sqlbridge_core::ir::{
    Column, Constraint, ConstraintKind, DataType, Expr, ForeignKey, ForeignKeyAction, Index, IndexColumn, IndexKind,
    Row, Schema, SortDirection, Table, Value,
};
use sqlbridge_core::{tokens_to_source, Error, Lexer, LexerDialect, Result, Token, TokenCursor};

pub(crate) fn parse_statement(sql: &str, schema: &mut Schema) -> Result<()> {
    let tokens = Lexer::new(sql, LexerDialect::MySql).tokenize();
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
    const IGNORED_LEADERS: &[&str] = &["SET", "LOCK", "UNLOCK", "DROP", "USE", "START", "COMMIT", "BEGIN", "GRANT", "REVOKE"];
    IGNORED_LEADERS.iter().any(|word| cursor.peek().is_some_and(|t| t.is_word_ci(word)))
}

fn parse_create(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    cursor.eat_word("TEMPORARY");

    if cursor.eat_word("TABLE") {
        return parse_create_table(sql, cursor, schema);
    }

    let unique = cursor.eat_word("UNIQUE");
    let fulltext = cursor.eat_word("FULLTEXT");
    if cursor.eat_word("INDEX") {
        return parse_create_index(sql, cursor, schema, unique, fulltext);
    }

    if cursor.eat_word("VIEW") || cursor.eat_word("TRIGGER") || cursor.eat_word("FUNCTION") || cursor.eat_word("PROCEDURE") {
        return Err(unsupported(sql, "CREATE VIEW/TRIGGER/FUNCTION/PROCEDURE"));
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

    parse_table_options(cursor, &mut table);
    schema.insert(table);
    Ok(())
}

fn is_table_constraint_start(cursor: &TokenCursor<'_>) -> bool {
    const STARTERS: &[&str] = &["PRIMARY", "UNIQUE", "KEY", "INDEX", "CONSTRAINT", "FOREIGN", "CHECK", "FULLTEXT", "SPATIAL"];
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
            Some(t) if t.is_word_ci("UNSIGNED") => {
                cursor.advance();
                column.unsigned = true;
            }
            Some(t) if t.is_word_ci("ZEROFILL") => {
                cursor.advance();
            }
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
            Some(t) if t.is_word_ci("AUTO_INCREMENT") => {
                cursor.advance();
                column.auto_increment = true;
            }
            Some(t) if t.is_word_ci("ON") => {
                cursor.advance();
                cursor.eat_word("UPDATE");
                parse_default_value(cursor);
                column.on_update_current_timestamp = true;
            }
            Some(t) if t.is_word_ci("COMMENT") => {
                cursor.advance();
                if let Some(Token::StringLiteral(text)) = cursor.peek().cloned() {
                    cursor.advance();
                    column.comment = Some(text);
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
                cursor.eat_word("KEY");
                column.unique = true;
                table.constraints.push(Constraint {
                    name: None,
                    kind: ConstraintKind::Unique { columns: vec![name.clone()] },
                });
            }
            Some(t) if t.is_word_ci("COLLATE") || t.is_word_ci("CHARACTER") => {
                cursor.advance();
                cursor.eat_word("SET");
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
            let mut tokens = Vec::new();
            if let Some(token) = cursor.advance().cloned() {
                tokens.push(token);
            }
            if cursor.eat_punct('(') {
                tokens.push(Token::Punct('('));
                tokens.extend(cursor.collect_until_top_level(&[')']));
                if cursor.eat_punct(')') {
                    tokens.push(Token::Punct(')'));
                }
            }
            Expr::Raw(tokens_to_source(&tokens, LexerDialect::MySql))
        }
    }
}

fn parse_table_constraint(sql: &str, cursor: &mut TokenCursor<'_>, table: &mut Table) -> Result<()> {
    if cursor.eat_word("PRIMARY") {
        cursor.eat_word("KEY");
        let columns = parse_plain_column_list(sql, cursor)?;
        if columns.len() == 1
            && let Some(column) = table.columns.iter_mut().find(|c| c.name == columns[0])
        {
            column.primary_key = true;
        }
        table.indexes.push(Index {
            name: None,
            kind: IndexKind::Primary,
            columns: columns.into_iter().map(IndexColumn::simple).collect(),
            method: None,
            where_clause: None,
        });
        return Ok(());
    }

    if cursor.eat_word("UNIQUE") {
        cursor.eat_word("KEY");
        cursor.eat_word("INDEX");
        let name = eat_optional_name(cursor);
        let columns = parse_plain_column_list(sql, cursor)?;
        table.constraints.push(Constraint {
            name,
            kind: ConstraintKind::Unique { columns },
        });
        return Ok(());
    }

    if cursor.eat_word("FULLTEXT") {
        cursor.eat_word("KEY");
        cursor.eat_word("INDEX");
        let name = eat_optional_name(cursor);
        let columns = parse_index_column_list(sql, cursor)?;
        table.indexes.push(Index {
            name,
            kind: IndexKind::Fulltext,
            columns,
            method: None,
            where_clause: None,
        });
        return Ok(());
    }

    if cursor.eat_word("SPATIAL") {
        cursor.eat_word("KEY");
        cursor.eat_word("INDEX");
        let name = eat_optional_name(cursor);
        let columns = parse_index_column_list(sql, cursor)?;
        table.indexes.push(Index {
            name,
            kind: IndexKind::Spatial,
            columns,
            method: None,
            where_clause: None,
        });
        return Ok(());
    }

    if cursor.eat_word("KEY") || cursor.eat_word("INDEX") {
        let name = eat_optional_name(cursor);
        let columns = parse_index_column_list(sql, cursor)?;
        table.indexes.push(Index {
            name,
            kind: IndexKind::Index,
            columns,
            method: None,
            where_clause: None,
        });
        return Ok(());
    }

    if cursor.eat_word("CHECK") {
        let expression = parse_parenthesized_expression(cursor);
        table.constraints.push(Constraint {
            name: None,
            kind: ConstraintKind::Check { expression },
        });
        return Ok(());
    }

    let name = if cursor.eat_word("CONSTRAINT") { eat_optional_name(cursor) } else { None };

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
        if matches!(cursor.peek(), Some(Token::Punct('(')))
            && let Some(Token::Number(_)) = cursor.peek_at(1)
        {
            cursor.advance();
            cursor.advance();
            cursor.eat_punct(')');
        }
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
        let mut length = None;
        if cursor.eat_punct('(') {
            if let Some(Token::Number(n)) = cursor.peek().cloned() {
                cursor.advance();
                length = n.parse().ok();
            }
            cursor.eat_punct(')');
        }
        let direction = if cursor.eat_word("ASC") {
            Some(SortDirection::Asc)
        } else if cursor.eat_word("DESC") {
            Some(SortDirection::Desc)
        } else {
            None
        };
        columns.push(IndexColumn { name, length, direction });
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
    tokens_to_source(&inner, LexerDialect::MySql)
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
    let upper = name.to_ascii_uppercase();

    match upper.as_str() {
        "INT" | "INTEGER" | "MEDIUMINT" => {
            skip_display_width(cursor);
            (DataType::Int, None, None, None)
        }
        "TINYINT" => {
            if peek_parenthesized_literal(cursor).as_deref() == Some("1") {
                consume_parenthesized_literal(cursor);
                (DataType::Boolean, None, None, None)
            } else {
                skip_display_width(cursor);
                (DataType::SmallInt, None, None, None)
            }
        }
        "SMALLINT" => {
            skip_display_width(cursor);
            (DataType::SmallInt, None, None, None)
        }
        "BIGINT" => {
            skip_display_width(cursor);
            (DataType::BigInt, None, None, None)
        }
        "DECIMAL" | "NUMERIC" => {
            let (precision, scale) = parse_precision_scale(cursor);
            (DataType::Decimal, None, precision, scale)
        }
        "FLOAT" => {
            skip_display_width(cursor);
            (DataType::Custom("FLOAT".to_string()), None, None, None)
        }
        "DOUBLE" => {
            cursor.eat_word("PRECISION");
            skip_display_width(cursor);
            (DataType::Custom("DOUBLE PRECISION".to_string()), None, None, None)
        }
        "REAL" => (DataType::Custom("REAL".to_string()), None, None, None),
        "BOOLEAN" | "BOOL" => (DataType::Boolean, None, None, None),
        "VARCHAR" | "NVARCHAR" => {
            let length = consume_parenthesized_literal(cursor).and_then(|n| n.parse().ok());
            (DataType::Varchar, length, None, None)
        }
        "CHAR" | "NCHAR" => {
            let length = consume_parenthesized_literal(cursor).and_then(|n| n.parse().ok());
            (DataType::Char, length, None, None)
        }
        "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" => (DataType::Text, None, None, None),
        "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" => {
            let length = consume_parenthesized_literal(cursor).and_then(|n| n.parse().ok());
            (DataType::Blob, length, None, None)
        }
        "DATE" => (DataType::Date, None, None, None),
        "DATETIME" => {
            skip_display_width(cursor);
            (DataType::DateTime, None, None, None)
        }
        "TIMESTAMP" => {
            skip_display_width(cursor);
            (DataType::Timestamp, None, None, None)
        }
        "JSON" => (DataType::Json, None, None, None),
        "YEAR" => {
            skip_display_width(cursor);
            (DataType::Custom("YEAR".to_string()), None, None, None)
        }
        "ENUM" => {
            let values = parse_enum_values(cursor);
            (DataType::Enum(values), None, None, None)
        }
        "SET" => {
            skip_display_width(cursor);
            (DataType::Custom("SET".to_string()), None, None, None)
        }
        other => {
            skip_display_width(cursor);
            (DataType::Custom(other.to_string()), None, None, None)
        }
    }
}

fn skip_display_width(cursor: &mut TokenCursor<'_>) {
    if cursor.eat_punct('(') {
        cursor.skip_balanced_parens();
    }
    cursor.eat_word("UNSIGNED");
    cursor.eat_word("ZEROFILL");
}

fn peek_parenthesized_literal(cursor: &TokenCursor<'_>) -> Option<String> {
    if matches!(cursor.peek(), Some(Token::Punct('(')))
        && let Some(Token::Number(n)) = cursor.peek_at(1)
    {
        return Some(n.clone());
    }
    None
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

fn parse_enum_values(cursor: &mut TokenCursor<'_>) -> Vec<String> {
    if !cursor.eat_punct('(') {
        return Vec::new();
    }
    let mut values = Vec::new();
    loop {
        if let Some(Token::StringLiteral(s)) = cursor.peek().cloned() {
            cursor.advance();
            values.push(s);
        } else {
            break;
        }
        if cursor.eat_punct(',') {
            continue;
        }
        break;
    }
    cursor.eat_punct(')');
    values
}

fn parse_table_options(cursor: &mut TokenCursor<'_>, table: &mut Table) {
    loop {
        if cursor.eat_word("ENGINE") {
            cursor.eat_punct('=');
            if let Some(ident) = cursor.eat_ident() {
                table.options.engine = Some(ident);
            }
            continue;
        }
        if cursor.eat_word("DEFAULT") {
            continue;
        }
        if cursor.eat_word("CHARSET") || cursor.eat_word("CHARACTER") {
            cursor.eat_word("SET");
            cursor.eat_punct('=');
            if let Some(ident) = cursor.eat_ident() {
                table.options.charset = Some(ident);
            }
            continue;
        }
        if cursor.eat_word("COLLATE") {
            cursor.eat_punct('=');
            if let Some(ident) = cursor.eat_ident() {
                table.options.collation = Some(ident);
            }
            continue;
        }
        if cursor.eat_word("AUTO_INCREMENT") {
            cursor.eat_punct('=');
            if let Some(Token::Number(n)) = cursor.peek().cloned() {
                cursor.advance();
                table.options.auto_increment_start = n.parse().ok();
            }
            continue;
        }
        if cursor.eat_word("COMMENT") {
            cursor.eat_punct('=');
            if let Some(Token::StringLiteral(s)) = cursor.peek().cloned() {
                cursor.advance();
                table.options.comment = Some(s);
            }
            continue;
        }
        break;
    }
}

fn parse_create_index(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema, unique: bool, fulltext: bool) -> Result<()> {
    let name = cursor.eat_ident().ok_or_else(|| statement_error(sql, "expected index name"))?;
    if !cursor.eat_word("ON") {
        return Err(statement_error(sql, "expected ON in CREATE INDEX"));
    }
    let table_name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;
    let columns = parse_index_column_list(sql, cursor)?;

    let kind = if fulltext {
        IndexKind::Fulltext
    } else if unique {
        IndexKind::Unique
    } else {
        IndexKind::Index
    };

    let Some(table) = schema.get_mut(&table_name) else {
        return Err(statement_error(sql, &format!("CREATE INDEX references unknown table `{table_name}`")));
    };
    table.indexes.push(Index {
        name: Some(name),
        kind,
        columns,
        method: None,
        where_clause: None,
    });
    Ok(())
}

fn parse_alter(sql: &str, cursor: &mut TokenCursor<'_>, schema: &mut Schema) -> Result<()> {
    if !cursor.eat_word("TABLE") {
        return Err(statement_error(sql, "expected TABLE after ALTER"));
    }
    let table_name = eat_table_name(cursor).ok_or_else(|| statement_error(sql, "expected table name"))?;

    if !schema.contains(&table_name) {
        schema.defer_alter(sql.to_string());
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
    cursor.eat_word("IGNORE");
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
