//! Renders a transformed, dependency-sorted [`Schema`] into target DDL and
//! DML text using a [`Platform`].

use std::fmt::Write as _;

use crate::ir::{Column, Constraint, ConstraintKind, ForeignKeyAction, Ident, Index, IndexKind, PostActionKind, Schema, Table, Value};
use crate::options::{Dialect, InsertConflictHandling, Options};
use crate::platform::Platform;

pub struct RenderOutput {
    pub sql: String,
    pub warnings: Vec<String>,
}

/// Renders `schema`'s tables in `order`, followed by the foreign-key pass,
/// an optional data pass, and any post-transformation actions.
#[must_use]
pub fn render(schema: &Schema, order: &[Ident], platform: &dyn Platform, options: &Options) -> RenderOutput {
    let mut out = String::new();
    let mut warnings = Vec::new();

    if options.emit_header {
        writeln!(out, "-- Generated by sqlbridge; target dialect: {}", platform.dialect()).unwrap();
        writeln!(out, "-- Do not edit the CREATE TABLE column order; it mirrors the source schema.\n").unwrap();
    }

    write_setup_statements(&mut out, platform);

    let tables = schema.reordered(order);

    for table in &tables {
        render_table(&mut out, table, platform, options, &mut warnings);
        out.push('\n');
    }

    if platform.supports_alter_add_foreign_key() {
        let foreign_keys = tables
            .iter()
            .flat_map(|table| table.foreign_keys().map(move |fk| (*table, fk)))
            .collect::<Vec<_>>();
        if !foreign_keys.is_empty() {
            writeln!(out, "-- Foreign Key Constraints").unwrap();
            for (table, fk) in &foreign_keys {
                render_foreign_key(&mut out, table, fk, platform, &mut warnings);
            }
            out.push('\n');
        }
    }

    if options.process_insert_statements {
        let with_data = tables.iter().filter(|t| !t.data.is_empty()).collect::<Vec<_>>();
        if !with_data.is_empty() {
            writeln!(out, "-- DATA INSERTION").unwrap();
            for table in with_data {
                render_inserts(&mut out, table, platform, options, &mut warnings);
            }
            out.push('\n');
        }
    }

    if !schema.post_actions.is_empty() {
        writeln!(out, "-- POST-TRANSFORMATION ACTIONS").unwrap();
        for kind in [
            PostActionKind::PostgresGeneratedColumn,
            PostActionKind::PostgresGinIndex,
            PostActionKind::SqliteFtsTable,
            PostActionKind::SqliteFtsPopulate,
            PostActionKind::SqliteFtsTriggers,
        ] {
            let group = schema.post_actions.iter().filter(|action| action.kind == kind).collect::<Vec<_>>();
            if group.is_empty() {
                continue;
            }
            writeln!(out, "-- {}", kind.section_header()).unwrap();
            for action in group {
                writeln!(out, "-- {}", action.description).unwrap();
                writeln!(out, "{}", action.sql).unwrap();
            }
        }
    }

    RenderOutput {
        sql: out,
        warnings,
    }
}

fn write_setup_statements(out: &mut String, platform: &dyn Platform) {
    match platform.dialect() {
        Dialect::Sqlite => {
            writeln!(out, "PRAGMA foreign_keys = ON;\n").unwrap();
        }
        Dialect::MySql => {
            writeln!(out, "SET SQL_MODE = 'NO_AUTO_VALUE_ON_ZERO';\n").unwrap();
        }
        Dialect::PostgreSql => {}
    }
}

fn render_table(out: &mut String, table: &Table, platform: &dyn Platform, options: &Options, warnings: &mut Vec<String>) {
    let quoted_name = platform.quote_ident(&table.name);
    writeln!(out, "CREATE TABLE {quoted_name} (").unwrap();

    let mut lines = Vec::new();
    for column in &table.columns {
        lines.push(format!("    {}", render_column(column, platform, options, table, warnings)));
    }

    if let Some(columns) = primary_key_columns(table) {
        let rendered = columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
        lines.push(format!("    PRIMARY KEY ({rendered})"));
    }

    if options.include_constraints {
        for constraint in &table.constraints {
            if let Some(line) = render_inline_constraint(constraint, platform) {
                lines.push(format!("    {line}"));
            }
        }

        if !platform.supports_alter_add_foreign_key() {
            for fk in table.foreign_keys() {
                lines.push(format!("    {}", render_inline_foreign_key(fk, platform, table, warnings)));
            }
        }
    }

    if platform.dialect() == Dialect::Sqlite && options.include_indexes {
        for index in &table.indexes {
            if index.kind == IndexKind::Unique {
                let cols = index.columns.iter().map(|c| platform.quote_ident(&c.name)).collect::<Vec<_>>().join(", ");
                lines.push(format!("    UNIQUE ({cols})"));
            }
        }
    }

    writeln!(out, "{}", lines.join(",\n")).unwrap();
    write!(out, ")").unwrap();
    write_table_options(out, table, platform);
    writeln!(out, ";").unwrap();

    if options.include_indexes {
        for index in &table.indexes {
            if index.kind == IndexKind::Primary {
                continue;
            }
            if platform.dialect() == Dialect::Sqlite && index.kind == IndexKind::Unique {
                continue;
            }
            render_standalone_index(out, table, index, platform, warnings);
        }
    }

    if options.include_comments {
        render_column_comments(out, table, platform);
    }

    if table.needs_update_trigger {
        render_update_trigger(out, table, platform);
    }
}

fn primary_key_columns(table: &Table) -> Option<Vec<Ident>> {
    if let Some(index) = table.primary_key_index() {
        return Some(index.columns.iter().map(|c| c.name.clone()).collect());
    }
    table.constraints.iter().find_map(|constraint| match &constraint.kind {
        ConstraintKind::PrimaryKey { columns } => Some(columns.clone()),
        _ => None,
    })
}

fn render_column(column: &Column, platform: &dyn Platform, options: &Options, table: &Table, warnings: &mut Vec<String>) -> String {
    let mut parts = vec![platform.quote_ident(&column.name), platform.render_type(&column.data_type, column.length, column.precision, column.scale)];

    if column.unsigned && platform.dialect() == Dialect::MySql {
        parts.push("UNSIGNED".to_string());
    }

    if !column.nullable {
        parts.push("NOT NULL".to_string());
    }

    if let Some(default) = &column.default {
        parts.push(format!("DEFAULT {}", render_default(default, platform)));
    }

    if column.auto_increment && platform.dialect() == Dialect::MySql {
        parts.push("AUTO_INCREMENT".to_string());
    }
    if column.auto_increment && platform.dialect() == Dialect::Sqlite {
        parts.push("AUTOINCREMENT".to_string());
    }
    if column.auto_increment && platform.dialect() == Dialect::PostgreSql {
        parts.push("GENERATED BY DEFAULT AS IDENTITY".to_string());
    }

    if column.on_update_current_timestamp && platform.dialect() == Dialect::MySql {
        parts.push("ON UPDATE CURRENT_TIMESTAMP".to_string());
    }

    if let Some(values) = column.extra.get("enum_check_values") {
        if let Value::String(values) = values {
            let list = values.split(',').map(|v| platform.quote_string(v)).collect::<Vec<_>>().join(", ");
            parts.push(format!("CHECK ({} IN ({list}))", platform.quote_ident(&column.name)));
        }
    }
    if column.extra.contains_key("boolean_check") {
        parts.push(format!("CHECK ({} IN (0, 1))", platform.quote_ident(&column.name)));
    }

    if let Some(comment) = &column.comment {
        match platform.dialect() {
            Dialect::MySql => parts.push(format!("COMMENT {}", platform.quote_string(comment))),
            Dialect::Sqlite => warnings.push(format!("column comment on `{}`.`{}` dropped; SQLite has no column comment syntax", table.name, column.name)),
            Dialect::PostgreSql => {}
        }
    }

    parts.join(" ")
}

fn render_default(default: &crate::ir::Expr, platform: &dyn Platform) -> String {
    match default {
        crate::ir::Expr::Literal(value) => platform.render_value(value),
        crate::ir::Expr::Raw(text) => text.clone(),
    }
}

fn render_inline_constraint(constraint: &Constraint, platform: &dyn Platform) -> Option<String> {
    match &constraint.kind {
        ConstraintKind::Unique { columns } => {
            let cols = columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
            Some(match &constraint.name {
                Some(name) => format!("CONSTRAINT {} UNIQUE ({cols})", platform.quote_ident(name)),
                None => format!("UNIQUE ({cols})"),
            })
        }
        ConstraintKind::Check { expression } => {
            let rewritten = requote_check_expression(expression, platform);
            Some(match &constraint.name {
                Some(name) => format!("CONSTRAINT {} CHECK ({rewritten})", platform.quote_ident(name)),
                None => format!("CHECK ({rewritten})"),
            })
        }
        ConstraintKind::PrimaryKey { .. } | ConstraintKind::ForeignKey(_) => None,
    }
}

/// Strips MySQL backtick identifier quoting from a `CHECK` expression and
/// re-applies the target's quoting, balancing any resulting parenthesis
/// mismatch with a trailing `)`. This is a parse-repair heuristic, not a
/// full expression parser.
fn requote_check_expression(expression: &str, platform: &dyn Platform) -> String {
    let mut rewritten = String::with_capacity(expression.len());
    let mut chars = expression.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '`' {
            let mut ident = String::new();
            for next in chars.by_ref() {
                if next == '`' {
                    break;
                }
                ident.push(next);
            }
            rewritten.push_str(&platform.quote_ident(&ident));
        } else {
            rewritten.push(ch);
        }
    }

    let opens = rewritten.matches('(').count();
    let closes = rewritten.matches(')').count();
    if opens > closes {
        rewritten.push_str(&")".repeat(opens - closes));
    }
    rewritten
}

fn render_standalone_index(out: &mut String, table: &Table, index: &Index, platform: &dyn Platform, warnings: &mut Vec<String>) {
    let unique = if index.kind == IndexKind::Unique { "UNIQUE " } else { "" };
    let name = index.name.clone().unwrap_or_else(|| format!("{}_{}_idx", table.name, index.columns.first().map(|c| c.name.as_str()).unwrap_or("idx")));
    let columns = index
        .columns
        .iter()
        .map(|c| {
            let mut rendered = platform.quote_ident(&c.name);
            if let Some(length) = c.length {
                rendered = format!("{rendered}({length})");
            }
            if let Some(direction) = c.direction {
                rendered.push_str(match direction {
                    crate::ir::SortDirection::Asc => " ASC",
                    crate::ir::SortDirection::Desc => " DESC",
                });
            }
            rendered
        })
        .collect::<Vec<_>>()
        .join(", ");

    let using = match (&index.method, platform.dialect()) {
        (Some(method), Dialect::PostgreSql) => format!(" USING {method}"),
        (Some(_), _) => {
            warnings.push(format!("index `{name}` USING clause dropped; not supported on target {}", platform.dialect()));
            String::new()
        }
        (None, _) => String::new(),
    };

    let where_clause = match (&index.where_clause, platform.dialect()) {
        (Some(predicate), Dialect::PostgreSql | Dialect::Sqlite) => format!(" WHERE {predicate}"),
        (Some(_), _) => {
            warnings.push(format!("index `{name}` partial WHERE clause dropped; not supported on target {}", platform.dialect()));
            String::new()
        }
        (None, _) => String::new(),
    };

    writeln!(
        out,
        "CREATE {unique}INDEX {}{using} ON {} ({columns}){where_clause};",
        platform.quote_ident(&name),
        platform.quote_ident(&table.name)
    )
    .unwrap();
}

fn render_column_comments(out: &mut String, table: &Table, platform: &dyn Platform) {
    if platform.dialect() != Dialect::PostgreSql {
        return;
    }
    if let Some(comment) = &table.options.comment {
        writeln!(out, "COMMENT ON TABLE {} IS {};", platform.quote_ident(&table.name), platform.quote_string(comment)).unwrap();
    }
    for column in &table.columns {
        if let Some(comment) = &column.comment {
            writeln!(
                out,
                "COMMENT ON COLUMN {}.{} IS {};",
                platform.quote_ident(&table.name),
                platform.quote_ident(&column.name),
                platform.quote_string(comment)
            )
            .unwrap();
        }
    }
}

fn render_update_trigger(out: &mut String, table: &Table, platform: &dyn Platform) {
    let quoted_table = platform.quote_ident(&table.name);
    match platform.dialect() {
        Dialect::PostgreSql => {
            let function_name = format!("{}_set_updated_at", table.name);
            let assignments = table
                .update_trigger_columns
                .iter()
                .map(|c| format!("NEW.{} = CURRENT_TIMESTAMP;", platform.quote_ident(c)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                out,
                "CREATE OR REPLACE FUNCTION {function_name}() RETURNS trigger AS $$ BEGIN {assignments} RETURN NEW; END; $$ LANGUAGE plpgsql;"
            )
            .unwrap();
            writeln!(
                out,
                "CREATE TRIGGER {function_name}_trigger BEFORE UPDATE ON {quoted_table} FOR EACH ROW EXECUTE FUNCTION {function_name}();"
            )
            .unwrap();
        }
        Dialect::Sqlite => {
            let trigger_name = format!("{}_set_updated_at", table.name);
            let assignments = table
                .update_trigger_columns
                .iter()
                .map(|c| format!("{} = CURRENT_TIMESTAMP", platform.quote_ident(c)))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "CREATE TRIGGER {trigger_name} AFTER UPDATE ON {quoted_table} BEGIN UPDATE {quoted_table} SET {assignments} WHERE rowid = NEW.rowid; END;"
            )
            .unwrap();
        }
        Dialect::MySql => {}
    }
}

fn write_table_options(out: &mut String, table: &Table, platform: &dyn Platform) {
    if platform.dialect() != Dialect::MySql {
        return;
    }
    let mut options = Vec::new();
    if let Some(engine) = &table.options.engine {
        options.push(format!("ENGINE={engine}"));
    }
    if let Some(charset) = &table.options.charset {
        options.push(format!("DEFAULT CHARSET={charset}"));
    }
    if let Some(collation) = &table.options.collation {
        options.push(format!("COLLATE={collation}"));
    }
    if let Some(start) = table.options.auto_increment_start {
        options.push(format!("AUTO_INCREMENT={start}"));
    }
    if let Some(comment) = &table.options.comment {
        options.push(format!("COMMENT={}", platform.quote_string(comment)));
    }
    if !options.is_empty() {
        write!(out, " {}", options.join(" ")).unwrap();
    }
}

/// Renders a foreign key as a `CREATE TABLE`-body clause instead of a
/// follow-up `ALTER TABLE`, for targets (SQLite) that cannot add a foreign
/// key to an existing table.
fn render_inline_foreign_key(fk: &crate::ir::ForeignKey, platform: &dyn Platform, table: &Table, warnings: &mut Vec<String>) -> String {
    let local_columns = fk.columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
    let referenced_columns = fk.referenced_columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");

    let mut clause = format!(
        "FOREIGN KEY ({local_columns}) REFERENCES {} ({referenced_columns})",
        platform.quote_ident(&fk.referenced_table)
    );

    if let Some(action) = fk.on_delete {
        clause.push_str(&format!(" ON DELETE {}", render_fk_action(action, platform, table, warnings)));
    }
    if let Some(action) = fk.on_update {
        clause.push_str(&format!(" ON UPDATE {}", render_fk_action(action, platform, table, warnings)));
    }
    clause
}

fn render_foreign_key(out: &mut String, table: &Table, fk: &crate::ir::ForeignKey, platform: &dyn Platform, warnings: &mut Vec<String>) {
    let local_columns = fk.columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
    let referenced_columns = fk.referenced_columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
    let name = format!("fk_{}_{}", table.name, fk.columns.join("_"));

    let mut clause = format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({local_columns}) REFERENCES {} ({referenced_columns})",
        platform.quote_ident(&table.name),
        platform.quote_ident(&name),
        platform.quote_ident(&fk.referenced_table)
    );

    if let Some(action) = fk.on_delete {
        clause.push_str(&format!(" ON DELETE {}", render_fk_action(action, platform, table, warnings)));
    }
    if let Some(action) = fk.on_update {
        clause.push_str(&format!(" ON UPDATE {}", render_fk_action(action, platform, table, warnings)));
    }
    writeln!(out, "{clause};").unwrap();
}

fn render_fk_action(action: ForeignKeyAction, platform: &dyn Platform, table: &Table, warnings: &mut Vec<String>) -> &'static str {
    if action == ForeignKeyAction::SetDefault && platform.dialect() == Dialect::Sqlite {
        warnings.push(format!("foreign key on `{}` downgraded SET DEFAULT to SET NULL; SQLite enforces this less strictly", table.name));
        return "SET NULL";
    }
    match action {
        ForeignKeyAction::Cascade => "CASCADE",
        ForeignKeyAction::SetNull => "SET NULL",
        ForeignKeyAction::SetDefault => "SET DEFAULT",
        ForeignKeyAction::Restrict => "RESTRICT",
        ForeignKeyAction::NoAction => "NO ACTION",
    }
}

fn render_inserts(out: &mut String, table: &Table, platform: &dyn Platform, options: &Options, warnings: &mut Vec<String>) {
    let mut columns: Vec<Ident> = Vec::new();
    for row in &table.data {
        for key in row.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    if columns.is_empty() {
        return;
    }

    let has_primary_key = primary_key_columns(table).is_some();
    if !has_primary_key && options.on_conflict != InsertConflictHandling::Error {
        warnings.push(format!("table `{}` has no primary key; INSERT conflict handling disabled", table.name));
    }

    let column_list = if options.insert_columns_explicit {
        format!(" ({})", columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", "))
    } else {
        String::new()
    };

    for chunk in table.data.chunks(options.insert_batch_size.max(1)) {
        let rows = chunk
            .iter()
            .map(|row| {
                let values = columns
                    .iter()
                    .map(|col| row.get(col).map_or_else(|| "NULL".to_string(), |v| platform.render_value(v)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({values})")
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mode = if has_primary_key { options.on_conflict } else { InsertConflictHandling::Error };
        let verb = insert_verb(mode, platform.dialect());
        let conflict_clause = render_conflict_clause(mode, platform, &columns, table);

        writeln!(out, "{verb} INTO {}{column_list} VALUES {rows}{conflict_clause};", platform.quote_ident(&table.name)).unwrap();
    }
}

fn insert_verb(mode: InsertConflictHandling, dialect: Dialect) -> &'static str {
    match (mode, dialect) {
        (InsertConflictHandling::Skip, Dialect::MySql) => "INSERT IGNORE",
        (InsertConflictHandling::Skip, Dialect::Sqlite) => "INSERT OR IGNORE",
        _ => "INSERT",
    }
}

fn render_conflict_clause(mode: InsertConflictHandling, platform: &dyn Platform, columns: &[Ident], table: &Table) -> String {
    let Some(pk_columns) = primary_key_columns(table) else {
        return String::new();
    };
    let non_pk = columns.iter().filter(|c| !pk_columns.contains(c)).collect::<Vec<_>>();

    match (mode, platform.dialect()) {
        (InsertConflictHandling::Update, Dialect::MySql) if !non_pk.is_empty() => {
            let assignments = non_pk.iter().map(|c| format!("{} = VALUES({})", platform.quote_ident(c), platform.quote_ident(c))).collect::<Vec<_>>().join(", ");
            format!(" ON DUPLICATE KEY UPDATE {assignments}")
        }
        (InsertConflictHandling::Update, Dialect::PostgreSql | Dialect::Sqlite) if !non_pk.is_empty() => {
            let pk_list = pk_columns.iter().map(|c| platform.quote_ident(c)).collect::<Vec<_>>().join(", ");
            let assignments = non_pk.iter().map(|c| format!("{} = EXCLUDED.{}", platform.quote_ident(c), platform.quote_ident(c))).collect::<Vec<_>>().join(", ");
            format!(" ON CONFLICT ({pk_list}) DO UPDATE SET {assignments}")
        }
        (InsertConflictHandling::Skip, Dialect::PostgreSql) => " ON CONFLICT DO NOTHING".to_string(),
        _ => String::new(),
    }
}
