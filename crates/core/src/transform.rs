//! Rewrites a parsed [`Schema`] from its source dialect's idiom into the
//! target dialect's idiom. A pure function: the input schema is never
//! mutated, a transformed clone is returned alongside the warnings
//! collected along the way.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, UnsupportedFeature};
use crate::ir::{Column, DataType, Expr, Index, IndexKind, PostAction, PostActionKind, Schema, Table, Value};
use crate::options::{AutoIncrementConversion, Dialect, EnumConversion, HandleUnsupported, Options};

const POSTGRES_IDENT_LIMIT: usize = 63;

pub struct TransformOutput {
    pub schema: Schema,
    pub warnings: Vec<String>,
}

/// Translates `schema` from `source`'s idiom to `target`'s idiom, applying
/// every rewrite `options` enables. Returns the input unchanged when
/// `source == target`.
pub fn transform(schema: &Schema, source: Dialect, target: Dialect, options: &Options) -> Result<TransformOutput> {
    let mut warnings = WarningSet::default();

    if source == target {
        return Ok(TransformOutput {
            schema: schema.clone(),
            warnings: warnings.into_vec(),
        });
    }

    let mut rename_map: BTreeMap<String, String> = BTreeMap::new();
    let mut out = Schema::new();
    out.post_actions = schema.post_actions.clone();

    let mut tables: Vec<Table> = schema.tables().cloned().collect();
    for table in &mut tables {
        if let Some(renamed) = truncate_identifier(&table.name, target) {
            warnings.push(format!("table `{}` renamed to `{renamed}` to satisfy target identifier length limit", table.name));
            rename_map.insert(table.name.clone(), renamed.clone());
            table.name = renamed;
        }
    }

    let mut generated_post_actions = Vec::new();
    let mut dropped_tables: BTreeSet<String> = BTreeSet::new();
    for table in &mut tables {
        if !transform_table(table, source, target, options, &mut warnings, &mut generated_post_actions)? {
            dropped_tables.insert(table.name.clone());
        }
    }
    out.post_actions.extend(generated_post_actions);

    for table in &mut tables {
        for fk in table.constraints.iter_mut().filter_map(|c| match &mut c.kind {
            crate::ir::ConstraintKind::ForeignKey(fk) => Some(fk),
            _ => None,
        }) {
            if let Some(renamed) = rename_map.get(&fk.referenced_table) {
                fk.referenced_table = renamed.clone();
            }
        }
    }

    for table in tables {
        if dropped_tables.contains(&table.name) {
            continue;
        }
        out.insert(table);
    }

    Ok(TransformOutput {
        schema: out,
        warnings: warnings.into_vec(),
    })
}

/// Returns `Ok(false)` when `options.on_unsupported` is [`HandleUnsupported::Skip`]
/// and a construct on this table couldn't be translated, meaning the whole
/// table must be dropped from the output rather than inserted.
fn transform_table(
    table: &mut Table,
    source: Dialect,
    target: Dialect,
    options: &Options,
    warnings: &mut WarningSet,
    post_actions: &mut Vec<PostAction>,
) -> Result<bool> {
    let mut demoted_identity: Option<String> = None;

    for column in &mut table.columns {
        if let Some(renamed) = truncate_identifier(&column.name, target) {
            warnings.push(format!(
                "column `{}`.`{}` renamed to `{renamed}` to satisfy target identifier length limit",
                table.name, column.name
            ));
            column.name = renamed;
        }

        if transform_column(column, source, target, options, warnings)? == ColumnOutcome::DropTable {
            warnings.push(format!(
                "table `{}` dropped: column `{}` has a construct that cannot be translated to target {target}",
                table.name, column.name
            ));
            return Ok(false);
        }
    }

    if target == Dialect::Sqlite {
        let identity_columns = table.columns.iter().filter(|c| c.auto_increment).count();
        if identity_columns > 1 {
            for column in &mut table.columns {
                if column.auto_increment {
                    column.auto_increment = false;
                }
            }
            demoted_identity = Some(table.name.clone());
        }
    }
    if let Some(name) = demoted_identity {
        warnings.push(format!(
            "table `{name}` has more than one auto-increment column; SQLite requires exactly one `INTEGER PRIMARY KEY`, downgrading all to plain integers"
        ));
    }

    if table.needs_update_trigger && !matches!(target, Dialect::PostgreSql | Dialect::Sqlite) {
        // MySQL natively supports ON UPDATE CURRENT_TIMESTAMP; nothing to emulate.
        table.needs_update_trigger = false;
        table.update_trigger_columns.clear();
    }

    let fulltext_indexes: Vec<Index> = table
        .indexes
        .iter()
        .filter(|index| index.kind == IndexKind::Fulltext)
        .cloned()
        .collect();
    if !fulltext_indexes.is_empty() && source != target {
        table.indexes.retain(|index| index.kind != IndexKind::Fulltext);
        for index in &fulltext_indexes {
            emit_fulltext_post_actions(table, index, target, warnings, post_actions);
        }
    }

    Ok(true)
}

/// What happened when translating a single column's unsupported construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnOutcome {
    Keep,
    DropTable,
}

fn transform_column(
    column: &mut Column,
    source: Dialect,
    target: Dialect,
    options: &Options,
    warnings: &mut WarningSet,
) -> Result<ColumnOutcome> {
    if column.unsigned && target != Dialect::MySql {
        column.unsigned = false;
        warnings.push(format!("column `{}` UNSIGNED is MySQL-only; dropped for target {target}", column.name));
    }

    match &column.data_type {
        DataType::Serial | DataType::BigSerial | DataType::SmallSerial => {
            transform_identity(column, target, options);
        }
        DataType::Int | DataType::BigInt | DataType::SmallInt if column.auto_increment => {
            transform_identity(column, target, options);
        }
        DataType::Enum(values) => {
            transform_enum(column, values.clone(), target, options);
        }
        DataType::Boolean => {
            transform_boolean(column, target);
        }
        DataType::Uuid => {
            column.data_type = match target {
                Dialect::PostgreSql => DataType::Uuid,
                Dialect::MySql => DataType::Char,
                Dialect::Sqlite => DataType::Text,
            };
            if target == Dialect::MySql {
                column.length.get_or_insert(36);
            }
        }
        DataType::Array(_) if target != Dialect::PostgreSql => {
            warnings.push(format!("column `{}` is an array type, not supported on target {target}; demoted to TEXT", column.name));
            column.data_type = DataType::Text;
        }
        DataType::DateTime | DataType::Timestamp => {
            // DATETIME and TIMESTAMP are treated as synonyms across dialects;
            // no rewrite needed beyond what the renderer's type mapping does.
        }
        _ => {}
    }

    if column.on_update_current_timestamp && matches!(target, Dialect::PostgreSql | Dialect::Sqlite) {
        column.on_update_current_timestamp = false;
    }

    if let Some(Expr::Raw(text)) = &column.default
        && !matches!(source, Dialect::MySql)
        && text.contains('`')
    {
        match options.on_unsupported {
            HandleUnsupported::Error => {
                return Err(UnsupportedFeature {
                    feature: format!("default expression `{text}`"),
                    location: crate::error::SourceLocation::new(1, 1),
                    hint: Some("backtick-quoted identifiers in defaults are MySQL-only".to_string()),
                }
                .into());
            }
            HandleUnsupported::Skip => return Ok(ColumnOutcome::DropTable),
            HandleUnsupported::Warn => {
                warnings.push(format!(
                    "column `{}` default expression `{text}` uses MySQL-only backtick-quoted identifiers; dropped",
                    column.name
                ));
                column.default = None;
            }
        }
    }

    Ok(ColumnOutcome::Keep)
}

fn transform_identity(column: &mut Column, target: Dialect, options: &Options) {
    match target {
        Dialect::PostgreSql => match options.auto_increment_conversion {
            AutoIncrementConversion::Serial => {
                column.data_type = match column.data_type {
                    DataType::BigInt | DataType::BigSerial => DataType::BigSerial,
                    DataType::SmallInt | DataType::SmallSerial => DataType::SmallSerial,
                    _ => DataType::Serial,
                };
                column.auto_increment = false;
            }
            AutoIncrementConversion::Identity => {
                column.data_type = match column.data_type {
                    DataType::BigSerial => DataType::BigInt,
                    DataType::SmallSerial => DataType::SmallInt,
                    DataType::Serial => DataType::Int,
                    other => other,
                };
                column.auto_increment = true;
            }
        },
        Dialect::MySql => {
            column.data_type = match column.data_type {
                DataType::BigSerial => DataType::BigInt,
                DataType::SmallSerial => DataType::SmallInt,
                DataType::Serial => DataType::Int,
                other => other,
            };
            column.auto_increment = true;
        }
        Dialect::Sqlite => {
            column.data_type = DataType::Int;
            column.auto_increment = column.primary_key;
        }
    }
}

fn transform_enum(column: &mut Column, values: Vec<String>, target: Dialect, options: &Options) {
    match target {
        Dialect::MySql => {
            column.data_type = DataType::Enum(values);
        }
        Dialect::PostgreSql | Dialect::Sqlite => {
            column.data_type = DataType::Text;
            if matches!(options.enum_conversion, EnumConversion::CheckConstraint) {
                column.extra.insert("enum_check_values".to_string(), Value::String(values.join(",")));
            }
        }
    }
}

fn transform_boolean(column: &mut Column, target: Dialect) {
    match target {
        Dialect::PostgreSql => column.data_type = DataType::Boolean,
        Dialect::MySql => {
            column.data_type = DataType::SmallInt;
            column.length = Some(1);
        }
        Dialect::Sqlite => {
            column.data_type = DataType::Int;
            column.extra.insert("boolean_check".to_string(), Value::Bool(true));
        }
    }
}

fn emit_fulltext_post_actions(
    table: &Table,
    index: &Index,
    target: Dialect,
    warnings: &mut WarningSet,
    post_actions: &mut Vec<PostAction>,
) {
    let columns = index.columns.iter().map(|c| c.name.clone()).collect::<Vec<_>>();
    let column_list = columns.join(", ");
    match target {
        Dialect::PostgreSql => {
            let search_column = format!("{}_search", index.name.clone().unwrap_or_else(|| "ft".to_string()));
            warnings.push(format!(
                "FULLTEXT index on `{}` ({column_list}) emulated with a generated tsvector column + GIN index",
                table.name
            ));
            let concatenated = columns
                .iter()
                .map(|c| format!("coalesce({c}, '')"))
                .collect::<Vec<_>>()
                .join(" || ' ' || ");
            post_actions.push(PostAction {
                kind: PostActionKind::PostgresGeneratedColumn,
                table: table.name.clone(),
                sql: format!(
                    "ALTER TABLE {} ADD COLUMN {search_column} tsvector GENERATED ALWAYS AS (to_tsvector('english', {concatenated})) STORED;",
                    table.name
                ),
                description: format!("generated tsvector column for FULLTEXT index on {column_list}"),
            });
            post_actions.push(PostAction {
                kind: PostActionKind::PostgresGinIndex,
                table: table.name.clone(),
                sql: format!("CREATE INDEX ON {} USING GIN ({search_column});", table.name),
                description: format!("GIN index backing the generated {search_column} column"),
            });
        }
        Dialect::Sqlite => {
            warnings.push(format!(
                "FULLTEXT index on `{}` ({column_list}) emulated with an FTS5 virtual table",
                table.name
            ));
            let fts_table = format!("{}_fts", table.name);
            post_actions.push(PostAction {
                kind: PostActionKind::SqliteFtsTable,
                table: table.name.clone(),
                sql: format!("CREATE VIRTUAL TABLE {fts_table} USING fts5({column_list}, content='{}');", table.name),
                description: "FTS5 virtual table mirroring the FULLTEXT-indexed columns".to_string(),
            });
            post_actions.push(PostAction {
                kind: PostActionKind::SqliteFtsPopulate,
                table: table.name.clone(),
                sql: format!("INSERT INTO {fts_table} (rowid, {column_list}) SELECT rowid, {column_list} FROM {};", table.name),
                description: "initial population of the FTS5 shadow table".to_string(),
            });
            post_actions.push(PostAction {
                kind: PostActionKind::SqliteFtsTriggers,
                table: table.name.clone(),
                sql: format!(
                    "CREATE TRIGGER {}_ai AFTER INSERT ON {} BEGIN INSERT INTO {fts_table} (rowid, {column_list}) VALUES (new.rowid, {}); END;",
                    table.name,
                    table.name,
                    columns.iter().map(|c| format!("new.{c}")).collect::<Vec<_>>().join(", ")
                ),
                description: "sync trigger keeping the FTS5 shadow table current".to_string(),
            });
        }
        Dialect::MySql => {}
    }
}

/// Returns a deterministically shortened identifier when `name` exceeds the
/// target's length limit, `None` otherwise: the allowed prefix is kept and
/// a hash of the full name is appended as a suffix, so truncation never
/// collides two distinct long names onto the same short one by coincidence
/// alone.
fn truncate_identifier(name: &str, target: Dialect) -> Option<String> {
    let limit = match target {
        Dialect::PostgreSql => POSTGRES_IDENT_LIMIT,
        Dialect::MySql | Dialect::Sqlite => return None,
    };
    if name.len() <= limit {
        return None;
    }
    let hash = fnv1a(name.as_bytes());
    let suffix = format!("_{hash:08x}");
    let prefix_len = limit - suffix.len();
    Some(format!("{}{suffix}", &name[..prefix_len]))
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[derive(Default)]
struct WarningSet {
    seen: std::collections::BTreeSet<String>,
    ordered: Vec<String>,
}

impl WarningSet {
    fn push(&mut self, message: String) {
        if self.seen.insert(message.clone()) {
            self.ordered.push(message);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Column;

    fn schema_with_identity_column() -> Schema {
        let mut schema = Schema::new();
        let mut table = Table::named("users");
        let mut id = Column::new("id", DataType::Int);
        id.auto_increment = true;
        id.primary_key = true;
        table.columns.push(id);
        schema.insert(table);
        schema
    }

    #[test]
    fn identity_mysql_to_postgres_becomes_serial() {
        let schema = schema_with_identity_column();
        let output = transform(&schema, Dialect::MySql, Dialect::PostgreSql, &Options::default()).unwrap();
        let table = output.schema.get("users").unwrap();
        assert_eq!(table.column("id").unwrap().data_type, DataType::Serial);
    }

    #[test]
    fn identity_bigint_mysql_to_postgres_becomes_bigserial() {
        let mut schema = Schema::new();
        let mut table = Table::named("users");
        let mut id = Column::new("id", DataType::BigInt);
        id.auto_increment = true;
        table.columns.push(id);
        schema.insert(table);

        let output = transform(&schema, Dialect::MySql, Dialect::PostgreSql, &Options::default()).unwrap();
        assert_eq!(output.schema.get("users").unwrap().column("id").unwrap().data_type, DataType::BigSerial);
    }

    #[test]
    fn same_source_and_target_is_a_no_op() {
        let schema = schema_with_identity_column();
        let output = transform(&schema, Dialect::MySql, Dialect::MySql, &Options::default()).unwrap();
        assert_eq!(output.schema, schema);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn unsigned_is_dropped_outside_mysql() {
        let mut schema = Schema::new();
        let mut table = Table::named("t");
        let mut col = Column::new("n", DataType::Int);
        col.unsigned = true;
        table.columns.push(col);
        schema.insert(table);

        let output = transform(&schema, Dialect::MySql, Dialect::PostgreSql, &Options::default()).unwrap();
        assert!(!output.schema.get("t").unwrap().column("n").unwrap().unsigned);
        assert_eq!(output.warnings.len(), 1);
    }

    fn schema_with_untranslatable_default() -> Schema {
        let mut schema = Schema::new();
        let mut table = Table::named("widgets");
        let mut col = Column::new("label", DataType::Text);
        col.default = Some(Expr::Raw("(`other_col` + 1)".to_string()));
        table.columns.push(col);
        schema.insert(table);
        schema
    }

    #[test]
    fn skip_policy_drops_the_whole_table_with_a_warning() {
        let schema = schema_with_untranslatable_default();
        let mut options = Options::default();
        options.on_unsupported = HandleUnsupported::Skip;

        let output = transform(&schema, Dialect::PostgreSql, Dialect::MySql, &options).unwrap();
        assert!(output.schema.get("widgets").is_none());
        assert!(output.warnings.iter().any(|w| w.contains("widgets") && w.contains("dropped")));
    }

    #[test]
    fn error_policy_aborts_on_the_same_unsupported_default() {
        let schema = schema_with_untranslatable_default();
        let mut options = Options::default();
        options.on_unsupported = HandleUnsupported::Error;

        let result = transform(&schema, Dialect::PostgreSql, Dialect::MySql, &options);
        assert!(result.is_err());
    }

    #[test]
    fn warn_policy_keeps_the_table_and_drops_the_default() {
        let schema = schema_with_untranslatable_default();
        let mut options = Options::default();
        options.on_unsupported = HandleUnsupported::Warn;

        let output = transform(&schema, Dialect::PostgreSql, Dialect::MySql, &options).unwrap();
        let table = output.schema.get("widgets").expect("table kept under Warn policy");
        assert!(table.column("label").unwrap().default.is_none());
        assert!(!output.warnings.is_empty());
    }
}
