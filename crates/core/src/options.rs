//! Translation options: the closed `Dialect` set and the full `Options`
//! table controlling how the transform, sort, and render stages behave.

use std::fmt;

/// The closed set of SQL dialects this crate understands, as both a source
/// and a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    MySql,
    PostgreSql,
    Sqlite,
}

impl Dialect {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Self::MySql),
            "postgresql" | "postgres" | "pg" => Some(Self::PostgreSql),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a construct the target dialect cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleUnsupported {
    /// Drop the construct and emit a warning (default).
    #[default]
    Warn,
    /// Abort the translation with an [`crate::error::UnsupportedFeature`].
    Error,
    /// Drop the whole table the construct appears on, with a warning.
    Skip,
}

/// How `ENUM` columns are translated into dialects without a native enum
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumConversion {
    /// `VARCHAR`/`TEXT` plus a `CHECK` constraint enumerating the values.
    #[default]
    CheckConstraint,
    /// Plain `VARCHAR`/`TEXT`, values unconstrained.
    Varchar,
}

/// How MySQL `AUTO_INCREMENT`/`SERIAL` columns map to PostgreSQL/SQLite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoIncrementConversion {
    /// PostgreSQL: rewrite the column type to `SERIAL`/`BIGSERIAL`.
    #[default]
    Serial,
    /// PostgreSQL: keep the integer type and attach an `IDENTITY` clause.
    Identity,
}

/// What to do when the dependency sorter finds a foreign-key reference
/// cycle among tables. A cycle never blocks rendering — it only affects
/// whether the sorter can fully order `CREATE TABLE` statements by
/// dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleHandling {
    /// Emit a warning naming the cyclic tables; fall back to parse order
    /// for the tables the cycle left unordered (default).
    #[default]
    Warn,
    /// Abort with [`crate::error::CycleDetected`].
    Error,
    /// Silently fall back to parse order for the cyclic tables.
    Ignore,
}

/// How `INSERT ... ON DUPLICATE KEY` / `ON CONFLICT` clauses are rewritten
/// across dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertConflictHandling {
    /// Plain `INSERT`, no conflict clause (default).
    #[default]
    Error,
    /// Upsert: update every non-key column on conflict.
    Update,
    /// Ignore the conflicting row (`INSERT IGNORE` / `ON CONFLICT DO
    /// NOTHING` / `INSERT OR IGNORE`).
    Skip,
}

/// Every knob this crate exposes for controlling a translation, defaulted
/// the same way the CLI's flags are defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub source: Option<Dialect>,
    pub target: Dialect,
    pub strict: bool,
    pub include_comments: bool,
    pub include_indexes: bool,
    pub include_constraints: bool,
    pub on_unsupported: HandleUnsupported,
    pub enum_conversion: EnumConversion,
    pub auto_increment_conversion: AutoIncrementConversion,
    pub dependency_sort: bool,
    /// `true` (default): parents-first order for `CREATE TABLE` emission.
    /// `false`: children-first, used when rendering a pure `DROP` script.
    pub sort_for_create: bool,
    pub on_cycle: CycleHandling,
    pub emit_header: bool,
    pub process_insert_statements: bool,
    pub insert_columns_explicit: bool,
    pub on_conflict: InsertConflictHandling,
    pub insert_batch_size: usize,
    pub max_statement_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: None,
            target: Dialect::PostgreSql,
            strict: false,
            include_comments: true,
            include_indexes: true,
            include_constraints: true,
            on_unsupported: HandleUnsupported::default(),
            enum_conversion: EnumConversion::default(),
            auto_increment_conversion: AutoIncrementConversion::default(),
            dependency_sort: true,
            sort_for_create: true,
            on_cycle: CycleHandling::default(),
            emit_header: true,
            process_insert_statements: true,
            insert_columns_explicit: true,
            on_conflict: InsertConflictHandling::default(),
            insert_batch_size: 1000,
            max_statement_size: 1024 * 1024,
        }
    }
}

impl Options {
    #[must_use]
    pub fn for_target(target: Dialect) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }
}
