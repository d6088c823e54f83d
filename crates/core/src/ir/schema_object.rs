use std::collections::BTreeMap;

use super::{DataType, Expr, Ident, Value};

/// A full translated-or-to-be-translated schema: an ordered `name -> Table`
/// mapping plus the post-transform actions collected while building it.
///
/// Order is observable: [`Schema::tables`] iterates in insertion order, which
/// is also the order statements were parsed in (before dependency sorting is
/// applied for rendering).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    order: Vec<Ident>,
    by_name: BTreeMap<Ident, Table>,
    pub post_actions: Vec<PostAction>,
    /// Raw SQL of `ALTER TABLE` statements parsed before their target table
    /// was seen, held here until the caller replays them once parsing the
    /// whole source is done.
    pending_alters: Vec<String>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table, preserving first-seen order. Re-inserting a name
    /// already present replaces it in place without moving it in the order.
    pub fn insert(&mut self, table: Table) {
        let name = table.name.clone();
        if !self.by_name.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.by_name.insert(name, table);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.by_name.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.by_name.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tables in parse (insertion) order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.order.iter().map(move |name| &self.by_name[name])
    }

    /// Records an `ALTER TABLE` statement whose target table hasn't been
    /// seen yet, to be retried later via [`Schema::take_pending_alters`].
    pub fn defer_alter(&mut self, sql: String) {
        self.pending_alters.push(sql);
    }

    /// Drains and returns every deferred `ALTER TABLE` statement recorded so
    /// far, clearing the pending list.
    pub fn take_pending_alters(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_alters)
    }

    /// Tables reordered to match `order` (used after §4.5 dependency
    /// sorting); any name in `self` not present in `order` is appended in
    /// its original position, after the ones named.
    #[must_use]
    pub fn reordered(&self, order: &[Ident]) -> Vec<&Table> {
        let mut seen = std::collections::HashSet::with_capacity(order.len());
        let mut out = Vec::with_capacity(self.order.len());
        for name in order {
            if let Some(table) = self.by_name.get(name) {
                out.push(table);
                seen.insert(name.as_str());
            }
        }
        for name in &self.order {
            if !seen.contains(name.as_str()) {
                out.push(&self.by_name[name]);
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: Ident,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub constraints: Vec<Constraint>,
    pub options: TableOptions,
    /// Set by the transformer when a `MySQL ON UPDATE CURRENT_TIMESTAMP`
    /// column has no native equivalent in the target and must be emulated
    /// with a trigger.
    pub needs_update_trigger: bool,
    pub update_trigger_columns: Vec<Ident>,
    /// Ordered row data collected from `INSERT` statements, present only
    /// when `process_insert_statements` is enabled.
    pub data: Vec<Row>,
}

impl Table {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            options: TableOptions::default(),
            needs_update_trigger: false,
            update_trigger_columns: Vec::new(),
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn primary_key_index(&self) -> Option<&Index> {
        self.indexes.iter().find(|index| index.kind == IndexKind::Primary)
    }

    #[must_use]
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ForeignKey> {
        self.constraints.iter().filter_map(|constraint| match &constraint.kind {
            ConstraintKind::ForeignKey(fk) => Some(fk),
            _ => None,
        })
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// One `INSERT` row, keyed by declared column name; cells absent from a
/// given `INSERT`'s column list are never present here (the renderer fills
/// `NULL` only when emitting the union across rows).
pub type Row = BTreeMap<Ident, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableOptions {
    pub engine: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    pub comment: Option<String>,
    pub auto_increment_start: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: Ident,
    pub data_type: DataType,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub nullable: bool,
    pub default: Option<Expr>,
    pub unsigned: bool,
    pub auto_increment: bool,
    pub comment: Option<String>,
    /// `true` when this column had an inline `ON UPDATE CURRENT_TIMESTAMP`
    /// clause (MySQL only) before transformation rewrote it into a trigger.
    pub on_update_current_timestamp: bool,
    /// Inline `PRIMARY KEY` / `UNIQUE` hints captured at parse time; the
    /// parser also materializes the equivalent `Index`/`Constraint` entries,
    /// so renderers should consult those rather than these flags.
    pub primary_key: bool,
    pub unique: bool,
    /// Free-form extras that don't earn a dedicated field.
    pub extra: BTreeMap<String, Value>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default: None,
            unsigned: false,
            auto_increment: false,
            comment: None,
            on_update_current_timestamp: false,
            primary_key: false,
            unique: false,
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.data_type.is_array()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
    Fulltext,
    Spatial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexColumn {
    pub name: Ident,
    pub length: Option<u32>,
    pub direction: Option<SortDirection>,
}

impl IndexColumn {
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            direction: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub name: Option<Ident>,
    pub kind: IndexKind,
    pub columns: Vec<IndexColumn>,
    pub method: Option<String>,
    pub where_clause: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: Option<Ident>,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    PrimaryKey { columns: Vec<Ident> },
    ForeignKey(ForeignKey),
    Unique { columns: Vec<Ident> },
    Check { expression: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub columns: Vec<Ident>,
    pub referenced_table: Ident,
    pub referenced_columns: Vec<Ident>,
    pub on_delete: Option<ForeignKeyAction>,
    pub on_update: Option<ForeignKeyAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    Cascade,
    SetNull,
    SetDefault,
    Restrict,
    NoAction,
}

impl ForeignKeyAction {
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "CASCADE" => Some(Self::Cascade),
            "SET NULL" => Some(Self::SetNull),
            "SET DEFAULT" => Some(Self::SetDefault),
            "RESTRICT" => Some(Self::Restrict),
            "NO ACTION" => Some(Self::NoAction),
            _ => None,
        }
    }
}

/// A deferred, target-specific statement emitted at the end of the output:
/// PostgreSQL generated `tsvector` columns and GIN indexes, SQLite FTS5
/// virtual tables, population statements, and sync triggers.
#[derive(Debug, Clone, PartialEq)]
pub struct PostAction {
    pub kind: PostActionKind,
    pub table: Ident,
    pub sql: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PostActionKind {
    PostgresGeneratedColumn,
    PostgresGinIndex,
    SqliteFtsTable,
    SqliteFtsPopulate,
    SqliteFtsTriggers,
}

impl PostActionKind {
    #[must_use]
    pub fn section_header(self) -> &'static str {
        match self {
            Self::PostgresGeneratedColumn => "PostgreSQL generated columns",
            Self::PostgresGinIndex => "PostgreSQL GIN indexes",
            Self::SqliteFtsTable => "SQLite FTS tables",
            Self::SqliteFtsPopulate => "SQLite FTS population",
            Self::SqliteFtsTriggers => "SQLite FTS sync triggers",
        }
    }
}
