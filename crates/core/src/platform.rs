//! The per-dialect rendering facts (quoting, type names, capability flags)
//! the renderer needs but that have nothing to do with parsing or
//! transforming.

use crate::ir::{DataType, Value};
use crate::options::Dialect;

/// Dialect-specific rendering knowledge, implemented once per dialect crate
/// and handed to the renderer as a trait object.
pub trait Platform: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Quotes an identifier the way this dialect expects
    /// (`` `ident` ``/`"ident"`), doubling any embedded quote character.
    fn quote_ident(&self, ident: &str) -> String;

    /// Renders a string literal, including the surrounding quotes.
    fn quote_string(&self, value: &str) -> String;

    /// Renders a scalar value as it should appear in a `DEFAULT` clause or
    /// `INSERT` row.
    fn render_value(&self, value: &Value) -> String {
        match value {
            Value::String(text) => self.quote_string(text),
            Value::Integer(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Bool(b) => self.render_bool(*b),
            Value::Null => "NULL".to_string(),
        }
    }

    fn render_bool(&self, value: bool) -> String;

    /// Renders `data_type` (plus any length/precision/scale already present
    /// on the owning column) into this dialect's type syntax.
    fn render_type(&self, data_type: &DataType, length: Option<u32>, precision: Option<u32>, scale: Option<u32>) -> String;

    /// `true` if this dialect has a native `ENUM` type.
    fn supports_native_enum(&self) -> bool {
        false
    }

    /// `true` if this dialect can express inline `FOREIGN KEY` clauses
    /// inside `CREATE TABLE` (all three can; kept as a hook for symmetry
    /// with [`Self::supports_alter_add_foreign_key`]).
    fn supports_inline_foreign_keys(&self) -> bool {
        true
    }

    /// `true` if this dialect supports `ALTER TABLE ... ADD CONSTRAINT ...
    /// FOREIGN KEY`. SQLite does not: its foreign keys must be declared
    /// inline at `CREATE TABLE` time.
    fn supports_alter_add_foreign_key(&self) -> bool;

    /// `true` if this dialect supports `ALTER TABLE ... ADD COLUMN`.
    fn supports_alter_add_column(&self) -> bool {
        true
    }

    /// The statement terminator this dialect's tooling expects between
    /// statements (always `;` for the three dialects in scope, kept as a
    /// hook rather than a hardcoded literal at every call site).
    fn statement_terminator(&self) -> &'static str {
        ";"
    }

    /// `true` if this dialect has a native full-text search capability
    /// reachable without an extension (MySQL's `FULLTEXT` index).
    fn supports_native_fulltext(&self) -> bool {
        false
    }
}
