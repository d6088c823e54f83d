use crate::error::Result;
use crate::ir::Schema;
use crate::options::Dialect as DialectTag;
use crate::platform::Platform;

/// Per-dialect parsing contract: turn a single dialect's DDL text into the
/// neutral [`Schema`] (C4), and expose the [`Platform`] C7/C8 need to
/// render back out of it.
///
/// ```rust
/// use sqlbridge_core::{Dialect, Schema};
///
/// #[derive(Debug, Default)]
/// struct ExampleDialect;
///
/// impl Dialect for ExampleDialect {
///     fn tag(&self) -> sqlbridge_core::options::Dialect {
///         sqlbridge_core::options::Dialect::PostgreSql
///     }
///
///     fn parse_statement(&self, _sql: &str, schema: &mut Schema) -> sqlbridge_core::error::Result<()> {
///         let _ = schema;
///         Ok(())
///     }
///
///     fn platform(&self) -> &dyn sqlbridge_core::Platform {
///         unimplemented!("example only")
///     }
/// }
/// ```
pub trait Dialect: Send + Sync {
    fn tag(&self) -> DialectTag;

    /// Parses one already-split statement and folds its effect into
    /// `schema` (a `CREATE TABLE` inserts a table, an `ALTER TABLE ADD
    /// CONSTRAINT` amends one already present, an `INSERT` appends rows).
    fn parse_statement(&self, sql: &str, schema: &mut Schema) -> Result<()>;

    fn platform(&self) -> &dyn Platform;
}
