//! Dialect-neutral schema IR and translation pipeline for sqlbridge: parses
//! MySQL, PostgreSQL, and SQLite `CREATE TABLE`/`ALTER TABLE`/`INSERT`
//! dumps into a shared IR, rewrites it for a target dialect, orders tables
//! by foreign-key dependency, and renders target DDL/DML text.

pub mod detect;
pub mod dialect;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod options;
pub mod ordering;
pub mod platform;
pub mod render;
pub mod splitter;
pub mod transform;
pub mod translator;

pub use detect::{detect_dialect, Detection};
pub use dialect::Dialect;
pub use error::{CycleDetected, Error, ParseError, Result, SourceLocation, UnsupportedFeature, ValidationError};
pub use ir::{
    Column, Constraint, ConstraintKind, DataType, Expr, ForeignKey, ForeignKeyAction, Ident, Index, IndexColumn,
    IndexKind, PostAction, PostActionKind, Row, Schema, SortDirection, Table, TableOptions, Value,
};
pub use options::{
    AutoIncrementConversion, CycleHandling, Dialect as DialectTag, EnumConversion, HandleUnsupported,
    InsertConflictHandling, Options,
};
pub use lexer::{tokens_to_source, Lexer, LexerDialect, Token, TokenCursor};
pub use platform::Platform;
pub use splitter::{split_statements, StatementSpan};
pub use translator::{translate, Stage, TranslateOutput};
