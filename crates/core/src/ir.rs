//! The dialect-neutral schema intermediate representation.

mod expr;
mod ident;
mod schema_object;
mod types;

pub use expr::Expr;
pub use ident::Ident;
pub use schema_object::{
    Column, Constraint, ConstraintKind, ForeignKey, ForeignKeyAction, Index, IndexColumn, IndexKind, PostAction,
    PostActionKind, Row, Schema, SortDirection, Table, TableOptions,
};
pub use types::{value_total_eq, DataType, Value};
