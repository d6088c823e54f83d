/// A bare SQL identifier (table, column, index, or constraint name).
///
/// Source-dialect quoting is not preserved: every identifier is re-quoted by
/// the target [`crate::Platform`] at render time, so the IR only ever needs
/// the raw name.
pub type Ident = String;
