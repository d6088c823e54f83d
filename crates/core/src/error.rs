//! Error types for every stage of the translation pipeline.

use thiserror::Error;

/// A position in the original input, used to annotate parse and split
/// failures so a CLI or editor can point at the offending SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: Option<usize>,
}

impl SourceLocation {
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{column}", self.line),
            None => write!(f, "{}", self.line),
        }
    }
}

/// Failures raised while splitting input into statements (C2) or parsing a
/// single statement into the IR (C4).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unterminated {construct} starting at {location}")]
    Unterminated { construct: &'static str, location: SourceLocation },

    #[error("statement {statement_index} failed to parse near `{near}` ({location}): {reason}")]
    Statement {
        statement_index: usize,
        location: SourceLocation,
        near: String,
        reason: String,
    },

    #[error("statement {statement_index} exceeds the maximum statement size of {limit} bytes")]
    StatementTooLarge { statement_index: usize, limit: usize },

    #[error("could not determine the source dialect from the input; pass --from explicitly")]
    DialectAmbiguous,
}

/// A construct this crate recognizes but deliberately does not translate:
/// views, stored procedures, grants, and the like.
#[derive(Debug)]
pub struct UnsupportedFeature {
    pub feature: String,
    pub location: SourceLocation,
    pub hint: Option<String>,
}

impl std::fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {} is not supported", self.feature, self.location)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for UnsupportedFeature {}

/// A foreign-key reference cycle that `--on-cycle error` (or the default,
/// when no `--sort-for-drop` is requested) refuses to silently break.
#[derive(Debug, Error)]
#[error("dependency cycle detected among tables: {}", .cycle.join(" -> "))]
pub struct CycleDetected {
    pub cycle: Vec<String>,
}

/// An IR invariant violated after parsing: duplicate column names, more
/// than one `PRIMARY` index, mismatched foreign-key column counts, and so
/// on.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("table `{table}` has duplicate column `{column}`")]
    DuplicateColumn { table: String, column: String },

    #[error("table `{table}` declares {count} PRIMARY indexes; at most one is allowed")]
    MultiplePrimaryIndexes { table: String, count: usize },

    #[error(
        "foreign key on table `{table}` references {referenced} column(s) on `{referenced_table}` but has {local} local column(s)"
    )]
    ForeignKeyColumnCountMismatch {
        table: String,
        referenced_table: String,
        local: usize,
        referenced: usize,
    },

    #[error("foreign key on table `{table}` references unknown table `{referenced_table}`")]
    UnknownReferencedTable { table: String, referenced_table: String },

    #[error("foreign key on table `{table}` references unknown column `{column}` on `{referenced_table}`")]
    UnknownReferencedColumn {
        table: String,
        referenced_table: String,
        column: String,
    },

    #[error("index `{index}` on table `{table}` references unknown column `{column}`")]
    UnknownIndexedColumn { table: String, index: String, column: String },
}

/// The top-level error returned by every public entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedFeature),

    #[error(transparent)]
    Cycle(#[from] CycleDetected),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("translation failed at stage {stage}: {source}")]
    Translation {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    #[must_use]
    pub fn at_stage(self, stage: &'static str) -> Self {
        Self::Translation {
            stage,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
