//! Ambient CLI flags (SPEC_FULL.md §6.1): a single `translate` command
//! covering every knob in [`sqlbridge_core::options::Options`].

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "sqlbridge", version, about = "Translate SQL schema dumps across MySQL, PostgreSQL, and SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Raise log verbosity: -v for info, -vv for debug.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a schema dump from one dialect to another.
    Translate(TranslateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceDialectArg {
    Mysql,
    Postgres,
    Sqlite,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetDialectArg {
    Mysql,
    Postgres,
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnUnsupportedArg {
    Warn,
    Skip,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumConversionArg {
    Text,
    TextWithCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AutoIncrementArg {
    PostgresNative,
    PostgresSequence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnCycleArg {
    Warn,
    Error,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnConflictArg {
    Error,
    Update,
    Skip,
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    /// Source dialect, or `auto` to detect it from the input.
    #[arg(long, value_enum, default_value = "auto")]
    pub from: SourceDialectArg,

    /// Target dialect to render.
    #[arg(long, value_enum)]
    pub to: TargetDialectArg,

    /// Read the input schema from this file instead of stdin.
    #[arg(long)]
    pub input: Option<std::path::PathBuf>,

    /// Write the rendered script to this file instead of stdout.
    #[arg(long)]
    pub output: Option<std::path::PathBuf>,

    /// Abort on the first statement that fails to parse instead of skipping it.
    #[arg(long)]
    pub strict: bool,

    /// Omit column and table comments from the rendered output.
    #[arg(long)]
    pub no_comments: bool,

    /// Omit secondary indexes from the rendered output.
    #[arg(long)]
    pub no_indexes: bool,

    /// Omit constraints (foreign keys, checks, uniques) from the rendered output.
    #[arg(long)]
    pub no_constraints: bool,

    /// What to do with a construct the target dialect cannot express.
    #[arg(long, value_enum, default_value = "warn")]
    pub on_unsupported: OnUnsupportedArg,

    /// How `ENUM` columns are rendered for targets without a native enum type.
    #[arg(long, value_enum, default_value = "text-with-check")]
    pub enum_conversion: EnumConversionArg,

    /// How MySQL `AUTO_INCREMENT` columns map onto PostgreSQL.
    #[arg(long, value_enum, default_value = "postgres-sequence")]
    pub auto_increment: AutoIncrementArg,

    /// Disable foreign-key dependency ordering; emit tables in parse order.
    #[arg(long)]
    pub no_dependency_sort: bool,

    /// Order tables children-first, for a script that drops instead of creates.
    #[arg(long)]
    pub sort_for_drop: bool,

    /// What to do when tables form a foreign-key reference cycle.
    #[arg(long, value_enum, default_value = "warn")]
    pub on_cycle: OnCycleArg,

    /// Omit the generated-by header comment.
    #[arg(long)]
    pub no_header: bool,

    /// Also render `INSERT` statements for any captured row data.
    #[arg(long)]
    pub with_data: bool,

    /// Render `INSERT` statements without an explicit column list.
    #[arg(long)]
    pub no_insert_columns: bool,

    /// How to rewrite `INSERT ... ON DUPLICATE KEY` / `ON CONFLICT` clauses.
    #[arg(long, value_enum, default_value = "error")]
    pub on_conflict: OnConflictArg,

    /// Maximum number of rows per rendered `INSERT` statement.
    #[arg(long, default_value_t = 1000)]
    pub insert_batch_size: usize,

    /// Maximum size, in bytes, of a single input statement.
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_statement_size: usize,
}
