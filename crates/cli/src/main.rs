mod args;
mod dialects;
mod error_presentation;

use std::fs;
use std::io::{self, Read as _, Write as _};
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use args::{
    AutoIncrementArg, Cli, Command, EnumConversionArg, OnConflictArg, OnCycleArg, OnUnsupportedArg, TranslateArgs,
};
use error_presentation::{render_runtime_error, CliError, CliResult};
use sqlbridge_core::{
    translate, AutoIncrementConversion, CycleHandling, DialectTag, EnumConversion, HandleUnsupported,
    InsertConflictHandling, Options, SourceLocation, UnsupportedFeature,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Command::Translate(args) = cli.command;

    match run_translate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run_translate(args: &TranslateArgs) -> CliResult<()> {
    let input = read_input(args.input.as_deref())?;

    let (source, confident) = dialects::resolve_source(args.from, &input).map_err(config_error)?;
    if !confident {
        warn!("could not confidently detect the source dialect; defaulting to MySQL (pass --from explicitly to silence this)");
    }

    let target_dialect = dialects::resolve_target(args.to).map_err(config_error)?;
    let target_platform = target_dialect.platform();

    let options = build_options(args);

    let output = translate(&input, source.as_ref(), target_platform, &options)?;

    for warning in &output.warnings {
        eprintln!("warning: {warning}");
    }

    if !output.post_actions.is_empty() {
        let mut by_kind: std::collections::BTreeMap<&'static str, usize> = std::collections::BTreeMap::new();
        for action in &output.post_actions {
            *by_kind.entry(action.kind.section_header()).or_default() += 1;
        }
        for (header, count) in by_kind {
            eprintln!("note: {count} post-transform action(s) deferred: {header}");
        }
    }

    write_output(args.output.as_deref(), &output.output_sql)
}

fn read_input(path: Option<&std::path::Path>) -> CliResult<String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| CliError::ReadFile {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::ReadStdin)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&std::path::Path>, sql: &str) -> CliResult<()> {
    match path {
        Some(path) => fs::write(path, sql).map_err(|source| CliError::WriteFile {
            path: path.to_path_buf(),
            source,
        }),
        None => io::stdout().write_all(sql.as_bytes()).map_err(|source| CliError::WriteFile {
            path: "<stdout>".into(),
            source,
        }),
    }
}

fn build_options(args: &TranslateArgs) -> Options {
    let to = match args.to {
        args::TargetDialectArg::Mysql => DialectTag::MySql,
        args::TargetDialectArg::Postgres => DialectTag::PostgreSql,
        args::TargetDialectArg::Sqlite => DialectTag::Sqlite,
    };

    Options {
        source: None,
        target: to,
        strict: args.strict,
        include_comments: !args.no_comments,
        include_indexes: !args.no_indexes,
        include_constraints: !args.no_constraints,
        on_unsupported: match args.on_unsupported {
            OnUnsupportedArg::Warn => HandleUnsupported::Warn,
            OnUnsupportedArg::Skip => HandleUnsupported::Skip,
            OnUnsupportedArg::Error => HandleUnsupported::Error,
        },
        enum_conversion: match args.enum_conversion {
            EnumConversionArg::Text => EnumConversion::Varchar,
            EnumConversionArg::TextWithCheck => EnumConversion::CheckConstraint,
        },
        auto_increment_conversion: match args.auto_increment {
            AutoIncrementArg::PostgresNative => AutoIncrementConversion::Identity,
            AutoIncrementArg::PostgresSequence => AutoIncrementConversion::Serial,
        },
        dependency_sort: !args.no_dependency_sort,
        sort_for_create: !args.sort_for_drop,
        on_cycle: match args.on_cycle {
            OnCycleArg::Warn => CycleHandling::Warn,
            OnCycleArg::Error => CycleHandling::Error,
            OnCycleArg::Ignore => CycleHandling::Ignore,
        },
        emit_header: !args.no_header,
        process_insert_statements: args.with_data,
        insert_columns_explicit: !args.no_insert_columns,
        on_conflict: match args.on_conflict {
            OnConflictArg::Error => InsertConflictHandling::Error,
            OnConflictArg::Update => InsertConflictHandling::Update,
            OnConflictArg::Skip => InsertConflictHandling::Skip,
        },
        insert_batch_size: args.insert_batch_size,
        max_statement_size: args.max_statement_size,
    }
}

fn config_error(error: anyhow::Error) -> CliError {
    CliError::Core(sqlbridge_core::Error::Unsupported(UnsupportedFeature {
        feature: "dialect".to_string(),
        location: SourceLocation::new(1, 1),
        hint: Some(error.to_string()),
    }))
}
