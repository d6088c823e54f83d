use std::{io, path::PathBuf};

use anyhow::Context;
use miette::Report;

const ORCHESTRATOR_CONTEXT: &str = "while running orchestrator";
const FILE_READ_CONTEXT: &str = "while reading input schema file";
const STDIN_READ_CONTEXT: &str = "while reading input schema from stdin";
const FILE_WRITE_CONTEXT: &str = "while writing output schema file";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    ReadFile { path: PathBuf, source: io::Error },
    ReadStdin(io::Error),
    WriteFile { path: PathBuf, source: io::Error },
    Core(sqlbridge_core::Error),
    #[cfg(not(any(feature = "mysql", feature = "postgres", feature = "sqlite")))]
    NoDialectsEnabled,
}

impl From<sqlbridge_core::Error> for CliError {
    fn from(value: sqlbridge_core::Error) -> Self {
        Self::Core(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ReadStdin(source) => {
            let report = report_with_context(source, STDIN_READ_CONTEXT);
            format!("[io] {report}")
        }
        CliError::WriteFile { path, source } => {
            let context = format!("{FILE_WRITE_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, ORCHESTRATOR_CONTEXT);
            format!("[{category}] {report}")
        }
        #[cfg(not(any(feature = "mysql", feature = "postgres", feature = "sqlite")))]
        CliError::NoDialectsEnabled => format!("[config] {}", no_dialects_enabled_message()),
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &sqlbridge_core::Error) -> &'static str {
    match error {
        sqlbridge_core::Error::Parse(_) => "parse",
        sqlbridge_core::Error::Unsupported(_) => "unsupported",
        sqlbridge_core::Error::Cycle(_) => "cycle",
        sqlbridge_core::Error::Validation(_) => "validation",
        sqlbridge_core::Error::Translation { source, .. } => core_category(source),
    }
}

#[cfg(not(any(feature = "mysql", feature = "postgres", feature = "sqlite")))]
fn no_dialects_enabled_message() -> &'static str {
    "no dialect features are enabled for this build; enable at least one of mysql/postgres/sqlite"
}
