//! The orchestrator driving parse → transform → sort → render end to end.
//! Dialect detection and resolving a detected [`Dialect`](crate::options::Dialect)
//! tag to a concrete parser are the caller's job (typically the CLI's
//! dialect registry); [`translate`] itself only needs a source
//! [`crate::dialect::Dialect`] object already chosen.

use tracing::{debug, info, instrument};

use crate::dialect::Dialect as DialectImpl;
use crate::error::{CycleDetected, Error, ParseError, Result};
use crate::ir::Schema;
use crate::options::{CycleHandling, Options};
use crate::ordering;
use crate::platform::Platform;
use crate::render;
use crate::splitter;
use crate::transform;

/// The pipeline stage active when a fatal error occurs, used to tag a
/// [`Error::Translation`] wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Parsing,
    Transforming,
    Sorting,
    Rendering,
    Done,
}

impl Stage {
    fn label(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Parsing => "parsing",
            Self::Transforming => "transforming",
            Self::Sorting => "sorting",
            Self::Rendering => "rendering",
            Self::Done => "done",
        }
    }
}

/// Translates `input_sql` from `source` into `target`, returning the
/// rendered SQL alongside any warnings and deferred post-actions, minus
/// dialect resolution which the caller has already done by handing in
/// `source`.
pub struct TranslateOutput {
    pub output_sql: String,
    pub warnings: Vec<String>,
    pub post_actions: Vec<crate::ir::PostAction>,
}

#[instrument(skip(input, source, target_platform, options), fields(target = %options.target))]
pub fn translate(input: &str, source: &dyn DialectImpl, target_platform: &dyn Platform, options: &Options) -> Result<TranslateOutput> {
    let mut stage = Stage::Init;
    let mut warnings = WarningSet::default();

    let run = (|| -> Result<TranslateOutput> {
        stage = Stage::Parsing;
        let schema = parse_all(input, source, options)?;
        info!(tables = schema.len(), "parsed schema");

        stage = Stage::Transforming;
        let transformed = transform::transform(&schema, source.tag(), options.target, options)?;
        for warning in transformed.warnings {
            warnings.push(warning);
        }

        stage = Stage::Sorting;
        let tables = transformed.schema.tables().collect::<Vec<_>>();
        let sorted = if options.dependency_sort {
            if options.sort_for_create {
                ordering::sort_for_create(&tables)
            } else {
                ordering::sort_for_drop(&tables)
            }
        } else {
            ordering::SortResult {
                order: tables.iter().map(|t| t.name.clone()).collect(),
                cyclic_tables: Vec::new(),
            }
        };

        if !sorted.cyclic_tables.is_empty() {
            debug!(cyclic = ?sorted.cyclic_tables, "dependency cycle among tables");
            match options.on_cycle {
                CycleHandling::Error => {
                    return Err(CycleDetected {
                        cycle: sorted.cyclic_tables.clone(),
                    }
                    .into());
                }
                CycleHandling::Warn => {
                    warnings.push(format!(
                        "dependency cycle among tables [{}]; falling back to parse order for them",
                        sorted.cyclic_tables.join(", ")
                    ));
                }
                CycleHandling::Ignore => {}
            }
        }

        stage = Stage::Rendering;
        let rendered = render::render(&transformed.schema, &sorted.order, target_platform, options);
        for warning in rendered.warnings {
            warnings.push(warning);
        }

        stage = Stage::Done;
        Ok(TranslateOutput {
            output_sql: rendered.sql,
            warnings: warnings.clone().into_vec(),
            post_actions: transformed.schema.post_actions,
        })
    })();

    run.map_err(|error| match stage {
        Stage::Init => error,
        other => error.at_stage(other.label()),
    })
}

fn parse_all(input: &str, source: &dyn DialectImpl, options: &Options) -> Result<Schema> {
    let spans = splitter::split_statements(input, source.tag(), options.max_statement_size)?;
    let mut schema = Schema::new();

    for span in &spans {
        parse_one(&span.sql, source, &mut schema, options)?;
    }

    // ALTER TABLE statements against a table not yet seen were deferred;
    // retry them once, now that every CREATE TABLE in the source has run.
    for sql in schema.take_pending_alters() {
        parse_one(&sql, source, &mut schema, options)?;
    }

    // Anything still deferred after the retry references a table that is
    // never created; drop it the same way any other unparseable statement
    // is dropped outside strict mode.
    let unresolved = schema.take_pending_alters();
    if options.strict {
        if let Some(sql) = unresolved.into_iter().next() {
            return Err(ParseError::Statement {
                statement_index: 0,
                location: crate::error::SourceLocation::new(1, 1),
                near: sql.chars().take(40).collect(),
                reason: "ALTER TABLE references a table that is never created".to_string(),
            }
            .into());
        }
    }

    Ok(schema)
}

fn parse_one(sql: &str, source: &dyn DialectImpl, schema: &mut Schema, options: &Options) -> Result<()> {
    if let Err(error) = source.parse_statement(sql, schema) {
        if options.strict {
            return Err(error);
        }
        match error {
            Error::Parse(ParseError::Statement { .. }) => return Ok(()),
            other => return Err(other),
        }
    }
    Ok(())
}

#[derive(Clone, Default)]
struct WarningSet {
    seen: std::collections::BTreeSet<String>,
    ordered: Vec<String>,
}

impl WarningSet {
    fn push(&mut self, message: String) {
        if self.seen.insert(message.clone()) {
            self.ordered.push(message);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
