//! C3 resolution: maps a `--from`/`--to` flag (or an auto-detected tag) to a
//! concrete dialect object. This registry, not `sqlbridge-core`, owns the
//! mapping from [`DialectTag`] to a parser/platform implementation — core
//! only knows the `Dialect` trait, never the concrete dialect crates,
//! to avoid a circular dependency.

use anyhow::{bail, Context};
use sqlbridge_core::{detect_dialect, Dialect, DialectTag};

use crate::args::{SourceDialectArg, TargetDialectArg};

pub fn resolve_source(arg: SourceDialectArg, input: &str) -> anyhow::Result<(Box<dyn Dialect>, bool)> {
    let (tag, confident) = match arg {
        SourceDialectArg::Mysql => (DialectTag::MySql, true),
        SourceDialectArg::Postgres => (DialectTag::PostgreSql, true),
        SourceDialectArg::Sqlite => (DialectTag::Sqlite, true),
        SourceDialectArg::Auto => {
            let detection = detect_dialect(input);
            (detection.dialect, detection.confident)
        }
    };
    Ok((resolve_tag(tag).context("resolving source dialect")?, confident))
}

pub fn resolve_target(arg: TargetDialectArg) -> anyhow::Result<Box<dyn Dialect>> {
    let tag = match arg {
        TargetDialectArg::Mysql => DialectTag::MySql,
        TargetDialectArg::Postgres => DialectTag::PostgreSql,
        TargetDialectArg::Sqlite => DialectTag::Sqlite,
    };
    resolve_tag(tag).context("resolving target dialect")
}

fn resolve_tag(tag: DialectTag) -> anyhow::Result<Box<dyn Dialect>> {
    match tag {
        DialectTag::MySql => {
            #[cfg(feature = "mysql")]
            {
                Ok(Box::new(sqlbridge_dialect_mysql::MysqlDialect::default()))
            }
            #[cfg(not(feature = "mysql"))]
            {
                bail!("this build was compiled without the `mysql` feature")
            }
        }
        DialectTag::PostgreSql => {
            #[cfg(feature = "postgres")]
            {
                Ok(Box::new(sqlbridge_dialect_postgres::PostgresDialect::default()))
            }
            #[cfg(not(feature = "postgres"))]
            {
                bail!("this build was compiled without the `postgres` feature")
            }
        }
        DialectTag::Sqlite => {
            #[cfg(feature = "sqlite")]
            {
                Ok(Box::new(sqlbridge_dialect_sqlite::SqliteDialect::default()))
            }
            #[cfg(not(feature = "sqlite"))]
            {
                bail!("this build was compiled without the `sqlite` feature")
            }
        }
    }
}
