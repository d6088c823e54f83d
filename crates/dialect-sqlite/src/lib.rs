mod parser;
mod platform;

use sqlbridge_core::error::Result;
use sqlbridge_core::options::Dialect as DialectTag;
use sqlbridge_core::{Dialect, Platform, Schema};

pub use platform::SqlitePlatform;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect {
    platform: SqlitePlatform,
}

impl Dialect for SqliteDialect {
    fn tag(&self) -> DialectTag {
        DialectTag::Sqlite
    }

    fn parse_statement(&self, sql: &str, schema: &mut Schema) -> Result<()> {
        parser::parse_statement(sql, schema)
    }

    fn platform(&self) -> &dyn Platform {
        &self.platform
    }
}
