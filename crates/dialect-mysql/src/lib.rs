mod parser;
mod platform;

use sqlbridge_core::error::Result;
use sqlbridge_core::options::Dialect as DialectTag;
use sqlbridge_core::{Dialect, Platform, Schema};

pub use platform::MysqlPlatform;

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect {
    platform: MysqlPlatform,
}

impl Dialect for MysqlDialect {
    fn tag(&self) -> DialectTag {
        DialectTag::MySql
    }

    fn parse_statement(&self, sql: &str, schema: &mut Schema) -> Result<()> {
        parser::parse_statement(sql, schema)
    }

    fn platform(&self) -> &dyn Platform {
        &self.platform
    }
}
