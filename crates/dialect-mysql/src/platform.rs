//! Rendering facts for MySQL: backtick quoting, its type-name surface, and
//! the capability flags the renderer consults.

use sqlbridge_core::ir::DataType;
use sqlbridge_core::options::Dialect;
use sqlbridge_core::Platform;

#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlPlatform;

impl Platform for MysqlPlatform {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn render_bool(&self, value: bool) -> String {
        if value { "1".to_string() } else { "0".to_string() }
    }

    fn render_type(&self, data_type: &DataType, length: Option<u32>, precision: Option<u32>, scale: Option<u32>) -> String {
        match data_type {
            DataType::Int | DataType::Serial => "INT".to_string(),
            DataType::SmallInt | DataType::SmallSerial => "SMALLINT".to_string(),
            DataType::BigInt | DataType::BigSerial => "BIGINT".to_string(),
            DataType::Decimal => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p},{s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => "DECIMAL".to_string(),
            },
            DataType::Boolean => "TINYINT(1)".to_string(),
            DataType::Varchar => format!("VARCHAR({})", length.unwrap_or(255)),
            DataType::Char => format!("CHAR({})", length.unwrap_or(1)),
            DataType::Text => "TEXT".to_string(),
            DataType::Blob => "BLOB".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::DateTime => "DATETIME".to_string(),
            DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::Json => "JSON".to_string(),
            DataType::Uuid => "CHAR(36)".to_string(),
            DataType::Enum(values) => {
                let list = values.iter().map(|v| self.quote_string(v)).collect::<Vec<_>>().join(", ");
                format!("ENUM({list})")
            }
            DataType::Array(inner) => format!("{} /* array */", self.render_type(inner, length, precision, scale)),
            DataType::Custom(name) => name.clone(),
        }
    }

    fn supports_native_enum(&self) -> bool {
        true
    }

    fn supports_alter_add_foreign_key(&self) -> bool {
        true
    }

    fn supports_native_fulltext(&self) -> bool {
        true
    }
}
