//! Rendering facts for SQLite: double-quote quoting, its loose
//! type-affinity surface, and the capability flags the renderer consults.
//! SQLite cannot `ALTER TABLE ... ADD CONSTRAINT`, so foreign keys must
//! always be declared inline at `CREATE TABLE` time.

use sqlbridge_core::ir::DataType;
use sqlbridge_core::options::Dialect;
use sqlbridge_core::Platform;

#[derive(Debug, Default, Clone, Copy)]
pub struct SqlitePlatform;

impl Platform for SqlitePlatform {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn render_bool(&self, value: bool) -> String {
        if value { "1".to_string() } else { "0".to_string() }
    }

    fn render_type(&self, data_type: &DataType, length: Option<u32>, precision: Option<u32>, scale: Option<u32>) -> String {
        match data_type {
            DataType::Int | DataType::SmallInt | DataType::BigInt | DataType::Serial | DataType::SmallSerial | DataType::BigSerial => {
                "INTEGER".to_string()
            }
            DataType::Decimal => match (precision, scale) {
                (Some(p), Some(s)) => format!("NUMERIC({p},{s})"),
                _ => "NUMERIC".to_string(),
            },
            DataType::Boolean => "BOOLEAN".to_string(),
            DataType::Varchar => match length {
                Some(len) => format!("VARCHAR({len})"),
                None => "TEXT".to_string(),
            },
            DataType::Char => format!("CHARACTER({})", length.unwrap_or(1)),
            DataType::Text => "TEXT".to_string(),
            DataType::Blob => "BLOB".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::DateTime | DataType::Timestamp => "DATETIME".to_string(),
            DataType::Json => "TEXT".to_string(),
            DataType::Uuid => "TEXT".to_string(),
            DataType::Enum(values) => {
                let list = values.iter().map(|v| self.quote_string(v)).collect::<Vec<_>>().join(", ");
                format!("TEXT /* enum: {list} */")
            }
            DataType::Array(inner) => format!("{} /* array */", self.render_type(inner, length, precision, scale)),
            DataType::Custom(name) => name.clone(),
        }
    }

    fn supports_alter_add_foreign_key(&self) -> bool {
        false
    }
}
