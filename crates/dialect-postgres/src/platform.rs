//! Rendering facts for PostgreSQL: double-quote quoting, its type-name
//! surface, and the capability flags the renderer consults.

use sqlbridge_core::ir::DataType;
use sqlbridge_core::options::Dialect;
use sqlbridge_core::Platform;

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresPlatform;

impl Platform for PostgresPlatform {
    fn dialect(&self) -> Dialect {
        Dialect::PostgreSql
    }

    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    fn render_bool(&self, value: bool) -> String {
        if value { "TRUE".to_string() } else { "FALSE".to_string() }
    }

    fn render_type(&self, data_type: &DataType, length: Option<u32>, precision: Option<u32>, scale: Option<u32>) -> String {
        match data_type {
            DataType::Int => "INTEGER".to_string(),
            DataType::SmallInt => "SMALLINT".to_string(),
            DataType::BigInt => "BIGINT".to_string(),
            DataType::Serial => "SERIAL".to_string(),
            DataType::SmallSerial => "SMALLSERIAL".to_string(),
            DataType::BigSerial => "BIGSERIAL".to_string(),
            DataType::Decimal => match (precision, scale) {
                (Some(p), Some(s)) => format!("NUMERIC({p},{s})"),
                (Some(p), None) => format!("NUMERIC({p})"),
                _ => "NUMERIC".to_string(),
            },
            DataType::Boolean => "BOOLEAN".to_string(),
            DataType::Varchar => match length {
                Some(len) => format!("VARCHAR({len})"),
                None => "VARCHAR".to_string(),
            },
            DataType::Char => format!("CHAR({})", length.unwrap_or(1)),
            DataType::Text => "TEXT".to_string(),
            DataType::Blob => "BYTEA".to_string(),
            DataType::Date => "DATE".to_string(),
            DataType::DateTime => "TIMESTAMP".to_string(),
            DataType::Timestamp => "TIMESTAMP".to_string(),
            DataType::Json => "JSONB".to_string(),
            DataType::Uuid => "UUID".to_string(),
            DataType::Enum(values) => {
                let list = values.iter().map(|v| self.quote_string(v)).collect::<Vec<_>>().join(", ");
                format!("TEXT /* enum: {list} */")
            }
            DataType::Array(inner) => format!("{}[]", self.render_type(inner, length, precision, scale)),
            DataType::Custom(name) => name.clone(),
        }
    }

    fn supports_native_enum(&self) -> bool {
        false
    }

    fn supports_alter_add_foreign_key(&self) -> bool {
        true
    }
}
