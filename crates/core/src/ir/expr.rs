use super::Value;

/// A column default or `CHECK` expression, kept as an opaque token rather
/// than a full SQL expression tree.
///
/// `Literal` values are re-quoted by the target dialect at render time;
/// `Raw` text (`CURRENT_TIMESTAMP`, `gen_random_uuid()`, `ARRAY[1,2]`, an
/// arbitrary `CHECK` predicate, ...) is emitted verbatim, with only
/// identifier-quote rewriting and paren-balancing applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Raw(String),
}

impl Expr {
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// True for the small set of expression defaults recognized verbatim
    /// regardless of source dialect.
    #[must_use]
    pub fn is_recognized_expression(text: &str) -> bool {
        let upper = text.trim().to_ascii_uppercase();
        upper == "CURRENT_TIMESTAMP"
            || upper == "CURRENT_DATE"
            || upper == "CURRENT_TIME"
            || upper == "NULL"
            || upper == "TRUE"
            || upper == "FALSE"
            || upper.starts_with("ARRAY[")
            || is_function_call(&upper)
    }
}

fn is_function_call(upper: &str) -> bool {
    upper
        .find('(')
        .is_some_and(|open| upper.ends_with(')') && open > 0)
}
