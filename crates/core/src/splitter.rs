//! Splits raw input text into individual statement spans, dialect-aware
//! enough to not be fooled by quoted semicolons, comments, PostgreSQL
//! dollar-quoting, or a MySQL `DELIMITER` reassignment.

use crate::error::{ParseError, Result};
use crate::error::SourceLocation;
use crate::options::Dialect;

/// One statement's source text plus its 1-based starting line, in the order
/// it appeared in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementSpan {
    pub sql: String,
    pub line: usize,
}

/// Splits `sql` on statement-terminating semicolons, tracking single/double/
/// backtick quoting, bracketed identifiers, line/block comments, and
/// PostgreSQL `$tag$ ... $tag$` dollar-quoted bodies. A MySQL-style
/// `DELIMITER xyz` line switches the active terminator until the next
/// `DELIMITER` directive.
///
/// `source` gates `\'`-style backslash escaping inside single-quoted
/// strings: MySQL treats a trailing backslash as escaping the next
/// character, while PostgreSQL and SQLite treat `\` literally, so a quote
/// immediately following it still ends the string.
///
/// Unlike the bare statement-span scanner this is derived from, an
/// unterminated quote or comment at end of input is a [`ParseError`] rather
/// than a statement that is silently closed at EOF: the input is presumed
/// to be a complete schema dump, not an interactive fragment.
pub fn split_statements(sql: &str, source: Dialect, max_statement_size: usize) -> Result<Vec<StatementSpan>> {
    let bytes = sql.as_bytes();
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;

    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut in_backtick_quote = false;
    let mut in_bracket_ident = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut dollar_tag: Option<Vec<u8>> = None;

    let mut delimiter: Vec<u8> = vec![b';'];
    let mut statement_index = 0usize;
    let backslash_escapes = matches!(source, Dialect::MySql);

    while index < bytes.len() {
        let byte = bytes[index];

        if in_line_comment {
            if byte == b'\n' {
                in_line_comment = false;
            }
            index += 1;
            continue;
        }

        if in_block_comment {
            if byte == b'*' && bytes.get(index + 1) == Some(&b'/') {
                in_block_comment = false;
                index += 2;
                continue;
            }
            index += 1;
            continue;
        }

        if let Some(tag) = &dollar_tag {
            if bytes[index..].starts_with(tag.as_slice()) {
                index += tag.len();
                dollar_tag = None;
                continue;
            }
            index += 1;
            continue;
        }

        if in_single_quote {
            if backslash_escapes && byte == b'\\' {
                index = (index + 2).min(bytes.len());
                continue;
            }
            if byte == b'\'' {
                if bytes.get(index + 1) == Some(&b'\'') {
                    index += 2;
                    continue;
                }
                in_single_quote = false;
            }
            index += 1;
            continue;
        }

        if in_double_quote {
            if byte == b'"' {
                if bytes.get(index + 1) == Some(&b'"') {
                    index += 2;
                    continue;
                }
                in_double_quote = false;
            }
            index += 1;
            continue;
        }

        if in_backtick_quote {
            if byte == b'`' {
                if bytes.get(index + 1) == Some(&b'`') {
                    index += 2;
                    continue;
                }
                in_backtick_quote = false;
            }
            index += 1;
            continue;
        }

        if in_bracket_ident {
            if byte == b']' {
                if bytes.get(index + 1) == Some(&b']') {
                    index += 2;
                    continue;
                }
                in_bracket_ident = false;
            }
            index += 1;
            continue;
        }

        if byte == b'-' && bytes.get(index + 1) == Some(&b'-') {
            in_line_comment = true;
            index += 2;
            continue;
        }

        if byte == b'/' && bytes.get(index + 1) == Some(&b'*') {
            in_block_comment = true;
            index += 2;
            continue;
        }

        if byte == b'$' {
            if let Some(tag) = scan_dollar_tag(&bytes[index..]) {
                dollar_tag = Some(tag.clone());
                index += tag.len();
                continue;
            }
        }

        if start == index && is_delimiter_directive(&bytes[index..]) {
            let (new_delimiter, consumed) = parse_delimiter_directive(&bytes[index..]);
            delimiter = new_delimiter;
            index += consumed;
            start = index;
            continue;
        }

        match byte {
            b'\'' => in_single_quote = true,
            b'"' => in_double_quote = true,
            b'`' => in_backtick_quote = true,
            b'[' => in_bracket_ident = true,
            _ if bytes[index..].starts_with(delimiter.as_slice()) => {
                let end = index + delimiter.len();
                push_span(sql, start, end, &mut spans, statement_index, max_statement_size)?;
                statement_index += 1;
                start = end;
                index = end;
                continue;
            }
            _ => {}
        }

        index += 1;
    }

    if in_single_quote || in_double_quote || in_backtick_quote || in_bracket_ident {
        return Err(ParseError::Unterminated {
            construct: "quoted string or identifier",
            location: SourceLocation::new(offset_to_line(sql, start), 1),
        }
        .into());
    }
    if in_block_comment {
        return Err(ParseError::Unterminated {
            construct: "block comment",
            location: SourceLocation::new(offset_to_line(sql, start), 1),
        }
        .into());
    }
    if dollar_tag.is_some() {
        return Err(ParseError::Unterminated {
            construct: "dollar-quoted string",
            location: SourceLocation::new(offset_to_line(sql, start), 1),
        }
        .into());
    }

    if start < bytes.len() && !sql[start..].trim().is_empty() {
        push_span(sql, start, bytes.len(), &mut spans, statement_index, max_statement_size)?;
    }

    Ok(spans)
}

fn push_span(
    sql: &str,
    start: usize,
    end: usize,
    spans: &mut Vec<StatementSpan>,
    statement_index: usize,
    max_statement_size: usize,
) -> Result<()> {
    let fragment = sql.get(start..end).unwrap_or_default();
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if fragment.len() > max_statement_size {
        return Err(ParseError::StatementTooLarge {
            statement_index,
            limit: max_statement_size,
        }
        .into());
    }
    let leading = fragment.len() - fragment.trim_start().len();
    spans.push(StatementSpan {
        sql: trimmed.to_string(),
        line: offset_to_line(sql, start + leading),
    });
    Ok(())
}

/// Recognizes `$$` and `$tag$` dollar-quote openers; returns the full tag
/// bytes (including both `$`s) when one is found at the start of `rest`.
fn scan_dollar_tag(rest: &[u8]) -> Option<Vec<u8>> {
    let mut end = 1;
    while let Some(&byte) = rest.get(end) {
        if byte == b'$' {
            return Some(rest[..=end].to_vec());
        }
        if !(byte.is_ascii_alphanumeric() || byte == b'_') {
            return None;
        }
        end += 1;
    }
    None
}

fn is_delimiter_directive(rest: &[u8]) -> bool {
    rest.len() >= 9 && rest[..9].eq_ignore_ascii_case(b"DELIMITER")
}

fn parse_delimiter_directive(rest: &[u8]) -> (Vec<u8>, usize) {
    let mut cursor = 9;
    while rest.get(cursor).is_some_and(u8::is_ascii_whitespace) {
        cursor += 1;
    }
    let token_start = cursor;
    while rest.get(cursor).is_some_and(|b| !b.is_ascii_whitespace()) {
        cursor += 1;
    }
    let token = rest[token_start..cursor].to_vec();
    while rest.get(cursor).is_some_and(|&b| b != b'\n') {
        cursor += 1;
    }
    if rest.get(cursor) == Some(&b'\n') {
        cursor += 1;
    }
    if token.is_empty() { (vec![b';'], cursor) } else { (token, cursor) }
}

fn offset_to_line(sql: &str, offset: usize) -> usize {
    let end = offset.min(sql.len());
    1 + sql.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_statements() {
        let spans = split_statements("CREATE TABLE a (id int);\nCREATE TABLE b (id int);", Dialect::MySql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].sql.starts_with("CREATE TABLE a"));
        assert!(spans[1].sql.starts_with("CREATE TABLE b"));
    }

    #[test]
    fn ignores_semicolons_inside_strings_and_comments() {
        let sql = "INSERT INTO t VALUES ('a;b'); -- comment ; not a split\nSELECT 1;";
        let spans = split_statements(sql, Dialect::MySql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn handles_dollar_quoted_bodies() {
        let sql = "CREATE FUNCTION f() RETURNS int AS $$ BEGIN RETURN 1; END; $$ LANGUAGE plpgsql;";
        let spans = split_statements(sql, Dialect::PostgreSql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn honors_delimiter_directive() {
        let sql = "DELIMITER $$\nCREATE TABLE a (id int)$$\nDELIMITER ;\nCREATE TABLE b (id int);";
        let spans = split_statements(sql, Dialect::MySql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].sql.starts_with("CREATE TABLE a"));
    }

    #[test]
    fn mysql_backslash_escapes_a_quote_inside_a_string() {
        let sql = r"INSERT INTO t VALUES ('it\'s fine'); SELECT 1;";
        let spans = split_statements(sql, Dialect::MySql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn postgres_treats_backslash_literally_inside_a_string() {
        let sql = r"INSERT INTO t VALUES ('ends in backslash\'); SELECT 1;";
        let spans = split_statements(sql, Dialect::PostgreSql, 1 << 20).unwrap();
        assert_eq!(spans.len(), 2);
        assert!(spans[0].sql.contains(r"'ends in backslash\'"));
    }

    #[test]
    fn rejects_unterminated_string() {
        let error = split_statements("SELECT 'unterminated", Dialect::MySql, 1 << 20).unwrap_err();
        assert!(matches!(error, crate::error::Error::Parse(ParseError::Unterminated { .. })));
    }
}
