//! Infers the source dialect from a sample of the raw input when the caller
//! doesn't supply one explicitly.

use crate::options::Dialect;

const SAMPLE_BYTES: usize = 64 * 1024;

struct Signal {
    needle: &'static str,
    weight: u32,
}

const MYSQL_SIGNALS: &[Signal] = &[
    Signal { needle: "mysqldump", weight: 5 },
    Signal { needle: "auto_increment", weight: 3 },
    Signal { needle: "engine=innodb", weight: 4 },
    Signal { needle: "engine=myisam", weight: 4 },
    Signal { needle: "`", weight: 1 },
    Signal { needle: "collate", weight: 1 },
    Signal { needle: "charset", weight: 1 },
];

const POSTGRES_SIGNALS: &[Signal] = &[
    Signal { needle: "pg_dump", weight: 5 },
    Signal { needle: "serial", weight: 2 },
    Signal { needle: "bigserial", weight: 3 },
    Signal { needle: "nextval(", weight: 3 },
    Signal { needle: "create sequence", weight: 3 },
    Signal { needle: "$$", weight: 2 },
    Signal { needle: "::text", weight: 2 },
];

const SQLITE_SIGNALS: &[Signal] = &[
    Signal { needle: "sqlite_master", weight: 5 },
    Signal { needle: "autoincrement", weight: 3 },
    Signal { needle: "pragma", weight: 2 },
    Signal { needle: "without rowid", weight: 4 },
];

/// The outcome of running the detector: the chosen dialect plus whether the
/// result is a confident match. When every dialect scores zero, the
/// detector falls back to MySQL and reports low confidence rather than
/// refusing to pick one.
pub struct Detection {
    pub dialect: Dialect,
    pub confident: bool,
}

#[must_use]
pub fn detect_dialect(sql: &str) -> Detection {
    let sample_len = floor_char_boundary(sql, sql.len().min(SAMPLE_BYTES));
    let sample = sql[..sample_len].to_ascii_lowercase();

    let mysql_score = score(&sample, MYSQL_SIGNALS);
    let postgres_score = score(&sample, POSTGRES_SIGNALS);
    let sqlite_score = score(&sample, SQLITE_SIGNALS);

    let best = [
        (Dialect::MySql, mysql_score),
        (Dialect::PostgreSql, postgres_score),
        (Dialect::Sqlite, sqlite_score),
    ]
    .into_iter()
    .max_by_key(|(_, score)| *score)
    .expect("three candidates always present");

    if best.1 == 0 {
        Detection {
            dialect: Dialect::MySql,
            confident: false,
        }
    } else {
        Detection {
            dialect: best.0,
            confident: true,
        }
    }
}

/// Rounds `index` down to the nearest UTF-8 character boundary in `s`, so a
/// byte-offset slice never lands in the middle of a multi-byte character.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn score(sample: &str, signals: &[Signal]) -> u32 {
    signals
        .iter()
        .filter(|signal| sample.contains(signal.needle))
        .map(|signal| signal.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_mysql_dump_header() {
        let sql = "-- mysqldump\nCREATE TABLE t (id INT AUTO_INCREMENT) ENGINE=InnoDB;";
        let detection = detect_dialect(sql);
        assert_eq!(detection.dialect, Dialect::MySql);
        assert!(detection.confident);
    }

    #[test]
    fn detects_postgres_serial() {
        let sql = "CREATE TABLE t (id BIGSERIAL PRIMARY KEY, data text);\nSELECT nextval('t_id_seq');";
        let detection = detect_dialect(sql);
        assert_eq!(detection.dialect, Dialect::PostgreSql);
    }

    #[test]
    fn detects_sqlite_pragma() {
        let sql = "PRAGMA foreign_keys=ON;\nCREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT) WITHOUT ROWID;";
        let detection = detect_dialect(sql);
        assert_eq!(detection.dialect, Dialect::Sqlite);
    }

    #[test]
    fn falls_back_to_mysql_when_no_signal_matches() {
        let detection = detect_dialect("CREATE TABLE t (id int);");
        assert_eq!(detection.dialect, Dialect::MySql);
        assert!(!detection.confident);
    }

    #[test]
    fn does_not_panic_on_a_multibyte_character_straddling_the_sample_boundary() {
        let mut sql = "x".repeat(SAMPLE_BYTES - 1);
        sql.push('é'); // 2-byte UTF-8 character straddling the sample cutoff
        sql.push_str(" COMMENT 'engine=innodb'; CREATE TABLE t (id int);");
        let _ = detect_dialect(&sql);
    }

    #[test]
    fn floor_char_boundary_rounds_down_to_a_valid_boundary() {
        let s = "é"; // 2-byte character: byte 1 is mid-character
        assert_eq!(floor_char_boundary(s, 1), 0);
        assert_eq!(floor_char_boundary(s, 2), 2);
    }
}
