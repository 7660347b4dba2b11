use crate::database::enums::database_drivers::DatabaseDrivers;
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder callers write in backend-neutral SQL.
pub const NEUTRAL_PLACEHOLDER: &str = "%s";

/// Conditional-insert phrase callers write in backend-neutral SQL.
pub const NEUTRAL_INSERT_IGNORE: &str = "INSERT OR IGNORE INTO";

static INSERT_IGNORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bINSERT\s+OR\s+IGNORE\s+INTO\b").expect("insert-ignore pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlSegment<'a> {
    Code(&'a str),
    Quoted(&'a str),
    Comment(&'a str),
}

/// Splits SQL text into code, quoted regions (string literals, quoted
/// identifiers) and comments. Quotes are closed by the same character; a
/// doubled quote stays inside the region. MySQL additionally treats backslash
/// as an escape inside string literals. `--` and `#` comments run to the end
/// of the line, `/* */` comments to their terminator. An unterminated quote or
/// block comment runs to the end of the text.
pub fn split_sql_segments(engine: DatabaseDrivers, sql: &str) -> Vec<SqlSegment<'_>> {
    let bytes = sql.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut index = 0usize;
    while index < bytes.len() {
        let (end, quoted) = match bytes[index] {
            b'\'' | b'"' | b'`' => (quoted_end(engine, bytes, index), true),
            b'-' if starts_dash_comment(engine, bytes, index) => (line_end(bytes, index), false),
            b'#' => (line_end(bytes, index), false),
            b'/' if bytes.get(index + 1) == Some(&b'*') => (block_comment_end(bytes, index), false),
            _ => {
                index += 1;
                continue;
            }
        };
        if index > start {
            segments.push(SqlSegment::Code(&sql[start..index]));
        }
        let region = &sql[index..end];
        segments.push(if quoted { SqlSegment::Quoted(region) } else { SqlSegment::Comment(region) });
        index = end;
        start = end;
    }
    if start < bytes.len() {
        segments.push(SqlSegment::Code(&sql[start..]));
    }
    segments
}

fn quoted_end(engine: DatabaseDrivers, bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let backslash_escapes = engine == DatabaseDrivers::mysql && quote != b'`';
    let mut index = open + 1;
    while index < bytes.len() {
        let current = bytes[index];
        if backslash_escapes && current == b'\\' {
            index += 2;
            continue;
        }
        if current == quote {
            if bytes.get(index + 1) == Some(&quote) {
                index += 2;
                continue;
            }
            return index + 1;
        }
        index += 1;
    }
    bytes.len()
}

/// MySQL only starts a `--` comment when whitespace follows it; `5--3` is arithmetic.
fn starts_dash_comment(engine: DatabaseDrivers, bytes: &[u8], index: usize) -> bool {
    if bytes.get(index + 1) != Some(&b'-') {
        return false;
    }
    match engine {
        DatabaseDrivers::sqlite3 => true,
        DatabaseDrivers::mysql => bytes
            .get(index + 2)
            .is_none_or(|next| next.is_ascii_whitespace() || next.is_ascii_control()),
    }
}

fn line_end(bytes: &[u8], open: usize) -> usize {
    bytes[open..]
        .iter()
        .position(|byte| *byte == b'\n')
        .map_or(bytes.len(), |offset| open + offset)
}

fn block_comment_end(bytes: &[u8], open: usize) -> usize {
    bytes[open + 2..]
        .windows(2)
        .position(|pair| pair == b"*/")
        .map_or(bytes.len(), |offset| open + 2 + offset + 2)
}

fn rewrite_code<F>(engine: DatabaseDrivers, sql: &str, rewrite: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut output = String::with_capacity(sql.len());
    for segment in split_sql_segments(engine, sql) {
        match segment {
            SqlSegment::Code(code) => output.push_str(&rewrite(code)),
            SqlSegment::Quoted(verbatim) | SqlSegment::Comment(verbatim) => output.push_str(verbatim),
        }
    }
    output
}

pub fn normalize_placeholders(engine: DatabaseDrivers, sql: &str) -> String {
    rewrite_code(engine, sql, |code| code.replace(NEUTRAL_PLACEHOLDER, engine.placeholder()))
}

pub fn normalize_insert_ignore(engine: DatabaseDrivers, sql: &str) -> String {
    match engine {
        DatabaseDrivers::sqlite3 => sql.to_string(),
        DatabaseDrivers::mysql => rewrite_code(engine, sql, |code| {
            INSERT_IGNORE_PATTERN
                .replace_all(code, engine.insert_ignore_prefix())
                .into_owned()
        }),
    }
}

pub fn normalize_sql(engine: DatabaseDrivers, sql: &str) -> String {
    normalize_insert_ignore(engine, &normalize_placeholders(engine, sql))
}

pub fn count_placeholders(engine: DatabaseDrivers, sql: &str) -> usize {
    split_sql_segments(engine, sql)
        .into_iter()
        .map(|segment| match segment {
            SqlSegment::Code(code) => code.matches(engine.placeholder()).count(),
            SqlSegment::Quoted(_) | SqlSegment::Comment(_) => 0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ENGINES: [DatabaseDrivers; 2] = [DatabaseDrivers::sqlite3, DatabaseDrivers::mysql];

    #[test]
    fn test_placeholders_rewritten_for_both_engines() {
        let sql = "INSERT INTO players (name, club_id, position) VALUES (%s, %s, %s)";
        for engine in ENGINES {
            assert_eq!(
                normalize_placeholders(engine, sql),
                "INSERT INTO players (name, club_id, position) VALUES (?, ?, ?)"
            );
        }
    }

    #[test]
    fn test_native_placeholders_untouched() {
        let sql = "SELECT * FROM clubs WHERE name = ?";
        for engine in ENGINES {
            assert_eq!(normalize_sql(engine, sql), sql);
        }
    }

    #[test]
    fn test_placeholder_inside_literal_is_kept() {
        let sql = "SELECT * FROM clubs WHERE stadium LIKE '%stadium%' AND name = %s";
        assert_eq!(
            normalize_placeholders(DatabaseDrivers::sqlite3, sql),
            "SELECT * FROM clubs WHERE stadium LIKE '%stadium%' AND name = ?"
        );
    }

    #[test]
    fn test_insert_ignore_sqlite_unchanged() {
        let sql = "insert or ignore into clubs (name) VALUES (%s)";
        assert_eq!(
            normalize_sql(DatabaseDrivers::sqlite3, sql),
            "insert or ignore into clubs (name) VALUES (?)"
        );
    }

    #[test]
    fn test_insert_ignore_mysql_rewritten() {
        let sql = "INSERT OR IGNORE INTO clubs (name, country, stadium) VALUES (%s, %s, %s)";
        assert_eq!(
            normalize_sql(DatabaseDrivers::mysql, sql),
            "INSERT IGNORE INTO clubs (name, country, stadium) VALUES (?, ?, ?)"
        );
        assert_eq!(
            normalize_insert_ignore(DatabaseDrivers::mysql, "Insert  Or\n Ignore Into trainers (name) VALUES (?)"),
            "INSERT IGNORE INTO trainers (name) VALUES (?)"
        );
    }

    #[test]
    fn test_insert_ignore_inside_literal_is_kept() {
        let sql = "INSERT INTO titles (title) VALUES ('INSERT OR IGNORE INTO')";
        assert_eq!(normalize_sql(DatabaseDrivers::mysql, sql), sql);
    }

    #[test]
    fn test_every_occurrence_rewritten() {
        let sql = "INSERT OR IGNORE INTO a (x) VALUES (%s); INSERT OR IGNORE INTO b (y) VALUES (%s)";
        assert_eq!(
            normalize_sql(DatabaseDrivers::mysql, sql),
            "INSERT IGNORE INTO a (x) VALUES (?); INSERT IGNORE INTO b (y) VALUES (?)"
        );
    }

    #[test]
    fn test_zero_parameter_statement() {
        for engine in ENGINES {
            assert_eq!(normalize_sql(engine, "SELECT id FROM titles ORDER BY id DESC LIMIT 1"), "SELECT id FROM titles ORDER BY id DESC LIMIT 1");
            assert_eq!(count_placeholders(engine, "SELECT 1"), 0);
        }
    }

    #[test]
    fn test_split_segments_doubled_quotes() {
        let segments = split_sql_segments(DatabaseDrivers::sqlite3, "SELECT 'it''s %s', %s");
        assert_eq!(
            segments,
            vec![
                SqlSegment::Code("SELECT "),
                SqlSegment::Quoted("'it''s %s'"),
                SqlSegment::Code(", %s"),
            ]
        );
    }

    #[test]
    fn test_split_segments_mysql_backslash() {
        let segments = split_sql_segments(DatabaseDrivers::mysql, r"SELECT 'it\'s %s', %s");
        assert_eq!(segments[1], SqlSegment::Quoted(r"'it\'s %s'"));
        assert_eq!(segments[2], SqlSegment::Code(", %s"));
    }

    #[test]
    fn test_split_segments_unterminated_quote() {
        let segments = split_sql_segments(DatabaseDrivers::sqlite3, "SELECT 'open %s");
        assert_eq!(segments, vec![SqlSegment::Code("SELECT "), SqlSegment::Quoted("'open %s")]);
        assert_eq!(normalize_placeholders(DatabaseDrivers::sqlite3, "SELECT 'open %s"), "SELECT 'open %s");
    }

    #[test]
    fn test_apostrophe_in_dash_comment_does_not_open_literal() {
        let sql = "SELECT name FROM clubs -- the club's name\nWHERE id = %s";
        for engine in ENGINES {
            assert_eq!(
                normalize_sql(engine, sql),
                "SELECT name FROM clubs -- the club's name\nWHERE id = ?"
            );
        }
    }

    #[test]
    fn test_apostrophe_in_hash_comment_does_not_open_literal() {
        let sql = "# Arsenal's squad\nSELECT * FROM players WHERE club_id = %s";
        for engine in ENGINES {
            assert_eq!(
                normalize_sql(engine, sql),
                "# Arsenal's squad\nSELECT * FROM players WHERE club_id = ?"
            );
        }
    }

    #[test]
    fn test_apostrophe_in_block_comment_does_not_open_literal() {
        let sql = "/* it's */ INSERT OR IGNORE INTO clubs (name) VALUES (%s)";
        assert_eq!(
            normalize_sql(DatabaseDrivers::mysql, sql),
            "/* it's */ INSERT IGNORE INTO clubs (name) VALUES (?)"
        );
        assert_eq!(
            normalize_sql(DatabaseDrivers::sqlite3, sql),
            "/* it's */ INSERT OR IGNORE INTO clubs (name) VALUES (?)"
        );
    }

    #[test]
    fn test_comment_text_is_kept_verbatim() {
        let sql = "SELECT %s /* %s INSERT OR IGNORE INTO */ -- %s\n, %s";
        for engine in ENGINES {
            assert_eq!(
                normalize_sql(engine, sql),
                "SELECT ? /* %s INSERT OR IGNORE INTO */ -- %s\n, ?"
            );
            assert_eq!(count_placeholders(engine, &normalize_sql(engine, sql)), 2);
        }
    }

    #[test]
    fn test_split_segments_comments() {
        assert_eq!(
            split_sql_segments(DatabaseDrivers::sqlite3, "SELECT 1 -- it's\nFROM t /* x' */"),
            vec![
                SqlSegment::Code("SELECT 1 "),
                SqlSegment::Comment("-- it's"),
                SqlSegment::Code("\nFROM t "),
                SqlSegment::Comment("/* x' */"),
            ]
        );
        assert_eq!(
            split_sql_segments(DatabaseDrivers::mysql, "SELECT 1 /* open"),
            vec![SqlSegment::Code("SELECT 1 "), SqlSegment::Comment("/* open")]
        );
    }

    #[test]
    fn test_mysql_double_dash_needs_whitespace() {
        assert_eq!(
            split_sql_segments(DatabaseDrivers::mysql, "SELECT 5--3"),
            vec![SqlSegment::Code("SELECT 5--3")]
        );
        assert_eq!(
            split_sql_segments(DatabaseDrivers::sqlite3, "SELECT 5--3"),
            vec![SqlSegment::Code("SELECT 5"), SqlSegment::Comment("--3")]
        );
        assert_eq!(
            split_sql_segments(DatabaseDrivers::mysql, "SELECT 5 --"),
            vec![SqlSegment::Code("SELECT 5 "), SqlSegment::Comment("--")]
        );
    }

    #[test]
    fn test_comment_markers_inside_literal_are_text() {
        let sql = "SELECT '-- not a comment', '/*', %s";
        for engine in ENGINES {
            assert_eq!(normalize_sql(engine, sql), "SELECT '-- not a comment', '/*', ?");
        }
    }

    #[test]
    fn test_count_placeholders_ignores_literals() {
        assert_eq!(count_placeholders(DatabaseDrivers::mysql, "SELECT '?' , ? , `a?b`, ?"), 2);
    }

    proptest! {
        #[test]
        fn prop_text_without_neutral_forms_is_unchanged(sql in "[a-zA-Z0-9 _,=()*'\"`?]{0,64}") {
            for engine in ENGINES {
                prop_assert_eq!(normalize_sql(engine, &sql), sql.clone());
            }
        }

        #[test]
        fn prop_every_placeholder_rewritten(fragments in proptest::collection::vec("[a-z0-9 _,=()]{0,12}", 1..8)) {
            let sql = fragments.join(NEUTRAL_PLACEHOLDER);
            for engine in ENGINES {
                let normalized = normalize_sql(engine, &sql);
                prop_assert!(!normalized.contains(NEUTRAL_PLACEHOLDER));
                prop_assert_eq!(count_placeholders(engine, &normalized), fragments.len() - 1);
                prop_assert_eq!(normalized, fragments.join(engine.placeholder()));
            }
        }
    }
}
