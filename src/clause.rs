//! FROM clause location.
//!
//! The clause is found by plain case-insensitive substring search: it starts
//! at the first `from` and ends at the first `where` after it, or at the end
//! of the statement. `GROUP BY`, `HAVING` and `ORDER BY` are not terminators,
//! so without a `WHERE` they end up inside the clause body.

use serde::Serialize;

/// Keyword opening the clause.
pub const FROM_KEYWORD: &str = "from";

/// Keyword closing the clause.
pub const WHERE_KEYWORD: &str = "where";

/// Half-open byte range `[begin, end)` of a FROM clause within a statement.
///
/// `begin` is the offset of the `FROM` keyword, so the rewritable body starts
/// right after the keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClauseSpan {
    pub begin: usize,
    pub end: usize,
}

impl ClauseSpan {
    /// Offset of the first byte after the `FROM` keyword.
    pub fn body_start(&self) -> usize {
        self.begin + FROM_KEYWORD.len()
    }

    /// Untouched text up to and including the `FROM` keyword.
    pub fn prefix<'a>(&self, sql: &'a str) -> &'a str {
        &sql[..self.body_start()]
    }

    /// The table expressions between `FROM` and `WHERE`.
    pub fn body<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.body_start()..self.end]
    }

    /// Untouched text from the `WHERE` keyword onwards.
    pub fn suffix<'a>(&self, sql: &'a str) -> &'a str {
        &sql[self.end..]
    }
}

/// Locate the FROM clause of a statement. `None` means there is no `from`
/// anywhere in the text (`SELECT 1`).
pub fn locate_from(sql: &str) -> Option<ClauseSpan> {
    let begin = find_ignore_ascii_case(sql, FROM_KEYWORD, 0)?;
    let end = find_ignore_ascii_case(sql, WHERE_KEYWORD, begin + FROM_KEYWORD.len())
        .unwrap_or(sql.len());
    Some(ClauseSpan { begin, end })
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle` in
/// `haystack` at or after `from`.
///
/// `needle` must be ASCII; matches then always start on a char boundary.
pub fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes().get(from..)?;
    bytes
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
        .map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_with_where() {
        let sql = "SELECT * FROM a WHERE a.x = 1";
        let span = locate_from(sql).unwrap();
        assert_eq!(span, ClauseSpan { begin: 9, end: 16 });
        assert_eq!(span.prefix(sql), "SELECT * FROM");
        assert_eq!(span.body(sql), " a ");
        assert_eq!(span.suffix(sql), "WHERE a.x = 1");
    }

    #[test]
    fn test_span_without_where_runs_to_end() {
        let sql = "select * from a inner join b on a.x=b.x";
        let span = locate_from(sql).unwrap();
        assert_eq!(span.end, sql.len());
        assert_eq!(span.suffix(sql), "");
        assert_eq!(
            format!("{}{}{}", span.prefix(sql), span.body(sql), span.suffix(sql)),
            sql
        );
    }

    #[test]
    fn test_no_from() {
        assert_eq!(locate_from("SELECT 1"), None);
        assert_eq!(locate_from("select now()"), None);
    }

    #[test]
    fn test_where_before_from_is_ignored() {
        let sql = "select somewhere from t where t.a = 1";
        let span = locate_from(sql).unwrap();
        assert_eq!(span.body(sql), " t ");
    }

    #[test]
    fn test_keyword_match_is_substring_match() {
        // `fromage` contains `from`; the first occurrence wins.
        let sql = "select fromage from t";
        let span = locate_from(sql).unwrap();
        assert_eq!(span.begin, 7);
        assert_eq!(span.body(sql), "age from t");
    }

    #[test]
    fn test_group_by_without_where_stays_in_body() {
        let sql = "SELECT a.x FROM a GROUP BY a.x ORDER BY a.x";
        let span = locate_from(sql).unwrap();
        assert_eq!(span.body(sql), " a GROUP BY a.x ORDER BY a.x");
    }

    #[test]
    fn test_find_ignore_ascii_case() {
        assert_eq!(find_ignore_ascii_case("aXbFrOm", "from", 0), Some(3));
        assert_eq!(find_ignore_ascii_case("from from", "from", 1), Some(5));
        assert_eq!(find_ignore_ascii_case("fro", "from", 0), None);
        assert_eq!(find_ignore_ascii_case("abc", "a", 10), None);
        assert_eq!(find_ignore_ascii_case("é from", "from", 0), Some(3));
    }
}
