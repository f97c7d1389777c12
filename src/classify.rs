//! Statement classification.
//!
//! Only SELECT statements go through the join rewrite; everything else is
//! handed to the engine as generated.

use serde::Serialize;
use std::fmt;

/// Coarse statement kind, decided from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Other,
}

impl StatementKind {
    /// Classify a statement by its first keyword, ignoring leading whitespace
    /// and ASCII case.
    pub fn of(sql: &str) -> Self {
        let head = sql.trim_start();
        [
            (Self::Select, "select"),
            (Self::Insert, "insert"),
            (Self::Update, "update"),
            (Self::Delete, "delete"),
        ]
        .into_iter()
        .find(|(_, keyword)| starts_with_ignore_case(head, keyword))
        .map(|(kind, _)| kind)
        .unwrap_or(Self::Other)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Whether the statement is a SELECT and therefore eligible for translation.
pub fn is_select(sql: &str) -> bool {
    starts_with_ignore_case(sql.trim_start(), "select")
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_detection() {
        assert!(is_select("SELECT * FROM t"));
        assert!(is_select("select 1"));
        assert!(is_select("  \n\tSeLeCt a from b"));
        assert!(!is_select("INSERT INTO t VALUES (1)"));
        assert!(!is_select("sel"));
        assert!(!is_select(""));
    }

    #[test]
    fn test_non_ascii_prefix_does_not_panic() {
        assert!(!is_select("é€lect"));
        assert_eq!(StatementKind::of("ü"), StatementKind::Other);
    }

    #[test]
    fn test_statement_kind() {
        assert_eq!(StatementKind::of("select * from t"), StatementKind::Select);
        assert_eq!(StatementKind::of(" UPDATE t SET a = 1"), StatementKind::Update);
        assert_eq!(StatementKind::of("delete from t"), StatementKind::Delete);
        assert_eq!(StatementKind::of("insert into t values (1)"), StatementKind::Insert);
        assert_eq!(StatementKind::of("CREATE TABLE t (a int)"), StatementKind::Other);
        assert_eq!(StatementKind::Select.to_string(), "SELECT");
    }
}
