//! Table groups of a FROM clause.
//!
//! A clause with several comma-separated groups confuses the engine as soon
//! as one of them is a join chain, so every joined group is turned into a
//! derived table:
//!
//! ```text
//! A inner join B on p1, C
//! (select * from A inner join B on p1) as jetJoinAlias0, C
//! ```
//!
//! Splitting is a plain split on `,`; commas nested in parentheses are not
//! protected.

use serde::Serialize;

use crate::error::JetResult;
use crate::join::{self, JOIN_MARKER};

/// Alias prefix used for derived tables unless configured otherwise.
pub const DEFAULT_ALIAS_PREFIX: &str = "jetJoinAlias";

/// Outcome of rewriting a single table group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRewrite {
    /// Zero-based position in the clause.
    pub index: usize,
    pub original: String,
    pub rewritten: String,
    /// Whether the group was wrapped as a derived table.
    pub wrapped: bool,
}

/// Split a clause body into its comma-separated groups. Joining the result
/// with `,` gives back the body.
pub fn split_groups(body: &str) -> Vec<&str> {
    body.split(',').collect()
}

/// Alias of the derived table generated for the group at `index`.
pub fn derived_alias(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Wrap a group as `(select * from <group>) as <alias>`, keeping the group's
/// surrounding whitespace outside the wrapper.
pub fn wrap_derived(group: &str, alias: &str) -> String {
    let start = group.len() - group.trim_start().len();
    let core = group.trim();
    let end = start + core.len();
    format!(
        "{}(select * from {}) as {}{}",
        &group[..start],
        core,
        alias,
        &group[end..]
    )
}

/// Rewrite every group of a clause body.
pub fn rewrite_groups(body: &str, alias_prefix: &str) -> JetResult<Vec<GroupRewrite>> {
    let groups = split_groups(body);
    let several = groups.len() > 1;

    groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            let parenthesized = join::parenthesize(group)?;
            let wrapped = several && parenthesized.contains(JOIN_MARKER);
            let rewritten = if wrapped {
                wrap_derived(&parenthesized, &derived_alias(alias_prefix, index))
            } else {
                parenthesized
            };
            Ok(GroupRewrite {
                index,
                original: group.to_string(),
                rewritten,
                wrapped,
            })
        })
        .collect()
}

/// Rewrite a clause body into the engine's grammar.
pub fn transform_from_clause(body: &str, alias_prefix: &str) -> JetResult<String> {
    let rewrites = rewrite_groups(body, alias_prefix)?;
    let parts: Vec<String> = rewrites.into_iter().map(|r| r.rewritten).collect();
    Ok(parts.join(","))
}
