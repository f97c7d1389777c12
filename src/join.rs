//! Join chain parenthesization.
//!
//! The Jet engine only accepts a chain of joins when every intermediate
//! result is parenthesized:
//!
//! ```text
//! A inner join B on p1 left outer join C on p2 right outer join D on p3
//! ((A inner join B on p1) left outer join C on p2) right outer join D on p3
//! ```
//!
//! The chain is cut on the literal ` join` marker. Every segment between two
//! markers must end with the qualifier of the *next* join; a closing
//! parenthesis goes right before that qualifier, and the matching opening
//! parentheses are prepended to the group.
//!
//! Markers and qualifiers are matched case-sensitively: the generating layer
//! always emits them in lower case.

use nom::{
    bytes::complete::{tag, take_until},
    multi::many0,
    sequence::terminated,
    IResult,
};
use serde::Serialize;

use crate::error::{JetError, JetResult};

/// Separator between the segments of a join chain.
pub const JOIN_MARKER: &str = " join";

/// The join qualifiers accepted by the target grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinQualifier {
    Inner,
    LeftOuter,
    RightOuter,
}

impl JoinQualifier {
    pub const ALL: [JoinQualifier; 3] = [Self::Inner, Self::LeftOuter, Self::RightOuter];

    /// The qualifier as it trails a segment, leading space included.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Inner => " inner",
            Self::LeftOuter => " left outer",
            Self::RightOuter => " right outer",
        }
    }

    /// The qualifier a segment ends with, if any.
    pub fn trailing(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|qualifier| segment.ends_with(qualifier.suffix()))
    }
}

/// Every segment that is followed by a ` join` marker.
fn joined_segments(input: &str) -> IResult<&str, Vec<&str>> {
    many0(terminated(take_until(JOIN_MARKER), tag(JOIN_MARKER)))(input)
}

/// Split a table group on the ` join` marker. A group without joins yields a
/// single segment; `k` joins yield `k + 1` segments.
pub fn split_on_join(group: &str) -> Vec<&str> {
    match joined_segments(group) {
        Ok((last, mut segments)) => {
            segments.push(last);
            segments
        }
        Err(_) => vec![group],
    }
}

/// Insert a closing parenthesis in front of the segment's trailing qualifier.
fn close_before(segment: &str, qualifier: JoinQualifier) -> String {
    let cut = segment.len() - qualifier.suffix().len();
    let mut closed = String::with_capacity(segment.len() + 1);
    closed.push_str(&segment[..cut]);
    closed.push(')');
    closed.push_str(&segment[cut..]);
    closed
}

/// Rewrite one table group into the left-nested form.
///
/// A group without joins is returned as is. Leading whitespace of the group
/// is kept in front of the opening parentheses.
pub fn parenthesize(group: &str) -> JetResult<String> {
    let segments = split_on_join(group);
    let Some((last, inner)) = segments.split_last() else {
        return Ok(group.to_string());
    };
    if inner.is_empty() {
        return Ok(group.to_string());
    }

    let mut parts: Vec<String> = Vec::with_capacity(segments.len());
    parts.push(inner[0].to_string());
    for segment in &inner[1..] {
        let Some(qualifier) = JoinQualifier::trailing(segment) else {
            return Err(malformed(group, segment));
        };
        parts.push(close_before(segment, qualifier));
    }

    // The final segment is `table on predicate`; another qualifier here means
    // a join keyword is missing.
    if JoinQualifier::trailing(last).is_some() {
        return Err(malformed(group, last));
    }
    parts.push(last.to_string());

    let open = inner.len() - 1;
    let joined = parts.join(JOIN_MARKER);
    let body = joined.trim_start();
    let indent = &joined[..joined.len() - body.len()];

    let mut out = String::with_capacity(joined.len() + open);
    out.push_str(indent);
    out.extend(std::iter::repeat('(').take(open));
    out.push_str(body);
    tracing::trace!(group, rewritten = %out, nesting = open, "parenthesized join chain");
    Ok(out)
}

fn malformed(group: &str, segment: &str) -> JetError {
    tracing::error!(
        group,
        segment,
        "Invalid join syntax. Could not parenthesize the join block properly."
    );
    JetError::malformed(group, segment)
}
