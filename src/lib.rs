//! # jetjoin — Jet join grammar translator
//!
//! Query builders emit joins the way most engines read them:
//!
//! ```text
//! select * from A inner join B on p1 left outer join C on p2, D
//! ```
//!
//! The Jet engine does not. Every join chain longer than a single join must
//! be parenthesized left to right, and a joined group next to other
//! comma-separated groups must become a derived table:
//!
//! ```text
//! select * from (select * from (A inner join B on p1) left outer join C on p2) as jetJoinAlias0, D
//! ```
//!
//! ## Quick Example
//!
//! ```
//! use jetjoin::Translator;
//!
//! let translator = Translator::default();
//! let sql = translator
//!     .translate("SELECT * FROM A inner join B on p1 left outer join C on p2")
//!     .unwrap();
//! assert_eq!(sql, "SELECT * FROM (A inner join B on p1) left outer join C on p2");
//! ```
//!
//! ## Pipeline
//!
//! | Step       | Module         | Job                                      |
//! |------------|----------------|------------------------------------------|
//! | Classify   | [`classify`]   | Only SELECT statements are rewritten     |
//! | Locate     | [`clause`]     | Find the `FROM` … `WHERE` span           |
//! | Split      | [`group`]      | Cut the clause on commas                 |
//! | Nest       | [`join`]       | Parenthesize each join chain             |
//! | Wrap       | [`group`]      | Turn joined groups into derived tables   |
//! | Memoize    | [`cache`]      | Remember translations by statement text  |

pub mod cache;
pub mod classify;
pub mod clause;
pub mod config;
pub mod driver;
pub mod error;
pub mod group;
pub mod join;
pub mod translator;

pub use translator::Translator;

pub mod prelude {
    pub use crate::cache::{CacheConfig, CacheStats, TranslationCache};
    pub use crate::classify::StatementKind;
    pub use crate::clause::ClauseSpan;
    pub use crate::config::JetConfig;
    pub use crate::driver::{Command, CommandFactory, CommandType, DbType, JetDriver, SqlType};
    pub use crate::error::*;
    pub use crate::group::GroupRewrite;
    pub use crate::join::JoinQualifier;
    pub use crate::translator::{Explanation, Translator, TranslatorStats};
}

/// Translate a single statement without a cache.
///
/// # Example
///
/// ```
/// let sql = jetjoin::translate("select * from a inner join b on a.x=b.x, c").unwrap();
/// assert_eq!(sql, "select * from (select * from a inner join b on a.x=b.x) as jetJoinAlias0, c");
/// ```
pub fn translate(sql: &str) -> Result<String, error::JetError> {
    let cache = cache::TranslationCache::new(cache::CacheConfig { enabled: false });
    Translator::new(std::sync::Arc::new(cache)).translate(sql)
}
