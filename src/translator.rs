//! Statement translation.
//!
//! Ties the pipeline together: classify, locate the FROM clause, rewrite its
//! groups, splice the result back between the untouched prefix and suffix,
//! and memoize the outcome.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::cache::TranslationCache;
use crate::classify::{self, StatementKind};
use crate::clause::{self, ClauseSpan};
use crate::config::JetConfig;
use crate::error::JetResult;
use crate::group::{self, DEFAULT_ALIAS_PREFIX, GroupRewrite};

/// Rewrites SELECT statements into the Jet join grammar.
///
/// Several translators may share one cache through its `Arc`.
#[derive(Debug)]
pub struct Translator {
    cache: Arc<TranslationCache>,
    alias_prefix: String,
    counters: Counters,
}

#[derive(Debug, Default)]
struct Counters {
    translations: AtomicU64,
    passthroughs: AtomicU64,
    failures: AtomicU64,
    cache_hits: AtomicU64,
}

/// Counters exposed by [`Translator::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslatorStats {
    /// FROM clauses actually rewritten (cache misses).
    pub translations: u64,
    /// Statements returned untouched (non-SELECT or no FROM).
    pub passthroughs: u64,
    /// Rewrites that failed on a malformed join chain.
    pub failures: u64,
    pub cache_hits: u64,
}

/// Step-by-step account of a translation, see [`Translator::explain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub kind: StatementKind,
    pub span: Option<ClauseSpan>,
    pub groups: Vec<GroupRewrite>,
    pub translated: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Arc::new(TranslationCache::default()))
    }
}

impl Translator {
    /// Create a translator around an existing cache.
    pub fn new(cache: Arc<TranslationCache>) -> Self {
        Self {
            cache,
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            counters: Counters::default(),
        }
    }

    /// Build a translator with its own cache from configuration.
    pub fn from_config(config: &JetConfig) -> Self {
        Self::new(Arc::new(TranslationCache::new(config.cache.clone())))
            .with_alias_prefix(&config.translate.alias_prefix)
    }

    /// Use a different prefix for derived table aliases.
    pub fn with_alias_prefix(mut self, prefix: &str) -> Self {
        self.alias_prefix = prefix.to_string();
        self
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn alias_prefix(&self) -> &str {
        &self.alias_prefix
    }

    /// Translate a statement.
    ///
    /// Non-SELECT statements and statements without a FROM clause come back
    /// unchanged and are not cached. A malformed join chain fails the whole
    /// statement; nothing is cached for it.
    pub fn translate(&self, sql: &str) -> JetResult<String> {
        if !classify::is_select(sql) {
            return Ok(self.passthrough(sql, "not a SELECT statement"));
        }
        let Some(span) = clause::locate_from(sql) else {
            return Ok(self.passthrough(sql, "no FROM clause"));
        };

        if let Some(translated) = self.cache.lookup(sql) {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(sql, "translation cache hit");
            return Ok(translated);
        }

        let translated = self.rewrite(sql, span)?;
        self.cache.store(sql, &translated);
        Ok(translated)
    }

    /// Run the pipeline without the cache and report every step.
    pub fn explain(&self, sql: &str) -> JetResult<Explanation> {
        let kind = StatementKind::of(sql);
        let span = if classify::is_select(sql) {
            clause::locate_from(sql)
        } else {
            None
        };

        let Some(span) = span else {
            return Ok(Explanation {
                kind,
                span: None,
                groups: Vec::new(),
                translated: sql.to_string(),
            });
        };

        let groups = group::rewrite_groups(span.body(sql), &self.alias_prefix)?;
        let body: Vec<&str> = groups.iter().map(|g| g.rewritten.as_str()).collect();
        let translated = splice(sql, span, &body.join(","));
        Ok(Explanation {
            kind,
            span: Some(span),
            groups,
            translated,
        })
    }

    pub fn stats(&self) -> TranslatorStats {
        TranslatorStats {
            translations: self.counters.translations.load(Ordering::Relaxed),
            passthroughs: self.counters.passthroughs.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
        }
    }

    fn passthrough(&self, sql: &str, reason: &str) -> String {
        self.counters.passthroughs.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(reason, "statement passed through untranslated");
        sql.to_string()
    }

    fn rewrite(&self, sql: &str, span: ClauseSpan) -> JetResult<String> {
        self.counters.translations.fetch_add(1, Ordering::Relaxed);
        match group::transform_from_clause(span.body(sql), &self.alias_prefix) {
            Ok(body) => Ok(splice(sql, span, &body)),
            Err(err) => {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(sql, error = %err, "statement translation failed");
                Err(err)
            }
        }
    }
}

/// Put a rewritten clause body back into its statement.
fn splice(sql: &str, span: ClauseSpan, body: &str) -> String {
    let prefix = span.prefix(sql);
    let suffix = span.suffix(sql);
    let mut out = String::with_capacity(prefix.len() + body.len() + suffix.len());
    out.push_str(prefix);
    out.push_str(body);
    out.push_str(suffix);
    out
}
