//! Data-access boundary.
//!
//! The driver sits between statement generation and execution: it receives
//! the generated text with its command type and parameter descriptors,
//! translates SELECT statements, and hands everything to a
//! [`CommandFactory`]. Parameters are forwarded untouched and in order.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::TranslationCache;
use crate::classify;
use crate::config::JetConfig;
use crate::error::JetResult;
use crate::translator::Translator;

/// How the command text is to be interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommandType {
    #[default]
    Text,
    StoredProcedure,
    TableDirect,
}

/// Database type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbType {
    AnsiString,
    String,
    Boolean,
    Byte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    Currency,
    DateTime,
    Guid,
    Binary,
}

/// Parameter type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlType {
    pub db_type: DbType,
    pub length: Option<u32>,
    pub precision: Option<u8>,
    pub scale: Option<u8>,
}

impl SqlType {
    pub fn new(db_type: DbType) -> Self {
        Self {
            db_type,
            length: None,
            precision: None,
            scale: None,
        }
    }

    pub fn with_length(db_type: DbType, length: u32) -> Self {
        Self {
            length: Some(length),
            ..Self::new(db_type)
        }
    }

    pub fn decimal(precision: u8, scale: u8) -> Self {
        Self {
            precision: Some(precision),
            scale: Some(scale),
            ..Self::new(DbType::Decimal)
        }
    }
}

/// A statement ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub kind: CommandType,
    pub sql: String,
    pub parameter_types: Vec<SqlType>,
}

/// Builds the command objects handed to the execution layer.
pub trait CommandFactory {
    type Output;

    fn create(&self, kind: CommandType, sql: String, parameter_types: Vec<SqlType>) -> Self::Output;
}

/// Factory producing plain [`Command`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCommandFactory;

impl CommandFactory for PlainCommandFactory {
    type Output = Command;

    fn create(&self, kind: CommandType, sql: String, parameter_types: Vec<SqlType>) -> Command {
        Command {
            kind,
            sql,
            parameter_types,
        }
    }
}

/// Driver for the Jet engine.
#[derive(Debug)]
pub struct JetDriver<F = PlainCommandFactory> {
    translator: Translator,
    factory: F,
}

impl Default for JetDriver {
    fn default() -> Self {
        Self::new(Translator::default(), PlainCommandFactory)
    }
}

impl JetDriver {
    /// Driver with its own cache, configured from `config`.
    pub fn from_config(config: &JetConfig) -> Self {
        Self::new(Translator::from_config(config), PlainCommandFactory)
    }
}

impl<F: CommandFactory> JetDriver<F> {
    pub fn new(translator: Translator, factory: F) -> Self {
        Self {
            translator,
            factory,
        }
    }

    /// Driver sharing `cache` with other drivers.
    pub fn with_shared_cache(cache: Arc<TranslationCache>, factory: F) -> Self {
        Self::new(Translator::new(cache), factory)
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Translate the statement if it is a SELECT and build its command.
    ///
    /// A malformed join chain is returned as an error and no command is
    /// built; the caller should not retry it.
    pub fn generate_command(
        &self,
        kind: CommandType,
        sql: &str,
        parameter_types: Vec<SqlType>,
    ) -> JetResult<F::Output> {
        let sql = if classify::is_select(sql) {
            self.translator.translate(sql)?
        } else {
            sql.to_string()
        };
        Ok(self.factory.create(kind, sql, parameter_types))
    }

    /// The engine expects named parameters.
    pub fn uses_named_prefix(&self) -> bool {
        true
    }

    pub fn named_prefix(&self) -> &'static str {
        "@"
    }

    /// Parameter name as it must appear in the statement text.
    pub fn format_parameter_name(&self, name: &str) -> String {
        format!("{}{}", self.named_prefix(), name)
    }
}
