//! Configuration loading.
//!
//! Settings come from a `jetjoin.toml` file. Lookup order: an explicit path,
//! `./jetjoin.toml`, then `<config dir>/jetjoin/jetjoin.toml`. Without any
//! file the defaults apply.
//!
//! ```toml
//! [cache]
//! enabled = true
//!
//! [translate]
//! alias_prefix = "jetJoinAlias"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheConfig;
use crate::error::{JetError, JetResult};
use crate::group::DEFAULT_ALIAS_PREFIX;

/// File name looked up in the working and user config directories.
pub const CONFIG_FILE: &str = "jetjoin.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetConfig {
    pub cache: CacheConfig,
    pub translate: TranslateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Prefix of the aliases given to wrapped table groups.
    pub alias_prefix: String,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
        }
    }
}

impl JetConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> JetResult<Self> {
        let config: JetConfig =
            toml::from_str(content).map_err(|e| JetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> JetResult<Self> {
        let path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(JetError::Config(format!(
                        "{} not found",
                        path.display()
                    )));
                }
                path.to_path_buf()
            }
            None => match default_locations().into_iter().find(|p| p.exists()) {
                Some(path) => path,
                None => {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!(path = %path.display(), "loading configuration");
        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> JetResult<()> {
        let prefix = &self.translate.alias_prefix;
        let mut chars = prefix.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(JetError::Config(format!(
                "alias_prefix '{}' is not a valid identifier",
                prefix
            )));
        }
        Ok(())
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("jetjoin").join(CONFIG_FILE));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JetConfig::from_toml("").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.translate.alias_prefix, "jetJoinAlias");
        assert_eq!(config, JetConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = JetConfig::from_toml("[cache]\nenabled = false\n").unwrap();
        assert!(!config.cache.enabled);
        assert_eq!(config.translate.alias_prefix, DEFAULT_ALIAS_PREFIX);
    }

    #[test]
    fn test_custom_prefix() {
        let config = JetConfig::from_toml("[translate]\nalias_prefix = \"dt_\"\n").unwrap();
        assert_eq!(config.translate.alias_prefix, "dt_");
    }

    #[test]
    fn test_invalid_prefix() {
        for bad in ["\"\"", "\"1abc\"", "\"a b\""] {
            let doc = format!("[translate]\nalias_prefix = {bad}\n");
            assert!(matches!(JetConfig::from_toml(&doc), Err(JetError::Config(_))));
        }
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            JetConfig::from_toml("[cache\nenabled"),
            Err(JetError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = JetConfig::load(Some(Path::new("/nonexistent/jetjoin.toml"))).unwrap_err();
        assert!(matches!(err, JetError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("jetjoin-test-{}.toml", std::process::id()));
        fs::write(&path, "[translate]\nalias_prefix = \"grp\"\n").unwrap();
        let config = JetConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.translate.alias_prefix, "grp");
    }
}
