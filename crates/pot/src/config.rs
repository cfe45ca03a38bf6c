//! Conversion settings, loadable from TOML.
//!
//! ```toml
//! inputs = ["1.0train-GB1.pot", "1.0test-GB1.pot"]
//! output_dir = "optFilesByTag"
//! parallel = true
//! overwrite = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::store::WriteMode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `.pot` files to decode, in order.
    pub inputs: Vec<PathBuf>,
    /// Directory receiving one text file per class.
    pub output_dir: PathBuf,
    /// Decode each file with [`decode_parallel`](crate::decode_parallel).
    pub parallel: bool,
    /// Rewrite class files even if the directory is already populated.
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: vec![
                PathBuf::from("1.0train-GB1.pot"),
                PathBuf::from("1.0test-GB1.pot"),
            ],
            output_dir: PathBuf::from("optFilesByTag"),
            parallel: false,
            overwrite: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.overwrite {
            WriteMode::Overwrite
        } else {
            WriteMode::SkipIfPopulated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml_str(
            r#"
            inputs = ["a.pot"]
            parallel = true
            "#,
        )
        .unwrap();
        assert_eq!(config.inputs, vec![PathBuf::from("a.pot")]);
        assert!(config.parallel);
        assert_eq!(config.output_dir, PathBuf::from("optFilesByTag"));
        assert_eq!(config.write_mode(), WriteMode::SkipIfPopulated);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            Config::from_toml_str("output = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
