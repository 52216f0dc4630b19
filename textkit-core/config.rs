//! User configuration, read from `config.toml`.
//!
//! ```toml
//! encoding   = "shift_jis"
//! chunk-size = 4096
//! ```

use std::{
  fs,
  io,
  path::PathBuf,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};
use serde::Deserialize;
use thiserror::Error;

use crate::{
  codec::DEFAULT_CHUNK_SIZE,
  encoding::{
    DEFAULT_ENCODING_LABEL,
    TextEncoding,
  },
};

pub const ENCODING_ENV: &str = "TEXTKIT_ENCODING";
pub const CONFIG_DIR_ENV: &str = "TEXTKIT_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  /// Encoding label used when the caller does not name one.
  pub encoding:   String,
  /// Bytes requested per read when decoding a stream.
  pub chunk_size: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigRaw {
  encoding:   Option<String>,
  chunk_size: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("failed to parse config: {0}")]
  BadConfig(#[from] toml::de::Error),
  #[error("failed to read config: {0}")]
  Error(#[from] io::Error),
  #[error(transparent)]
  Encoding(#[from] crate::Error),
}

impl Default for Config {
  fn default() -> Self {
    Self {
      encoding:   DEFAULT_ENCODING_LABEL.to_string(),
      chunk_size: DEFAULT_CHUNK_SIZE,
    }
  }
}

impl Config {
  pub fn from_toml(text: &str) -> Result<Self, ConfigLoadError> {
    let config: Config = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  /// Merges a global and a workspace-local file; local values win.
  ///
  /// A file that could not be read counts as absent, a file that does not
  /// parse is an error.
  pub fn load(
    global: Result<String, ConfigLoadError>,
    local: Result<String, ConfigLoadError>,
  ) -> Result<Self, ConfigLoadError> {
    let global: Result<ConfigRaw, ConfigLoadError> =
      global.and_then(|file| toml::from_str(&file).map_err(ConfigLoadError::BadConfig));
    let local: Result<ConfigRaw, ConfigLoadError> =
      local.and_then(|file| toml::from_str(&file).map_err(ConfigLoadError::BadConfig));

    let raw = match (global, local) {
      (_, Err(ConfigLoadError::BadConfig(err))) | (Err(ConfigLoadError::BadConfig(err)), _) => {
        return Err(ConfigLoadError::BadConfig(err));
      },
      (Ok(global), Ok(local)) => {
        ConfigRaw {
          encoding:   local.encoding.or(global.encoding),
          chunk_size: local.chunk_size.or(global.chunk_size),
        }
      },
      (Ok(config), Err(_)) | (Err(_), Ok(config)) => config,
      (Err(_), Err(_)) => ConfigRaw::default(),
    };

    let defaults = Config::default();
    let config = Config {
      encoding:   raw.encoding.unwrap_or(defaults.encoding),
      chunk_size: raw.chunk_size.unwrap_or(defaults.chunk_size),
    };
    config.validate()?;
    Ok(config)
  }

  /// Loads `config.toml` from the user config directory and from
  /// `.textkit/` in the current directory, then applies the environment.
  pub fn load_user() -> Result<Self, ConfigLoadError> {
    let global = fs::read_to_string(config_file()).map_err(ConfigLoadError::Error);
    let local = fs::read_to_string(workspace_config_file()).map_err(ConfigLoadError::Error);
    let mut config = Self::load(global, local)?;
    config.apply_env()?;
    tracing::debug!(encoding = %config.encoding, chunk_size = config.chunk_size, "loaded config");
    Ok(config)
  }

  /// Overrides the encoding with `TEXTKIT_ENCODING` when it is set.
  pub fn apply_env(&mut self) -> Result<(), ConfigLoadError> {
    if let Ok(label) = std::env::var(ENCODING_ENV) {
      TextEncoding::for_label(&label)?;
      self.encoding = label;
    }
    Ok(())
  }

  pub fn encoding(&self) -> crate::Result<TextEncoding> {
    TextEncoding::for_label(&self.encoding)
  }

  fn validate(&self) -> Result<(), ConfigLoadError> {
    self.encoding()?;
    Ok(())
  }
}

pub fn config_dir() -> Option<PathBuf> {
  if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
    return Some(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().ok()?;
  let mut path = strategy.config_dir();
  path.push("textkit");
  Some(path)
}

pub fn config_file() -> PathBuf {
  config_dir().unwrap_or_default().join("config.toml")
}

pub fn workspace_config_file() -> PathBuf {
  PathBuf::from(".textkit").join("config.toml")
}

#[cfg(test)]
mod test {
  use super::*;

  fn missing() -> Result<String, ConfigLoadError> {
    Err(ConfigLoadError::Error(io::Error::from(io::ErrorKind::NotFound)))
  }

  #[test]
  fn defaults() {
    let config = Config::default();
    assert_eq!(config.encoding, "utf8");
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    assert_eq!(config.encoding().unwrap(), TextEncoding::utf8());
  }

  #[test]
  fn parse_partial_file() {
    let config = Config::from_toml("encoding = \"latin1\"").unwrap();
    assert_eq!(config.encoding().unwrap().name(), "windows-1252");
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
  }

  #[test]
  fn unknown_keys_are_rejected() {
    assert!(matches!(
      Config::from_toml("encodng = \"utf8\""),
      Err(ConfigLoadError::BadConfig(_))
    ));
  }

  #[test]
  fn unsupported_encoding_is_rejected() {
    assert!(matches!(
      Config::from_toml("encoding = \"utf-16le\""),
      Err(ConfigLoadError::Encoding(crate::Error::UnsupportedEncoding(_)))
    ));
  }

  #[test]
  fn local_overrides_global() {
    let config = Config::load(
      Ok("encoding = \"latin1\"\nchunk-size = 16".to_string()),
      Ok("chunk-size = 32".to_string()),
    )
    .unwrap();
    assert_eq!(config.encoding, "latin1");
    assert_eq!(config.chunk_size, 32);
  }

  #[test]
  fn missing_files_fall_back_to_defaults() {
    assert_eq!(Config::load(missing(), missing()).unwrap(), Config::default());
    let config = Config::load(missing(), Ok("encoding = \"sjis\"".to_string())).unwrap();
    assert_eq!(config.encoding, "sjis");
  }

  #[test]
  fn bad_file_wins_over_missing() {
    assert!(matches!(
      Config::load(Ok("chunk-size = \"big\"".to_string()), missing()),
      Err(ConfigLoadError::BadConfig(_))
    ));
  }
}
