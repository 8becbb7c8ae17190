//! Configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config PATH`, or `<config dir>/tally/config.toml`)
//! 3. Environment variables (`TALLY_*`)
//! 4. Command-line flags (applied by the binary)
//!
//! ```toml
//! [split]
//! words = true
//!
//! [input]
//! skip_errors = true
//!
//! [output]
//! format = "json"
//! sort = true
//!
//! [selection]
//! number = 10
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::counter::Query;
use crate::error::{Result, TallyError};
use crate::output::OutputFormat;
use crate::tokenizer::SplitMode;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TALLY_";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Token splitting switches
    #[serde(default)]
    pub split: SplitConfig,

    /// Source handling
    #[serde(default)]
    pub input: InputConfig,

    /// Output encoding and ordering
    #[serde(default)]
    pub output: OutputConfig,

    /// Parameters for `top` and `bottom`
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TallyError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }

    /// Load the file at `path`, or the default file if it exists, or defaults.
    ///
    /// An explicitly given path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)
            },
            _ => Ok(Self::default()),
        }
    }

    /// Override settings from `TALLY_*` environment variables.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Override settings from a variable lookup (keys without prefix).
    pub fn apply_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("BYTES") {
            self.split.bytes = parse_bool("BYTES", &v)?;
        }
        if let Some(v) = get("WORDS") {
            self.split.words = parse_bool("WORDS", &v)?;
        }
        if let Some(v) = get("LINES") {
            self.split.lines = parse_bool("LINES", &v)?;
        }
        if let Some(v) = get("SKIP_ERRORS") {
            self.input.skip_errors = parse_bool("SKIP_ERRORS", &v)?;
        }
        if let Some(v) = get("SORT") {
            self.output.sort = parse_bool("SORT", &v)?;
        }
        if let Some(v) = get("FORMAT") {
            self.output.format = OutputFormat::from_str(&v).map_err(env_error("FORMAT"))?;
        }
        if let Some(v) = get("NUMBER") {
            self.selection.number = parse_int("NUMBER", &v)?;
        }
        if let Some(v) = get("MINIMUM") {
            self.selection.minimum = parse_int("MINIMUM", &v)?;
        }
        if let Some(v) = get("MAXIMUM") {
            self.selection.maximum = parse_int("MAXIMUM", &v)?;
        }

        Ok(self)
    }

    /// The single selected split mode.
    pub fn split_mode(&self) -> Result<SplitMode> {
        let selected: Vec<SplitMode> = [
            (self.split.bytes, SplitMode::Bytes),
            (self.split.words, SplitMode::Words),
            (self.split.lines, SplitMode::Lines),
        ]
        .into_iter()
        .filter_map(|(on, mode)| on.then_some(mode))
        .collect();

        match selected.as_slice() {
            [mode] => Ok(*mode),
            [] => Err(TallyError::Config(
                "must select one of bytes (-b), words (-w), or lines (-l) to count".to_string(),
            )),
            _ => Err(TallyError::Config(
                "must select only one of bytes (-b), words (-w), or lines (-l) to count"
                    .to_string(),
            )),
        }
    }

    /// Build and validate a `top` query from the selection settings.
    pub fn top_query(&self) -> Result<Query> {
        let query = Query::Top {
            number: self.selection.number,
            minimum: self.selection.minimum,
            sort: self.output.sort,
        };
        query.validate()?;
        Ok(query)
    }

    /// Build and validate a `bottom` query from the selection settings.
    pub fn bottom_query(&self) -> Result<Query> {
        let query = Query::Bottom {
            number: self.selection.number,
            maximum: self.selection.maximum,
            sort: self.output.sort,
        };
        query.validate()?;
        Ok(query)
    }

    /// Build an `all` query.
    pub fn all_query(&self) -> Query {
        Query::All {
            sort: self.output.sort,
        }
    }
}

fn env_error(key: &'static str) -> impl Fn(String) -> TallyError {
    move |e| TallyError::Config(format!("{ENV_PREFIX}{key}: {e}"))
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(env_error(key)(format!("expecting a boolean, got {other:?}"))),
    }
}

fn parse_int(key: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|e| env_error(key)(format!("expecting an integer, got {value:?} ({e})")))
}

/// Token splitting switches; exactly one must be on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Count bytes
    pub bytes: bool,
    /// Count words
    pub words: bool,
    /// Count lines
    pub lines: bool,
}

/// Source handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Skip sources that cannot be opened or read
    pub skip_errors: bool,
}

/// Output encoding and ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output encoding
    pub format: OutputFormat,
    /// Sort values before selecting
    pub sort: bool,
}

/// Parameters for `top` and `bottom`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of values to return
    pub number: i64,
    /// Minimum count for `top`
    pub minimum: i64,
    /// Maximum count for `bottom` (negative: no limit)
    pub maximum: i64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            number: 1,
            minimum: 0,
            maximum: -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.selection.number, 1);
        assert_eq!(config.selection.minimum, 0);
        assert_eq!(config.selection.maximum, -1);
        assert_eq!(config.output.format, OutputFormat::Debug);
        assert!(!config.input.skip_errors);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [split]
            lines = true

            [output]
            format = "yaml"
            sort = true

            [selection]
            number = 5
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.split_mode().unwrap(), SplitMode::Lines);
        assert_eq!(config.output.format, OutputFormat::Yaml);
        assert!(config.output.sort);
        assert_eq!(config.selection.number, 5);
        assert_eq!(config.selection.maximum, -1);
    }

    #[test]
    fn test_split_mode_requires_exactly_one() {
        let mut config = Config::default();
        let err = config.split_mode().unwrap_err();
        assert!(err.to_string().contains("must select one of"));

        config.split.words = true;
        assert_eq!(config.split_mode().unwrap(), SplitMode::Words);

        config.split.bytes = true;
        let err = config.split_mode().unwrap_err();
        assert!(err.to_string().contains("must select only one of"));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .apply_vars(vars(&[
                ("WORDS", "true"),
                ("SKIP_ERRORS", "1"),
                ("FORMAT", "json"),
                ("NUMBER", "7"),
                ("MAXIMUM", "-3"),
            ]))
            .unwrap();

        assert_eq!(config.split_mode().unwrap(), SplitMode::Words);
        assert!(config.input.skip_errors);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.selection.number, 7);
        assert_eq!(config.selection.maximum, -3);
        assert_eq!(config.selection.minimum, 0);
    }

    #[test]
    fn test_env_blank_values_ignored() {
        let config = Config::default()
            .apply_vars(vars(&[("NUMBER", "  ")]))
            .unwrap();
        assert_eq!(config.selection.number, 1);
    }

    #[test]
    fn test_env_invalid_values() {
        let err = Config::default()
            .apply_vars(vars(&[("NUMBER", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("TALLY_NUMBER"));

        let err = Config::default()
            .apply_vars(vars(&[("SORT", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("TALLY_SORT"));

        assert!(Config::default()
            .apply_vars(vars(&[("FORMAT", "csv")]))
            .is_err());
    }

    #[test]
    fn test_queries_from_config() {
        let mut config = Config::default();
        assert_eq!(
            config.top_query().unwrap(),
            Query::Top {
                number: 1,
                minimum: 0,
                sort: false
            }
        );
        assert_eq!(
            config.bottom_query().unwrap(),
            Query::Bottom {
                number: 1,
                maximum: -1,
                sort: false
            }
        );

        config.selection.maximum = 0;
        assert!(config.bottom_query().is_err());

        config.selection.number = 0;
        assert!(config.top_query().is_err());

        config.output.sort = true;
        assert_eq!(config.all_query(), Query::All { sort: true });
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/no/such/tally.toml"))).unwrap_err();
        assert!(matches!(err, TallyError::Config(_)));
    }
}
