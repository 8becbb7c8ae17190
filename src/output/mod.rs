//! Output encodings.
//!
//! A selection is printed in one of three encodings:
//!
//! | Format  | Rendering                                  |
//! |---------|--------------------------------------------|
//! | `debug` | Rust debug notation (`["bar", "foo"]`)     |
//! | `json`  | compact JSON document                      |
//! | `yaml`  | YAML document                              |

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Output encoding for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Debug-style record notation (default)
    #[default]
    Debug,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl OutputFormat {
    /// Get descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "rust" => Ok(Self::Debug),
            "json" | "j" => Ok(Self::Json),
            "yaml" | "yml" | "y" => Ok(Self::Yaml),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Render `value` in the requested format.
///
/// The returned text has no trailing newline.
pub fn render<T>(value: &T, format: OutputFormat) -> Result<String>
where
    T: Serialize + Debug + ?Sized,
{
    let text = match format {
        OutputFormat::Debug => format!("{:?}", value),
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{Counter, Query};
    use std::str::FromStr;

    fn counter() -> Counter {
        let mut c = Counter::new();
        for token in ["foo", "foo", "bar"] {
            c.increment(token);
        }
        c
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("yml").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_str("debug").unwrap(), OutputFormat::Debug);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_render_values() {
        let values = vec!["bar".to_string(), "foo".to_string()];
        assert_eq!(render(&values, OutputFormat::Debug).unwrap(), r#"["bar", "foo"]"#);
        assert_eq!(render(&values, OutputFormat::Json).unwrap(), r#"["bar","foo"]"#);
        assert_eq!(render(&values, OutputFormat::Yaml).unwrap(), "- bar\n- foo");
    }

    #[test]
    fn test_render_histogram() {
        let c = counter();
        let dump = Query::Dump.run(&c);
        assert_eq!(render(&dump, OutputFormat::Debug).unwrap(), r#"{"foo": 2, "bar": 1}"#);
        assert_eq!(render(&dump, OutputFormat::Json).unwrap(), r#"{"foo":2,"bar":1}"#);
        assert_eq!(render(&dump, OutputFormat::Yaml).unwrap(), "foo: 2\nbar: 1");
    }

    #[test]
    fn test_render_empty_selection() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Debug).unwrap(), "[]");
        assert_eq!(render(&empty, OutputFormat::Json).unwrap(), "[]");
        assert_eq!(render(&empty, OutputFormat::Yaml).unwrap(), "[]");
    }
}
