//! # Configuration
//!
//! Run settings, loaded from an optional YAML file and overridden from the
//! command line.
//!
//! ## File Format
//! ```yaml
//! input-dir: TextGridCompleted
//! extension: TextGrid
//! encoding: utf-16
//! speaker: 4
//! gender: f
//! outputs:
//!   - path: output.table
//!     delimiter: tab
//!   - path: output.csv
//!     delimiter: ";"
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.
//! Unknown keys are rejected so typos do not silently fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::encoding::Encoding;
use crate::error::TableError;
use crate::row::Speaker;

pub const DEFAULT_INPUT_DIR: &str = "TextGridCompleted";
pub const DEFAULT_EXTENSION: &str = "TextGrid";
pub const DEFAULT_SPEAKER: &str = "4";
pub const DEFAULT_GENDER: &str = "f";

/// Config file as written, before defaults and validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub input_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub encoding: Option<Encoding>,
    pub speaker: Option<Value>, // plain scalars like `4` are accepted as text
    pub gender: Option<Value>,
    pub outputs: Option<Vec<RawOutput>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOutput {
    pub path: PathBuf,
    pub delimiter: String,
}

/// One table file to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub delimiter: u8,
}

impl OutputSpec {
    pub fn new(path: impl Into<PathBuf>, delimiter: u8) -> Self {
        Self {
            path: path.into(),
            delimiter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    /// File extension without the dot
    pub extension: String,
    pub encoding: Encoding,
    pub speaker: Speaker,
    pub outputs: Vec<OutputSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            encoding: Encoding::Utf16,
            speaker: Speaker {
                id: DEFAULT_SPEAKER.to_string(),
                gender: DEFAULT_GENDER.to_string(),
            },
            outputs: vec![
                OutputSpec::new("output.table", b'\t'),
                OutputSpec::new("output.csv", b';'),
            ],
        }
    }
}

impl Config {
    /// Load a YAML config file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, TableError> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| TableError::ConfigError(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, TableError> {
        let defaults = Config::default();

        let extension = match raw.extension {
            Some(ext) => normalize_extension(&ext)?,
            None => defaults.extension,
        };

        let speaker = Speaker {
            id: match raw.speaker {
                Some(v) => scalar_to_string("speaker", v)?,
                None => defaults.speaker.id,
            },
            gender: match raw.gender {
                Some(v) => scalar_to_string("gender", v)?,
                None => defaults.speaker.gender,
            },
        };

        let outputs = match raw.outputs {
            Some(outputs) => {
                if outputs.is_empty() {
                    return Err(TableError::ConfigError(
                        "outputs must list at least one file".to_string(),
                    ));
                }
                outputs
                    .into_iter()
                    .map(|o| Ok(OutputSpec::new(o.path, parse_delimiter(&o.delimiter)?)))
                    .collect::<Result<Vec<_>, TableError>>()?
            }
            None => defaults.outputs,
        };

        Ok(Config {
            input_dir: raw.input_dir.unwrap_or(defaults.input_dir),
            extension,
            encoding: raw.encoding.unwrap_or(defaults.encoding),
            speaker,
            outputs,
        })
    }

    /// Place every relative output path under `dir`.
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        for output in &mut self.outputs {
            if output.path.is_relative() {
                output.path = dir.join(&output.path);
            }
        }
        self
    }
}

fn scalar_to_string(key: &str, value: Value) -> Result<String, TableError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(TableError::ConfigError(format!(
            "{} must be a plain value, found {:?}",
            key, other
        ))),
    }
}

fn normalize_extension(ext: &str) -> Result<String, TableError> {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        return Err(TableError::ConfigError("extension must not be empty".to_string()));
    }
    Ok(ext.to_string())
}

/// Parse a field separator: a single ASCII character, or `tab`.
pub fn parse_delimiter(s: &str) -> Result<u8, TableError> {
    let byte = match s {
        "tab" | "\\t" => b'\t',
        "semicolon" => b';',
        "comma" => b',',
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => *b,
            _ => {
                return Err(TableError::ConfigError(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    s
                )));
            }
        },
    };
    if matches!(byte, b'"' | b'\r' | b'\n') {
        return Err(TableError::ConfigError(format!(
            "Delimiter {:?} would clash with quoting or line breaks",
            byte as char
        )));
    }
    Ok(byte)
}
