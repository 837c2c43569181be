//! Format loaders and the dispatcher that picks between them.
//!
//! The set of formats is closed: [`FormatKind`] names them, [`FORMAT_TABLE`]
//! maps tokens and extensions to them, and [`Converter`] owns one loader per
//! format, built once from a [`ConverterConfig`].

mod csv;
mod json;
mod yaml;

pub use self::csv::{detect_delimiter, CsvLoader, CSV_WRITE_DELIMITER};
pub use self::json::JsonLoader;
pub use self::yaml::YamlLoader;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::config::ConverterConfig;
use crate::error::{ConvertError, Result};
use crate::record::{Dataset, Record};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Comma/semicolon separated values. Flat records only.
    Csv,
    /// JSON array of objects.
    Json,
    /// YAML sequence of mappings.
    Yaml,
}

/// Token (explicit format or file extension) to format, lowercase.
pub const FORMAT_TABLE: &[(&str, FormatKind)] = &[
    ("json", FormatKind::Json),
    ("csv", FormatKind::Csv),
    ("yaml", FormatKind::Yaml),
    ("yml", FormatKind::Yaml),
];

impl FormatKind {
    /// Look up a token in [`FORMAT_TABLE`], ignoring letter case.
    pub fn from_token(token: &str) -> Option<Self> {
        FORMAT_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, kind)| *kind)
    }

    /// Canonical lowercase name, also the preferred file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatKind::Csv => "csv",
            FormatKind::Json => "json",
            FormatKind::Yaml => "yaml",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatKind::Csv => "CSV",
            FormatKind::Json => "JSON",
            FormatKind::Yaml => "YAML",
        })
    }
}

impl FromStr for FormatKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(s).ok_or_else(|| ConvertError::UnsupportedFormat(s.to_string()))
    }
}

/// Pick the format for `path`.
///
/// A non-empty `explicit` token always wins over the file extension, even
/// when the two disagree.
pub fn resolve_format(path: &Path, explicit: Option<&str>) -> Result<FormatKind> {
    let token = match explicit.filter(|token| !token.is_empty()) {
        Some(token) => token,
        None => path.extension().and_then(|ext| ext.to_str()).unwrap_or(""),
    };
    let kind = token.parse::<FormatKind>()?;
    debug!("Resolved format {} for {}", kind, path.display());
    Ok(kind)
}

/// Load and save records in one specific format.
///
/// Implementors only translate between text and records; the provided
/// [`load`](Loader::load) and [`save`](Loader::save) do the file I/O. `save`
/// renders the whole output before opening the destination, so a rejected
/// dataset leaves the file untouched.
pub trait Loader: Send + Sync {
    /// The format this loader handles.
    fn format(&self) -> FormatKind;

    /// Parse a complete document.
    fn parse_str(&self, input: &str) -> Result<Dataset>;

    /// Render records as a complete document.
    fn render(&self, records: &[Record]) -> Result<String>;

    /// Read and parse the file at `path`. Input that is not UTF-8 is a
    /// parse error for this format, not an I/O error.
    fn load(&self, path: &Path) -> Result<Dataset> {
        let bytes = fs::read(path)?;
        let input = String::from_utf8(bytes).map_err(|e| ConvertError::parse(self.format(), e))?;
        let records = self.parse_str(&input)?;
        debug!(
            "Loaded {} records from {} as {}",
            records.len(),
            path.display(),
            self.format()
        );
        Ok(records)
    }

    /// Render `records` and write them to `path`.
    fn save(&self, records: &[Record], path: &Path) -> Result<()> {
        let output = self.render(records)?;
        fs::write(path, output)?;
        debug!(
            "Saved {} records to {} as {}",
            records.len(),
            path.display(),
            self.format()
        );
        Ok(())
    }
}

/// The format dispatcher.
///
/// Resolves which loader handles a path and drives the load/save calls.
/// Holds no state between calls besides the loaders themselves.
#[derive(Debug, Clone)]
pub struct Converter {
    csv: CsvLoader,
    json: JsonLoader,
    yaml: YamlLoader,
}

impl Converter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(&ConverterConfig::default())
    }

    /// Create a converter with the given configuration.
    pub fn with_config(config: ConverterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    fn from_valid_config(config: &ConverterConfig) -> Self {
        Self {
            csv: CsvLoader::new(config.sniff_sample_size),
            json: JsonLoader::new(config.json_indent),
            yaml: YamlLoader::new(),
        }
    }

    /// The loader responsible for `kind`.
    pub fn loader(&self, kind: FormatKind) -> &dyn Loader {
        match kind {
            FormatKind::Csv => &self.csv,
            FormatKind::Json => &self.json,
            FormatKind::Yaml => &self.yaml,
        }
    }

    /// Load the file at `path`.
    ///
    /// A zero-length file fails with [`ConvertError::EmptyInput`] before the
    /// format is even resolved.
    pub fn load(&self, path: &Path, explicit_format: Option<&str>) -> Result<Dataset> {
        if fs::metadata(path)?.len() == 0 {
            return Err(ConvertError::EmptyInput {
                path: path.to_path_buf(),
            });
        }
        let kind = resolve_format(path, explicit_format)?;
        self.loader(kind).load(path)
    }

    /// Save `records` to `path`.
    ///
    /// An empty dataset fails with [`ConvertError::EmptyDataset`] before the
    /// format is resolved, so it takes precedence over an unsupported format.
    pub fn save(&self, records: &[Record], path: &Path, explicit_format: Option<&str>) -> Result<()> {
        if records.is_empty() {
            return Err(ConvertError::EmptyDataset);
        }
        let kind = resolve_format(path, explicit_format)?;
        self.loader(kind).save(records, path)
    }

    /// Load `input` and save the records to `output`. Returns the record count.
    pub fn convert(
        &self,
        input: &Path,
        input_format: Option<&str>,
        output: &Path,
        output_format: Option<&str>,
    ) -> Result<usize> {
        let records = self.load(input, input_format)?;
        self.save(&records, output, output_format)?;
        Ok(records.len())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
