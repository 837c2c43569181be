//! JSON loader.
//!
//! Types come straight from JSON; nothing is coerced.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{ConvertError, Result};
use crate::record::{find_non_finite, Dataset, Record};

use super::{FormatKind, Loader};

/// Loader for a JSON array of objects.
#[derive(Debug, Clone)]
pub struct JsonLoader {
    indent: Vec<u8>,
}

impl JsonLoader {
    /// Create a loader that pretty-prints with `indent` spaces per level.
    pub fn new(indent: usize) -> Self {
        Self {
            indent: vec![b' '; indent],
        }
    }
}

impl Default for JsonLoader {
    fn default() -> Self {
        Self::new(crate::config::ConverterConfig::DEFAULT_JSON_INDENT)
    }
}

impl Loader for JsonLoader {
    fn format(&self) -> FormatKind {
        FormatKind::Json
    }

    fn parse_str(&self, input: &str) -> Result<Dataset> {
        serde_json::from_str(input).map_err(|e| ConvertError::parse(FormatKind::Json, e))
    }

    fn render(&self, records: &[Record]) -> Result<String> {
        if records.is_empty() {
            return Err(ConvertError::EmptyDataset);
        }
        // serde_json would write these as null.
        if let Some((record, field)) = find_non_finite(records) {
            return Err(ConvertError::serialize(
                FormatKind::Json,
                format!(
                    "record {} field '{}' holds an infinite or NaN float, which JSON cannot represent",
                    record, field
                ),
            ));
        }
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(&self.indent);
        let mut serializer = Serializer::with_formatter(&mut out, formatter);
        records
            .serialize(&mut serializer)
            .map_err(|e| ConvertError::serialize(FormatKind::Json, e))?;
        out.push(b'\n');
        String::from_utf8(out).map_err(|e| ConvertError::serialize(FormatKind::Json, e))
    }
}
