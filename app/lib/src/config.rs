//! Converter configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Tunables for the format loaders.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Number of leading bytes of a CSV input inspected for delimiter detection.
    pub sniff_sample_size: usize,
    /// Spaces per indentation level when saving JSON.
    pub json_indent: usize,
}

impl ConverterConfig {
    /// Default delimiter sniffing sample, in bytes.
    pub const DEFAULT_SNIFF_SAMPLE_SIZE: usize = 1024;
    /// Default JSON indentation width.
    pub const DEFAULT_JSON_INDENT: usize = 4;
    /// Largest accepted JSON indentation width.
    pub const MAX_JSON_INDENT: usize = 16;

    /// Set the delimiter sniffing sample size.
    pub fn with_sniff_sample_size(mut self, size: usize) -> Self {
        self.sniff_sample_size = size;
        self
    }

    /// Set the JSON indentation width.
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.sniff_sample_size == 0 {
            return Err(ConvertError::InvalidConfig(
                "sniff_sample_size must be greater than zero".to_string(),
            ));
        }
        if self.json_indent > Self::MAX_JSON_INDENT {
            return Err(ConvertError::InvalidConfig(format!(
                "json_indent must be at most {}, got {}",
                Self::MAX_JSON_INDENT,
                self.json_indent
            )));
        }
        Ok(())
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sniff_sample_size: Self::DEFAULT_SNIFF_SAMPLE_SIZE,
            json_indent: Self::DEFAULT_JSON_INDENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.sniff_sample_size, 1024);
        assert_eq!(config.json_indent, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ConverterConfig = serde_json::from_str(r#"{"json_indent": 2}"#).unwrap();
        assert_eq!(config.json_indent, 2);
        assert_eq!(config.sniff_sample_size, 1024);
    }

    #[test]
    fn test_zero_sample_rejected() {
        let config = ConverterConfig::default().with_sniff_sample_size(0);
        assert!(matches!(config.validate(), Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn test_huge_indent_rejected() {
        let config = ConverterConfig::default().with_json_indent(64);
        assert!(matches!(config.validate(), Err(ConvertError::InvalidConfig(_))));
    }
}
