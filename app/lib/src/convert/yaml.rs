//! YAML loader.
//!
//! Parsing goes through serde, so tags and other non-data constructs are
//! rejected rather than interpreted.

use crate::error::{ConvertError, Result};
use crate::record::{Dataset, Record};

use super::{FormatKind, Loader};

/// Loader for a YAML sequence of mappings.
#[derive(Debug, Clone, Default)]
pub struct YamlLoader;

impl YamlLoader {
    /// Create a YAML loader.
    pub fn new() -> Self {
        Self
    }
}

impl Loader for YamlLoader {
    fn format(&self) -> FormatKind {
        FormatKind::Yaml
    }

    fn parse_str(&self, input: &str) -> Result<Dataset> {
        serde_yaml::from_str(input).map_err(|e| ConvertError::parse(FormatKind::Yaml, e))
    }

    fn render(&self, records: &[Record]) -> Result<String> {
        if records.is_empty() {
            return Err(ConvertError::EmptyDataset);
        }
        serde_yaml::to_string(records).map_err(|e| ConvertError::serialize(FormatKind::Yaml, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Value;

    const PEOPLE: &str = "- birthday: '1988-12-12'
  name: john
  salary: 100
- birthday: '1972-12-12'
  name: kevin
  salary: 200
";

    #[test]
    fn test_parse_sequence_of_mappings() {
        let records = YamlLoader::new().parse_str(PEOPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["birthday"], Value::from("1988-12-12"));
        assert_eq!(records[0]["salary"], Value::Integer(100));
        assert_eq!(records[1]["name"], Value::from("kevin"));
    }

    #[test]
    fn test_parse_native_types() {
        let records = YamlLoader::new()
            .parse_str("- flag: true\n  ratio: 0.5\n  missing: ~\n  tags: [a, b]\n")
            .unwrap();
        assert_eq!(records[0]["flag"], Value::Bool(true));
        assert_eq!(records[0]["ratio"], Value::Float(0.5));
        assert_eq!(records[0]["missing"], Value::Null);
        assert!(records[0]["tags"].is_nested());
    }

    #[test]
    fn test_parse_rejects_tags() {
        let result = YamlLoader::new().parse_str("- value: !custom 1\n");
        assert!(matches!(result, Err(ConvertError::ParseError { .. })));
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        let result = YamlLoader::new().parse_str("just text\n");
        assert!(matches!(result, Err(ConvertError::ParseError { format: FormatKind::Yaml, .. })));
    }

    #[test]
    fn test_render_block_style() {
        let records = YamlLoader::new().parse_str(PEOPLE).unwrap();
        let text = YamlLoader::new().render(&records).unwrap();
        assert!(text.starts_with("- birthday:"));
        assert!(text.contains("\n  name: john\n"));
        assert_eq!(YamlLoader::new().parse_str(&text).unwrap(), records);
    }

    #[test]
    fn test_render_empty_rejected() {
        assert!(matches!(
            YamlLoader::new().render(&[]),
            Err(ConvertError::EmptyDataset)
        ));
    }
}
