//! YAML Parser
//!
//! Small helpers over `serde_yaml::Value` shared by the declaration parser.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub(crate) struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub(crate) fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required mapping from YAML value
    pub(crate) fn as_mapping<'a>(
        obj: &'a YamlValue,
        field: &str,
    ) -> Result<&'a serde_yaml::Mapping> {
        obj.as_mapping().ok_or_else(|| ParseError::InvalidValue {
            field: field.to_string(),
            message: "expected a mapping".to_string(),
        })
    }

    /// Get a required sequence from YAML value
    pub(crate) fn as_sequence<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        obj.as_sequence().ok_or_else(|| ParseError::InvalidValue {
            field: field.to_string(),
            message: "expected a sequence".to_string(),
        })
    }
}
