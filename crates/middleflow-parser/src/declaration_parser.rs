//! Declaration parsing
//!
//! Reads function declarations and global step lists from YAML fragments.
//! Only the fragments the compiler needs are understood here; the host
//! descriptor as a whole is never parsed.

use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use middleflow_core::{FunctionDeclaration, RawStep};
use serde_yaml::Value as YamlValue;

/// Function declaration parser
pub struct DeclarationParser;

impl DeclarationParser {
    /// Parse a single function declaration
    pub fn parse_function(yaml_str: &str) -> Result<FunctionDeclaration> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::function_from_yaml(None, &yaml)
    }

    /// Parse a mapping of function name to declaration, keeping declared order
    ///
    /// ```yaml
    /// someFunc1:
    ///   handler: someFunc1.handler
    ///   middleware:
    ///     pre: [auth.check]
    /// someFunc2:
    ///   middleware: [auth.check, someFunc2.handler]
    /// ```
    pub fn parse_functions(yaml_str: &str) -> Result<Vec<FunctionDeclaration>> {
        let yaml = YamlParser::parse(yaml_str)?;
        let mapping = YamlParser::as_mapping(&yaml, "functions")?;

        mapping
            .iter()
            .map(|(key, value)| {
                let key = key.as_str().ok_or_else(|| ParseError::InvalidValue {
                    field: "functions".to_string(),
                    message: "function names must be strings".to_string(),
                })?;
                Self::function_from_yaml(Some(key), value)
            })
            .collect()
    }

    /// Parse a list of raw steps (e.g. a global `pre` or `pos` list)
    pub fn parse_steps(yaml_str: &str) -> Result<Vec<RawStep>> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::steps_from_yaml(&yaml, "steps")
    }

    /// Convert a YAML sequence into raw steps
    pub fn steps_from_yaml(yaml: &YamlValue, field: &str) -> Result<Vec<RawStep>> {
        YamlParser::as_sequence(yaml, field)?
            .iter()
            .map(|item| Ok(serde_yaml::from_value::<RawStep>(item.clone())?))
            .collect()
    }

    /// Convert a YAML value into a function declaration
    ///
    /// `key` is the descriptor key, used when the declaration has no `name`.
    pub fn function_from_yaml(key: Option<&str>, yaml: &YamlValue) -> Result<FunctionDeclaration> {
        let mut declaration: FunctionDeclaration = serde_yaml::from_value(yaml.clone())?;

        if declaration.name.is_empty() {
            declaration.name = key
                .map(|k| k.to_string())
                .ok_or_else(|| ParseError::MissingField {
                    field: "name".to_string(),
                })?;
        }

        log::debug!(
            "parsed declaration for function {} (handler: {:?}, middleware: {})",
            declaration.name,
            declaration.handler,
            declaration.middleware.is_some()
        );

        Ok(declaration)
    }
}
