//! Handler spec parsing
//!
//! Normalizes raw steps into canonical steps. The rules are applied in
//! priority order:
//! 1. a bare string is a `Then` step
//! 2. an object with both `then` and `catch` is a `ThenCatch` step
//! 3. an object with only `then` is a `Then` step
//! 4. an object with only `catch` is a `Catch` step
//! 5. anything else is rejected, echoing the serialized input

use crate::error::{ParseError, Result};
use middleflow_core::{CanonicalStep, HandlerRef, RawStep};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Handler spec parser
pub struct HandlerSpecParser;

impl HandlerSpecParser {
    /// Parse one raw step
    pub fn parse(raw: &RawStep) -> Result<CanonicalStep> {
        let step = match raw {
            RawStep::Handler(reference) => CanonicalStep::Then(parse_reference(reference)?),
            RawStep::ThenAndCatch { then, catch } => {
                CanonicalStep::ThenCatch(parse_reference(then)?, parse_reference(catch)?)
            }
            RawStep::ThenOnly { then } => CanonicalStep::Then(parse_reference(then)?),
            RawStep::CatchOnly { catch } => CanonicalStep::Catch(parse_reference(catch)?),
            RawStep::Invalid(_) => {
                return Err(ParseError::InvalidSpec {
                    raw: raw.to_json_string(),
                })
            }
        };

        Ok(step)
    }

    /// Parse a list of raw steps, stopping at the first invalid one
    pub fn parse_all(raws: &[RawStep]) -> Result<Vec<CanonicalStep>> {
        raws.iter().map(Self::parse).collect()
    }

    /// Parse an untyped JSON value
    pub fn parse_value(value: &JsonValue) -> Result<CanonicalStep> {
        Self::parse(&RawStep::from_value(value.clone()))
    }

    /// Parse an untyped YAML value
    pub fn parse_yaml(value: &YamlValue) -> Result<CanonicalStep> {
        let json: JsonValue = serde_yaml::from_value(value.clone())?;
        Self::parse_value(&json)
    }
}

fn parse_reference(reference: &str) -> Result<HandlerRef> {
    Ok(HandlerRef::parse(reference)?)
}
