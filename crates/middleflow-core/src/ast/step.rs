//! Step definitions
//!
//! A raw step is what a descriptor declares: a bare `"module.export"` string
//! or an object carrying `then` and/or `catch` references. The shape is
//! classified once, at deserialization time, so downstream code never sniffs
//! fields again. Unrecognized shapes are kept as [`RawStep::Invalid`] rather
//! than rejected, so that the parser can report them verbatim.

use super::handler::HandlerRef;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

/// A step as declared, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawStep {
    /// `"module.export"`
    Handler(String),

    /// `{ then: "module.export" }`
    ThenOnly { then: String },

    /// `{ catch: "module.export" }`
    CatchOnly { catch: String },

    /// `{ then: "...", catch: "..." }`
    ThenAndCatch { then: String, catch: String },

    /// Anything else, preserved for diagnostics
    Invalid(JsonValue),
}

impl RawStep {
    /// Classify an untyped value into a raw step shape
    pub fn from_value(value: JsonValue) -> Self {
        let classified = match &value {
            JsonValue::String(reference) => Some(RawStep::Handler(reference.clone())),
            JsonValue::Object(obj) => match (obj.get("then"), obj.get("catch")) {
                (Some(JsonValue::String(then)), Some(JsonValue::String(catch))) => {
                    Some(RawStep::ThenAndCatch {
                        then: then.clone(),
                        catch: catch.clone(),
                    })
                }
                (Some(JsonValue::String(then)), None) => {
                    Some(RawStep::ThenOnly { then: then.clone() })
                }
                (None, Some(JsonValue::String(catch))) => Some(RawStep::CatchOnly {
                    catch: catch.clone(),
                }),
                _ => None,
            },
            _ => None,
        };

        classified.unwrap_or(RawStep::Invalid(value))
    }

    /// The step in its wire shape, as it would appear in a descriptor
    pub fn to_value(&self) -> JsonValue {
        match self {
            RawStep::Handler(reference) => JsonValue::String(reference.clone()),
            RawStep::ThenOnly { then } => {
                let mut obj = Map::new();
                obj.insert("then".to_string(), JsonValue::String(then.clone()));
                JsonValue::Object(obj)
            }
            RawStep::CatchOnly { catch } => {
                let mut obj = Map::new();
                obj.insert("catch".to_string(), JsonValue::String(catch.clone()));
                JsonValue::Object(obj)
            }
            RawStep::ThenAndCatch { then, catch } => {
                let mut obj = Map::new();
                obj.insert("then".to_string(), JsonValue::String(then.clone()));
                obj.insert("catch".to_string(), JsonValue::String(catch.clone()));
                JsonValue::Object(obj)
            }
            RawStep::Invalid(value) => value.clone(),
        }
    }

    /// Compact JSON rendering used in error messages
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }
}

impl From<&str> for RawStep {
    fn from(reference: &str) -> Self {
        RawStep::Handler(reference.to_string())
    }
}

impl From<JsonValue> for RawStep {
    fn from(value: JsonValue) -> Self {
        RawStep::from_value(value)
    }
}

impl Serialize for RawStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Ok(RawStep::from_value(value))
    }
}

/// A normalized step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalStep {
    /// Runs on the success arm only
    Then(HandlerRef),

    /// Runs on the failure arm only
    Catch(HandlerRef),

    /// Success handler followed by a failure handler
    ThenCatch(HandlerRef, HandlerRef),
}

impl CanonicalStep {
    /// Success-path handler, if any
    pub fn then_side(&self) -> Option<&HandlerRef> {
        match self {
            CanonicalStep::Then(handler) | CanonicalStep::ThenCatch(handler, _) => Some(handler),
            CanonicalStep::Catch(_) => None,
        }
    }

    /// Failure-path handler, if any
    pub fn catch_side(&self) -> Option<&HandlerRef> {
        match self {
            CanonicalStep::Catch(handler) | CanonicalStep::ThenCatch(_, handler) => Some(handler),
            CanonicalStep::Then(_) => None,
        }
    }

    /// All handlers of the step, then-side first
    pub fn handlers(&self) -> impl Iterator<Item = &HandlerRef> {
        self.then_side().into_iter().chain(self.catch_side())
    }
}
