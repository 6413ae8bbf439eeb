//! Build configuration

use crate::error::{Result, SdkError};
use middleflow_compiler::PrePosPolicy;
use middleflow_core::RawStep;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Configuration of one build pass
///
/// Every field has a default, so an empty mapping is a valid configuration:
///
/// ```yaml
/// folder_name: .middleware
/// clean_folder: true
/// pre: [auth.check]
/// pos: []
/// pre_pos_policy: reject
/// service_path: .
/// runtime: nodejs20.x
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output folder, relative to the service root
    pub folder_name: String,

    /// Remove the output folder on `clean()`
    pub clean_folder: bool,

    /// Steps prepended to every selected function
    pub pre: Vec<RawStep>,

    /// Steps appended to every selected function
    pub pos: Vec<RawStep>,

    pub pre_pos_policy: PrePosPolicy,

    /// Service root; handler module paths are relative to it
    pub service_path: PathBuf,

    /// Deployment runtime id
    pub runtime: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            folder_name: ".middleware".to_string(),
            clean_folder: true,
            pre: Vec::new(),
            pos: Vec::new(),
            pre_pos_policy: PrePosPolicy::default(),
            service_path: PathBuf::from("."),
            runtime: "nodejs20.x".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a YAML mapping
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn with_folder_name(mut self, folder_name: impl Into<String>) -> Self {
        self.folder_name = folder_name.into();
        self
    }

    pub fn with_clean_folder(mut self, clean_folder: bool) -> Self {
        self.clean_folder = clean_folder;
        self
    }

    pub fn with_pre(mut self, pre: Vec<RawStep>) -> Self {
        self.pre = pre;
        self
    }

    pub fn with_pos(mut self, pos: Vec<RawStep>) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_pre_pos_policy(mut self, policy: PrePosPolicy) -> Self {
        self.pre_pos_policy = policy;
        self
    }

    pub fn with_service_path(mut self, service_path: impl Into<PathBuf>) -> Self {
        self.service_path = service_path.into();
        self
    }

    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Output folder name without trailing separators
    pub fn folder(&self) -> &str {
        self.folder_name.trim_end_matches('/')
    }

    /// Path from the output folder back to the service root, e.g. `..`
    ///
    /// The folder must stay inside the service: absolute paths and `..`
    /// components are rejected.
    pub fn path_to_root(&self) -> Result<String> {
        let mut hops = Vec::new();

        for component in Path::new(self.folder()).components() {
            match component {
                Component::Normal(_) => hops.push(".."),
                Component::CurDir => {}
                _ => {
                    return Err(SdkError::Config(format!(
                        "folder_name '{}' must be a relative path inside the service",
                        self.folder_name
                    )));
                }
            }
        }

        if hops.is_empty() {
            return Err(SdkError::Config(
                "folder_name must name a folder below the service root".to_string(),
            ));
        }

        Ok(hops.join("/"))
    }
}
