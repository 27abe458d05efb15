//! Fields derived from structured `show version` output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ShapeError;
use crate::json_path;
use crate::shape;

/// Genie-style `show version` document.
///
/// Everything of interest sits under the top-level `version` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionInfo(Value);

impl VersionInfo {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn field(&self, key: &str) -> Result<&str, ShapeError> {
        shape::str_at(&self.0, &json_path!["version", key])
    }

    pub fn chassis(&self) -> Result<&str, ShapeError> {
        self.field("chassis")
    }

    pub fn image_id(&self) -> Result<&str, ShapeError> {
        self.field("image_id")
    }

    pub fn system_image(&self) -> Result<&str, ShapeError> {
        self.field("system_image")
    }

    pub fn os(&self) -> Result<&str, ShapeError> {
        self.field("os")
    }

    pub fn platform(&self) -> Result<&str, ShapeError> {
        self.field("platform")
    }

    pub fn chassis_serial(&self) -> Result<&str, ShapeError> {
        self.field("chassis_sn")
    }

    /// Number of stack members listed under `version.switch_num`.
    pub fn switch_count(&self) -> Result<usize, ShapeError> {
        Ok(shape::object_at(&self.0, &json_path!["version", "switch_num"])?.len())
    }
}

impl From<Value> for VersionInfo {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
