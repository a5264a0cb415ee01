use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::upload::UploadedFile;

// ===== Service Request Types =====

/// Parts of the `POST /process` multipart form.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file: UploadedFile,
    pub job_title: String,
    pub job_description: String,
}

// ===== Service Response Types =====

/// Loosely shaped `/process` reply. Every field is optional, a field of the
/// wrong type reads as absent, and the `evaluation` object is left untyped
/// for the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cleaned: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rewritten: Option<String>,
    #[serde(rename = "final", default, deserialize_with = "lenient_text")]
    pub final_text: Option<String>,
    #[serde(default)]
    pub evaluation: Value,
}

/// Strings pass through and bare numbers or booleans keep their JSON text.
/// Arrays and objects are dropped.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

impl AnalysisResult {
    /// Read a reply body that is already valid JSON. Anything that is not an
    /// object carries no fields, so it reads as an empty reply.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// The server-reported soft error, if `error` is truthy.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
