// Adapters layer: concrete document sources and output sinks.

pub mod http;
pub mod local;

pub use http::HttpSource;
pub use local::{LocalFileSink, LocalSource};

use crate::utils::error::{CvError, Result};
use serde_json::Value;

/// Parses a fetched body, treating `null` as a missing document.
pub(crate) fn parse_document(name: &str, body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body).map_err(|e| CvError::DocumentLoad {
        name: name.to_string(),
        message: format!("invalid JSON: {}", e),
    })?;
    if value.is_null() {
        return Err(CvError::DocumentLoad {
            name: name.to_string(),
            message: "Empty JSON data".to_string(),
        });
    }
    Ok(value)
}
