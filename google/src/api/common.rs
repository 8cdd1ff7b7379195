//! Common types and utilities for the Compute API

use serde::Deserialize;

/// Error envelope returned by Google APIs:
/// `{"error": {"code": 404, "message": "...", "errors": [...]}}`
#[derive(Debug, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleErrorStatus,
}

#[derive(Debug, Deserialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct GoogleErrorStatus {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<GoogleErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorItem {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_params_encode_values() {
        let params = ApiQueryParams::new()
            .add("pageToken", "abc")
            .add("filter", "name:subnet network:my net")
            .add_optional("maxResults", None::<u32>);

        let query = params.to_query_string();
        assert!(query.starts_with('?'));
        assert!(query.contains("pageToken=abc"));
        assert!(query.contains("filter=name%3Asubnet%20network%3Amy%20net"));
        assert!(!query.contains("maxResults"));
    }

    #[test]
    fn empty_params_produce_empty_string() {
        assert_eq!(ApiQueryParams::new().to_query_string(), "");
    }

    #[test]
    fn error_envelope_parses() {
        let body = r#"{"error":{"code":403,"message":"Forbidden","errors":[{"reason":"forbidden","message":"Forbidden"}]}}"#;
        let envelope: GoogleErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code, 403);
        assert_eq!(envelope.error.errors.len(), 1);
        assert_eq!(envelope.error.errors[0].reason, "forbidden");
    }
}
