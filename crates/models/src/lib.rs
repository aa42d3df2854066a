mod errors;

pub use errors::RequestError;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Case-insensitive header map (keys are stored lowercased)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.inner.insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// HTTP response as seen by the scan engine
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Declared Content-Length, falling back to the received body length
    pub fn content_length(&self) -> u64 {
        self.headers
            .get("content-length")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(self.body.len() as u64)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    pub fn redirect(&self) -> Option<&str> {
        self.headers.get("location")
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Why a path ended up where it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Genuine discovery
    Found,
    /// 404, or the suffix-class baseline page
    NotFound,
    /// Matches the fingerprint of an already discovered wildcard cluster
    Wildcard,
    /// Near-identical to a page already accepted in the same size bucket
    Duplicate,
}

impl Classification {
    pub fn is_found(self) -> bool {
        matches!(self, Classification::Found)
    }
}

/// Outcome of probing one candidate path
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub path: String,
    /// `None` whenever the path was rejected; a 404 is always `None`
    pub status: Option<u16>,
    pub response: Response,
    pub reason: Classification,
}

impl ProbeResult {
    pub fn new(path: String, response: Response, reason: Classification) -> Self {
        let status = if reason.is_found() && !response.is_not_found() {
            Some(response.status)
        } else {
            None
        };

        Self {
            path,
            status,
            response,
            reason,
        }
    }

    /// Strips the response body, keeping what reports need
    pub fn to_match(&self) -> ScanMatch {
        ScanMatch {
            path: self.path.clone(),
            status: self.status.unwrap_or(self.response.status),
            content_length: self.response.content_length(),
            content_type: self.response.content_type().map(str::to_string),
            redirect: self.response.redirect().map(str::to_string),
        }
    }
}

/// Accepted match, kept for the lifetime of a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanMatch {
    pub path: String,
    pub status: u16,
    pub content_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Transport failure recorded for a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub path: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/html");

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert!(headers.contains("Content-type"));
    }

    #[test]
    fn test_content_length_prefers_header() {
        let headers: Headers = [("Content-Length", "2048")].into_iter().collect();
        let response = Response::new(200, headers, "short");
        assert_eq!(response.content_length(), 2048);

        let headers: Headers = [("Content-Length", "garbage")].into_iter().collect();
        let response = Response::new(200, headers, "short");
        assert_eq!(response.content_length(), 5);
    }

    #[test]
    fn test_rejected_results_have_no_status() {
        let ok = Response::new(200, Headers::new(), "page");
        let result = ProbeResult::new("admin".to_string(), ok.clone(), Classification::Wildcard);
        assert_eq!(result.status, None);

        let result = ProbeResult::new("admin".to_string(), ok, Classification::Found);
        assert_eq!(result.status, Some(200));

        let missing = Response::new(404, Headers::new(), "");
        let result = ProbeResult::new("gone".to_string(), missing, Classification::NotFound);
        assert_eq!(result.status, None);
    }

    #[test]
    fn test_match_drops_body() {
        let headers: Headers = [("Location", "/login"), ("Content-Type", "text/html")]
            .into_iter()
            .collect();
        let response = Response::new(302, headers, vec![b'x'; 1500]);
        let result = ProbeResult::new("admin/".to_string(), response, Classification::Found);

        let found = result.to_match();
        assert_eq!(found.status, 302);
        assert_eq!(found.content_length, 1500);
        assert_eq!(found.redirect.as_deref(), Some("/login"));
        assert_eq!(found.content_type.as_deref(), Some("text/html"));
    }
}
