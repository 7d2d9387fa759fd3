// crates/search/src/client.rs
//! Online search client for the Jooble API.

use async_trait::async_trait;
use jobtrack_core::{ConfigError, Settings};
use jobtrack_types::Record;
use reqwest::StatusCode;

use crate::cancel::CancelSignal;
use crate::error::ClientError;
use crate::types::{JoobleError, JoobleJob, JoobleRequest, JoobleResponse};

/// A remote source of job openings.
///
/// Implementations must honour `signal`: once it closes, return
/// [`ClientError::Cancelled`] promptly instead of finishing the exchange.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, term: &str, signal: &CancelSignal) -> Result<Vec<Record>, ClientError>;

    /// Source name for logging (e.g. "jooble").
    fn name(&self) -> &str;
}

/// Client for `POST {endpoint}{api_key}`.
///
/// No timeout and no retries: a hung request ends only when the signal closes.
#[derive(Debug, Clone)]
pub struct JoobleClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    location: String,
}

impl JoobleClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            location: String::new(),
        }
    }

    /// Build from settings. Fails only if no API key is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let key = settings.api_key()?;
        Ok(Self::new(&settings.api_endpoint, key).with_location(&settings.location))
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn url(&self) -> String {
        if self.endpoint.ends_with('/') {
            format!("{}{}", self.endpoint, self.api_key)
        } else {
            format!("{}/{}", self.endpoint, self.api_key)
        }
    }
}

fn ensure_open(signal: &CancelSignal, stage: &'static str) -> Result<(), ClientError> {
    if signal.is_closed() {
        tracing::debug!(stage, "search cancelled at checkpoint");
        return Err(ClientError::Cancelled { stage });
    }
    Ok(())
}

#[async_trait]
impl JobSource for JoobleClient {
    async fn search(&self, term: &str, signal: &CancelSignal) -> Result<Vec<Record>, ClientError> {
        ensure_open(signal, "before sending")?;

        let body = JoobleRequest {
            keywords: term,
            location: (!self.location.is_empty()).then_some(self.location.as_str()),
            page: Some(1),
        };
        let request = self
            .http
            .post(self.url())
            .json(&body)
            .build()
            .map_err(|e| ClientError::RequestBuild(e.to_string()))?;

        tracing::debug!(term, "sending jooble search");
        // Dropping the in-flight future on close aborts the connection.
        let response = tokio::select! {
            biased;
            _ = signal.closed() => return Err(ClientError::Cancelled { stage: "while awaiting response" }),
            res = self.http.execute(request) => res,
        };
        let response = response.map_err(|e| {
            if signal.is_closed() {
                ClientError::Cancelled { stage: "while awaiting response" }
            } else {
                ClientError::Transport(e)
            }
        })?;

        ensure_open(signal, "before reading response")?;
        let status = response.status();
        let bytes = tokio::select! {
            biased;
            _ = signal.closed() => return Err(ClientError::Cancelled { stage: "while reading response" }),
            res = response.bytes() => res,
        };
        let bytes = bytes.map_err(|e| {
            if signal.is_closed() {
                ClientError::Cancelled { stage: "while reading response" }
            } else {
                ClientError::ReadBody(e)
            }
        })?;

        ensure_open(signal, "before decoding")?;
        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let parsed = decode_response(&bytes)?;
        if let Some(err) = parsed.error {
            return Err(ClientError::Api {
                code: err.code,
                message: err.message,
            });
        }

        let mut records = Vec::with_capacity(parsed.jobs.len());
        for job in parsed.jobs {
            ensure_open(signal, "while mapping results")?;
            if let Some(record) = map_job(job) {
                records.push(record);
            }
        }
        tracing::info!(term, total = parsed.total_count, mapped = records.len(), "jooble search finished");
        Ok(records)
    }

    fn name(&self) -> &str {
        "jooble"
    }
}

/// Decode a 200 body. A body that is not a search response but is a bare
/// `{code, message}` error object is reported as an API error.
fn decode_response(bytes: &[u8]) -> Result<JoobleResponse, ClientError> {
    match serde_json::from_slice::<JoobleResponse>(bytes) {
        Ok(resp) => Ok(resp),
        Err(e) => {
            if let Ok(err) = serde_json::from_slice::<JoobleError>(bytes) {
                if !err.message.is_empty() {
                    return Err(ClientError::Api {
                        code: err.code,
                        message: err.message,
                    });
                }
            }
            Err(ClientError::Decode {
                message: e.to_string(),
                body: String::from_utf8_lossy(bytes).into_owned(),
            })
        }
    }
}

/// Upstream entries carry no keywords, status or experience level, so the
/// record gets the defaults. Entries without a title or link are skipped.
fn map_job(job: JoobleJob) -> Option<Record> {
    if job.title.trim().is_empty() || job.link.trim().is_empty() {
        tracing::warn!(
            title = %job.title,
            company = %job.company,
            link = %job.link,
            "skipping jooble entry without title or link"
        );
        return None;
    }
    Some(
        Record::new(job.title, job.company)
            .with_description(job.snippet)
            .with_source_url(job.link),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobtrack_types::{ExperienceLevel, Status};

    #[test]
    fn test_url_joins_key() {
        assert_eq!(JoobleClient::new("https://jooble.org/api/", "k").url(), "https://jooble.org/api/k");
        assert_eq!(JoobleClient::new("http://127.0.0.1:1234", "k").url(), "http://127.0.0.1:1234/k");
    }

    #[test]
    fn test_map_job_defaults() {
        let job = JoobleJob {
            title: "Rust Dev".into(),
            company: "Ferrous".into(),
            snippet: "systems work".into(),
            link: "https://j/1".into(),
            ..JoobleJob::default()
        };
        let record = map_job(job).unwrap();
        assert_eq!(record.title, "Rust Dev");
        assert_eq!(record.description, "systems work");
        assert_eq!(record.source_url, "https://j/1");
        assert_eq!(record.status, Status::New);
        assert_eq!(record.experience_level, ExperienceLevel::Unspecified);
        assert!(record.keywords.is_empty());
    }

    #[test]
    fn test_map_job_skips_incomplete() {
        let no_link = JoobleJob {
            title: "Rust Dev".into(),
            ..JoobleJob::default()
        };
        let no_title = JoobleJob {
            link: "https://j/1".into(),
            ..JoobleJob::default()
        };
        assert!(map_job(no_link).is_none());
        assert!(map_job(no_title).is_none());
    }

    #[test]
    fn test_decode_bare_error_object() {
        let err = decode_response(br#"{"jobs": "oops", "code": 403, "message": "Forbidden"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Api { code: 403, .. }));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_response(b"<html>").unwrap_err();
        match err {
            ClientError::Decode { body, .. } => assert_eq!(body, "<html>"),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_signal_short_circuits() {
        // unroutable endpoint: would fail if we ever sent
        let client = JoobleClient::new("http://127.0.0.1:9/", "k");
        let signal = CancelSignal::new();
        signal.close();
        let err = client.search("rust", &signal).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
