// crates/search/src/types.rs
//! Wire types for the Jooble search API.
//!
//! Only the fields jobtrack reads are typed; everything else is ignored.
//! Upstream sends `null` for blank strings often enough that every string
//! field tolerates it.

use serde::{Deserialize, Deserializer, Serialize};

/// POST body: `{"keywords": "...", "location": "...", "page": 1}`.
#[derive(Debug, Clone, Serialize)]
pub struct JoobleRequest<'a> {
    pub keywords: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoobleResponse {
    pub total_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub jobs: Vec<JoobleJob>,
    pub error: Option<JoobleError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JoobleJob {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub snippet: String,
    #[serde(deserialize_with = "nullable")]
    pub salary: String,
    #[serde(deserialize_with = "nullable")]
    pub source: String,
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub job_type: String,
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub updated: String,
    /// Number or string depending on the endpoint version.
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JoobleError {
    pub code: i64,
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_optionals() {
        let req = JoobleRequest {
            keywords: "rust",
            location: None,
            page: Some(1),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"keywords":"rust","page":1}"#
        );
    }

    #[test]
    fn test_response_deserialize() {
        let json = r#"{
            "totalCount": 2,
            "jobs": [
                {"title": "Rust Dev", "company": "Ferrous", "link": "https://j/1",
                 "snippet": "systems", "type": "Full-time", "id": 123, "salary": null},
                {"title": "Go Dev", "company": null, "link": "https://j/2", "id": "abc"}
            ]
        }"#;
        let resp: JoobleResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_count, 2);
        assert_eq!(resp.jobs.len(), 2);
        assert_eq!(resp.jobs[0].job_type, "Full-time");
        assert_eq!(resp.jobs[0].salary, "");
        assert_eq!(resp.jobs[1].company, "");
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_response_with_error() {
        let json = r#"{"totalCount": 0, "jobs": null, "error": {"code": 401, "message": "bad key"}}"#;
        let resp: JoobleResponse = serde_json::from_str(json).unwrap();
        assert!(resp.jobs.is_empty());
        let err = resp.error.unwrap();
        assert_eq!(err.code, 401);
        assert_eq!(err.message, "bad key");
    }
}
