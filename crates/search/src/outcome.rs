// crates/search/src/outcome.rs
use jobtrack_types::Record;
use serde::Serialize;

/// Terminal result of one online search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum Outcome {
    /// New records only: anything already tracked locally was dropped.
    Results(Vec<Record>),
    Cancelled,
    /// User-facing failure detail.
    Failed(String),
}

impl Outcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The status line shown after the search for `term` ends.
    pub fn status_line(&self, term: &str) -> String {
        match self {
            Outcome::Results(records) if records.is_empty() => {
                format!("Online search for '{term}' returned no new results")
            }
            Outcome::Results(records) => {
                format!("Found {} new online results for '{term}'", records.len())
            }
            Outcome::Cancelled => format!("Online search for '{term}' cancelled"),
            Outcome::Failed(detail) => format!("Online search failed: {detail}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert_eq!(
            Outcome::Results(vec![]).status_line("rust"),
            "Online search for 'rust' returned no new results"
        );
        assert_eq!(
            Outcome::Results(vec![Record::new("a", "b")]).status_line("rust"),
            "Found 1 new online results for 'rust'"
        );
        assert_eq!(Outcome::Cancelled.status_line("rust"), "Online search for 'rust' cancelled");
        assert_eq!(
            Outcome::Failed("HTTP request failed: boom".into()).status_line("rust"),
            "Online search failed: HTTP request failed: boom"
        );
    }

    #[test]
    fn test_serialize_shape() {
        let json = serde_json::to_value(Outcome::Failed("boom".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "failed", "detail": "boom"}));
        let json = serde_json::to_value(Outcome::Cancelled).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "cancelled"}));
    }
}
