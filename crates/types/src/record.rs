// crates/types/src/record.rs
use serde::{Deserialize, Serialize};

use crate::labels::{ExperienceLevel, Status};

/// A single tracked job opening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(rename = "sourceURL", default, skip_serializing_if = "String::is_empty")]
    pub source_url: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    /// Full path of the résumé sent for this opening.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_file_name: Option<String>,
}

impl Record {
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the keyword set. Blank entries and repeats are dropped.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = dedup_keywords(keywords);
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn key(&self) -> IdentityKey {
        IdentityKey::new(&self.title, &self.company)
    }

    /// Keywords joined the way they are typed in: `"rust, backend"`.
    pub fn keywords_display(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Case-insensitive (title, company) pair identifying a record.
///
/// Two records with the same key are the same opening, whatever their
/// other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    title: String,
    company: String,
}

impl IdentityKey {
    pub fn new(title: &str, company: &str) -> Self {
        Self {
            title: title.to_lowercase(),
            company: company.to_lowercase(),
        }
    }

    /// Lowercased title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lowercased company.
    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.title.to_lowercase() == self.title && record.company.to_lowercase() == self.company
    }
}

/// Split a comma-separated keyword string into the record's keyword set.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    dedup_keywords(raw.split(','))
}

fn dedup_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for kw in keywords {
        let kw = kw.as_ref().trim();
        if !kw.is_empty() && !out.iter().any(|k| k == kw) {
            out.push(kw.to_string());
        }
    }
    out
}
