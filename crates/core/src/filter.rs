// crates/core/src/filter.rs
//! Local filter/sort engine.
//!
//! Everything here is a pure function over a snapshot taken by the caller
//! (see [`crate::RecordStore::snapshot`]). A [`SearchQuery`] is compiled once
//! into a [`Matcher`]; the per-record check never re-inspects the selector.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use jobtrack_types::{ExperienceLevel, Record, Status};

use crate::error::QueryError;

/// Which part of a record a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Everywhere,
    Title,
    Company,
    Description,
    Keywords,
    Status,
    Experience,
}

impl SearchField {
    pub const ALL: &'static [SearchField] = &[
        SearchField::Everywhere,
        SearchField::Title,
        SearchField::Company,
        SearchField::Description,
        SearchField::Keywords,
        SearchField::Status,
        SearchField::Experience,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SearchField::Everywhere => "everywhere",
            SearchField::Title => "title",
            SearchField::Company => "company",
            SearchField::Description => "description",
            SearchField::Keywords => "keywords",
            SearchField::Status => "status",
            SearchField::Experience => "experience",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| QueryError::UnknownField(s.to_string()))
    }
}

/// A field selector plus the text the user typed (or picked).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub field: SearchField,
    pub text: String,
}

impl SearchQuery {
    pub fn new(field: SearchField, text: impl Into<String>) -> Self {
        Self {
            field,
            text: text.into(),
        }
    }

    /// Resolve the query into a matcher.
    ///
    /// Status and experience queries must name one of the enumerated labels
    /// (case-insensitively). An empty free-text query matches everything.
    pub fn compile(&self) -> Result<Matcher, QueryError> {
        let term = self.text.to_lowercase();
        let matcher = match self.field {
            SearchField::Status => Matcher::Status(self.text.parse().map_err(|source| {
                QueryError::Label {
                    field: self.field,
                    source,
                }
            })?),
            SearchField::Experience => {
                Matcher::Experience(self.text.parse().map_err(|source| QueryError::Label {
                    field: self.field,
                    source,
                })?)
            }
            _ if term.is_empty() => Matcher::All,
            SearchField::Everywhere => Matcher::Everywhere(term),
            SearchField::Title => Matcher::Title(term),
            SearchField::Company => Matcher::Company(term),
            SearchField::Description => Matcher::Description(term),
            SearchField::Keywords => Matcher::Keywords(term),
        };
        Ok(matcher)
    }
}

/// A compiled query. Free-text variants hold the lowercased term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    All,
    Everywhere(String),
    Title(String),
    Company(String),
    Description(String),
    Keywords(String),
    Status(Status),
    Experience(ExperienceLevel),
}

impl Matcher {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Matcher::All => true,
            Matcher::Everywhere(term) => {
                contains(&record.title, term)
                    || contains(&record.company, term)
                    || contains(&record.description, term)
                    || contains(record.status.label(), term)
                    || contains(record.experience_level.label(), term)
                    || any_keyword(record, term)
            }
            Matcher::Title(term) => contains(&record.title, term),
            Matcher::Company(term) => contains(&record.company, term),
            Matcher::Description(term) => contains(&record.description, term),
            Matcher::Keywords(term) => any_keyword(record, term),
            Matcher::Status(status) => record.status == *status,
            Matcher::Experience(level) => record.experience_level == *level,
        }
    }
}

fn contains(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}

fn any_keyword(record: &Record, lowered_term: &str) -> bool {
    record.keywords.iter().any(|kw| contains(kw, lowered_term))
}

/// Stable filter: matching records in snapshot order.
pub fn filter(records: &[Record], matcher: &Matcher) -> Vec<Record> {
    if *matcher == Matcher::All {
        return records.to_vec();
    }
    records.iter().filter(|r| matcher.matches(r)).cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Title,
    Company,
    Status,
}

impl FromStr for SortColumn {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortColumn::Title),
            "company" => Ok(SortColumn::Company),
            "status" => Ok(SortColumn::Status),
            _ => Err(QueryError::UnknownSortColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: SortColumn, order: SortOrder) -> Self {
        Self { column, order }
    }
}

fn sort_key(record: &Record, column: SortColumn) -> String {
    match column {
        SortColumn::Title => record.title.to_lowercase(),
        SortColumn::Company => record.company.to_lowercase(),
        SortColumn::Status => record.status.label().to_lowercase(),
    }
}

/// Stable in-place sort. Descending inverts the comparator, so records with
/// equal keys keep their relative order under both orders.
pub fn sort(records: &mut [Record], column: SortColumn, order: SortOrder) {
    records.sort_by(|a, b| {
        let ord: Ordering = sort_key(a, column).cmp(&sort_key(b, column));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Filter then sort: the list a table view shows.
pub fn view(records: &[Record], matcher: &Matcher, spec: SortSpec) -> Vec<Record> {
    let mut out = filter(records, matcher);
    sort(&mut out, spec.column, spec.order);
    out
}
