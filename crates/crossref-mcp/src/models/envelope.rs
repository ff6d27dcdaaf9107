//! Uniform response wrapper for every tool call.

use serde::{Serialize, Serializer};

use super::{NormalizedWork, WorkQuery};

/// Outcome of one query, tagged by `status`.
///
/// Both success variants serialize with `"status": "success"`; they differ
/// only in carrying a list (`count` + `results`) or a single `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Envelope {
    /// One or more works matched a search.
    #[serde(rename = "success")]
    Works {
        query: WorkQuery,
        count: usize,
        results: Vec<NormalizedWork>,
    },

    /// A DOI lookup found its work.
    #[serde(rename = "success")]
    Work {
        query: WorkQuery,
        result: NormalizedWork,
    },

    /// A search succeeded but matched nothing.
    NoResults { query: WorkQuery, results: NoWorks },

    /// A DOI lookup succeeded but the upstream returned no record.
    NotFound { query: WorkQuery, message: String },

    /// The upstream call failed.
    Error { message: String, query: WorkQuery },
}

/// Status tag of an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    NoResults,
    NotFound,
    Error,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NoResults => "no_results",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Envelope {
    /// Build a search outcome; an empty list becomes `no_results`.
    #[must_use]
    pub fn from_works(query: WorkQuery, results: Vec<NormalizedWork>) -> Self {
        if results.is_empty() {
            Self::NoResults {
                query,
                results: NoWorks,
            }
        } else {
            Self::Works {
                query,
                count: results.len(),
                results,
            }
        }
    }

    /// Build a `not_found` outcome for a DOI lookup.
    #[must_use]
    pub fn not_found(query: WorkQuery) -> Self {
        let message = format!("No work found with DOI: {}", query.subject());
        Self::NotFound { query, message }
    }

    /// Build an `error` outcome.
    #[must_use]
    pub fn error(query: WorkQuery, message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            query,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Works { .. } | Self::Work { .. } => Status::Success,
            Self::NoResults { .. } => Status::NoResults,
            Self::NotFound { .. } => Status::NotFound,
            Self::Error { .. } => Status::Error,
        }
    }

    /// The echoed caller arguments.
    #[must_use]
    pub const fn query(&self) -> &WorkQuery {
        match self {
            Self::Works { query, .. }
            | Self::Work { query, .. }
            | Self::NoResults { query, .. }
            | Self::NotFound { query, .. }
            | Self::Error { query, .. } => query,
        }
    }

    /// Number of works carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Works { results, .. } => results.len(),
            Self::Work { .. } => 1,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The always-empty `results` list of a `no_results` envelope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoWorks;

impl Serialize for NoWorks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq;

        serializer.serialize_seq(Some(0))?.end()
    }
}
