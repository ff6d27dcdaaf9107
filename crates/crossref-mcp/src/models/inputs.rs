//! Input models for MCP tool parameters.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::api::DEFAULT_ROWS;

/// Input for `searchByTitle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchByTitleInput {
    /// The title to search for.
    pub title: String,

    /// Number of results to return.
    #[serde(default = "default_rows", deserialize_with = "integral_rows")]
    pub rows: u32,
}

/// Input for `searchByAuthor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchByAuthorInput {
    /// The author name to search for.
    pub author: String,

    /// Number of results to return.
    #[serde(default = "default_rows", deserialize_with = "integral_rows")]
    pub rows: u32,
}

/// Input for `getWorkByDOI`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetWorkByDoiInput {
    /// The DOI to look up, bare or as a `https://doi.org/` URL.
    pub doi: String,
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

/// Non-negative integer; integral floats such as `2.0` are accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_rows<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0)
                .map(|n| n as u64)
        })
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            D::Error::custom(format!("invalid rows `{number}`, expected a non-negative integer"))
        })
}

/// One query against Crossref, tagged by kind.
///
/// Serializes untagged, so it doubles as the `query` echo of an envelope:
/// `{"title": .., "rows": ..}`, `{"author": .., "rows": ..}` or `{"doi": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WorkQuery {
    /// Bibliographic title search.
    ByTitle { title: String, rows: u32 },
    /// Author name search.
    ByAuthor { author: String, rows: u32 },
    /// Single work lookup by DOI, exactly as the caller supplied it.
    ById { doi: String },
}

impl WorkQuery {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ByTitle { .. } => "title",
            Self::ByAuthor { .. } => "author",
            Self::ById { .. } => "doi",
        }
    }

    /// The caller's search term or identifier.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            Self::ByTitle { title, .. } => title,
            Self::ByAuthor { author, .. } => author,
            Self::ById { doi } => doi,
        }
    }
}

impl From<SearchByTitleInput> for WorkQuery {
    fn from(input: SearchByTitleInput) -> Self {
        Self::ByTitle {
            title: input.title,
            rows: input.rows,
        }
    }
}

impl From<SearchByAuthorInput> for WorkQuery {
    fn from(input: SearchByAuthorInput) -> Self {
        Self::ByAuthor {
            author: input.author,
            rows: input.rows,
        }
    }
}

impl From<GetWorkByDoiInput> for WorkQuery {
    fn from(input: GetWorkByDoiInput) -> Self {
        Self::ById { doi: input.doi }
    }
}
