//! Work data model matching the Crossref REST API schema, and its
//! normalized form.
//!
//! Crossref omits (or nulls) any field it has no data for. [`RawWork`] models
//! every field as optional and [`NormalizedWork`] is the total, flat shape
//! handed back to callers: every key is always present, `null` or `[]`
//! standing in for data the upstream did not have.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Text of a scalar: strings as-is, numbers as their decimal form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Optional text field. Numbers are kept as text; any other shape is absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// List of texts. A lone scalar counts as a one-element list; entries of any
/// other shape are dropped.
fn lenient_texts<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

/// Sequence of records, skipping entries that are not objects or do not fit `T`.
fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| T::deserialize(item).ok())
        .collect();
    if kept.len() < total {
        tracing::debug!(skipped = total - kept.len(), "Dropped malformed upstream entries");
    }
    Ok(kept)
}

/// Any value that does not fit `T` reads as `T::default()`.
fn default_on_mismatch<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(T::deserialize(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// `[[2019, 12, 1]]`; parts that are not integers (or integral strings) read
/// as `null`.
fn lenient_date_parts<'de, D>(deserializer: D) -> Result<Vec<Vec<Option<i32>>>, D::Error>
where
    D: Deserializer<'de>,
{
    fn part(value: Value) -> Option<i32> {
        match value {
            Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    let Value::Array(dates) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(dates
        .into_iter()
        .map(|date| match date {
            Value::Array(parts) => parts.into_iter().map(part).collect(),
            _ => Vec::new(),
        })
        .collect())
}

/// A work record as returned by Crossref (`message` of `/works/{doi}`, or
/// one entry of `message.items` of `/works`).
///
/// Every field is read leniently: a value of an unexpected shape degrades to
/// "absent" instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWork {
    /// Titles; the first is the primary one.
    #[serde(default, deserialize_with = "lenient_texts")]
    pub title: Vec<String>,

    /// Authors in upstream order.
    #[serde(default, deserialize_with = "lenient_records")]
    pub author: Vec<RawAuthor>,

    /// Publication date (earliest of print/online).
    #[serde(default, deserialize_with = "default_on_mismatch")]
    pub published: Option<DateParts>,

    /// Digital Object Identifier.
    #[serde(rename = "DOI", default, deserialize_with = "lenient_text")]
    pub doi: Option<String>,

    /// Resolver URL.
    #[serde(rename = "URL", default, deserialize_with = "lenient_text")]
    pub url: Option<String>,

    /// Work type (e.g., "journal-article", "book-chapter").
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub work_type: Option<String>,

    /// Publisher name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub publisher: Option<String>,

    /// Journal issue.
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue: Option<String>,

    /// Journal volume.
    #[serde(default, deserialize_with = "lenient_text")]
    pub volume: Option<String>,

    /// Abstract (usually JATS XML).
    #[serde(default, deserialize_with = "lenient_text")]
    pub r#abstract: Option<String>,

    /// Container (journal, book, proceedings) titles; the first is canonical.
    #[serde(rename = "container-title", default, deserialize_with = "lenient_texts")]
    pub container_title: Vec<String>,
}

/// Author entry of a [`RawWork`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAuthor {
    /// Given name(s).
    #[serde(default, deserialize_with = "lenient_text")]
    pub given: Option<String>,

    /// Family name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub family: Option<String>,
}

/// Crossref partial date: `{"date-parts": [[2019, 12, 1]]}`.
///
/// Parts may be `null` when the upstream only knows the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    #[serde(rename = "date-parts", default, deserialize_with = "lenient_date_parts")]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

/// `message` payload of a `/works` query.
///
/// Items are read one by one, so a malformed entry is dropped without losing
/// the rest of the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkList {
    #[serde(default, deserialize_with = "lenient_records")]
    pub items: Vec<RawWork>,

    /// Total matches upstream (not just this page).
    #[serde(rename = "total-results", default, deserialize_with = "default_on_mismatch")]
    pub total_results: Option<u64>,
}

/// Top-level Crossref response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossrefResponse<T> {
    #[serde(default)]
    pub message: Option<T>,
}

/// Simplified work record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWork {
    pub title: Option<String>,
    pub authors: Vec<NormalizedAuthor>,
    pub published: Option<Published>,
    #[serde(rename = "type")]
    pub work_type: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    pub container: Option<String>,
    pub publisher: Option<String>,
    pub issue: Option<String>,
    pub volume: Option<String>,
    pub r#abstract: Option<String>,
}

/// Author with a derived display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedAuthor {
    pub given: Option<String>,
    pub family: Option<String>,
    /// `given family`, trimmed; empty when both are absent.
    pub name: String,
}

/// Canonical publication date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Published {
    pub date_parts: Vec<i32>,
    /// Parts joined with `-`, e.g. "2019-12-1".
    pub date_string: Option<String>,
}

/// Returned by [`normalize`] when there is no record at all.
///
/// Serializes as `{"error": "No data available"}`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No data available")]
pub struct NoData;

impl Serialize for NoData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error", &self.to_string())?;
        map.end()
    }
}

/// Normalize an optional upstream record.
///
/// # Errors
///
/// Returns [`NoData`] when `raw` is `None`.
pub fn normalize(raw: Option<&RawWork>) -> Result<NormalizedWork, NoData> {
    raw.map(NormalizedWork::from).ok_or(NoData)
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl From<&RawAuthor> for NormalizedAuthor {
    fn from(author: &RawAuthor) -> Self {
        let given = non_empty(author.given.as_ref());
        let family = non_empty(author.family.as_ref());
        let name = format!(
            "{} {}",
            given.as_deref().unwrap_or_default(),
            family.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();

        Self {
            given,
            family,
            name,
        }
    }
}

impl From<&DateParts> for Published {
    fn from(date: &DateParts) -> Self {
        let date_parts: Vec<i32> = date
            .date_parts
            .first()
            .map(|parts| parts.iter().flatten().copied().collect())
            .unwrap_or_default();

        let date_string = if date_parts.is_empty() {
            None
        } else {
            Some(date_parts.iter().map(ToString::to_string).collect::<Vec<_>>().join("-"))
        };

        Self {
            date_parts,
            date_string,
        }
    }
}

impl From<&RawWork> for NormalizedWork {
    fn from(work: &RawWork) -> Self {
        Self {
            title: non_empty(work.title.first()),
            authors: work.author.iter().map(NormalizedAuthor::from).collect(),
            published: work.published.as_ref().map(Published::from),
            work_type: non_empty(work.work_type.as_ref()),
            doi: non_empty(work.doi.as_ref()),
            url: non_empty(work.url.as_ref()),
            container: non_empty(work.container_title.first()),
            publisher: non_empty(work.publisher.as_ref()),
            issue: non_empty(work.issue.as_ref()),
            volume: non_empty(work.volume.as_ref()),
            r#abstract: non_empty(work.r#abstract.as_ref()),
        }
    }
}
