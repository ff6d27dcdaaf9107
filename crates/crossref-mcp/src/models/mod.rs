//! Data models for Crossref works, tool inputs and response envelopes.
//!
//! Upstream models use `#[serde(default)]` for every optional field and
//! `#[serde(rename = "...")]` to match Crossref's hyphenated/uppercase keys.

mod envelope;
mod inputs;
mod work;

pub use envelope::{Envelope, NoWorks, Status};
pub use inputs::{GetWorkByDoiInput, SearchByAuthorInput, SearchByTitleInput, WorkQuery};
pub use work::{
    CrossrefResponse, DateParts, NoData, NormalizedAuthor, NormalizedWork, Published, RawAuthor,
    RawWork, WorkList, normalize,
};
