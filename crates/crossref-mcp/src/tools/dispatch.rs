//! Query dispatch: one upstream call, classified into an [`Envelope`].
//!
//! Every path ends in a returned envelope. Upstream failures are data here,
//! never `Err`.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::{SearchField, WorksApi};
use crate::error::ClientResult;
use crate::models::{Envelope, NormalizedWork, RawWork, WorkQuery};

/// Resolver prefix accepted in front of a DOI. Only the URL form; `doi:` is kept.
static DOI_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://doi\.org/").expect("valid DOI prefix regex"));

/// Strip a leading `http(s)://doi.org/` from a DOI.
#[must_use]
pub fn clean_doi(doi: &str) -> &str {
    DOI_URL_PREFIX.find(doi).map_or(doi, |prefix| &doi[prefix.end()..])
}

/// Raw outcome of the upstream call, before classification.
enum Fetched {
    Many(Vec<RawWork>),
    One(Option<RawWork>),
}

/// Run `query` against the upstream and wrap the outcome.
pub async fn dispatch(api: &dyn WorksApi, query: WorkQuery) -> Envelope {
    tracing::debug!(kind = query.kind(), subject = query.subject(), "Dispatching query");

    let fetched = fetch(api, &query).await;
    classify(query, fetched)
}

async fn fetch(api: &dyn WorksApi, query: &WorkQuery) -> ClientResult<Fetched> {
    match query {
        WorkQuery::ByTitle { title, rows } => {
            api.search_works(SearchField::Title, title, *rows).await.map(Fetched::Many)
        }
        WorkQuery::ByAuthor { author, rows } => {
            api.search_works(SearchField::Author, author, *rows).await.map(Fetched::Many)
        }
        WorkQuery::ById { doi } => api.get_work(clean_doi(doi)).await.map(Fetched::One),
    }
}

fn classify(query: WorkQuery, fetched: ClientResult<Fetched>) -> Envelope {
    match fetched {
        Ok(Fetched::Many(works)) => {
            let results = works.iter().map(NormalizedWork::from).collect();
            Envelope::from_works(query, results)
        }
        Ok(Fetched::One(Some(work))) => Envelope::Work {
            query,
            result: NormalizedWork::from(&work),
        },
        Ok(Fetched::One(None)) => Envelope::not_found(query),
        Err(err) => {
            tracing::warn!(kind = query.kind(), error = %err, "Upstream request failed");
            Envelope::error(query, err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ClientError;
    use crate::models::Status;

    #[test]
    fn test_clean_doi() {
        assert_eq!(clean_doi("https://doi.org/10.1038/454554f"), "10.1038/454554f");
        assert_eq!(clean_doi("http://doi.org/10.1038/454554f"), "10.1038/454554f");
        assert_eq!(clean_doi("10.1038/454554f"), "10.1038/454554f");
    }

    #[test]
    fn test_clean_doi_keeps_other_prefixes() {
        assert_eq!(clean_doi("doi:10.1038/454554f"), "doi:10.1038/454554f");
        assert_eq!(clean_doi("HTTPS://doi.org/10.1/x"), "HTTPS://doi.org/10.1/x");
        assert_eq!(clean_doi("https://dx.doi.org/10.1/x"), "https://dx.doi.org/10.1/x");
        assert_eq!(clean_doi("https://doixorg/10.1/x"), "https://doixorg/10.1/x");
    }

    /// Records the DOI it was asked for and answers with a fixed outcome.
    struct FixedLookup {
        seen: Mutex<Vec<String>>,
        found: bool,
    }

    #[async_trait]
    impl WorksApi for FixedLookup {
        async fn search_works(
            &self,
            _field: SearchField,
            _query: &str,
            _rows: u32,
        ) -> ClientResult<Vec<RawWork>> {
            Err(ClientError::transport("unexpected search"))
        }

        async fn get_work(&self, doi: &str) -> ClientResult<Option<RawWork>> {
            self.seen.lock().unwrap().push(doi.to_string());
            Ok(self.found.then(RawWork::default))
        }
    }

    #[tokio::test]
    async fn test_lookup_uses_clean_doi_but_echoes_original() {
        let api = FixedLookup {
            seen: Mutex::new(vec![]),
            found: false,
        };
        let query = WorkQuery::ById {
            doi: "https://doi.org/10.1038/454554f".into(),
        };

        let envelope = dispatch(&api, query.clone()).await;

        assert_eq!(api.seen.lock().unwrap().as_slice(), ["10.1038/454554f"]);
        assert_eq!(envelope.status(), Status::NotFound);
        assert_eq!(envelope.query(), &query);
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let api = FixedLookup {
            seen: Mutex::new(vec![]),
            found: true,
        };
        let query = WorkQuery::ById {
            doi: "10.1/x".into(),
        };
        let envelope = dispatch(&api, query).await;
        assert_eq!(envelope.status(), Status::Success);
        assert_eq!(envelope.len(), 1);
    }
}
