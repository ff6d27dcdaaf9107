#![no_main]

use crossref_mcp::models::{GetWorkByDoiInput, SearchByTitleInput, WorkQuery};
use crossref_mcp::tools::clean_doi;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = serde_json::from_slice::<SearchByTitleInput>(data) {
        let _ = serde_json::to_string(&WorkQuery::from(input));
    }
    if let Ok(input) = serde_json::from_slice::<GetWorkByDoiInput>(data) {
        let cleaned = clean_doi(&input.doi);
        assert!(input.doi.ends_with(cleaned));
    }
});
