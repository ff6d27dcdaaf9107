#![no_main]

use crossref_mcp::models::{GetWorkByDoiInput, RawWork, SearchByAuthorInput, SearchByTitleInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First try to parse as valid JSON
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        // Then try each model type
        let _ = serde_json::from_value::<RawWork>(json.clone());
        let _ = serde_json::from_value::<SearchByTitleInput>(json.clone());
        let _ = serde_json::from_value::<SearchByAuthorInput>(json.clone());
        let _ = serde_json::from_value::<GetWorkByDoiInput>(json);
    }
});
