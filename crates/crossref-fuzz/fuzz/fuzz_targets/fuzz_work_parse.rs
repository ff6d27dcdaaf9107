#![no_main]

use crossref_mcp::models::{CrossrefResponse, RawWork, WorkList, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any record that parses must normalize and serialize without panicking
    if let Ok(work) = serde_json::from_slice::<RawWork>(data) {
        let normalized = normalize(Some(&work));
        let _ = serde_json::to_string(&normalized.ok());
    }
    let _ = serde_json::from_slice::<CrossrefResponse<WorkList>>(data);
});
