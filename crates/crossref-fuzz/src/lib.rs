//! Fuzzing library for crossref-mcp.
//!
//! Fuzz targets cover deserialization of Crossref work payloads, their
//! normalization, and tool argument parsing.
//!
//! # Usage
//!
//! ```bash
//! cd crates/crossref-fuzz
//! cargo +nightly fuzz run fuzz_work_parse -- -max_total_time=60
//! ```

pub use crossref_mcp::models;
