//! Crossref MCP Server
//!
//! A Model Context Protocol (MCP) server for the Crossref REST API.
//! Lets LLM agents search works by title or author and fetch a work by DOI,
//! always answering with a predictable, fully-populated record shape.
//!
//! # Features
//!
//! - **3 MCP Tools**: `searchByTitle`, `searchByAuthor`, `getWorkByDOI`
//! - **Total records**: every field present, `null` where Crossref had nothing
//! - **Status envelopes**: `success`, `no_results`, `not_found`, `error`;
//!   upstream failures are reported, never raised
//!
//! # Example
//!
//! ```no_run
//! use crossref_mcp::{client::CrossrefClient, config::Config, models::WorkQuery, tools};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CrossrefClient::new(Config::from_env()?)?;
//!     let query = WorkQuery::ById { doi: "10.1038/454554f".to_string() };
//!
//!     let envelope = tools::dispatch(&client, query).await;
//!     println!("{}", serde_json::to_string_pretty(&envelope)?);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod server;
pub mod tools;

pub use client::{CrossrefClient, WorksApi};
pub use config::Config;
pub use error::{ClientError, ToolError};
pub use models::{Envelope, NormalizedWork, RawWork, WorkQuery, normalize};
