//! MCP tool implementations.
//!
//! Each tool:
//! 1. Parses its arguments into a typed input (defaults applied)
//! 2. Converts them into a [`WorkQuery`](crate::models::WorkQuery)
//! 3. Hands the query to the shared [`dispatch`] routine, which always
//!    returns an [`Envelope`]

pub mod dispatch;
mod works;

pub use dispatch::{clean_doi, dispatch};
pub use works::*;

use std::sync::Arc;

use crate::client::WorksApi;
use crate::error::ToolResult;
use crate::models::Envelope;

/// Tool execution context.
#[derive(Clone)]
pub struct ToolContext {
    /// Upstream API.
    pub api: Arc<dyn WorksApi>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(api: Arc<dyn WorksApi>) -> Self {
        Self { api }
    }

    /// Borrow the upstream API.
    #[must_use]
    pub fn api(&self) -> &dyn WorksApi {
        self.api.as_ref()
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g., "searchByTitle").
    fn name(&self) -> &'static str;

    /// Tool description for LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    ///
    /// `Err` only for host-level faults (bad arguments); upstream outcomes,
    /// failures included, come back as an [`Envelope`].
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Envelope>;
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(works::SearchByTitleTool),
        Box::new(works::SearchByAuthorTool),
        Box::new(works::GetWorkByDoiTool),
    ]
}
