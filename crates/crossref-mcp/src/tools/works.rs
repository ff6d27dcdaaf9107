//! Work tools: searchByTitle, searchByAuthor, getWorkByDOI.

use serde::de::DeserializeOwned;
use serde_json::json;

use super::{McpTool, ToolContext, dispatch};
use crate::config::api::DEFAULT_ROWS;
use crate::error::{ToolError, ToolResult};
use crate::models::{
    Envelope, GetWorkByDoiInput, SearchByAuthorInput, SearchByTitleInput, WorkQuery,
};

/// Deserialize tool arguments and run the resulting query.
async fn run<I>(ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Envelope>
where
    I: DeserializeOwned + Into<WorkQuery> + Send,
{
    let params: I = serde_json::from_value(input).map_err(ToolError::InvalidArguments)?;
    Ok(dispatch::dispatch(ctx.api(), params.into()).await)
}

fn rows_schema() -> serde_json::Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "default": DEFAULT_ROWS,
        "description": "Number of results to return"
    })
}

/// Search works by title.
pub struct SearchByTitleTool;

#[async_trait::async_trait]
impl McpTool for SearchByTitleTool {
    fn name(&self) -> &'static str {
        "searchByTitle"
    }

    fn description(&self) -> &'static str {
        "Search for works by title in Crossref"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "The title to search for"
                },
                "rows": rows_schema()
            },
            "required": ["title"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Envelope> {
        run::<SearchByTitleInput>(ctx, input).await
    }
}

/// Search works by author.
pub struct SearchByAuthorTool;

#[async_trait::async_trait]
impl McpTool for SearchByAuthorTool {
    fn name(&self) -> &'static str {
        "searchByAuthor"
    }

    fn description(&self) -> &'static str {
        "Search for works by author in Crossref"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author": {
                    "type": "string",
                    "description": "The author name to search for"
                },
                "rows": rows_schema()
            },
            "required": ["author"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Envelope> {
        run::<SearchByAuthorInput>(ctx, input).await
    }
}

/// Retrieve a single work by DOI.
pub struct GetWorkByDoiTool;

#[async_trait::async_trait]
impl McpTool for GetWorkByDoiTool {
    fn name(&self) -> &'static str {
        "getWorkByDOI"
    }

    fn description(&self) -> &'static str {
        "Retrieve a specific work by its DOI"
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "doi": {
                    "type": "string",
                    "description": "The DOI to look up (a https://doi.org/ prefix is accepted)"
                }
            },
            "required": ["doi"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<Envelope> {
        run::<GetWorkByDoiInput>(ctx, input).await
    }
}
