//! One-shot scout run: search, then extract and analyze each top result
//!
//! The run reuses the [`ToolDispatcher`], so every step is the same single
//! backend call an MCP client would trigger. Calls are sequential.

use crate::dispatcher::{is_error_result, result_text, ToolDispatcher};
use crate::error::{ScoutError, ScoutResult};
use crate::tools::builtin::search::organic_links;
use crate::tools::{AnalyzeArgs, ExtractArgs, SearchArgs, ToolArguments};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Query used when none is given
pub const DEFAULT_QUERY: &str = "10 Marla house DHA Phase 6 under 5 Crore";
/// Number of search results followed when none is given
pub const DEFAULT_LINK_LIMIT: usize = 3;
/// Characters of extracted content sent to the sentiment model
pub const ANALYZE_CHAR_LIMIT: usize = 512;

/// Outcome of a full scout run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoutReport {
    pub query: String,
    pub search_results: Value,
    pub links: Vec<String>,
    pub listings: Vec<ListingReport>,
}

/// Extraction and analysis of one search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingReport {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListingReport {
    fn failed(url: String, content: Option<String>, error: String) -> Self {
        Self {
            url,
            content,
            analysis: None,
            error: Some(error),
        }
    }
}

/// First `limit` characters of `text` (pure function)
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Parse tool output text back into JSON, falling back to a string value
fn text_to_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Search → extract → analyze pipeline
pub struct ScoutPipeline {
    dispatcher: ToolDispatcher,
}

impl ScoutPipeline {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Run the pipeline for `query`, following at most `limit` result links
    ///
    /// A failed search aborts the run; failures on individual links are
    /// recorded in their [`ListingReport`].
    pub async fn run(&self, query: &str, limit: usize) -> ScoutResult<ScoutReport> {
        let search = self
            .dispatcher
            .execute(ToolArguments::Search(SearchArgs {
                query: query.to_string(),
            }))
            .await?;

        let search_text = result_text(&search).unwrap_or_default();
        if is_error_result(&search) {
            return Err(ScoutError::Pipeline(search_text));
        }

        let search_results = text_to_value(&search_text);
        let links = organic_links(&search_results, limit);
        info!(query, links = links.len(), "Search complete");

        let mut listings = Vec::with_capacity(links.len());
        for url in &links {
            listings.push(self.scout_listing(url.clone()).await?);
        }

        Ok(ScoutReport {
            query: query.to_string(),
            search_results,
            links,
            listings,
        })
    }

    async fn scout_listing(&self, url: String) -> ScoutResult<ListingReport> {
        let extracted = self
            .dispatcher
            .execute(ToolArguments::Extract(ExtractArgs { url: url.clone() }))
            .await?;

        let content = result_text(&extracted).unwrap_or_default();
        if is_error_result(&extracted) {
            warn!(url = %url, "Extraction failed");
            return Ok(ListingReport::failed(url, None, content));
        }

        let analyzed = self
            .dispatcher
            .execute(ToolArguments::Analyze(AnalyzeArgs {
                text: truncate_chars(&content, ANALYZE_CHAR_LIMIT).to_string(),
            }))
            .await?;

        let analysis_text = result_text(&analyzed).unwrap_or_default();
        if is_error_result(&analyzed) {
            warn!(url = %url, "Analysis failed");
            return Ok(ListingReport::failed(url, Some(content), analysis_text));
        }

        Ok(ListingReport {
            url,
            content: Some(content),
            analysis: Some(text_to_value(&analysis_text)),
            error: None,
        })
    }
}
