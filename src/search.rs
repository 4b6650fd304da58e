//! Ranked-search pipeline: eligibility gate, external ranking call,
//! reconciliation, and the fallback contract.
//!
//! The ranking backend is a network call against free-text model output, so
//! the pipeline is built around one guarantee: the enhancement can never
//! make the base search fail or return nothing when substring matches exist.
//! Every failure path ends at the original candidate list with a diagnostic
//! attached. No retries; a failed call is not retried within the request.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::llm::rank::{self, RankEntry, RankError};
use crate::models::{RankedTool, Tool};

/// Minimum trimmed query length for the AI pass to be worth attempting.
const MIN_AI_QUERY_CHARS: usize = 3;

/// Outcome of one search call, ready to be wrapped into the response body.
#[derive(Debug, Clone)]
pub struct RankedSearch {
    pub results: Vec<RankedTool>,
    pub ai_enhanced: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl RankedSearch {
    fn plain(candidates: Vec<Tool>) -> Self {
        Self {
            results: candidates.into_iter().map(RankedTool::from).collect(),
            ai_enhanced: false,
            message: None,
            error: None,
        }
    }

    fn fallback_with_message(candidates: Vec<Tool>, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::plain(candidates)
        }
    }

    fn fallback_with_error(candidates: Vec<Tool>, error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::plain(candidates)
        }
    }
}

/// Turn substring-filtered candidates into the final result list, optionally
/// re-ranked by the external LLM.
pub async fn ranked_search(
    client: &reqwest::Client,
    config: &LlmConfig,
    timeout: Duration,
    query: &str,
    candidates: Vec<Tool>,
    use_ai: bool,
) -> RankedSearch {
    // Eligibility gate: AI pass only for a real query over a non-empty
    // candidate set.
    if !use_ai
        || candidates.is_empty()
        || query.trim().chars().count() < MIN_AI_QUERY_CHARS
    {
        return RankedSearch::plain(candidates);
    }

    let call = rank::rank_tools(client, config, query, &candidates);
    let entries = match tokio::time::timeout(timeout, call).await {
        Ok(Ok(entries)) => entries,
        Ok(Err(RankError::Parse)) => {
            tracing::warn!("AI ranking reply was unparseable for query {query:?}");
            return RankedSearch::fallback_with_error(candidates, "Failed to parse AI response");
        }
        Ok(Err(RankError::Call(e))) => {
            tracing::warn!("AI ranking call failed for query {query:?}: {e:#}");
            return RankedSearch::fallback_with_error(
                candidates,
                "AI enhancement failed, showing standard search results",
            );
        }
        Err(_) => {
            tracing::warn!(
                "AI ranking timed out after {}s for query {query:?}",
                timeout.as_secs()
            );
            return RankedSearch::fallback_with_error(
                candidates,
                "AI enhancement failed, showing standard search results",
            );
        }
    };

    let ranked = reconcile(entries, &candidates);
    if ranked.is_empty() {
        // Model returned nothing usable (or only hallucinated ids)
        return RankedSearch::fallback_with_message(
            candidates,
            "No AI-ranked results available, showing standard search results",
        );
    }

    RankedSearch {
        results: ranked,
        ai_enhanced: true,
        message: Some("AI-enhanced search results".to_string()),
        error: None,
    }
}

/// Keep only entries whose toolId matches a candidate (the model sometimes
/// invents ids), attach score and explanation, sort descending by score.
fn reconcile(entries: Vec<RankEntry>, candidates: &[Tool]) -> Vec<RankedTool> {
    let by_id: HashMap<u32, &Tool> = candidates.iter().map(|t| (t.id, t)).collect();

    let mut ranked: Vec<RankedTool> = entries
        .into_iter()
        .filter_map(|entry| {
            let tool = by_id.get(&entry.tool_id)?;
            Some(RankedTool {
                tool: (*tool).clone(),
                relevance_score: Some(entry.relevance_score),
                relevance_explanation: Some(entry.relevance_explanation),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
