//! External ranking call for AI-enhanced search.
//!
//! Sends the query plus a reduced projection of each candidate tool to the
//! configured LLM and parses the reply into scored entries. The model is
//! free-text and unreliable, so parsing is defensive: a wrapped
//! `{"results": [...]}` object, a bare array, and an array embedded in prose
//! are all accepted. Anything else is a [`RankError::Parse`] and the caller
//! falls back to the unranked candidates.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LlmConfig;
use crate::models::{Id, Tool};

/// One scored entry from the ranking reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankEntry {
    pub tool_id: Id,
    /// 0-100. The ">50 only" cutoff lives in the prompt instructions and is
    /// not enforced on the reply.
    pub relevance_score: f32,
    #[serde(default)]
    pub relevance_explanation: String,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Failed to parse AI response")]
    Parse,
    #[error(transparent)]
    Call(#[from] anyhow::Error),
}

/// Reduced candidate projection sent to the model.
#[derive(Serialize)]
struct CandidateProjection<'a> {
    id: Id,
    name: &'a str,
    description: &'a str,
    category: Id,
}

/// Ask the LLM to rank `candidates` against `query`.
pub async fn rank_tools(
    client: &reqwest::Client,
    config: &LlmConfig,
    query: &str,
    candidates: &[Tool],
) -> Result<Vec<RankEntry>, RankError> {
    let projections: Vec<CandidateProjection<'_>> = candidates
        .iter()
        .map(|t| CandidateProjection {
            id: t.id,
            name: &t.name,
            description: &t.description,
            category: t.category_id,
        })
        .collect();
    let tool_data =
        serde_json::to_string_pretty(&projections).context("Failed to serialize candidates")?;

    let system_prompt = "You are an AI tool search expert helping users find the right AI tools \
                         for their needs.\nGiven a user query and a list of AI tools, rank the \
                         tools by relevance to the query.\nFor each tool, provide a brief \
                         explanation (20-30 words) of why it's relevant to the user's query.";

    let user_prompt = format!(
        "User search query: \"{query}\"\n\
         Available AI tools:\n{tool_data}\n\n\
         Return a JSON array of objects with the following structure:\n\
         [\n  {{\n    \"toolId\": number,\n    \"relevanceScore\": number (0-100),\n    \
         \"relevanceExplanation\": \"Brief explanation of why this tool is relevant\"\n  }}\n]\n\
         Include only tools that are actually relevant (score > 50). \
         Sort by relevanceScore in descending order."
    );

    let content = match config.provider.as_str() {
        "ollama" => call_ollama(client, config, system_prompt, &user_prompt).await?,
        "openai" => call_openai(client, config, system_prompt, &user_prompt).await?,
        other => return Err(anyhow::anyhow!("Unknown LLM provider: {other}").into()),
    };

    parse_rank_entries(&content)
}

/// Coerce the model's free-text reply into structured entries.
fn parse_rank_entries(content: &str) -> Result<Vec<RankEntry>, RankError> {
    // Wrapped object: {"results": [...]}
    #[derive(Deserialize)]
    struct Wrapped {
        results: Vec<RankEntry>,
    }
    if let Ok(w) = serde_json::from_str::<Wrapped>(content) {
        return Ok(w.results);
    }

    // Bare array
    if let Ok(entries) = serde_json::from_str::<Vec<RankEntry>>(content) {
        return Ok(entries);
    }

    // Array embedded in prose or a markdown code block
    if let (Some(start), Some(end)) = (content.find('['), content.rfind(']')) {
        if start < end {
            if let Ok(entries) = serde_json::from_str::<Vec<RankEntry>>(&content[start..=end]) {
                return Ok(entries);
            }
        }
    }

    Err(RankError::Parse)
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: Message,
}

async fn call_ollama(
    client: &reqwest::Client,
    config: &LlmConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> anyhow::Result<String> {
    let url = format!("{}/api/chat", config.base_url);

    let req = OllamaChatRequest {
        model: config.chat_model.clone(),
        messages: vec![
            Message {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            Message {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ],
        stream: false,
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama chat API for ranking")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama chat API returned {status}: {body}");
    }

    let body: OllamaChatResponse = resp.json().await?;
    Ok(body.message.content)
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Deserialize)]
struct OpenAiResponseMessage {
    content: String,
}

async fn call_openai(
    client: &reqwest::Client,
    config: &LlmConfig,
    system_prompt: &str,
    user_prompt: &str,
) -> anyhow::Result<String> {
    let url = format!("{}/v1/chat/completions", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();

    let req = OpenAiChatRequest {
        model: config.chat_model.clone(),
        messages: vec![
            OpenAiMessage {
                role: "system".to_string(),
                content: system_prompt.to_string(),
            },
            OpenAiMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            },
        ],
        temperature: 0.0,
        response_format: ResponseFormat {
            kind: "json_object".to_string(),
        },
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI chat API for ranking")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI chat API returned {status}: {body}");
    }

    let body: OpenAiChatResponse = resp.json().await?;
    Ok(body
        .choices
        .first()
        .map(|c| c.message.content.clone())
        .unwrap_or_default())
}
