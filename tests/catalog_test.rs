//! Integration tests for the catalog store, search pipeline, and API
//! handlers.
//!
//! These exercise the full flow without a running LLM: the configured
//! ranking backend points at a closed port, so AI-ranked searches take the
//! error-fallback path deterministically. Tests that need a live reply run
//! a local stub serving a canned Ollama-style response.

use std::time::Duration;

use axum::body::to_bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use serde_json::Value;

use tool_catalog::api;
use tool_catalog::api::tools::{ListToolsQuery, SubmitToolRequest};
use tool_catalog::config::{Config, LlmConfig};
use tool_catalog::models::{NewCategory, NewTool, PricingType, ToolPatch};
use tool_catalog::search::ranked_search;
use tool_catalog::state::AppState;

const TEST_TOKEN: &str = "test-token";

/// State with an empty store, auth configured, and an unreachable LLM.
fn empty_state() -> AppState {
    let config = Config {
        llm: LlmConfig {
            provider: "ollama".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            chat_model: "test".to_string(),
            api_key: None,
        },
        rank_timeout_secs: 5,
        api_token: Some(TEST_TOKEN.to_string()),
        skip_seed: true,
        ..Config::default()
    };
    AppState::new(config).unwrap()
}

/// State with the demo catalog seeded.
fn seeded_state() -> AppState {
    let state = empty_state();
    tool_catalog::seed::populate(&mut state.store.write());
    state
}

fn auth_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, format!("Bearer {TEST_TOKEN}").parse().unwrap());
    headers
}

fn new_tool(name: &str, description: &str, category_id: u32, url: &str) -> NewTool {
    NewTool {
        name: name.to_string(),
        slug: tool_catalog::models::slugify(name),
        description: description.to_string(),
        category_id,
        website_url: url.to_string(),
        affiliate_url: None,
        image_url: None,
        rating: None,
        featured: false,
        pricing_type: PricingType::Free,
        seo: None,
    }
}

fn submit_request(name: &str, category_id: u32, url: &str) -> SubmitToolRequest {
    SubmitToolRequest {
        name: Some(name.to_string()),
        description: Some(format!("{name} description")),
        category_id: Some(category_id),
        website_url: Some(url.to_string()),
        affiliate_url: None,
        image_url: None,
        rating: None,
        pricing_type: None,
        seo: None,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve a canned Ollama-style chat reply on an ephemeral local port and
/// return the base URL to point the ranking backend at.
async fn spawn_ranking_backend(content: &'static str) -> String {
    let app = axum::Router::new().route(
        "/api/chat",
        axum::routing::post(move || async move {
            axum::Json(serde_json::json!({
                "message": { "role": "assistant", "content": content }
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn llm_at(base_url: String) -> LlmConfig {
    LlmConfig {
        provider: "ollama".to_string(),
        base_url,
        chat_model: "test".to_string(),
        api_key: None,
    }
}

// ─── Search and detail joins ──────────────────────────────

#[tokio::test]
async fn test_seeded_search_and_detail_join() {
    let state = empty_state();
    {
        let mut store = state.store.write();
        let coding = store.create_category(NewCategory {
            name: "Coding".to_string(),
            slug: "coding".to_string(),
            description: "AI coding assistants".to_string(),
        });
        store.create_tool(new_tool(
            "GitHub Copilot",
            "AI pair programmer",
            coding.id,
            "https://github.com/features/copilot",
        ));
    }

    // Substring search hits the description
    let hits = state.store.read().search_tools("pair");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "GitHub Copilot");

    // Detail view joins the category, with empty associated content
    let details = state
        .store
        .read()
        .tool_with_details_by_slug("github-copilot")
        .unwrap();
    assert_eq!(details.category.slug, "coding");
    assert!(details.blog.is_none());
    assert!(details.prompts.is_empty());
    assert!(details.guide.is_none());
}

// ─── Search endpoint ──────────────────────────────────────

#[tokio::test]
async fn test_search_endpoint_plain() {
    let state = seeded_state();
    let response = api::tools::list_tools(
        State(state),
        Query(ListToolsQuery {
            q: Some("pair".to_string()),
            ai: None,
            category_id: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["query"], "pair");
    assert_eq!(body["aiEnhanced"], false);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["results"][0]["name"], "GitHub Copilot");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_ai_search_with_dead_backend_still_succeeds() {
    let state = seeded_state();

    let plain = api::tools::list_tools(
        State(state.clone()),
        Query(ListToolsQuery {
            q: Some("writing".to_string()),
            ai: None,
            category_id: None,
        }),
    )
    .await;
    let plain_body = body_json(plain).await;

    let ai = api::tools::list_tools(
        State(state),
        Query(ListToolsQuery {
            q: Some("writing".to_string()),
            ai: Some("true".to_string()),
            category_id: None,
        }),
    )
    .await;

    // Never a 500: the enhancement failure is recovered internally
    assert_eq!(ai.status(), StatusCode::OK);
    let ai_body = body_json(ai).await;

    // Same record set as the AI-disabled search, plus a diagnostic
    assert_eq!(ai_body["results"], plain_body["results"]);
    assert_eq!(ai_body["aiEnhanced"], false);
    assert!(!ai_body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_ai_search_with_only_unknown_ids_falls_back_with_message() {
    // The backend answers, but every toolId it names is invented, so
    // reconciliation leaves nothing and the unranked candidates come back.
    let base_url = spawn_ranking_backend(
        r#"[{"toolId": 9999, "relevanceScore": 95, "relevanceExplanation": "made up"}]"#,
    )
    .await;
    let state = seeded_state();
    let candidates = state.store.read().search_tools("writing");
    assert!(candidates.len() > 1);

    let out = ranked_search(
        &state.http_client,
        &llm_at(base_url),
        Duration::from_secs(5),
        "writing tools",
        candidates.clone(),
        true,
    )
    .await;

    assert!(!out.ai_enhanced);
    assert!(out.error.is_none());
    assert_eq!(
        out.message.as_deref(),
        Some("No AI-ranked results available, showing standard search results")
    );
    assert_eq!(out.results.len(), candidates.len());
    for (result, candidate) in out.results.iter().zip(&candidates) {
        assert_eq!(result.tool.id, candidate.id);
        assert!(result.relevance_score.is_none());
    }
}

#[tokio::test]
async fn test_ai_search_success_annotates_and_sorts() {
    // A fresh store assigns tool ids 1 and 2; the backend scores the second
    // tool higher, so the ranked order inverts the insertion order.
    let base_url = spawn_ranking_backend(
        r#"[{"toolId": 1, "relevanceScore": 61, "relevanceExplanation": "related"},
            {"toolId": 2, "relevanceScore": 88, "relevanceExplanation": "strong match"}]"#,
    )
    .await;
    let state = empty_state();
    let candidates = {
        let mut store = state.store.write();
        let coding = store.create_category(NewCategory {
            name: "Coding".to_string(),
            slug: "coding".to_string(),
            description: "AI coding assistants".to_string(),
        });
        store.create_tool(new_tool(
            "GitHub Copilot",
            "AI pair programmer",
            coding.id,
            "https://github.com/features/copilot",
        ));
        store.create_tool(new_tool(
            "Tabnine",
            "AI code completion tool",
            coding.id,
            "https://tabnine.com",
        ));
        store.search_tools("ai")
    };
    assert_eq!(candidates.len(), 2);

    let out = ranked_search(
        &state.http_client,
        &llm_at(base_url),
        Duration::from_secs(5),
        "code completion",
        candidates,
        true,
    )
    .await;

    assert!(out.ai_enhanced);
    assert!(out.error.is_none());
    assert_eq!(out.message.as_deref(), Some("AI-enhanced search results"));
    assert_eq!(out.results.len(), 2);
    assert_eq!(out.results[0].tool.id, 2);
    assert_eq!(out.results[0].relevance_score, Some(88.0));
    assert_eq!(
        out.results[0].relevance_explanation.as_deref(),
        Some("strong match")
    );
    assert_eq!(out.results[1].tool.id, 1);
    assert_eq!(out.results[1].relevance_score, Some(61.0));
}

#[tokio::test]
async fn test_list_tools_by_category_and_all() {
    let state = seeded_state();
    let coding_id = state
        .store
        .read()
        .category_by_slug("coding")
        .unwrap()
        .id;

    let filtered = api::tools::list_tools(
        State(state.clone()),
        Query(ListToolsQuery {
            q: None,
            ai: None,
            category_id: Some(coding_id),
        }),
    )
    .await;
    let filtered_body = body_json(filtered).await;
    let filtered_tools = filtered_body.as_array().unwrap();
    assert!(!filtered_tools.is_empty());
    assert!(filtered_tools
        .iter()
        .all(|t| t["categoryId"] == coding_id));

    let all = api::tools::list_tools(State(state.clone()), Query(ListToolsQuery::default())).await;
    let all_body = body_json(all).await;
    assert_eq!(
        all_body.as_array().unwrap().len(),
        state.store.read().tools().len()
    );
}

// ─── Category routes ──────────────────────────────────────

#[tokio::test]
async fn test_category_tools_unknown_slug_is_404() {
    let state = seeded_state();
    let err = api::categories::category_tools(State(state), Path("no-such-category".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tool_detail_unknown_slug_is_404() {
    let state = seeded_state();
    let err = api::tools::tool_by_slug(State(state), Path("no-such-tool".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

// ─── Submission validation ────────────────────────────────

#[tokio::test]
async fn test_submit_tool_creates_record() {
    let state = seeded_state();
    let coding_id = state.store.read().category_by_slug("coding").unwrap().id;

    let (status, axum::Json(tool)) = api::tools::submit_tool(
        State(state.clone()),
        auth_headers(),
        axum::Json(submit_request("Cursor", coding_id, "https://cursor.sh")),
    )
    .await
    .unwrap();

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tool.slug, "cursor");
    assert!(!tool.featured);
    assert_eq!(tool.pricing_type, PricingType::Free);
    assert!(state.store.read().tool_by_slug("cursor").is_some());
}

#[tokio::test]
async fn test_submit_duplicate_name_is_409_and_store_unchanged() {
    let state = seeded_state();
    let before = state.store.read().tools().len();

    // "GitHub Copilot" is seeded; the check is case-insensitive
    let err = api::tools::submit_tool(
        State(state.clone()),
        auth_headers(),
        axum::Json(submit_request("github copilot", 1, "https://example.com/copilot")),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(state.store.read().tools().len(), before);
}

#[tokio::test]
async fn test_submit_duplicate_url_is_409() {
    let state = seeded_state();
    let err = api::tools::submit_tool(
        State(state),
        auth_headers(),
        axum::Json(submit_request(
            "Copilot Mirror",
            1,
            "HTTPS://GITHUB.COM/FEATURES/COPILOT",
        )),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_submit_duplicate_name_reported_before_duplicate_url() {
    let state = seeded_state();

    // Collides on URL with an early seed tool (ChatGPT) and on name with a
    // later one (Tabnine). Names are checked across the whole catalog before
    // any URL, so the name conflict wins.
    let err = api::tools::submit_tool(
        State(state),
        auth_headers(),
        axum::Json(submit_request("tabnine", 1, "https://chat.openai.com")),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.to_string(), "A tool with this name already exists");
}

#[tokio::test]
async fn test_submit_invalid_pricing_type_is_400_and_no_record() {
    let state = seeded_state();
    let before = state.store.read().tools().len();

    let mut req = submit_request("PricedWrong", 1, "https://pricedwrong.example.com");
    req.pricing_type = Some("bogus".to_string());

    let err = api::tools::submit_tool(State(state.clone()), auth_headers(), axum::Json(req))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.store.read().tools().len(), before);
}

#[tokio::test]
async fn test_submit_missing_fields_is_400() {
    let state = seeded_state();
    let mut req = submit_request("NoUrl", 1, "");
    req.website_url = None;

    let err = api::tools::submit_tool(State(state), auth_headers(), axum::Json(req))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_rating_out_of_range_is_400() {
    let state = seeded_state();
    let mut req = submit_request("Overrated", 1, "https://overrated.example.com");
    req.rating = Some(6);

    let err = api::tools::submit_tool(State(state), auth_headers(), axum::Json(req))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_without_auth_is_401() {
    let state = seeded_state();
    let err = api::tools::submit_tool(
        State(state),
        HeaderMap::new(),
        axum::Json(submit_request("NoAuth", 1, "https://noauth.example.com")),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

// ─── Update and delete ────────────────────────────────────

#[tokio::test]
async fn test_update_tool_merges_partial_fields() {
    let state = seeded_state();
    let (id, description) = {
        let store = state.store.read();
        let tool = store.tool_by_slug("github-copilot").unwrap();
        (tool.id, tool.description.clone())
    };

    let axum::Json(updated) = api::tools::update_tool(
        State(state),
        Path(id),
        auth_headers(),
        axum::Json(ToolPatch {
            rating: Some(5),
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(updated.rating, Some(5));
    assert_eq!(updated.description, description);
}

#[tokio::test]
async fn test_delete_tool_twice_is_404_the_second_time() {
    let state = seeded_state();
    let id = state.store.read().tool_by_slug("tabnine").unwrap().id;

    api::tools::delete_tool(State(state.clone()), Path(id), auth_headers())
        .await
        .unwrap();

    let err = api::tools::delete_tool(State(state), Path(id), auth_headers())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_tool_is_404() {
    let state = empty_state();
    let err = api::tools::delete_tool(State(state), Path(9999), auth_headers())
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

// ─── Associated content ───────────────────────────────────

#[tokio::test]
async fn test_prompt_submission_requires_category_field() {
    let state = seeded_state();
    let tool_id = state.store.read().tool_by_slug("chatgpt").unwrap().id;

    let err = api::content::submit_prompt(
        State(state.clone()),
        auth_headers(),
        axum::Json(api::content::SubmitPromptRequest {
            tool_id: Some(tool_id),
            title: Some("Summarize".to_string()),
            prompt_text: Some("Summarize the following text".to_string()),
            category: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let (status, axum::Json(prompt)) = api::content::submit_prompt(
        State(state),
        auth_headers(),
        axum::Json(api::content::SubmitPromptRequest {
            tool_id: Some(tool_id),
            title: Some("Summarize".to_string()),
            prompt_text: Some("Summarize the following text".to_string()),
            category: Some("writing".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(prompt.tool_id, tool_id);
}

#[tokio::test]
async fn test_blog_appears_in_tool_details_after_submission() {
    let state = seeded_state();
    let tool_id = state.store.read().tool_by_slug("claude").unwrap().id;

    api::content::submit_blog(
        State(state.clone()),
        auth_headers(),
        axum::Json(api::content::SubmitBlogRequest {
            tool_id: Some(tool_id),
            title: Some("Working with Claude".to_string()),
            content: Some("...".to_string()),
        }),
    )
    .await
    .unwrap();

    let details = state
        .store
        .read()
        .tool_with_details_by_slug("claude")
        .unwrap();
    assert_eq!(details.blog.unwrap().title, "Working with Claude");
}

#[tokio::test]
async fn test_favorites_stub_returns_empty_list() {
    let state = seeded_state();
    let axum::Json(favorites) = api::content::list_favorites(State(state), auth_headers())
        .await
        .unwrap();
    assert!(favorites.is_empty());
}
