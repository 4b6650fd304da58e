use axum::routing::{get, post, put};
use axum::Router;
use tracing_subscriber::EnvFilter;

use tool_catalog::api;
use tool_catalog::config::Config;
use tool_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("LLM provider: {} ({})", config.llm.provider, config.llm.base_url);
    if config.api_token.is_none() {
        tracing::warn!("TOOL_CATALOG_API_TOKEN is not set; mutating routes will reject requests");
    }

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/api/categories", get(api::categories::list_categories))
        .route("/api/categories/{slug}/tools", get(api::categories::category_tools))
        .route("/api/tools", get(api::tools::list_tools))
        .route("/api/tools/featured", get(api::tools::featured_tools))
        .route("/api/tools/submit", post(api::tools::submit_tool))
        // GET resolves the segment as a slug; PUT/DELETE parse it as an id
        .route(
            "/api/tools/{slug}",
            get(api::tools::tool_by_slug)
                .put(api::tools::update_tool)
                .delete(api::tools::delete_tool),
        )
        .route("/api/blogs", post(api::content::submit_blog))
        .route(
            "/api/blogs/{id}",
            put(api::content::update_blog).delete(api::content::delete_blog),
        )
        .route("/api/prompts", post(api::content::submit_prompt))
        .route(
            "/api/prompts/{id}",
            put(api::content::update_prompt).delete(api::content::delete_prompt),
        )
        .route("/api/guides", post(api::content::submit_guide))
        .route("/api/user/favorites", get(api::content::list_favorites))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
