//! # tool-catalog
//!
//! A directory web service for AI tools: a catalog of categories, tools,
//! blog posts, prompts, and usage guides behind a JSON API, with an optional
//! AI-ranked search pass.
//!
//! ## Search flow
//!
//! ```text
//!            ┌──────────────┐
//!            │  GET /api/   │
//!            │  tools?q=... │
//!            └──────┬───────┘
//!                   │
//!                   ▼
//!          ┌─────────────────┐
//!          │ Substring match  │  case-insensitive, name OR description,
//!          │ (CatalogStore)   │  insertion order
//!          └────────┬────────┘
//!                   │ candidates
//!                   ▼
//!          ┌─────────────────┐   ai != "true", empty candidates,
//!          │ Eligibility gate │──────or query < 3 chars──────┐
//!          └────────┬────────┘                               │
//!                   │ eligible                               ▼
//!                   ▼                                 ┌──────────────┐
//!          ┌─────────────────┐                        │ Plain result  │
//!          │ LLM ranking call │                       └──────────────┘
//!          │ (bounded timeout)│
//!          └────────┬────────┘
//!            ┌──────┼───────────────┐
//!            ▼      ▼               ▼
//!        success  empty/unmatched  error/timeout/unparseable
//!            │      │               │
//!            ▼      ▼               ▼
//!        annotated  fallback +     fallback +
//!        + sorted   message        error diagnostic
//! ```
//!
//! The AI pass can never make the base search fail: every failure path
//! returns the unranked candidates with a diagnostic field, still HTTP 200.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, auth token, and LLM settings
//! - [`models`] - Entities (`Tool`, `Category`, `Blog`, `Prompt`, `Guide`, `User`), insert/patch types, request/response types
//! - [`error`] - Typed store and request-boundary errors with HTTP mappings
//! - [`store`] - In-memory catalog repository: CRUD, slug/category lookups, joins, substring search
//! - [`seed`] - One-time demo-data seeding at startup
//! - [`search`] - Ranked-search pipeline with the fallback contract
//! - [`llm`] - External ranking call via Ollama or OpenAI-compatible APIs
//! - [`api`] - Axum HTTP handlers for categories, tools, and associated content
//! - [`state`] - Shared application state holding the store and HTTP client

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod search;
pub mod seed;
pub mod state;
pub mod store;
