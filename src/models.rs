use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity identifier. Assigned by the store, monotonically increasing per
/// entity type, never reused after deletion.
pub type Id = u32;

/// A cataloged AI product/service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: Id,
    pub name: String,
    /// URL-safe, unique, derived from the name at submission time.
    pub slug: String,
    pub description: String,
    pub category_id: Id,
    pub website_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// 0..=5 star rating, validated at the API boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    pub featured: bool,
    pub pricing_type: PricingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PricingType {
    #[default]
    Free,
    Freemium,
    Paid,
}

/// Structured SEO metadata carried on a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Id,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: Id,
    pub tool_id: Id,
    pub title: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: Id,
    pub tool_id: Id,
    pub title: String,
    pub prompt_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: Id,
    pub tool_id: Id,
    pub title: String,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Catalog user. Identity fields come from the external auth provider; the
/// store only assigns the id at creation and never mutates the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub is_admin: bool,
}

/// A tool joined with its category and associated content. The category join
/// is required: a tool whose category no longer resolves is treated as
/// not found.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolWithDetails {
    #[serde(flatten)]
    pub tool: Tool,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<Blog>,
    pub prompts: Vec<Prompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<Guide>,
}

// ─── Insert types (id-less, consumed by the store) ───────

#[derive(Debug, Clone)]
pub struct NewTool {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_id: Id,
    pub website_url: String,
    pub affiliate_url: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<i32>,
    pub featured: bool,
    pub pricing_type: PricingType,
    pub seo: Option<SeoMeta>,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewBlog {
    pub tool_id: Id,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub tool_id: Id,
    pub title: String,
    pub prompt_text: String,
}

#[derive(Debug, Clone)]
pub struct NewGuide {
    pub tool_id: Id,
    pub title: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub is_admin: bool,
}

// ─── Patch types (partial-field merge updates) ───────────

/// Partial update for a tool: only fields present in the request body are
/// merged onto the stored record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Id>,
    pub website_url: Option<String>,
    pub affiliate_url: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<i32>,
    pub featured: Option<bool>,
    pub pricing_type: Option<PricingType>,
    pub seo: Option<SeoMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPatch {
    pub title: Option<String>,
    pub prompt_text: Option<String>,
}

// ─── Search types ─────────────────────────────────────────

/// A tool in a search result, optionally annotated by the AI ranking pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTool {
    #[serde(flatten)]
    pub tool: Tool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_explanation: Option<String>,
}

impl From<Tool> for RankedTool {
    fn from(tool: Tool) -> Self {
        Self {
            tool,
            relevance_score: None,
            relevance_explanation: None,
        }
    }
}

/// Response body for `GET /api/tools?q=...`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<RankedTool>,
    pub ai_enhanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Derive a URL-safe slug from a display name: lowercase, drop everything
/// that is not an ASCII word character or whitespace, collapse whitespace
/// to single hyphens.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("GitHub Copilot"), "github-copilot");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Copy.ai"), "copyai");
        assert_eq!(slugify("DALL-E 2"), "dalle-2");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("  My   Great\tTool  "), "my-great-tool");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café AI"), "caf-ai");
        assert_eq!(slugify("日本語 Tool"), "tool");
    }

    #[test]
    fn test_pricing_type_serializes_lowercase() {
        let json = serde_json::to_value(PricingType::Freemium).unwrap();
        assert_eq!(json, "freemium");
    }

    #[test]
    fn test_pricing_type_rejects_unknown_value() {
        let parsed: Result<PricingType, _> = serde_json::from_str("\"bogus\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_ranked_tool_flattens_tool_fields() {
        let tool = Tool {
            id: 1,
            name: "ChatGPT".to_string(),
            slug: "chatgpt".to_string(),
            description: "Conversational AI".to_string(),
            category_id: 1,
            website_url: "https://chat.openai.com".to_string(),
            affiliate_url: None,
            image_url: None,
            rating: None,
            featured: false,
            pricing_type: PricingType::Freemium,
            seo: None,
            created_at: chrono::Utc::now(),
        };
        let ranked = RankedTool {
            tool,
            relevance_score: Some(91.0),
            relevance_explanation: Some("Directly matches the query".to_string()),
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["name"], "ChatGPT");
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["relevanceScore"], 91.0);
    }

    #[test]
    fn test_plain_ranked_tool_omits_annotations() {
        let tool = Tool {
            id: 2,
            name: "Tabnine".to_string(),
            slug: "tabnine".to_string(),
            description: "AI code completion tool".to_string(),
            category_id: 3,
            website_url: "https://tabnine.com".to_string(),
            affiliate_url: None,
            image_url: None,
            rating: None,
            featured: false,
            pricing_type: PricingType::Free,
            seo: None,
            created_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(RankedTool::from(tool)).unwrap();
        assert!(json.get("relevanceScore").is_none());
        assert!(json.get("relevanceExplanation").is_none());
    }
}
