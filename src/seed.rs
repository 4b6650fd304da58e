//! Demo-data seeding. Runs once, synchronously, before the service starts
//! accepting requests.

use std::collections::HashMap;

use crate::models::{Id, NewBlog, NewCategory, NewGuide, NewPrompt, NewTool, PricingType};
use crate::store::CatalogStore;

const CATEGORIES: &[(&str, &str, &str)] = &[
    ("Conversational AI", "conversational-ai", "AI chatbots and virtual assistants"),
    ("Content Writing", "content-writing", "AI tools for content creation"),
    ("Copywriting", "copywriting", "AI copywriting and marketing content"),
    ("Image Generation", "image-generation", "AI image creation tools"),
    ("Video Generation", "video-generation", "AI video creation and editing"),
    ("Audio Processing", "audio-processing", "AI audio enhancement and processing"),
    ("Coding", "coding", "AI coding assistants"),
    ("Translation", "translation", "AI language translation tools"),
    ("Data Analysis", "data-analysis", "AI data analytics tools"),
    ("Research", "research", "AI research assistants"),
    ("Design", "design", "AI design tools"),
    ("Marketing", "marketing", "AI marketing tools"),
    ("Productivity", "productivity", "AI productivity tools"),
    ("Music", "music", "AI music creation"),
];

/// (category slug, name, tool slug, description, website, featured, pricing)
type ToolRow = (&'static str, &'static str, &'static str, &'static str, &'static str, bool, PricingType);

const TOOLS: &[ToolRow] = &[
    ("conversational-ai", "ChatGPT", "chatgpt", "OpenAI's advanced conversational AI", "https://chat.openai.com", true, PricingType::Freemium),
    ("conversational-ai", "Claude", "claude", "Anthropic's AI assistant", "https://claude.ai", true, PricingType::Freemium),
    ("content-writing", "Jasper", "jasper", "AI content writing platform", "https://jasper.ai", false, PricingType::Paid),
    ("content-writing", "WriteSonic", "writesonic", "AI writing assistant", "https://writesonic.com", false, PricingType::Freemium),
    ("copywriting", "Copy.ai", "copyai", "AI copywriting tool", "https://copy.ai", false, PricingType::Freemium),
    ("copywriting", "Rytr", "rytr", "AI writing platform", "https://rytr.me", false, PricingType::Freemium),
    ("image-generation", "Midjourney", "midjourney", "AI image generation tool", "https://midjourney.com", true, PricingType::Paid),
    ("image-generation", "DALL-E 2", "dall-e-2", "OpenAI's image generation model", "https://openai.com/dall-e-2", false, PricingType::Paid),
    ("video-generation", "RunwayML", "runwayml", "AI video editing platform", "https://runwayml.com", false, PricingType::Freemium),
    ("video-generation", "Synthesia", "synthesia", "AI video generation platform", "https://synthesia.io", false, PricingType::Paid),
    ("audio-processing", "Descript", "descript", "AI audio editing software", "https://descript.com", false, PricingType::Freemium),
    ("coding", "GitHub Copilot", "github-copilot", "AI pair programmer", "https://github.com/features/copilot", true, PricingType::Paid),
    ("coding", "Tabnine", "tabnine", "AI code completion tool", "https://tabnine.com", false, PricingType::Freemium),
    ("translation", "DeepL", "deepl", "AI translation service", "https://deepl.com", false, PricingType::Freemium),
    ("translation", "Google Translate", "google-translate", "Google's translation service", "https://translate.google.com", false, PricingType::Free),
    ("data-analysis", "Tableau", "tableau", "Data visualization tool", "https://tableau.com", false, PricingType::Paid),
    ("research", "Elicit", "elicit", "AI research assistant", "https://elicit.org", false, PricingType::Freemium),
    ("design", "Canva", "canva", "AI-assisted design platform", "https://canva.com", false, PricingType::Freemium),
    ("marketing", "HubSpot AI", "hubspot-ai", "AI marketing automation", "https://hubspot.com", false, PricingType::Paid),
    ("productivity", "Notion AI", "notion-ai", "AI writing inside your workspace", "https://notion.so", false, PricingType::Freemium),
    ("music", "Amper Music", "amper-music", "AI music composition", "https://ampermusic.com", false, PricingType::Paid),
];

/// Build the demo catalog: categories first, then tools wired to category ids
/// through a slug map, then blog/guide/prompt content for the first featured
/// tool.
pub fn populate(store: &mut CatalogStore) {
    tracing::info!("Seeding demo catalog: categories and tools");

    let mut category_ids: HashMap<&str, Id> = HashMap::new();
    for &(name, slug, description) in CATEGORIES {
        let category = store.create_category(NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
        });
        category_ids.insert(slug, category.id);
    }

    for &(category_slug, name, slug, description, website_url, featured, pricing_type) in TOOLS {
        let Some(&category_id) = category_ids.get(category_slug) else {
            tracing::warn!("Seed tool {name} references unknown category {category_slug}");
            continue;
        };
        store.create_tool(NewTool {
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            category_id,
            website_url: website_url.to_string(),
            affiliate_url: None,
            image_url: None,
            rating: None,
            featured,
            pricing_type,
            seo: None,
        });
    }

    // Demo content hangs off the first featured tool
    let featured = store.featured_tools();
    if let Some(first) = featured.first() {
        store.create_blog(NewBlog {
            tool_id: first.id,
            title: format!("Ultimate Guide to Using {}", first.name),
            content: format!(
                "# The Ultimate Guide to {name}\n\n## Introduction\n\n{name} is one of the most \
                 powerful AI tools available today. In this comprehensive guide, we'll explore \
                 its capabilities and show you how to get the most value from it.\n\n\
                 ## Key Features\n\n{description}\n\n## Best Practices\n\nTo get the most out \
                 of {name}, follow these best practices...",
                name = first.name,
                description = first.description,
            ),
        });

        store.create_guide(NewGuide {
            tool_id: first.id,
            title: format!("How to Get Started with {}", first.name),
            steps: vec![
                "Sign up for an account on their website".to_string(),
                "Complete the initial setup wizard".to_string(),
                "Create your first project".to_string(),
                "Experiment with different settings to find what works best".to_string(),
                "Review the results and refine your approach".to_string(),
            ],
        });

        store.create_prompt(NewPrompt {
            tool_id: first.id,
            title: "General Purpose Template".to_string(),
            prompt_text: "I want you to act as an expert in [TOPIC]. Please provide detailed \
                          information about [SPECIFIC QUESTION]."
                .to_string(),
        });
        store.create_prompt(NewPrompt {
            tool_id: first.id,
            title: "Creative Writing Template".to_string(),
            prompt_text: "Write a [STYLE] story about [TOPIC] with the following characters: \
                          [CHARACTER LIST]. The story should include themes of [THEMES] and \
                          take place in [SETTING]."
                .to_string(),
        });
    }

    tracing::info!(
        "Seeded {} categories and {} tools",
        store.categories().len(),
        store.tools().len()
    );
}
