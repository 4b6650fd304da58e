use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::StoreError;
use crate::models::{
    Blog, BlogPatch, Category, Guide, Id, NewBlog, NewCategory, NewGuide, NewPrompt, NewTool,
    NewUser, Prompt, PromptPatch, Tool, ToolPatch, ToolWithDetails, User,
};

/// Authoritative in-memory holder of all catalog entities.
///
/// One ordered map per entity type, keyed by id. Ids are handed out
/// monotonically per type and never reused, so map iteration order is
/// insertion order. The store performs no uniqueness validation; duplicate
/// name/URL checks happen at the API boundary before insertion.
///
/// Constructed once at startup and shared behind a lock; tests build fresh
/// instances for isolation.
#[derive(Debug, Default)]
pub struct CatalogStore {
    users: BTreeMap<Id, User>,
    categories: BTreeMap<Id, Category>,
    tools: BTreeMap<Id, Tool>,
    blogs: BTreeMap<Id, Blog>,
    prompts: BTreeMap<Id, Prompt>,
    guides: BTreeMap<Id, Guide>,
    next_ids: NextIds,
}

#[derive(Debug)]
struct NextIds {
    user: Id,
    category: Id,
    tool: Id,
    blog: Id,
    prompt: Id,
    guide: Id,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            user: 1,
            category: 1,
            tool: 1,
            blog: 1,
            prompt: 1,
            guide: 1,
        }
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Users ────────────────────────────────────────────

    pub fn user(&self, id: Id) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }

    pub fn create_user(&mut self, new: NewUser) -> User {
        let id = self.next_ids.user;
        self.next_ids.user += 1;
        let user = User {
            id,
            username: new.username,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            profile_image_url: new.profile_image_url,
            is_admin: new.is_admin,
        };
        self.users.insert(id, user.clone());
        user
    }

    // ─── Categories ───────────────────────────────────────

    pub fn categories(&self) -> Vec<Category> {
        self.categories.values().cloned().collect()
    }

    pub fn category(&self, id: Id) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.slug == slug)
    }

    pub fn create_category(&mut self, new: NewCategory) -> Category {
        let id = self.next_ids.category;
        self.next_ids.category += 1;
        let category = Category {
            id,
            name: new.name,
            slug: new.slug,
            description: new.description,
        };
        self.categories.insert(id, category.clone());
        category
    }

    // ─── Tools ────────────────────────────────────────────

    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().cloned().collect()
    }

    pub fn tool(&self, id: Id) -> Option<&Tool> {
        self.tools.get(&id)
    }

    pub fn tool_by_slug(&self, slug: &str) -> Option<&Tool> {
        self.tools.values().find(|t| t.slug == slug)
    }

    /// Linear filter over all tools; empty result is not an error.
    pub fn tools_by_category(&self, category_id: Id) -> Vec<Tool> {
        self.tools
            .values()
            .filter(|t| t.category_id == category_id)
            .cloned()
            .collect()
    }

    pub fn featured_tools(&self) -> Vec<Tool> {
        self.tools.values().filter(|t| t.featured).cloned().collect()
    }

    /// Join a tool with its category (required) and associated content
    /// (optional). A tool whose category does not resolve is treated as
    /// not found: a tool is never valid without a category.
    pub fn tool_with_details(&self, id: Id) -> Option<ToolWithDetails> {
        let tool = self.tools.get(&id)?.clone();
        let category = self.categories.get(&tool.category_id)?.clone();
        Some(ToolWithDetails {
            tool,
            category,
            blog: self.blog_by_tool(id).cloned(),
            prompts: self.prompts_by_tool(id),
            guide: self.guide_by_tool(id).cloned(),
        })
    }

    pub fn tool_with_details_by_slug(&self, slug: &str) -> Option<ToolWithDetails> {
        let id = self.tool_by_slug(slug)?.id;
        self.tool_with_details(id)
    }

    pub fn create_tool(&mut self, new: NewTool) -> Tool {
        let id = self.next_ids.tool;
        self.next_ids.tool += 1;
        let tool = Tool {
            id,
            name: new.name,
            slug: new.slug,
            description: new.description,
            category_id: new.category_id,
            website_url: new.website_url,
            affiliate_url: new.affiliate_url,
            image_url: new.image_url,
            rating: new.rating,
            featured: new.featured,
            pricing_type: new.pricing_type,
            seo: new.seo,
            created_at: Utc::now(),
        };
        self.tools.insert(id, tool.clone());
        tool
    }

    /// Case-insensitive substring match against tool name or description.
    /// Results keep insertion order; ranking is the search pipeline's job.
    pub fn search_tools(&self, query: &str) -> Vec<Tool> {
        let needle = query.to_lowercase();
        self.tools
            .values()
            .filter(|t| {
                t.name.to_lowercase().contains(&needle)
                    || t.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn update_tool(&mut self, id: Id, patch: ToolPatch) -> Result<Tool, StoreError> {
        let tool = self.tools.get_mut(&id).ok_or(StoreError::NotFound("Tool"))?;
        if let Some(name) = patch.name {
            tool.name = name;
        }
        if let Some(slug) = patch.slug {
            tool.slug = slug;
        }
        if let Some(description) = patch.description {
            tool.description = description;
        }
        if let Some(category_id) = patch.category_id {
            tool.category_id = category_id;
        }
        if let Some(website_url) = patch.website_url {
            tool.website_url = website_url;
        }
        if let Some(affiliate_url) = patch.affiliate_url {
            tool.affiliate_url = Some(affiliate_url);
        }
        if let Some(image_url) = patch.image_url {
            tool.image_url = Some(image_url);
        }
        if let Some(rating) = patch.rating {
            tool.rating = Some(rating);
        }
        if let Some(featured) = patch.featured {
            tool.featured = featured;
        }
        if let Some(pricing_type) = patch.pricing_type {
            tool.pricing_type = pricing_type;
        }
        if let Some(seo) = patch.seo {
            tool.seo = Some(seo);
        }
        Ok(tool.clone())
    }

    pub fn delete_tool(&mut self, id: Id) -> Result<(), StoreError> {
        self.tools
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Tool"))
    }

    // ─── Blogs ────────────────────────────────────────────

    /// The store permits multiple blogs per tool; detail views use the
    /// first match.
    pub fn blog_by_tool(&self, tool_id: Id) -> Option<&Blog> {
        self.blogs.values().find(|b| b.tool_id == tool_id)
    }

    pub fn create_blog(&mut self, new: NewBlog) -> Blog {
        let id = self.next_ids.blog;
        self.next_ids.blog += 1;
        let blog = Blog {
            id,
            tool_id: new.tool_id,
            title: new.title,
            content: new.content,
            published_at: Utc::now(),
        };
        self.blogs.insert(id, blog.clone());
        blog
    }

    pub fn update_blog(&mut self, id: Id, patch: BlogPatch) -> Result<Blog, StoreError> {
        let blog = self.blogs.get_mut(&id).ok_or(StoreError::NotFound("Blog"))?;
        if let Some(title) = patch.title {
            blog.title = title;
        }
        if let Some(content) = patch.content {
            blog.content = content;
        }
        Ok(blog.clone())
    }

    pub fn delete_blog(&mut self, id: Id) -> Result<(), StoreError> {
        self.blogs
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Blog"))
    }

    // ─── Prompts ──────────────────────────────────────────

    pub fn prompts_by_tool(&self, tool_id: Id) -> Vec<Prompt> {
        self.prompts
            .values()
            .filter(|p| p.tool_id == tool_id)
            .cloned()
            .collect()
    }

    pub fn create_prompt(&mut self, new: NewPrompt) -> Prompt {
        let id = self.next_ids.prompt;
        self.next_ids.prompt += 1;
        let prompt = Prompt {
            id,
            tool_id: new.tool_id,
            title: new.title,
            prompt_text: new.prompt_text,
            created_at: Utc::now(),
        };
        self.prompts.insert(id, prompt.clone());
        prompt
    }

    pub fn update_prompt(&mut self, id: Id, patch: PromptPatch) -> Result<Prompt, StoreError> {
        let prompt = self
            .prompts
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Prompt"))?;
        if let Some(title) = patch.title {
            prompt.title = title;
        }
        if let Some(prompt_text) = patch.prompt_text {
            prompt.prompt_text = prompt_text;
        }
        Ok(prompt.clone())
    }

    pub fn delete_prompt(&mut self, id: Id) -> Result<(), StoreError> {
        self.prompts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound("Prompt"))
    }

    // ─── Guides ───────────────────────────────────────────

    pub fn guide_by_tool(&self, tool_id: Id) -> Option<&Guide> {
        self.guides.values().find(|g| g.tool_id == tool_id)
    }

    pub fn create_guide(&mut self, new: NewGuide) -> Guide {
        let id = self.next_ids.guide;
        self.next_ids.guide += 1;
        let guide = Guide {
            id,
            tool_id: new.tool_id,
            title: new.title,
            steps: new.steps,
            created_at: Utc::now(),
        };
        self.guides.insert(id, guide.clone());
        guide
    }
}
