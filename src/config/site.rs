//! Site configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default number of posts on one listing page
pub const DEFAULT_PER_PAGE: usize = 10;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub url: String,

    // Directory
    pub public_dir: String,
    pub collections: Vec<CollectionConfig>,

    // URL
    pub listing_path: String,
    pub image_dir: String,

    // Pagination
    pub per_page: usize,

    pub highlight: HighlightConfig,
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            url: "http://example.com".to_string(),

            public_dir: "public".to_string(),
            collections: vec![CollectionConfig::default()],

            listing_path: "/blog".to_string(),
            image_dir: "/images/blog".to_string(),

            per_page: DEFAULT_PER_PAGE,

            highlight: HighlightConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.sanitize();
        config.validate()?;
        Ok(config)
    }

    /// Replace values that would break listing or routing with their defaults
    fn sanitize(&mut self) {
        if self.per_page == 0 {
            tracing::warn!(
                "per_page must be at least 1, using {} instead",
                DEFAULT_PER_PAGE
            );
            self.per_page = DEFAULT_PER_PAGE;
        }

        if self.collections.is_empty() {
            tracing::warn!("No collections configured, using the default 'posts' collection");
            self.collections.push(CollectionConfig::default());
        }
    }

    /// Reject collections the router cannot serve side by side
    ///
    /// Names and routes must be unique, and a route may not start with the
    /// reserved `api` segment or contain `:` / `*`.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut routes = HashSet::new();

        for collection in &self.collections {
            if !names.insert(collection.name.as_str()) {
                bail!("Collection '{}' is configured twice", collection.name);
            }

            let route = collection.route.trim_matches('/');
            if route.split('/').next() == Some("api") {
                bail!(
                    "Collection '{}' uses the reserved route '{}'",
                    collection.name,
                    collection.route
                );
            }
            if route.contains([':', '*']) {
                bail!(
                    "Collection '{}' has route '{}' with ':' or '*'",
                    collection.name,
                    collection.route
                );
            }
            if !routes.insert(route) {
                bail!(
                    "Collection '{}' shares route '{}' with another collection",
                    collection.name,
                    collection.route
                );
            }
        }

        Ok(())
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Name of the first configured collection
    pub fn default_collection(&self) -> &str {
        self.collections
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("posts")
    }
}

/// One directory of markdown posts and the route it is served under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CollectionConfig {
    pub name: String,
    /// Directory holding `<slug>.md` files, relative to the site root
    pub dir: String,
    /// Route segment for detail pages, `/{route}/{slug}`
    pub route: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "posts".to_string(),
            dir: "posts".to_string(),
            route: "posts".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_numbers: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_numbers: true,
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Routes listed before the posts, relative to `url`
    pub static_routes: Vec<String>,
    /// Collections whose posts get an entry
    pub include: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            static_routes: vec![
                String::new(),
                "blog".to_string(),
                "sponsorship".to_string(),
            ],
            include: vec!["posts".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.per_page, 10);
        assert_eq!(config.listing_path, "/blog");
        assert_eq!(config.image_dir, "/images/blog");
        assert_eq!(config.default_collection(), "posts");
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: The Code Blog
url: https://blog.example.com
per_page: 5
collections:
  - name: posts
    dir: posts
    route: posts
  - name: patterns
    dir: patterns
    route: patterns
highlight:
  theme: InspiredGitHub
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "The Code Blog");
        assert_eq!(config.per_page, 5);
        assert_eq!(config.collections.len(), 2);
        assert_eq!(config.collection("patterns").unwrap().dir, "patterns");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.highlight.line_numbers);
        assert_eq!(config.sitemap.include, vec!["posts"]);
    }

    #[test]
    fn test_load_falls_back_on_zero_per_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "per_page: 0\ncollections: []\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.collections, vec![CollectionConfig::default()]);
    }

    fn collection(name: &str, route: &str) -> CollectionConfig {
        CollectionConfig {
            name: name.to_string(),
            dir: name.to_string(),
            route: route.to_string(),
        }
    }

    #[test]
    fn test_validate_routes() {
        let mut config = SiteConfig::default();
        config.collections.push(collection("patterns", "/patterns/"));
        assert!(config.validate().is_ok());

        config.collections.push(collection("archive", "patterns"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shares route"));

        let mut config = SiteConfig::default();
        config.collections.push(collection("internal", "/api"));
        assert!(config.validate().unwrap_err().to_string().contains("reserved"));

        let mut config = SiteConfig::default();
        config.collections.push(collection("posts", "other"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_shared_routes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(
            &path,
            "collections:\n  - name: posts\n    route: blog\n  - name: patterns\n    route: blog\n",
        )
        .unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
