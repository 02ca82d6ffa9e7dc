//! mdpress: markdown content pipeline for a blog and newsletter archive
//!
//! Posts are `<slug>.md` files with YAML front-matter. This crate builds the
//! metadata index of a collection, renders single posts with highlighted code,
//! and computes filtered, paginated listing pages. A static export, a small
//! HTTP layer and a CLI are built on top of it.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod listing;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{ContentError, ContentIndex, ContentStore, MarkdownRenderer, PostRecord};
use listing::{ListPage, ListingView};

/// The main site handle
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Shared renderer; loading syntaxes and themes is done once
    renderer: Arc<MarkdownRenderer>,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let renderer = Arc::new(MarkdownRenderer::with_options(
            &config.highlight.theme,
            config.highlight.line_numbers,
        ));

        Self {
            config,
            base_dir,
            public_dir,
            renderer,
        }
    }

    /// Content store of a configured collection
    pub fn store(&self, collection: &str) -> content::Result<ContentStore> {
        let collection = self
            .config
            .collection(collection)
            .ok_or_else(|| ContentError::UnknownCollection(collection.to_string()))?;

        Ok(ContentStore::new(
            &collection.name,
            self.base_dir.join(&collection.dir),
            &self.config.image_dir,
        ))
    }

    /// Build a fresh metadata index of a collection
    pub fn index(&self, collection: &str) -> content::Result<ContentIndex> {
        Ok(self.store(collection)?.build_index())
    }

    /// One listing page of a collection, with its category set
    pub fn listing(
        &self,
        collection: &str,
        category: Option<&str>,
        page: usize,
    ) -> content::Result<ListingView> {
        let index = self.index(collection)?;
        Ok(ListingView::new(&index.summaries, category, page, self.config.per_page))
    }

    /// One listing page of a collection
    pub fn list(
        &self,
        collection: &str,
        category: Option<&str>,
        page: usize,
    ) -> content::Result<ListPage> {
        Ok(self.listing(collection, category, page)?.page)
    }

    /// Distinct categories of a collection, first-seen order
    pub fn categories(&self, collection: &str) -> content::Result<Vec<String>> {
        let index = self.index(collection)?;
        Ok(listing::categories(&index.summaries))
    }

    /// Load and render one post
    pub fn render_post(&self, collection: &str, slug: &str) -> content::Result<PostRecord> {
        self.store(collection)?.load_post(slug, &self.renderer)
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Generate the static export
    pub fn generate(&self) -> Result<generator::GenerateReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, collection: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, collection, None)
    }
}
