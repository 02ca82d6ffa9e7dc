//! Post models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::markdown::Document;

/// Validated front-matter of one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub title: String,

    /// Publication date, used for ordering
    pub date: NaiveDateTime,

    /// Date exactly as written in the front-matter
    pub date_display: String,

    pub subtitle: Option<String>,
    pub newsletter_title: Option<String>,
    pub category: Option<String>,
    pub read_time: Option<String>,

    /// Passed through to page templates
    pub meta_description: Option<String>,
}

/// Metadata-only view of a post, used by listing pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// File name without extension
    pub slug: String,

    /// Cover image path, derived from the slug
    pub photo_path: String,

    #[serde(flatten)]
    pub meta: PostMeta,
}

impl PostSummary {
    /// Create a summary, deriving the photo path from the slug
    pub fn new(slug: impl Into<String>, meta: PostMeta, image_dir: &str) -> Self {
        let slug = slug.into();
        let photo_path = photo_path(image_dir, &slug);
        Self {
            slug,
            photo_path,
            meta,
        }
    }

    pub fn title(&self) -> &str {
        &self.meta.title
    }

    pub fn date(&self) -> NaiveDateTime {
        self.meta.date
    }

    pub fn category(&self) -> Option<&str> {
        self.meta.category.as_deref()
    }

    /// Case-insensitive category match; uncategorised posts never match
    pub fn in_category(&self, category: &str) -> bool {
        self.category()
            .is_some_and(|c| c.to_lowercase() == category.to_lowercase())
    }
}

/// A fully loaded post: metadata plus its rendered body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Raw markdown body
    pub body: String,

    /// Structured rendering of the body
    pub document: Document,
}

impl PostRecord {
    pub fn slug(&self) -> &str {
        &self.summary.slug
    }

    pub fn title(&self) -> &str {
        self.summary.title()
    }

    /// Rendered body as an HTML fragment
    pub fn html(&self) -> String {
        self.document.to_html()
    }
}

/// Cover image location for a slug: `{image_dir}/{slug}.png`
pub fn photo_path(image_dir: &str, slug: &str) -> String {
    format!("{}/{}.png", image_dir.trim_end_matches('/'), slug)
}
