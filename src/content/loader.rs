//! Content loader - indexes and loads posts from one collection directory

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{ContentError, Result};
use super::{FrontMatter, MarkdownRenderer, PostRecord, PostSummary};

/// Extension of post files
const POST_EXTENSION: &str = "md";

/// A file left out of the index, and why
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a collection
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentIndex {
    /// One summary per valid post, ordered by slug
    pub summaries: Vec<PostSummary>,
    /// Files that could not be indexed
    pub skipped: Vec<SkippedFile>,
}

/// A directory of `<slug>.md` posts
#[derive(Debug, Clone)]
pub struct ContentStore {
    name: String,
    dir: PathBuf,
    image_dir: String,
}

impl ContentStore {
    /// Create a store over `dir`; `image_dir` is used for derived photo paths
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, image_dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            image_dir: image_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the directory and build summaries from front-matter only
    ///
    /// Files that fail to read or validate are skipped and reported, the
    /// rest of the index is still returned.
    pub fn build_index(&self) -> ContentIndex {
        let mut index = ContentIndex::default();

        if !self.dir.is_dir() {
            tracing::warn!(
                "Content directory {:?} for '{}' does not exist",
                self.dir,
                self.name
            );
            return index;
        }

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_post_file(path) {
                continue;
            }
            let Some(slug) = slug_of(path) else {
                continue;
            };
            if !is_valid_slug(slug) {
                tracing::warn!("Skipping {:?}: {:?} is not a usable slug", path, slug);
                index.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason: format!("{:?} is not a usable slug", slug),
                });
                continue;
            }

            match self.read_post(path, slug) {
                Ok((summary, _body)) => {
                    tracing::debug!("Indexed {}/{}", self.name, summary.slug);
                    index.summaries.push(summary);
                }
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    index.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        index.summaries.sort_by(|a, b| a.slug.cmp(&b.slug));
        index
    }

    /// Load and render a single post
    ///
    /// Every failure, from a bad slug to invalid front-matter, is reported
    /// as `NotFound`.
    pub fn load_post(&self, slug: &str, renderer: &MarkdownRenderer) -> Result<PostRecord> {
        if !is_valid_slug(slug) {
            tracing::debug!("Rejected slug {:?} for '{}'", slug, self.name);
            return Err(self.not_found(slug));
        }

        let path = self.dir.join(format!("{}.{}", slug, POST_EXTENSION));
        let (summary, body) = match self.read_post(&path, slug) {
            Ok(post) => post,
            Err(ContentError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No post file at {:?}", path);
                return Err(self.not_found(slug));
            }
            Err(e) => {
                tracing::warn!("Cannot load {:?}: {}", path, e);
                return Err(self.not_found(slug));
            }
        };

        let document = renderer.render(&body);

        Ok(PostRecord {
            summary,
            body,
            document,
        })
    }

    /// Read one file and split it into a summary and its markdown body
    fn read_post(&self, path: &Path, slug: &str) -> Result<(PostSummary, String)> {
        let content = fs::read_to_string(path)?;

        let malformed = |e: ContentError| ContentError::MalformedFrontMatter {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let (fm, body) = FrontMatter::parse(&content).map_err(malformed)?;
        let body = body.to_string();
        let meta = fm.validate().map_err(malformed)?;

        Ok((PostSummary::new(slug, meta, &self.image_dir), body))
    }

    fn not_found(&self, slug: &str) -> ContentError {
        ContentError::NotFound {
            collection: self.name.clone(),
            slug: slug.to_string(),
        }
    }
}

/// Check if a file is a post file
fn is_post_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}

fn slug_of(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// A slug must name a file directly inside the collection directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.trim().is_empty()
        && !slug.starts_with('.')
        && !slug.contains("..")
        && !slug.contains(['/', '\\', '\0'])
}
