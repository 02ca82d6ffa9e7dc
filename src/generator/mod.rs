//! Generator module - writes the static export
//!
//! Layout under the public directory, per collection:
//!
//! ```text
//! api/{collection}/index.json                        all summaries, newest first
//! api/{collection}/page/{n}.json                     listing page n
//! api/{collection}/category/{dir}/page/{n}.json      listing page n of a category
//! api/{collection}/posts/{slug}.json                 rendered post
//! {route}/{slug}/index.html                          post body fragment
//! sitemap.xml
//! ```

pub mod sitemap;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{ContentStore, PostSummary, SkippedFile};
use crate::listing::{self, ListingView};
use crate::Site;

/// What a generation run produced
#[derive(Debug, Default, Serialize)]
pub struct GenerateReport {
    pub posts: usize,
    pub listing_pages: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Index file of a collection
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionIndex<'a> {
    collection: &'a str,
    categories: Vec<String>,
    /// Category name to its directory under `category/`
    category_dirs: &'a IndexMap<String, String>,
    posts: Vec<&'a PostSummary>,
}

/// Static export generator
pub struct Generator<'a> {
    site: &'a Site,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Generate the entire export
    pub fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)?;

        let mut report = GenerateReport::default();

        for collection in &self.site.config.collections {
            let store = self.site.store(&collection.name)?;
            self.generate_collection(&store, &collection.route, &mut report)?;
        }

        self.generate_sitemap()?;

        Ok(report)
    }

    fn generate_collection(
        &self,
        store: &ContentStore,
        route: &str,
        report: &mut GenerateReport,
    ) -> Result<()> {
        let index = store.build_index();
        let api_dir = self.site.public_dir.join("api").join(store.name());
        let categories = listing::categories(&index.summaries);
        let dirs = category_dirs(&categories);

        write_json(
            &api_dir.join("index.json"),
            &CollectionIndex {
                collection: store.name(),
                categories,
                category_dirs: &dirs,
                posts: listing::filter_posts(&index.summaries, None),
            },
        )?;

        report.listing_pages +=
            self.generate_listing_pages(&index.summaries, None, &api_dir.join("page"))?;
        for (category, dir_name) in &dirs {
            let dir = api_dir.join("category").join(dir_name).join("page");
            report.listing_pages +=
                self.generate_listing_pages(&index.summaries, Some(category.as_str()), &dir)?;
        }

        let mut written = 0;

        for summary in &index.summaries {
            let post = match store.load_post(&summary.slug, self.site.renderer()) {
                Ok(post) => post,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", summary.slug, e);
                    continue;
                }
            };

            write_json(
                &api_dir.join("posts").join(format!("{}.json", post.slug())),
                &post,
            )?;

            let html_path = self
                .site
                .public_dir
                .join(route.trim_matches('/'))
                .join(post.slug())
                .join("index.html");
            write_file(&html_path, &post.html())?;

            written += 1;
        }

        tracing::info!(
            "Generated {} of {} posts for '{}' ({} skipped)",
            written,
            index.summaries.len(),
            store.name(),
            index.skipped.len()
        );
        report.posts += written;
        report.skipped.extend(index.skipped);

        Ok(())
    }

    /// Write every page of one listing; an empty listing still gets page 1
    fn generate_listing_pages(
        &self,
        summaries: &[PostSummary],
        category: Option<&str>,
        dir: &Path,
    ) -> Result<usize> {
        let per_page = self.site.config.per_page;
        let first = ListingView::new(summaries, category, 1, per_page);
        let total_pages = first.page.total_pages.max(1);

        write_json(&dir.join("1.json"), &first)?;
        for page in 2..=total_pages {
            let view = ListingView::new(summaries, category, page, per_page);
            write_json(&dir.join(format!("{}.json", page)), &view)?;
        }

        Ok(total_pages)
    }

    fn generate_sitemap(&self) -> Result<()> {
        let entries = sitemap::collect_entries(self.site);
        let output_path = self.site.public_dir.join("sitemap.xml");
        write_file(&output_path, &sitemap::render(&entries))?;
        tracing::info!("Generated sitemap.xml ({} urls)", entries.len());
        Ok(())
    }
}

/// Directory name for each category, unique within the collection
///
/// Names are slugified; a name already taken gets a `-2`, `-3`, .. suffix and
/// a category with no slug-able characters becomes `category`.
fn category_dirs(categories: &[String]) -> IndexMap<String, String> {
    let mut taken = std::collections::HashSet::new();
    let mut dirs = IndexMap::new();

    for category in categories {
        let mut base = slug::slugify(category);
        if base.is_empty() {
            base = "category".to_string();
        }

        let mut name = base.clone();
        let mut n = 2;
        while !taken.insert(name.clone()) {
            name = format!("{}-{}", base, n);
            n += 1;
        }
        dirs.insert(category.clone(), name);
    }

    dirs
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
