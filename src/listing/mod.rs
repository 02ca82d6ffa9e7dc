//! Listing views - filter, sort and paginate post summaries
//!
//! Everything here is a pure function of its inputs.

mod paginator;

use indexmap::IndexMap;
use serde::Serialize;

use crate::content::PostSummary;

pub use paginator::Paginator;

/// One page of a (possibly category-filtered) listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub posts: Vec<PostSummary>,
    /// Requested page, 1-based
    pub page: usize,
    pub total_pages: usize,
    /// Number of posts matching the filter
    pub total_posts: usize,
    /// Active category filter
    pub category: Option<String>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// A listing page together with the filter controls for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub page: ListPage,
    /// Every category of the collection, not just those on this page
    pub categories: Vec<String>,
}

impl ListingView {
    pub fn new(
        summaries: &[PostSummary],
        category: Option<&str>,
        page: usize,
        page_size: usize,
    ) -> Self {
        Self {
            page: list_page(summaries, category, page, page_size),
            categories: categories(summaries),
        }
    }
}

/// Order posts newest first, ties broken by slug
pub fn sort_newest_first(posts: &mut [&PostSummary]) {
    posts.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| a.slug.cmp(&b.slug)));
}

/// Posts matching `category`, newest first
///
/// A blank or absent category means no filter.
pub fn filter_posts<'a>(summaries: &'a [PostSummary], category: Option<&str>) -> Vec<&'a PostSummary> {
    let category = active_category(category);

    let mut posts: Vec<&PostSummary> = summaries
        .iter()
        .filter(|post| category.map_or(true, |c| post.in_category(c)))
        .collect();
    sort_newest_first(&mut posts);
    posts
}

/// Build one listing page
///
/// Page 0 and pages past the end yield an empty page, not an error.
pub fn list_page(
    summaries: &[PostSummary],
    category: Option<&str>,
    page: usize,
    page_size: usize,
) -> ListPage {
    let posts = filter_posts(summaries, category);
    let paginator = Paginator::new(&posts, page_size);
    let total_pages = paginator.page_count();

    ListPage {
        posts: paginator.get_page(page).iter().map(|p| (*p).clone()).collect(),
        page,
        total_pages,
        total_posts: posts.len(),
        category: active_category(category).map(str::to_string),
        prev: (page > 1 && page <= total_pages).then(|| page - 1),
        next: (page >= 1 && page < total_pages).then(|| page + 1),
    }
}

/// Distinct categories in first-seen order
///
/// Comparison ignores case; the first spelling seen is kept.
pub fn categories(summaries: &[PostSummary]) -> Vec<String> {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    for category in summaries.iter().filter_map(|s| s.category()) {
        seen.entry(category.to_lowercase()).or_insert(category);
    }
    seen.into_values().map(str::to_string).collect()
}

fn active_category(category: Option<&str>) -> Option<&str> {
    category.map(str::trim).filter(|c| !c.is_empty())
}
