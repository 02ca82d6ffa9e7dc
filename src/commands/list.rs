//! List one page of a collection

use anyhow::Result;

use crate::helpers::{full_date, listing_url, post_url};
use crate::Site;

/// Print one listing page
pub fn run(site: &Site, collection: Option<&str>, category: Option<&str>, page: usize) -> Result<()> {
    let collection = collection.unwrap_or_else(|| site.config.default_collection());
    let route = site
        .config
        .collection(collection)
        .map(|c| c.route.clone())
        .unwrap_or_default();
    let listing = site.list(collection, category, page)?;

    match &listing.category {
        Some(category) => println!(
            "{} '{}' posts, page {} of {}:",
            listing.total_posts, category, listing.page, listing.total_pages
        ),
        None => println!(
            "{} posts, page {} of {}:",
            listing.total_posts, listing.page, listing.total_pages
        ),
    }

    for post in &listing.posts {
        println!(
            "  {} - {} [{}]{}",
            full_date(&post.date()),
            post.title(),
            post_url(&route, &post.slug),
            post.category().map(|c| format!(" ({})", c)).unwrap_or_default()
        );
    }

    for (label, target) in [("prev", listing.prev), ("next", listing.next)] {
        if let Some(target) = target {
            println!(
                "  {}: {}",
                label,
                listing_url(&site.config.listing_path, listing.category.as_deref(), target)
            );
        }
    }

    Ok(())
}
