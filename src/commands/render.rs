//! Render a single post

use anyhow::Result;

use crate::Site;

/// Print a rendered post as an HTML fragment or as JSON
pub fn run(site: &Site, collection: Option<&str>, slug: &str, json: bool) -> Result<()> {
    let collection = collection.unwrap_or_else(|| site.config.default_collection());
    let post = site.render_post(collection, slug)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        print!("{}", post.html());
    }

    Ok(())
}
