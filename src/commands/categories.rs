//! List the categories of a collection

use anyhow::Result;

use crate::helpers::listing_url;
use crate::listing;
use crate::Site;

/// Print every category with its post count
pub fn run(site: &Site, collection: Option<&str>) -> Result<()> {
    let collection = collection.unwrap_or_else(|| site.config.default_collection());
    let index = site.index(collection)?;
    let categories = listing::categories(&index.summaries);

    println!("Categories ({}):", categories.len());
    for category in categories {
        let count = index
            .summaries
            .iter()
            .filter(|s| s.in_category(&category))
            .count();
        println!(
            "  {} ({}) {}",
            category,
            count,
            listing_url(&site.config.listing_path, Some(&category), 1)
        );
    }

    Ok(())
}
