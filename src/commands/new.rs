//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Scaffold `<slug>.md` in a collection and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    collection: Option<&str>,
    category: Option<&str>,
) -> Result<PathBuf> {
    let collection = collection.unwrap_or_else(|| site.config.default_collection());
    let store = site.store(collection)?;

    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    fs::create_dir_all(store.dir())?;
    let file_path = store.dir().join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut front_matter = vec![
        format!("title: {}", yaml_string(title)),
        format!("date: {}", chrono::Local::now().format("%Y-%m-%d")),
    ];
    if let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) {
        front_matter.push(format!("category: {}", yaml_string(category)));
    }

    let content = format!("---\n{}\n---\n\n", front_matter.join("\n"));
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Quote a value so YAML reads it back as the same string
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
