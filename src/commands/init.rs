//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default `_config.yml` written by `init`
const DEFAULT_CONFIG: &str = r#"# mdpress configuration

# Site
title: Blog
url: http://example.com

# Directory
public_dir: public
collections:
  - name: posts
    dir: posts
    route: posts

# URL
listing_path: /blog
image_dir: /images/blog

# Pagination
per_page: 10

highlight:
  theme: base16-ocean.dark
  line_numbers: true

sitemap:
  static_routes:
    - ''
    - blog
    - sponsorship
  include:
    - posts
"#;

/// First post of a new site
const WELCOME_POST: &str = r#"---
title: Hello World
date: {{ date }}
category: General
readTime: Read Time - 1 minute
---

Welcome! Edit or delete this post, then run `mdpress generate`.

```bash
mdpress new "My first post"
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let posts_dir = target_dir.join("posts");
    fs::create_dir_all(&posts_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(
        posts_dir.join("hello-world.md"),
        WELCOME_POST.replace("{{ date }}", &today),
    )?;

    tracing::debug!("Wrote {:?}", config_path);
    Ok(())
}
