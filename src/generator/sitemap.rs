//! XML sitemap

use chrono::NaiveDateTime;

use crate::helpers::{date_xml, escape_xml, full_url_for, post_url};
use crate::Site;

/// One `<url>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDateTime>,
}

/// Collect the configured static routes followed by every post
pub fn collect_entries(site: &Site) -> Vec<SitemapEntry> {
    let base = site.config.url.trim_end_matches('/');

    let mut entries: Vec<SitemapEntry> = site
        .config
        .sitemap
        .static_routes
        .iter()
        .map(|route| SitemapEntry {
            loc: format!("{}/{}", base, route.trim_start_matches('/')),
            lastmod: None,
        })
        .collect();

    for name in &site.config.sitemap.include {
        let Some(collection) = site.config.collection(name) else {
            tracing::warn!("Sitemap includes unknown collection '{}'", name);
            continue;
        };
        let store = match site.store(name) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("Sitemap skips '{}': {}", name, e);
                continue;
            }
        };

        for summary in store.build_index().summaries {
            entries.push(SitemapEntry {
                loc: full_url_for(base, &post_url(&collection.route, &summary.slug)),
                lastmod: Some(summary.date()),
            });
        }
    }

    entries
}

/// Render entries as a sitemap document
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", date_xml(lastmod)));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
