//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::{ContentError, Result};
use super::post::PostMeta;

/// Line that opens and closes a front-matter block
const DELIMITER: &str = "---";

/// Front-matter data from a post, as written by the author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub subtitle: Option<String>,
    #[serde(rename = "newsletterTitle")]
    pub newsletter_title: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "readTime")]
    pub read_time: Option<String>,
    pub meta_description: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Content without an opening `---` line has no front-matter and is
    /// returned whole with an empty `FrontMatter`.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        let Some(rest) = strip_delimiter_line(content) else {
            return Ok((FrontMatter::default(), content));
        };

        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim_end() == DELIMITER {
                let yaml = &rest[..offset];
                let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);

                if yaml.trim().is_empty() {
                    return Ok((FrontMatter::default(), body));
                }

                let fm: FrontMatter = serde_yaml::from_str(yaml)?;
                return Ok((fm, body));
            }
            offset += line.len();
        }

        Err(ContentError::UnterminatedFrontMatter)
    }

    /// Check required fields and convert into typed metadata
    pub fn validate(self) -> Result<PostMeta> {
        let title = non_blank(self.title).ok_or(ContentError::MissingField("title"))?;
        let date_display = non_blank(self.date).ok_or(ContentError::MissingField("date"))?;
        let date = parse_date_string(&date_display)
            .ok_or_else(|| ContentError::InvalidDate(date_display.clone()))?;

        Ok(PostMeta {
            title,
            date,
            date_display,
            subtitle: non_blank(self.subtitle),
            newsletter_title: non_blank(self.newsletter_title),
            category: non_blank(self.category),
            read_time: non_blank(self.read_time),
            meta_description: non_blank(self.meta_description),
        })
    }
}

/// Strip the opening delimiter line, if the content starts with one
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix(DELIMITER)?;
    let (first_line, rest) = match rest.find('\n') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };
    first_line.trim().is_empty().then_some(rest)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601 with offset first, normalised to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    // %B also accepts the abbreviated month name
    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%B %d %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r##"---
title: "Builder Pattern in .NET"
newsletterTitle: "#42 Stefan's Newsletter"
subtitle: Fluent object construction
date: 2024-01-15
category: Design Patterns
readTime: Read Time - 5 minutes
meta_description: How to use the builder pattern
---

This is the content.
"##;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Builder Pattern in .NET"));
        assert_eq!(fm.newsletter_title.as_deref(), Some("#42 Stefan's Newsletter"));
        assert_eq!(fm.category.as_deref(), Some("Design Patterns"));
        assert_eq!(fm.read_time.as_deref(), Some("Read Time - 5 minutes"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15"));
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\nauthor: someone\ntags: [a, b]\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter_opening() {
        let content = "---- \ntitle: nope\n---\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\n\nBody without closing marker";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::UnterminatedFrontMatter));
    }

    #[test]
    fn test_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, ContentError::Yaml(_)));
    }

    #[test]
    fn test_crlf_frontmatter() {
        let content = "---\r\ntitle: Windows\r\ndate: 2024-02-02\r\n---\r\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_validate_requires_title_and_date() {
        let fm = FrontMatter {
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            fm.validate(),
            Err(ContentError::MissingField("title"))
        ));

        let fm = FrontMatter {
            title: Some("   ".to_string()),
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            fm.validate(),
            Err(ContentError::MissingField("title"))
        ));

        let fm = FrontMatter {
            title: Some("Hello".to_string()),
            ..Default::default()
        };
        assert!(matches!(fm.validate(), Err(ContentError::MissingField("date"))));

        let fm = FrontMatter {
            title: Some("Hello".to_string()),
            date: Some("someday".to_string()),
            ..Default::default()
        };
        assert!(matches!(fm.validate(), Err(ContentError::InvalidDate(_))));
    }

    #[test]
    fn test_validate_blank_category_is_none() {
        let fm = FrontMatter {
            title: Some("Hello".to_string()),
            date: Some("2024-01-01".to_string()),
            category: Some("  ".to_string()),
            ..Default::default()
        };
        let meta = fm.validate().unwrap();
        assert!(meta.category.is_none());
        assert_eq!(meta.date_display, "2024-01-01");
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date_string("2024-01-15 10:30:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");

        let formats = [
            "2024-03-01",
            "2024/03/01",
            "March 1, 2024",
            "Mar 01 2024",
            "1 March 2024",
            "2024-03-01T00:00:00",
            "2024-03-01T00:00:00Z",
        ];
        for s in formats {
            let dt = parse_date_string(s).unwrap_or_else(|| panic!("failed on {s}"));
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-03-01", "{s}");
        }

        assert!(parse_date_string("not a date").is_none());
    }
}
