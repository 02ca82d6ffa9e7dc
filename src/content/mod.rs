//! Content module - indexes, loads and renders markdown posts

mod error;
mod frontmatter;
pub mod highlight;
pub mod loader;
mod markdown;
mod post;

pub use error::{ContentError, Result};
pub use frontmatter::{parse_date_string, FrontMatter};
pub use highlight::{CodeBlock, CodeLine, Highlighter, Token};
pub use loader::{ContentIndex, ContentStore, SkippedFile};
pub use markdown::{Document, MarkdownRenderer};
pub use post::{photo_path, PostMeta, PostRecord, PostSummary};
