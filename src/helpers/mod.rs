//! Helper functions shared by the export, server and CLI
//!
//! Route building, date formatting and escaping.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
