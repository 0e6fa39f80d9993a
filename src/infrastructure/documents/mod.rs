pub mod directory;
pub mod http;

pub use directory::DirectoryDocumentSource;
pub use http::HttpDocumentSource;

/// Directory holding one `{code}.json` per language, relative to the site root
pub const LOCALES_DIR: &str = "locales";
