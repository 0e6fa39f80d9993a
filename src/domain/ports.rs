use crate::domain::document::LocaleDocument;
use crate::domain::errors::DocumentError;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only source of locale documents keyed by language code
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch a fresh copy of the document for `code`, bypassing any cache.
    async fn fetch(&self, code: &str) -> Result<LocaleDocument, DocumentError>;
}

/// Durable string key-value storage that survives across sessions
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Language codes end up in URLs and file names; only plain path
/// segments without query, fragment or escape characters are accepted.
pub fn validate_code(code: &str) -> Result<(), DocumentError> {
    let invalid = code.is_empty()
        || code == "."
        || code.contains("..")
        || code.contains(['/', '\\', '?', '#', '%'])
        || code.chars().any(char::is_whitespace);

    if invalid {
        return Err(DocumentError::InvalidCode {
            code: code.to_string(),
        });
    }
    Ok(())
}
