use crate::domain::document::LocaleDocument;
use crate::domain::errors::DocumentError;
use crate::domain::ports::{DocumentSource, validate_code};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads `{dir}/{code}.json` from the local filesystem
pub struct DirectoryDocumentSource {
    root: PathBuf,
}

impl DirectoryDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, code: &str) -> Result<PathBuf, DocumentError> {
        validate_code(code)?;
        Ok(self.root.join(format!("{}.json", code)))
    }
}

#[async_trait]
impl DocumentSource for DirectoryDocumentSource {
    async fn fetch(&self, code: &str) -> Result<LocaleDocument, DocumentError> {
        let path = self.document_path(code)?;
        debug!("Reading locale document {:?}", path);

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DocumentError::NotFound {
                path: path.display().to_string(),
            },
            _ => DocumentError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        LocaleDocument::from_slice(&bytes)
    }
}
