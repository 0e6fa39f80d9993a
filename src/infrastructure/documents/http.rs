use crate::domain::document::LocaleDocument;
use crate::domain::errors::DocumentError;
use crate::domain::ports::{DocumentSource, validate_code};
use crate::infrastructure::http_client_factory::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use tracing::debug;
use url::Url;

use super::LOCALES_DIR;

/// Fetches `locales/{code}.json` relative to a base URL
pub struct HttpDocumentSource {
    client: Client,
    base_url: Url,
}

impl HttpDocumentSource {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_client(
            HttpClientFactory::create_client(),
            parse_base_url(base_url)?,
        ))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn document_url(&self, code: &str) -> Result<Url, DocumentError> {
        validate_code(code)?;
        self.base_url
            .join(&format!("{}/{}.json", LOCALES_DIR, code))
            .map_err(|_| DocumentError::InvalidCode {
                code: code.to_string(),
            })
    }
}

/// Parse a base URL, treating its path as a directory.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("Invalid base URL: {}", raw))?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "Base URL must use http or https: {}",
        raw
    );
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch(&self, code: &str) -> Result<LocaleDocument, DocumentError> {
        let url = self.document_url(code)?;
        debug!("Fetching locale document {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| DocumentError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| DocumentError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        LocaleDocument::from_slice(&body)
    }
}
