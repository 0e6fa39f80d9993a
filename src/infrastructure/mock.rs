use crate::domain::document::LocaleDocument;
use crate::domain::errors::DocumentError;
use crate::domain::ports::DocumentSource;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
enum MockResponse {
    Document(Value),
    Failure(DocumentError),
}

/// Scripted document source for tests.
///
/// Responses are configured per language code with an optional delay; every
/// fetch is recorded. Unconfigured codes fail with `NotFound`.
#[derive(Clone, Default)]
pub struct MockDocumentSource {
    responses: Arc<Mutex<HashMap<String, (MockResponse, Duration)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, code: &str, payload: Value) -> Self {
        self.with_delayed_document(code, payload, Duration::ZERO)
    }

    pub fn with_delayed_document(self, code: &str, payload: Value, delay: Duration) -> Self {
        self.insert(code, MockResponse::Document(payload), delay);
        self
    }

    pub fn with_failure(self, code: &str, error: DocumentError) -> Self {
        self.with_delayed_failure(code, error, Duration::ZERO)
    }

    pub fn with_delayed_failure(self, code: &str, error: DocumentError, delay: Duration) -> Self {
        self.insert(code, MockResponse::Failure(error), delay);
        self
    }

    /// Codes fetched so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn insert(&self, code: &str, response: MockResponse, delay: Duration) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(code.to_string(), (response, delay));
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn fetch(&self, code: &str) -> Result<LocaleDocument, DocumentError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(code.to_string());

        let scripted = self
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned();

        let Some((response, delay)) = scripted else {
            return Err(DocumentError::NotFound {
                path: format!("mock://{}.json", code),
            });
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        debug!("MockDocumentSource: resolved {} after {:?}", code, delay);

        match response {
            MockResponse::Document(payload) => LocaleDocument::from_value(payload),
            MockResponse::Failure(error) => Err(error),
        }
    }
}
