use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::status::{StatusBanner, StatusMessage};
use crate::domain::document::{DEFAULT_PAGE_LANGUAGE, LocaleDocument};
use crate::domain::errors::DocumentError;
use crate::domain::language::{
    AVAILABLE_LANGUAGES, LanguageOption, STORAGE_KEY, find_language, resolve_initial,
};
use crate::domain::ports::{DocumentSource, PreferenceStore};
use crate::interfaces::view::{self, PolicyView};

pub const MSG_CONTENT_UPDATED: &str = "Content updated.";
pub const MSG_LOAD_FAILED: &str = "Unable to load the selected language.";

pub fn loading_message(code: &str) -> String {
    format!("Loading {}…", code)
}

/// Renders locale documents into the policy page view.
///
/// Cloning is cheap and every clone drives the same view, status banner and
/// stores, so a clone can be moved into a spawned load task.
///
/// Loads are never cancelled. When two loads overlap, both run to completion
/// and the view shows whichever document resolved last.
#[derive(Clone)]
pub struct LocaleRenderer {
    languages: Arc<[LanguageOption]>,
    source: Arc<dyn DocumentSource>,
    store: Arc<dyn PreferenceStore>,
    view: Arc<Mutex<PolicyView>>,
    status: Arc<StatusBanner>,
}

impl LocaleRenderer {
    /// Renderer over the standard language set
    pub fn new(source: Arc<dyn DocumentSource>, store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            languages: AVAILABLE_LANGUAGES.into(),
            source,
            store,
            view: Arc::new(Mutex::new(PolicyView::default())),
            status: Arc::new(StatusBanner::new()),
        }
    }

    /// Replace the offered languages. The set must not be empty.
    pub fn with_languages(mut self, languages: Vec<LanguageOption>) -> Result<Self> {
        anyhow::ensure!(!languages.is_empty(), "At least one language must be offered");
        self.languages = languages.into();
        Ok(self)
    }

    pub fn with_status_banner(mut self, status: StatusBanner) -> Self {
        self.status = Arc::new(status);
        self
    }

    pub fn languages(&self) -> &[LanguageOption] {
        &self.languages
    }

    /// Populate the language selector, restore the stored choice and load it.
    ///
    /// The resulting "Content updated." status is transient.
    pub async fn initialize(&self) -> Result<(), DocumentError> {
        let initial = self.select_initial_language();
        self.load_document(initial, false).await
    }

    /// Fill the selector in declared order and select the stored language
    /// when it is offered, the first option otherwise. Returns the selection.
    pub fn select_initial_language(&self) -> &'static str {
        let stored = self.store.get(STORAGE_KEY);
        let initial = resolve_initial(&self.languages, stored.as_deref())
            .map(|l| l.code)
            .unwrap_or(DEFAULT_PAGE_LANGUAGE);

        if stored.as_deref().is_some_and(|code| code != initial) {
            info!("Stored language {:?} is not offered, using {}", stored, initial);
        }

        let mut view = self.lock_view();
        view.language_select.options = self.languages.to_vec();
        view.language_select.selected = initial.to_string();
        initial
    }

    /// Handle a user selection: persist it, then load with a persistent status.
    ///
    /// Codes outside the offered set are rejected without touching the view
    /// or the stored preference.
    pub async fn on_language_change(&self, code: &str) -> Result<(), DocumentError> {
        if find_language(&self.languages, code).is_none() {
            warn!("Ignoring selection of unknown language {:?}", code);
            return Err(DocumentError::InvalidCode {
                code: code.to_string(),
            });
        }

        self.lock_view().language_select.selected = code.to_string();

        if let Err(e) = self.store.set(STORAGE_KEY, code) {
            warn!("Failed to persist language preference {}: {:#}", code, e);
        }

        self.load_document(code, true).await
    }

    /// Run a language change as its own task, the way a UI event would.
    pub fn spawn_language_change(&self, code: &str) -> JoinHandle<Result<(), DocumentError>> {
        let renderer = self.clone();
        let code = code.to_string();
        tokio::spawn(async move { renderer.on_language_change(&code).await })
    }

    /// Fetch and apply the document for `code`.
    ///
    /// On failure the previous view is kept, the error is logged and a
    /// persistent error status is shown. The error is also returned so callers
    /// can observe it; it is never surfaced to the user.
    pub async fn load_document(&self, code: &str, announce: bool) -> Result<(), DocumentError> {
        self.status.show(&loading_message(code), false, false);

        match self.source.fetch(code).await {
            Ok(document) => {
                self.apply_document(&document);
                info!("Applied locale document for {}", code);
                self.status.show(MSG_CONTENT_UPDATED, false, announce);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load locale {}: {}", code, e);
                self.status.show(MSG_LOAD_FAILED, true, true);
                Err(e)
            }
        }
    }

    pub fn apply_document(&self, document: &LocaleDocument) {
        view::apply_document(&mut self.lock_view(), document);
    }

    /// Snapshot of the current view
    pub fn view(&self) -> PolicyView {
        self.lock_view().clone()
    }

    pub fn status(&self) -> StatusMessage {
        self.status.current()
    }

    pub fn selected_language(&self) -> String {
        self.lock_view().language_select.selected.clone()
    }

    fn lock_view(&self) -> MutexGuard<'_, PolicyView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::status::StatusTone;
    use crate::infrastructure::memory_preferences::MemoryPreferenceStore;
    use crate::infrastructure::mock::MockDocumentSource;
    use serde_json::json;

    fn renderer_with(source: MockDocumentSource, store: MemoryPreferenceStore) -> LocaleRenderer {
        LocaleRenderer::new(Arc::new(source), Arc::new(store))
    }

    #[tokio::test]
    async fn test_initialize_uses_stored_language() {
        let source =
            MockDocumentSource::new().with_document("vi", json!({ "language": { "code": "vi" } }));
        let store = MemoryPreferenceStore::with_entry(STORAGE_KEY, "vi");
        let renderer = renderer_with(source.clone(), store);

        renderer.initialize().await.unwrap();

        let view = renderer.view();
        assert_eq!(view.language_select.selected, "vi");
        assert_eq!(view.language_select.options, AVAILABLE_LANGUAGES.to_vec());
        assert_eq!(view.document_lang, "vi");
        assert_eq!(source.requests(), vec!["vi".to_string()]);
    }

    #[tokio::test]
    async fn test_initialize_falls_back_to_first_language() {
        let source = MockDocumentSource::new().with_document("zh-Hant", json!({}));
        let store = MemoryPreferenceStore::with_entry(STORAGE_KEY, "fr");
        let renderer = renderer_with(source.clone(), store);

        renderer.initialize().await.unwrap();

        assert_eq!(renderer.selected_language(), "zh-Hant");
        let codes: Vec<_> = renderer
            .view()
            .language_select
            .options
            .iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, ["zh-Hant", "en", "ms", "id", "tl", "vi", "th", "hi"]);
        assert_eq!(source.requests(), vec!["zh-Hant".to_string()]);
        let status = renderer.status();
        assert_eq!(status.text, MSG_CONTENT_UPDATED);
        assert!(!status.persistent);
    }

    #[tokio::test]
    async fn test_custom_language_set() {
        let source = MockDocumentSource::new().with_document("th", json!({}));
        let renderer = renderer_with(source, MemoryPreferenceStore::new())
            .with_languages(vec![LanguageOption {
                code: "th",
                label: "ไทย",
            }])
            .unwrap();

        renderer.initialize().await.unwrap();
        assert_eq!(renderer.selected_language(), "th");
        assert_eq!(renderer.languages().len(), 1);

        let empty = renderer_with(MockDocumentSource::new(), MemoryPreferenceStore::new())
            .with_languages(Vec::new());
        assert!(empty.is_err());
    }

    #[tokio::test]
    async fn test_language_change_persists_and_announces() {
        let source =
            MockDocumentSource::new().with_document("vi", json!({ "contact": "vi@example.com" }));
        let store = Arc::new(MemoryPreferenceStore::new());
        let renderer = LocaleRenderer::new(Arc::new(source), store.clone());

        renderer.on_language_change("vi").await.unwrap();

        assert_eq!(store.get(STORAGE_KEY).as_deref(), Some("vi"));
        assert_eq!(renderer.view().contact_info, "vi@example.com");
        let status = renderer.status();
        assert_eq!(status.text, MSG_CONTENT_UPDATED);
        assert!(status.persistent);
    }

    #[tokio::test]
    async fn test_unknown_language_change_is_rejected() {
        let source = MockDocumentSource::new();
        let store = Arc::new(MemoryPreferenceStore::new());
        let renderer = LocaleRenderer::new(Arc::new(source.clone()), store.clone());

        let err = renderer.on_language_change("xx").await.unwrap_err();

        assert!(matches!(err, DocumentError::InvalidCode { .. }));
        assert!(store.get(STORAGE_KEY).is_none());
        assert!(source.requests().is_empty());
        assert_eq!(renderer.status(), StatusMessage::default());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_view() {
        let source = MockDocumentSource::new()
            .with_document("en", json!({ "terms": { "title": "Terms" } }))
            .with_failure(
                "vi",
                DocumentError::Http {
                    status: 404,
                    url: "locales/vi.json".to_string(),
                },
            );
        let renderer = renderer_with(source, MemoryPreferenceStore::new());

        renderer.load_document("en", false).await.unwrap();
        let before = renderer.view();

        let err = renderer.load_document("vi", true).await.unwrap_err();
        assert!(matches!(err, DocumentError::Http { status: 404, .. }));

        assert_eq!(renderer.view(), before);
        let status = renderer.status();
        assert_eq!(status.text, MSG_LOAD_FAILED);
        assert_eq!(status.tone, StatusTone::Error);
        assert!(status.persistent);
        assert!(status.visible);
    }

    #[tokio::test]
    async fn test_failed_preference_write_still_loads() {
        let source = MockDocumentSource::new().with_document("en", json!({}));
        let store = MemoryPreferenceStore::new().failing_writes();
        let renderer = renderer_with(source, store);

        renderer.on_language_change("en").await.unwrap();
        assert_eq!(renderer.view().document_lang, "en");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_hide_delay() {
        let source = MockDocumentSource::new().with_document("en", json!({}));
        let renderer = renderer_with(source, MemoryPreferenceStore::new())
            .with_status_banner(StatusBanner::with_hide_delay(std::time::Duration::from_millis(300)));

        renderer.load_document("en", false).await.unwrap();
        assert!(renderer.status().visible);

        tokio::time::sleep(std::time::Duration::from_millis(310)).await;
        assert!(!renderer.status().visible);
    }
}
