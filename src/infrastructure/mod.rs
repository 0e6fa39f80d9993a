pub mod documents;
pub mod http_client_factory;
pub mod memory_preferences;
pub mod mock;
pub mod preference_persistence;

pub use documents::{DirectoryDocumentSource, HttpDocumentSource};
pub use memory_preferences::MemoryPreferenceStore;
pub use preference_persistence::FilePreferenceStore;
