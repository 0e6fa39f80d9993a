use thiserror::Error;

/// Errors raised while retrieving or decoding a locale document.
///
/// None of these are fatal: the renderer keeps the previous view and
/// reports a generic message to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Invalid language code: {code:?}")]
    InvalidCode { code: String },

    #[error("HTTP {status} while fetching {url}")]
    Http { status: u16, url: String },

    #[error("Transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("Locale document not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed locale document: {reason}")]
    Malformed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_formatting() {
        let err = DocumentError::Http {
            status: 404,
            url: "http://localhost/locales/vi.json".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("locales/vi.json"));
    }

    #[test]
    fn test_invalid_code_formatting() {
        let err = DocumentError::InvalidCode {
            code: "../etc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid language code: \"../etc\"");
    }
}
