//! Locale document model.
//!
//! A document is the per-language JSON payload holding every piece of text
//! shown on the policy page. Translators produce these files by hand, so the
//! model is lenient: any field may be missing or carry the wrong type, and
//! deserialization of an object never fails because of it. Missing text
//! surfaces as `None` and the accessors below state the default per field.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::errors::DocumentError;

/// Page language used when the document does not declare one
pub const DEFAULT_PAGE_LANGUAGE: &str = "en";
/// Product name used in the page title when the terms carry no title
pub const PRODUCT_NAME: &str = "Ai Lazy Pack";
pub const PAGE_TITLE_SUFFIX: &str = "Ai Lazy Pack Policies";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocaleDocument {
    #[serde(deserialize_with = "lenient_object")]
    pub language: LanguageMeta,
    #[serde(deserialize_with = "lenient_object")]
    pub terms: TermsDocument,
    #[serde(deserialize_with = "lenient_object")]
    pub privacy: PrivacyDocument,
    #[serde(deserialize_with = "lenient_object")]
    pub consent: ConsentDocument,
    #[serde(deserialize_with = "lenient_text")]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanguageMeta {
    #[serde(deserialize_with = "lenient_text")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TermsDocument {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub effective_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub notice: Option<String>,
    #[serde(deserialize_with = "lenient_sections")]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyDocument {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub version: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub effective_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub updated_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub intro: Option<String>,
    #[serde(deserialize_with = "lenient_sections")]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsentDocument {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_blocks")]
    pub content: Vec<ContentBlock>,
}

/// One rendering unit inside a section.
///
/// Built from any JSON value; unknown tags and malformed blocks become
/// `Unsupported` and render nothing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum ContentBlock {
    Paragraph { text: String },
    List { items: Vec<String> },
    Unsupported,
}

impl From<Value> for ContentBlock {
    fn from(value: Value) -> Self {
        let Value::Object(map) = value else {
            return ContentBlock::Unsupported;
        };

        match map.get("type").and_then(Value::as_str) {
            Some("paragraph") => ContentBlock::Paragraph {
                text: map.get("text").and_then(text_from_value).unwrap_or_default(),
            },
            Some("list") => {
                let items = match map.get("items") {
                    Some(Value::Array(items)) => items
                        .iter()
                        .map(|item| text_from_value(item).unwrap_or_default())
                        .collect(),
                    _ => Vec::new(),
                };
                ContentBlock::List { items }
            }
            _ => ContentBlock::Unsupported,
        }
    }
}

impl LocaleDocument {
    /// Parse a raw payload. The top level must be a JSON object; everything
    /// below it is accepted leniently.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| DocumentError::Malformed {
            reason: e.to_string(),
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        if !value.is_object() {
            return Err(DocumentError::Malformed {
                reason: format!("expected a JSON object, found {}", json_kind(&value)),
            });
        }
        serde_json::from_value(value).map_err(|e| DocumentError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Declared page language, `"en"` when absent
    pub fn page_language(&self) -> &str {
        self.language.code.as_deref().unwrap_or(DEFAULT_PAGE_LANGUAGE)
    }

    /// `"{terms title} | Ai Lazy Pack Policies"`, with the product name
    /// standing in for an absent terms title. An empty title stays empty.
    pub fn page_title(&self) -> String {
        let prefix = self.terms.title.as_deref().unwrap_or(PRODUCT_NAME);
        format!("{} | {}", prefix, PAGE_TITLE_SUFFIX)
    }

    pub fn contact(&self) -> &str {
        text_or_empty(&self.contact)
    }
}

impl TermsDocument {
    pub fn title(&self) -> &str {
        text_or_empty(&self.title)
    }

    pub fn notice(&self) -> &str {
        text_or_empty(&self.notice)
    }

    /// Parts of the meta line: version, effective date
    pub fn meta_parts(&self) -> [Option<&str>; 2] {
        [self.version.as_deref(), self.effective_date.as_deref()]
    }
}

impl PrivacyDocument {
    pub fn title(&self) -> &str {
        text_or_empty(&self.title)
    }

    pub fn intro(&self) -> &str {
        text_or_empty(&self.intro)
    }

    /// Parts of the meta line: version, effective date, updated date
    pub fn meta_parts(&self) -> [Option<&str>; 3] {
        [
            self.version.as_deref(),
            self.effective_date.as_deref(),
            self.updated_date.as_deref(),
        ]
    }
}

impl ConsentDocument {
    pub fn title(&self) -> &str {
        text_or_empty(&self.title)
    }

    pub fn text(&self) -> &str {
        text_or_empty(&self.text)
    }
}

impl Section {
    pub fn title(&self) -> &str {
        text_or_empty(&self.title)
    }
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Strings pass through, numbers and booleans are stringified,
/// anything else counts as absent.
fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_sections<'de, D>(deserializer: D) -> Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items.into_iter().map(ContentBlock::from).collect())
}
