//! View surface of the policy page.
//!
//! `PolicyView` holds one field per named display region. The renderer owns
//! it exclusively and overwrites every region on each document update; the
//! helpers here are the pure mapping from document content to view nodes.

use serde::Serialize;

use crate::application::status::StatusMessage;
use crate::domain::document::{ContentBlock, LocaleDocument, Section};
use crate::domain::language::LanguageOption;

/// Separator placed between non-empty meta parts
pub const META_SEPARATOR: &str = " · ";

/// A rendered content node inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViewNode {
    Paragraph(String),
    List(Vec<String>),
}

/// One rendered section: a heading followed by its nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub heading: String,
    pub nodes: Vec<ViewNode>,
}

/// Language selector region
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageSelect {
    pub options: Vec<LanguageOption>,
    pub selected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PolicyView {
    /// Declared language of the page
    pub document_lang: String,
    pub document_title: String,
    pub language_select: LanguageSelect,

    pub terms_title: String,
    pub terms_meta: String,
    pub terms_notice: String,
    pub terms_body: Vec<SectionBlock>,

    pub privacy_title: String,
    pub privacy_meta: String,
    pub privacy_intro: String,
    pub privacy_body: Vec<SectionBlock>,

    pub consent_title: String,
    pub consent_text: String,
    pub contact_info: String,
}

/// View and status together, as handed to machine-readable output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub view: PolicyView,
    pub status: StatusMessage,
}

/// Overwrite every document-driven region of the view.
///
/// Never fails: absent fields render as empty text or empty bodies.
/// The language selector is left alone.
pub fn apply_document(view: &mut PolicyView, document: &LocaleDocument) {
    view.document_lang = document.page_language().to_string();
    view.document_title = document.page_title();

    let terms = &document.terms;
    view.terms_title = terms.title().to_string();
    view.terms_meta = format_meta(terms.meta_parts());
    view.terms_notice = terms.notice().to_string();
    render_sections(&mut view.terms_body, &terms.sections);

    let privacy = &document.privacy;
    view.privacy_title = privacy.title().to_string();
    view.privacy_meta = format_meta(privacy.meta_parts());
    view.privacy_intro = privacy.intro().to_string();
    render_sections(&mut view.privacy_body, &privacy.sections);

    view.consent_title = document.consent.title().to_string();
    view.consent_text = document.consent.text().to_string();
    view.contact_info = document.contact().to_string();
}

/// Join the non-empty parts with `" · "`.
pub fn format_meta<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(META_SEPARATOR)
}

/// Replace the container's content with one block per section.
pub fn render_sections(container: &mut Vec<SectionBlock>, sections: &[Section]) {
    container.clear();
    container.extend(sections.iter().map(|section| SectionBlock {
        heading: section.title().to_string(),
        nodes: section.content.iter().filter_map(render_content_block).collect(),
    }));
}

/// Map a content block to a view node; unsupported blocks produce none.
pub fn render_content_block(block: &ContentBlock) -> Option<ViewNode> {
    match block {
        ContentBlock::Paragraph { text } => Some(ViewNode::Paragraph(text.clone())),
        ContentBlock::List { items } => Some(ViewNode::List(items.clone())),
        ContentBlock::Unsupported => None,
    }
}
