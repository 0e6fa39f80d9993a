//! Plain-text presentation of the policy page for terminals.

use std::fmt::{self, Write};

use crate::application::status::{StatusMessage, StatusTone};
use crate::interfaces::view::{PolicyView, SectionBlock, ViewNode};

impl fmt::Display for PolicyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.document_title)?;
        writeln!(f, "[lang: {}]", self.document_lang)?;

        write_heading(f, &self.terms_title)?;
        write_line(f, &self.terms_meta)?;
        write_line(f, &self.terms_notice)?;
        write_sections(f, &self.terms_body)?;

        write_heading(f, &self.privacy_title)?;
        write_line(f, &self.privacy_meta)?;
        write_line(f, &self.privacy_intro)?;
        write_sections(f, &self.privacy_body)?;

        write_heading(f, &self.consent_title)?;
        write_line(f, &self.consent_text)?;

        if !self.contact_info.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.contact_info)?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.tone {
            StatusTone::Normal => "info",
            StatusTone::Error => "error",
        };
        write!(f, "[{}] {}", marker, self.text)
    }
}

/// Render the language selector as one line per option, marking the
/// selected one.
pub fn language_menu(view: &PolicyView) -> String {
    let mut out = String::new();
    for option in &view.language_select.options {
        let mark = if option.code == view.language_select.selected {
            '*'
        } else {
            ' '
        };
        // Writing to a String cannot fail
        let _ = writeln!(out, "{} {:<8} {}", mark, option.code, option.label);
    }
    out
}

fn write_heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "=".repeat(title.chars().count()))
}

fn write_line(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if text.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}", text)
}

fn write_sections(f: &mut fmt::Formatter<'_>, sections: &[SectionBlock]) -> fmt::Result {
    for section in sections {
        writeln!(f)?;
        writeln!(f, "## {}", section.heading)?;
        for node in &section.nodes {
            match node {
                ViewNode::Paragraph(text) => writeln!(f, "{}", text)?,
                ViewNode::List(items) => {
                    for item in items {
                        writeln!(f, "  - {}", item)?;
                    }
                }
            }
        }
    }
    Ok(())
}
