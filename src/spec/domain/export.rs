//! Markdown projection of a specification and export file naming.

use super::Specification;
/// Heading used when a specification has no title.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Product Spec";

const DEFAULT_FILE_STEM: &str = "spec";

/// File format offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Markdown document (`.md`).
    Markdown,
    /// Plain-text copy of the same document (`.txt`).
    Text,
}

impl ExportFormat {
    /// Returns the file extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

/// Rendered export ready to be written or copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Suggested file name.
    pub file_name: String,
    /// Document body.
    pub content: String,
}

impl ExportDocument {
    /// Renders `spec` for the given format.
    #[must_use]
    pub fn render(spec: &Specification, format: ExportFormat) -> Self {
        Self {
            file_name: export_file_name(spec, format),
            content: spec_to_markdown(spec),
        }
    }
}

/// Renders a specification as a Markdown document.
///
/// Sections without content are omitted and the result carries no trailing
/// whitespace, so equal specifications always render to identical bytes.
#[must_use]
pub fn spec_to_markdown(spec: &Specification) -> String {
    let title = if spec.title().is_empty() {
        DEFAULT_DOCUMENT_TITLE
    } else {
        spec.title()
    };
    let mut document = format!("# {title}\n\n");

    if !spec.overview().is_empty() {
        document.push_str(&format!("## Overview\n\n{}\n\n", spec.overview()));
    }

    push_numbered_section(&mut document, "User Stories", spec.user_stories());

    for (column, tasks) in spec.tasks().columns() {
        if tasks.is_empty() {
            continue;
        }
        document.push_str(&format!("## {} Tasks\n\n", column.title()));
        for task in tasks {
            let mark = if task.completed() { 'x' } else { ' ' };
            document.push_str(&format!("- [{mark}] {}\n", task.text()));
        }
        document.push('\n');
    }

    push_numbered_section(&mut document, "Risks", spec.risks());

    document.truncate(document.trim_end().len());
    document
}

fn push_numbered_section(document: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    document.push_str(&format!("## {heading}\n\n"));
    for (position, item) in items.iter().enumerate() {
        document.push_str(&format!("{}. {item}\n", position + 1));
    }
    document.push('\n');
}

/// Derives a download file name from the specification title.
///
/// Whitespace runs become a single `-` and the result is lower-cased.
#[must_use]
pub fn export_file_name(spec: &Specification, format: ExportFormat) -> String {
    let stem = if spec.title().is_empty() {
        DEFAULT_FILE_STEM.to_owned()
    } else {
        slug(spec.title())
    };
    format!("{stem}.{}", format.extension())
}

fn slug(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_whitespace = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                stem.push('-');
            }
            in_whitespace = true;
        } else {
            stem.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    stem
}
