//! Format-specific renderers for content trees.
//!
//! Content nodes know nothing about output formats. An [`Exporter`] walks a
//! tree and matches exhaustively on the node variants, so adding a leaf kind
//! is a compile error in every exporter until it is handled.

use crate::content::ContentNode;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Renders content trees into one output format
pub trait Exporter: Send + Sync {
    /// Renders a node (and its subtree) without document framing
    fn render(&self, node: &ContentNode) -> String;

    /// Renders a full document; never fails
    ///
    /// Absent content produces a placeholder document.
    fn export(&self, content: Option<&ContentNode>) -> String;
}

/// Available export formats
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Pseudo-PDF plain-text report
    #[default]
    PdfText,
}

impl ExportFormat {
    /// Exporter implementing this format
    #[must_use]
    pub fn exporter(self) -> &'static dyn Exporter {
        match self {
            Self::PdfText => &PdfTextExporter,
        }
    }
}

/// Exports `content` in `format`
#[must_use]
pub fn export(content: Option<&ContentNode>, format: ExportFormat) -> String {
    format.exporter().export(content)
}

const BANNER: &str = "==================================================";
const SEPARATOR: &str = "--------------------------------------------------";

/// Pseudo-PDF exporter producing a plain-text report
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfTextExporter;

impl PdfTextExporter {
    /// Suggested file name for a ticket's export
    #[must_use]
    pub fn file_name(ticket_id: impl std::fmt::Display) -> String {
        format!("ticket_{ticket_id}_description.pdf")
    }

    fn header() -> String {
        format!("{BANNER}\n     EXPORT PDF - TICKET DESCRIPTION\n{BANNER}\n\n")
    }

    fn footer() -> String {
        format!("\n{BANNER}\n     Fin du document PDF\n{BANNER}")
    }

    fn section(out: &mut String, title: &str) {
        let _ = writeln!(out, "SECTION {title}");
        let _ = writeln!(out, "{SEPARATOR}");
    }

    fn close_section(out: &mut String) {
        let _ = writeln!(out, "{SEPARATOR}\n");
    }

    fn render_into(&self, node: &ContentNode, out: &mut String) {
        match node {
            ContentNode::Text { text } => {
                Self::section(out, "TEXTE");
                let _ = writeln!(out, "{text}");
                Self::close_section(out);
            }
            ContentNode::Image { path, caption } => {
                Self::section(out, "IMAGE");
                let _ = writeln!(out, "Fichier : {path}");
                if !caption.is_empty() {
                    let _ = writeln!(out, "Legende : {caption}");
                }
                out.push_str("[IMAGE PLACEHOLDER]\n");
                Self::close_section(out);
            }
            ContentNode::Video {
                path,
                duration_seconds,
            } => {
                Self::section(out, "VIDEO");
                let _ = writeln!(out, "Fichier : {path}");
                if *duration_seconds > 0 {
                    let _ = writeln!(
                        out,
                        "Duree   : {} min {:02} sec",
                        duration_seconds / 60,
                        duration_seconds % 60
                    );
                }
                out.push_str("[VIDEO PLACEHOLDER]\n");
                Self::close_section(out);
            }
            ContentNode::Composite { children } => {
                if children.is_empty() {
                    out.push_str("[Contenu composite vide]\n\n");
                    return;
                }
                let _ = writeln!(out, "{BANNER}");
                let _ = writeln!(out, "DESCRIPTION COMPOSITE - {} element(s)", children.len());
                let _ = writeln!(out, "{BANNER}\n");
                for (index, child) in children.iter().enumerate() {
                    let _ = writeln!(out, "--- Element {} ---\n", index + 1);
                    self.render_into(child, out);
                }
            }
        }
    }
}

impl Exporter for PdfTextExporter {
    fn render(&self, node: &ContentNode) -> String {
        let mut out = String::new();
        self.render_into(node, &mut out);
        out
    }

    fn export(&self, content: Option<&ContentNode>) -> String {
        let body = content.map_or_else(|| "[Aucun contenu]\n".to_string(), |node| node.accept(self));
        format!("{}{body}{}", Self::header(), Self::footer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_content_placeholder() {
        let out = PdfTextExporter.export(None);
        assert!(out.starts_with(BANNER));
        assert!(out.contains("     EXPORT PDF - TICKET DESCRIPTION\n"));
        assert!(out.contains("[Aucun contenu]\n"));
        assert!(out.ends_with(&format!("     Fin du document PDF\n{BANNER}")));
    }

    #[test]
    fn text_section_exact() {
        let out = PdfTextExporter.render(&ContentNode::text("hello"));
        assert_eq!(
            out,
            format!("SECTION TEXTE\n{SEPARATOR}\nhello\n{SEPARATOR}\n\n")
        );
    }

    #[test]
    fn image_caption_line_is_optional() {
        let with = PdfTextExporter.render(&ContentNode::image("a.png", "form"));
        assert!(with.contains("Fichier : a.png\nLegende : form\n[IMAGE PLACEHOLDER]\n"));
        let without = PdfTextExporter.render(&ContentNode::image("a.png", ""));
        assert!(!without.contains("Legende"));
    }

    #[test]
    fn video_duration_formatting() {
        let out = PdfTextExporter.render(&ContentNode::video("v.mp4", 125));
        assert!(out.contains("Duree   : 2 min 05 sec\n"));
        let zero = PdfTextExporter.render(&ContentNode::video("v.mp4", 0));
        assert!(!zero.contains("Duree"));
        assert!(zero.contains("[VIDEO PLACEHOLDER]"));
    }

    #[test]
    fn empty_composite_marker() {
        let out = PdfTextExporter.render(&ContentNode::composite([]));
        assert_eq!(out, "[Contenu composite vide]\n\n");
    }

    #[test]
    fn format_dispatch() {
        let node = ContentNode::text("x");
        assert_eq!(
            export(Some(&node), ExportFormat::PdfText),
            PdfTextExporter.export(Some(&node))
        );
    }

    #[test]
    fn file_name() {
        assert_eq!(PdfTextExporter::file_name(1001), "ticket_1001_description.pdf");
    }
}
