//! Document extractor: turns an uploaded résumé into plain text.
//!
//! Extraction never fails: a document that cannot be parsed yields an empty
//! string and a `warn!` naming the file. Deciding what an empty result means is
//! left to the caller.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use lopdf::Document;
use tracing::{debug, warn};

use crate::models::document::ResumeDocument;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Parser selected for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Dispatches on the filename extension first, then on the declared MIME
    /// type. Anything unrecognised is treated as plain text.
    pub fn detect(filename: &str, content_type: Option<&str>) -> Self {
        let name = filename.trim().to_lowercase();
        if name.ends_with(".pdf") {
            return DocumentKind::Pdf;
        }
        if name.ends_with(".docx") {
            return DocumentKind::Docx;
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_lowercase());
        match mime.as_deref() {
            Some(PDF_MIME) => DocumentKind::Pdf,
            Some(DOCX_MIME) => DocumentKind::Docx,
            _ => DocumentKind::PlainText,
        }
    }
}

/// Extracts plain text from `document`. Returns an empty string on failure.
pub fn extract_text(document: &ResumeDocument<'_>) -> String {
    let kind = DocumentKind::detect(document.filename, document.content_type);

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(document.bytes, document.filename),
        DocumentKind::Docx => extract_docx(document.bytes, document.filename),
        DocumentKind::PlainText => decode_plain_text(document.bytes),
    };

    debug!(
        "Extracted {} chars from '{}' ({:?})",
        text.chars().count(),
        document.filename,
        kind
    );
    text
}

/// Per-page PDF extraction. A page that fails to yield text is skipped.
fn extract_pdf(bytes: &[u8], filename: &str) -> String {
    let pdf = match Document::load_mem(bytes) {
        Ok(pdf) => pdf,
        Err(error) => {
            warn!("Failed to parse PDF '{filename}': {error}");
            return String::new();
        }
    };

    let mut parts = Vec::new();
    for page_number in pdf.get_pages().keys() {
        match pdf.extract_text(&[*page_number]) {
            Ok(page_text) if !page_text.trim().is_empty() => parts.push(page_text),
            Ok(_) => {}
            Err(error) => debug!("Skipping page {page_number} of '{filename}': {error}"),
        }
    }

    parts.join("\n")
}

/// Joins the non-empty paragraphs of a DOCX body with newlines.
fn extract_docx(bytes: &[u8], filename: &str) -> String {
    let docx = match docx_rs::read_docx(bytes) {
        Ok(docx) => docx,
        Err(error) => {
            warn!("Failed to parse DOCX '{filename}': {error:?}");
            return String::new();
        }
    };

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for paragraph_child in &paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    paragraphs.join("\n")
}

/// UTF-8 with a Latin-1 fallback. Every byte maps to a char in Latin-1, so this
/// cannot fail.
fn decode_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
