//! DOCX sources: one record per body paragraph.
//!
//! Only `word/document.xml` is read. A paragraph's text is the concatenation
//! of its `w:t` runs, with `w:tab` rendered as `\t` and `w:br`/`w:cr` as
//! `\n`. Paragraphs nested in tables or text boxes are not body paragraphs
//! and are skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{IngestError, Result};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads every body paragraph of a DOCX file, blank ones included.
pub(crate) fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>> {
    let parse_error = |message: String| IngestError::DocxParse {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| IngestError::read(path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| parse_error(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| parse_error(format!("{DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| parse_error(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs = parse_paragraphs(&xml).map_err(parse_error)?;
    tracing::debug!(
        path = %path.display(),
        paragraphs = paragraphs.len(),
        "read docx paragraphs"
    );
    Ok(paragraphs)
}

/// Extracts body paragraph texts from `document.xml` content.
fn parse_paragraphs(xml: &str) -> std::result::Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    // Depth inside tables / text boxes, whose paragraphs are not body paragraphs.
    let mut nested = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested += 1,
                b"p" if nested == 0 => current = Some(String::new()),
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if nested == 0 => paragraphs.push(String::new()),
                b"tab" if in_run && nested == 0 => push_text(&mut current, "\t"),
                b"br" | b"cr" if in_run && nested == 0 => push_text(&mut current, "\n"),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => nested = nested.saturating_sub(1),
                b"p" if nested == 0 => {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(text) if in_text && nested == 0 => {
                let raw = String::from_utf8_lossy(&text);
                let unescaped = quick_xml::escape::unescape(&raw).map_err(|e| e.to_string())?;
                push_text(&mut current, &unescaped);
            }
            Event::GeneralRef(reference) if in_text && nested == 0 => {
                let entity = format!("&{};", String::from_utf8_lossy(&reference));
                let resolved = quick_xml::escape::unescape(&entity).map_err(|e| e.to_string())?;
                push_text(&mut current, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_text(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}
