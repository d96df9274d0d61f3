//! DOCX text extraction.
//!
//! A .docx file is a ZIP container with the document body in
//! `word/document.xml`. Text lives in `<w:t>` runs; each closed `<w:p>`
//! paragraph contributes a newline.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

pub fn extract(bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("not a ZIP container")?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("missing word/document.xml")?
        .read_to_string(&mut document_xml)
        .context("unreadable word/document.xml")?;

    Ok(paragraph_text(&document_xml))
}

/// Walks the WordprocessingML event stream, collecting `<w:t>` text and
/// joining paragraphs with newlines. Malformed XML ends the walk early with
/// whatever was collected; the empty-on-failure contract lives one level up.
fn paragraph_text(xml: &str) -> String {
    let mut reader = Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Err(_) | Ok(Event::Eof) => break,
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                if let Ok(text) = e.unescape() {
                    out.push_str(&text);
                }
            }
            Ok(_) => {}
        }
        buf.clear();
    }

    out.trim_end().to_string()
}

/// Builds a minimal .docx in memory for extraction tests.
#[cfg(test)]
pub(crate) fn build_test_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let mut body = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for paragraph in paragraphs {
        body.push_str("<w:p><w:r><w:t>");
        body.push_str(paragraph);
        body.push_str("</w:t></w:r></w:p>");
    }
    body.push_str("</w:body></w:document>");

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(body.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_paragraphs_joined_by_newlines() {
        let bytes = build_test_docx(&["First paragraph", "Second paragraph"]);
        let text = extract(&bytes).unwrap();
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }

    #[test]
    fn test_runs_within_a_paragraph_are_concatenated() {
        let body = r#"<?xml version="1.0"?><w:document xmlns:w="x"><w:body><w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraph_text(body), "Hello world");
    }

    #[test]
    fn test_xml_entities_are_unescaped() {
        let body = r#"<w:document><w:body><w:p><w:r><w:t>C &amp; embedded systems</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraph_text(body), "C & embedded systems");
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let body = r#"<w:document><w:body>stray<w:p><w:r><w:t>kept</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(paragraph_text(body), "kept");
    }

    #[test]
    fn test_archive_without_document_xml_is_an_error() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        assert!(extract(&bytes).is_err());
    }

    #[test]
    fn test_extracts_from_file_backed_upload() {
        let bytes = build_test_docx(&["Stored on disk first"]);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let read_back = std::fs::read(file.path()).unwrap();
        assert_eq!(extract(&read_back).unwrap(), "Stored on disk first");
    }
}
