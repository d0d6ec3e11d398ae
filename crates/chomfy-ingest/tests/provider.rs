//! Integration tests for loading records through `LineSource`.

use std::fs;
use std::path::PathBuf;

use chomfy_ingest::{IngestError, LineSource};
use chomfy_model::{ErrorKind, ReadOptions, Record, SourceFormat};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn text_and_markdown_read_every_line() {
    let dir = TempDir::new().unwrap();
    let txt = write(&dir, "colors.txt", "red\n\n  blue  \n");
    let md = write(&dir, "colors.md", "# Colors\n- red\n");

    let records = LineSource::open(&txt).unwrap().load(None).unwrap();
    assert_eq!(
        records,
        vec![
            Record::new(1, "red"),
            Record::new(2, ""),
            Record::new(3, "  blue  ")
        ]
    );

    let source = LineSource::open(&md).unwrap();
    assert_eq!(source.format(), SourceFormat::Markdown);
    assert_eq!(source.load(None).unwrap().len(), 2);
}

#[test]
fn text_lines_split_on_every_line_ending() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "mixed.txt", "a\rb\r\nc\n\rd");

    let records = LineSource::open(&path).unwrap().load(None).unwrap();
    assert_eq!(
        records,
        vec![
            Record::new(1, "a"),
            Record::new(2, "b"),
            Record::new(3, "c"),
            Record::new(4, ""),
            Record::new(5, "d")
        ]
    );
}

#[test]
fn csv_column_selects_cells_regardless_of_other_columns() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "animals.csv", "name,score\nfox,3\nowl,5\n");

    let records = LineSource::open(&path).unwrap().load(Some("name")).unwrap();
    assert_eq!(records, vec![Record::new(1, "fox"), Record::new(2, "owl")]);
}

#[test]
fn csv_missing_column_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "animals.csv", "name,score\nfox,3\n");

    let err = LineSource::open(&path)
        .unwrap()
        .load(Some("color"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn filtered_options_apply_uniformly() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "colors.txt", " red \n\n blue\n");

    let records = LineSource::open(&path)
        .unwrap()
        .load_with(None, &ReadOptions::filtered(true, true))
        .unwrap();
    assert_eq!(records, vec![Record::new(1, "red"), Record::new(3, "blue")]);
}

#[test]
fn unsupported_extension_names_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "notes.rtf", "x");

    let err = LineSource::open(&path).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains(".rtf"));
}

#[cfg(feature = "docx")]
fn write_docx(path: &std::path::Path, paragraphs: &[&str]) {
    use std::io::Write;

    let file = fs::File::create(path).expect("create docx");
    let mut archive = zip::ZipWriter::new(file);
    archive
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .expect("start document part");
    let mut body = String::new();
    for paragraph in paragraphs {
        if paragraph.is_empty() {
            body.push_str("<w:p/>");
        } else {
            body.push_str(&format!(
                "<w:p><w:r><w:t xml:space=\"preserve\">{paragraph}</w:t></w:r></w:p>"
            ));
        }
    }
    write!(
        archive,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    )
    .expect("write document part");
    archive.finish().expect("finish docx");
}

#[cfg(feature = "docx")]
#[test]
fn docx_single_node_views_drop_blank_paragraphs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.docx");
    write_docx(&path, &["Once", "", "   ", "upon"]);

    let source = LineSource::open(&path).unwrap();
    let records = source.load(None).unwrap();
    assert_eq!(
        records,
        vec![
            Record::new(1, "Once"),
            Record::new(2, "   "),
            Record::new(3, "upon")
        ]
    );

    let records = source.load_with(None, &ReadOptions::lookup()).unwrap();
    assert_eq!(records, vec![Record::new(1, "Once"), Record::new(2, "upon")]);
}

#[cfg(feature = "docx")]
#[test]
fn docx_filtered_view_keeps_paragraph_positions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.docx");
    write_docx(&path, &["Once", "", " upon "]);

    let source = LineSource::open(&path).unwrap();
    let kept = source
        .load_with(None, &ReadOptions::filtered(false, false))
        .unwrap();
    assert_eq!(kept.len(), 3);

    let filtered = source
        .load_with(None, &ReadOptions::filtered(true, true))
        .unwrap();
    assert_eq!(filtered, vec![Record::new(1, "Once"), Record::new(3, "upon")]);
}

#[cfg(feature = "docx")]
#[test]
fn docx_corrupt_archive_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.docx", "not a zip");

    let err = LineSource::open(&path).unwrap().load(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[cfg(not(feature = "docx"))]
#[test]
fn docx_without_feature_is_dependency_unavailable() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "story.docx", "irrelevant");

    let source = LineSource::open(&path).expect("opening checks only the extension");
    let err = source.load(None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DependencyUnavailable);
}
