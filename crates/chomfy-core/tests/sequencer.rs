//! Integration tests for the line sequencer and the stateless loader.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chomfy_core::{LineRequest, PromptSequencer, SequenceRequest, load_line};
use chomfy_model::ErrorKind;
use filetime::FileTime;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn request_for(path: &Path) -> SequenceRequest {
    SequenceRequest {
        file_path: path.display().to_string(),
        ..SequenceRequest::default()
    }
}

fn touch_later(path: &Path) {
    let modified = fs::metadata(path).unwrap().modified().unwrap();
    let later = FileTime::from_system_time(modified + Duration::from_secs(10));
    filetime::set_file_mtime(path, later).unwrap();
}

#[test]
fn freezes_after_max_steps() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "colors.txt", "red\ngreen\nblue\n");
    let request = SequenceRequest {
        max_steps: 2,
        ..request_for(&path)
    };

    let mut node = PromptSequencer::new();
    let first = node.next_prompt(&request).unwrap();
    assert_eq!((first.prompt.as_str(), first.done), ("red", false));

    let second = node.next_prompt(&request).unwrap();
    assert_eq!(second.prompt, "green");
    assert_eq!((second.line_index, second.step_index), (2, 2));
    assert!(second.done);

    for _ in 0..4 {
        assert_eq!(node.next_prompt(&request).unwrap(), second);
    }
}

#[test]
fn auto_reset_restarts_after_exhaustion() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "colors.txt", "red\ngreen\nblue\n");
    let request = SequenceRequest {
        max_steps: 2,
        auto_reset: true,
        ..request_for(&path)
    };

    let mut node = PromptSequencer::new();
    let steps: Vec<(String, u64, bool)> = (0..5)
        .map(|_| {
            let out = node.next_prompt(&request).unwrap();
            (out.prompt, out.step_index, out.done)
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            ("red".to_string(), 1, false),
            ("green".to_string(), 2, true),
            ("red".to_string(), 1, false),
            ("green".to_string(), 2, true),
            ("red".to_string(), 1, false),
        ]
    );
}

#[test]
fn editing_the_file_restarts_the_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "colors.txt", "red\ngreen\nblue\n");
    let request = request_for(&path);

    let mut node = PromptSequencer::new();
    node.next_prompt(&request).unwrap();
    assert_eq!(node.next_prompt(&request).unwrap().prompt, "green");

    fs::write(&path, "cyan\nmagenta\n").unwrap();
    touch_later(&path);

    let restarted = node.next_prompt(&request).unwrap();
    assert_eq!(restarted.prompt, "cyan");
    assert_eq!((restarted.step_index, restarted.total_lines), (1, 2));
}

#[test]
fn changing_inputs_or_reset_restarts_the_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "colors.txt", "red\ngreen\nblue\n");
    let mut request = request_for(&path);

    let mut node = PromptSequencer::new();
    node.next_prompt(&request).unwrap();
    node.next_prompt(&request).unwrap();

    request.step = 2;
    assert_eq!(node.next_prompt(&request).unwrap().prompt, "red");
    assert_eq!(node.next_prompt(&request).unwrap().prompt, "blue");

    request.reset = true;
    assert_eq!(node.next_prompt(&request).unwrap().step_index, 1);
    assert_eq!(node.next_prompt(&request).unwrap().step_index, 1);
}

#[test]
fn csv_column_sequence() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "styles.csv", "style,weight\n oil ,1\nink,2\n");
    let request = SequenceRequest {
        csv_column: "style".to_string(),
        ..request_for(&path)
    };

    let mut node = PromptSequencer::new();
    let first = node.next_prompt(&request).unwrap();
    assert_eq!((first.prompt.as_str(), first.total_lines), ("oil", 2));
    assert_eq!(node.next_prompt(&request).unwrap().prompt, "ink");
}

#[test]
fn sequencer_errors_are_classified() {
    let dir = TempDir::new().unwrap();
    let mut node = PromptSequencer::new();

    let err = node.next_prompt(&SequenceRequest::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let missing = request_for(&dir.path().join("missing.txt"));
    assert_eq!(node.next_prompt(&missing).unwrap_err().kind(), ErrorKind::NotFound);

    let pdf = write(&dir, "notes.pdf", "x");
    assert_eq!(
        node.next_prompt(&request_for(&pdf)).unwrap_err().kind(),
        ErrorKind::UnsupportedFormat
    );

    let empty = write(&dir, "empty.txt", "");
    assert_eq!(
        node.next_prompt(&request_for(&empty)).unwrap_err().kind(),
        ErrorKind::EmptyFile
    );
}

#[test]
fn load_line_wraps_index() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "abc.txt", "a\nb\nc\n");
    let output = load_line(&LineRequest {
        file_path: path.display().to_string(),
        line_index: 4,
        ..LineRequest::default()
    })
    .unwrap();
    assert_eq!(
        (output.prompt.as_str(), output.line_index, output.total_lines),
        ("a", 1, 3)
    );
}

#[test]
fn load_line_splits_on_lone_carriage_returns() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "mac.txt", "a\rb\rc");
    let output = load_line(&LineRequest {
        file_path: path.display().to_string(),
        line_index: 2,
        ..LineRequest::default()
    })
    .unwrap();
    assert_eq!(
        (output.prompt.as_str(), output.line_index, output.total_lines),
        ("b", 2, 3)
    );
}

#[test]
fn sequence_counts_mixed_line_endings() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "mixed.txt", "red\r\ngreen\rblue\n");

    let mut node = PromptSequencer::new();
    let request = request_for(&path);
    let prompts: Vec<String> = (0..4)
        .map(|_| node.next_prompt(&request).unwrap().prompt)
        .collect();
    assert_eq!(prompts, vec!["red", "green", "blue", "red"]);
}

#[cfg(feature = "docx")]
fn write_docx(path: &Path, paragraphs: &[&str]) {
    use std::io::Write;

    let file = fs::File::create(path).unwrap();
    let mut archive = zip::ZipWriter::new(file);
    archive
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    let body: String = paragraphs
        .iter()
        .map(|text| {
            if text.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>")
            }
        })
        .collect();
    write!(
        archive,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    )
    .unwrap();
    archive.finish().unwrap();
}

#[cfg(feature = "docx")]
#[test]
fn docx_sequence_skips_empty_paragraphs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.docx");
    write_docx(&path, &["one", "", "two"]);

    let mut node = PromptSequencer::new();
    let request = request_for(&path);
    let first = node.next_prompt(&request).unwrap();
    assert_eq!((first.prompt.as_str(), first.total_lines), ("one", 2));
    let second = node.next_prompt(&request).unwrap();
    assert_eq!((second.prompt.as_str(), second.line_index), ("two", 2));
}

#[cfg(feature = "docx")]
#[test]
fn docx_whitespace_paragraph_counts_for_sequence_but_not_lookup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("story.docx");
    write_docx(&path, &["one", "   ", "two"]);

    let mut node = PromptSequencer::new();
    let request = SequenceRequest {
        start_value: 2,
        ..request_for(&path)
    };
    let output = node.next_prompt(&request).unwrap();
    assert_eq!(
        (output.prompt.as_str(), output.line_index, output.total_lines),
        ("", 2, 3)
    );

    let lookup = load_line(&LineRequest {
        file_path: path.display().to_string(),
        line_index: 2,
        ..LineRequest::default()
    })
    .unwrap();
    assert_eq!(
        (lookup.prompt.as_str(), lookup.line_index, lookup.total_lines),
        ("two", 2, 2)
    );
}
