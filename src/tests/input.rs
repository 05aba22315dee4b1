use super::{insert_section, parse_document, parse_snippet, read_document, verify};
use crate::error::Error;
use crate::formats::markdown::MarkdownFormat;
use std::fmt::Write as _;
use std::io::Write;
use tempfile::NamedTempFile;

const PREAMBLE: &str = "# Use Case Specifications\n\n";

/// A catalogue of `n` use cases in the usual entry layout.
fn catalogue(n: usize) -> String {
    let mut text = String::from(PREAMBLE);
    for i in 1..=n {
        write!(
            text,
            "## {i}. Use Case {i}\n\n**1. Use Case Name**\nUse Case {i}\n\n**2. Steps**\n\n1.  First step.\n2.  Second step.\n\n---\n\n"
        )
        .unwrap();
    }
    text
}

#[test]
fn test_parse_sections_and_preamble() {
    let text = catalogue(3);
    let doc = parse_document(&text, &MarkdownFormat::default()).unwrap();

    assert_eq!(doc.preamble, PREAMBLE);
    assert_eq!(doc.len(), 3);
    for (i, section) in doc.iter().enumerate() {
        assert_eq!(section.number, i + 1);
        assert_eq!(section.title, format!("Use Case {}", i + 1));
        assert_eq!(section.heading, format!("## {0}. Use Case {0}", i + 1));
        assert_eq!(section.line_ending, "\n");
        assert!(section.body.starts_with("\n**1. Use Case Name**"));
        assert!(section.body.ends_with("---\n\n"));
    }
    assert_eq!(doc.sections[0].source_line, Some(3));
}

#[test]
fn test_round_trip_is_byte_identical() {
    let format = MarkdownFormat::default();
    let samples = [
        catalogue(5),
        "## 1. Only\nno trailing newline".to_string(),
        "## 1. Heading at the very end".to_string(),
        "intro\r\n\r\n## 1. One\r\n\r\nbody\r\n\r\n## 2. Two\r\n".to_string(),
        "##   1.   Spaced   \n\nbody\n".to_string(),
        String::new(),
    ];

    for text in samples {
        let doc = parse_document(&text, &format).unwrap();
        assert_eq!(doc.serialize(), text, "round trip changed {text:?}");
    }
}

#[test]
fn test_crlf_headings_keep_their_terminator() {
    let text = "## 1. One\r\nbody\r\n## 2. Two\r\n";
    let doc = parse_document(text, &MarkdownFormat::default()).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.sections[0].title, "One");
    assert_eq!(doc.sections[0].line_ending, "\r\n");
    assert_eq!(doc.sections[0].body, "body\r\n");
    assert_eq!(doc.line_ending(), "\r\n");
}

#[test]
fn test_document_without_headings_is_all_preamble() {
    let text = "# Title\n\nJust prose, no numbered sections.\n";
    let doc = parse_document(text, &MarkdownFormat::default()).unwrap();

    assert!(doc.is_empty());
    assert_eq!(doc.preamble, text);
    assert_eq!(doc.serialize(), text);
}

#[test]
fn test_gap_in_numbering_is_malformed() {
    let text = "## 1. A\n\n## 2. B\n\n## 4. D\n";
    let err = parse_document(text, &MarkdownFormat::default()).unwrap_err();

    match err {
        Error::MalformedDocument {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 5);
            assert_eq!(expected, 3);
            assert_eq!(found, "4");
        }
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn test_duplicate_and_unanchored_numbering_is_malformed() {
    let format = MarkdownFormat::default();

    let duplicate = parse_document("## 1. A\n## 1. B\n", &format).unwrap_err();
    assert!(matches!(
        duplicate,
        Error::MalformedDocument { line: 2, expected: 2, .. }
    ));

    let late_start = parse_document("intro\n\n## 2. A\n", &format).unwrap_err();
    assert!(matches!(
        late_start,
        Error::MalformedDocument { line: 3, expected: 1, .. }
    ));

    let descending = parse_document("## 1. A\n## 3. C\n## 2. B\n", &format).unwrap_err();
    assert!(matches!(
        descending,
        Error::MalformedDocument { line: 2, expected: 2, .. }
    ));
}

#[test]
fn test_code_fence_lookalike_is_body_text() {
    let text = "## 1. A\n\nExample:\n\n```markdown\n## 7. Not a section\n```\n\n## 2. B\n";
    let doc = parse_document(text, &MarkdownFormat::default()).unwrap();

    assert_eq!(doc.len(), 2);
    assert!(doc.sections[0].body.contains("## 7. Not a section"));
    assert_eq!(doc.sections[1].title, "B");
}

#[test]
fn test_non_structural_headings_stay_in_body() {
    let text = "## 1. A\n\n## Notes\n\n### 3. Sub-item\n\n> ## 9. Quoted\n\n## 2. B\n";
    let doc = parse_document(text, &MarkdownFormat::default()).unwrap();

    assert_eq!(doc.len(), 2);
    let body = &doc.sections[0].body;
    assert!(body.contains("## Notes"));
    assert!(body.contains("### 3. Sub-item"));
    assert!(body.contains("> ## 9. Quoted"));
}

#[test]
fn test_custom_level_and_separator() {
    let format = MarkdownFormat::new(3, ")").unwrap();
    let text = "## Chapter\n\n### 1) First\n\n### 2) Second\n";
    let doc = parse_document(text, &format).unwrap();

    assert_eq!(doc.preamble, "## Chapter\n\n");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.sections[1].title, "Second");
}

#[test]
fn test_read_document_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", catalogue(2)).unwrap();

    let doc = read_document(file.path(), &MarkdownFormat::default()).unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_append_after_last_section() {
    let text = catalogue(7);
    let body = "\n**1. Use Case Name**\nOnboarding\n\n---\n\n";
    let output = insert_section(&text, 8, "Onboarding", body).unwrap();

    assert!(output.starts_with(&text), "sections 1-7 must be unchanged");
    assert_eq!(&output[text.len()..], format!("## 8. Onboarding\n{body}"));

    let doc = parse_document(&output, &MarkdownFormat::default()).unwrap();
    assert_eq!(doc.len(), 8);
    assert_eq!(doc.sections[7].title, "Onboarding");
}

#[test]
fn test_insert_before_existing_section_shifts_the_rest() {
    let text = catalogue(10);
    let format = MarkdownFormat::default();
    let before = parse_document(&text, &format).unwrap();

    let body = "\nNew body with 1. a numbered line\n\n";
    let output = insert_section(&text, 8, "Onboarding", body).unwrap();
    let after = parse_document(&output, &format).unwrap();

    assert_eq!(after.len(), 11);
    for (i, section) in after.iter().enumerate() {
        assert_eq!(section.number, i + 1);
    }

    // Prefix stability
    for i in 0..7 {
        assert_eq!(after.sections[i].heading, before.sections[i].heading);
        assert_eq!(after.sections[i].body, before.sections[i].body);
    }

    // New section in slot 8, verbatim
    assert_eq!(after.sections[7].title, "Onboarding");
    assert_eq!(after.sections[7].body, body);

    // Old 8.. became 9.., bodies intact
    for i in 7..10 {
        let moved = &after.sections[i + 1];
        assert_eq!(moved.title, before.sections[i].title);
        assert_eq!(moved.heading, format!("## {}. Use Case {}", i + 2, i + 1));
        assert_eq!(moved.body, before.sections[i].body);
    }
}

#[test]
fn test_insert_first_shifts_everything() {
    let text = catalogue(3);
    let output = insert_section(&text, 1, "Intro", "\ntext\n\n").unwrap();

    assert!(output.starts_with(&format!("{PREAMBLE}## 1. Intro\n\ntext\n\n## 2. Use Case 1\n")));
    assert!(output.contains("## 4. Use Case 3\n"));
    assert!(!output.contains("## 5."));
}

#[test]
fn test_insert_target_out_of_range() {
    let text = catalogue(3);

    for target in [0, 5] {
        match insert_section(&text, target, "X", "") {
            Err(Error::OutOfRange { target: t, max }) => {
                assert_eq!(t, target);
                assert_eq!(max, 4);
            }
            other => panic!("expected OutOfRange for {target}, got {other:?}"),
        }
    }
}

#[test]
fn test_insert_rejects_body_that_swallows_headings() {
    let text = "## 1. A\n\nbody\n\n## 2. B\n\nbody\n";
    let err = insert_section(text, 2, "Broken", "\n```\nunterminated fence\n").unwrap_err();
    assert!(matches!(err, Error::InvalidSection(_)), "got {err:?}");
}

#[test]
fn test_insert_into_malformed_document_fails() {
    let err = insert_section("## 1. A\n## 2. B\n## 4. D\n", 2, "X", "").unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
}

#[test]
fn test_parse_snippet_with_placeholder_number() {
    let snippet = "\n## 18. Employer Onboarding\n\n**1. Use Case Name**\nEmployer Onboarding\n\n---\n";
    let (title, body) = parse_snippet(snippet, &MarkdownFormat::default()).unwrap();

    assert_eq!(title, "Employer Onboarding");
    assert_eq!(body, "\n**1. Use Case Name**\nEmployer Onboarding\n\n---\n");
}

#[test]
fn test_parse_snippet_rejects_wrong_shapes() {
    let format = MarkdownFormat::default();

    for snippet in [
        "no heading at all\n",
        "## 1. One\n\n## 2. Two\n",
        "stray text\n\n## 1. One\n",
    ] {
        let err = parse_snippet(snippet, &format).unwrap_err();
        assert!(
            matches!(err, Error::InvalidSection(_)),
            "{snippet:?} gave {err:?}"
        );
    }
}

#[test]
fn test_every_target_yields_contiguous_numbering() {
    let n = 6;
    let text = catalogue(n);
    let format = MarkdownFormat::default();
    let before = parse_document(&text, &format).unwrap();

    for target in 1..=n + 1 {
        let output = insert_section(&text, target, "Inserted", "\nnew body\n\n").unwrap();
        let after = parse_document(&output, &format).unwrap();

        assert_eq!(after.len(), n + 1, "target {target}");
        let numbers: Vec<usize> = after.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=n + 1).collect::<Vec<_>>(), "target {target}");
        assert_eq!(after.sections[target - 1].title, "Inserted");
        for (kept, original) in after.iter().zip(before.iter()).take(target - 1) {
            assert_eq!(kept.heading, original.heading);
            assert_eq!(kept.body, original.body);
        }
        for (moved, original) in after.iter().skip(target).zip(before.iter().skip(target - 1)) {
            assert_eq!(moved.title, original.title);
        }
    }
}

#[test]
fn test_byte_order_mark_stays_in_preamble() {
    let text = "\u{feff}## 1. Sign Up\n\nbody\n\n## 2. Create Job Post\n\nbody\n";
    let doc = parse_document(text, &MarkdownFormat::default()).unwrap();

    assert_eq!(doc.preamble, "\u{feff}");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.sections[0].title, "Sign Up");
    assert_eq!(doc.sections[0].source_line, Some(1));
    assert_eq!(doc.serialize(), text);
}

#[test]
fn test_insert_first_into_document_with_byte_order_mark() {
    let text = "\u{feff}## 1. Sign Up\n\nbody\n";
    let output = insert_section(text, 1, "Onboarding", "\nsteps\n").unwrap();

    assert_eq!(
        output,
        "\u{feff}## 1. Onboarding\n\nsteps\n## 2. Sign Up\n\nbody\n"
    );
}

#[test]
fn test_snippet_with_byte_order_mark() {
    let snippet = "\u{feff}## 8. Onboarding\n\nsteps\n";
    let (title, body) = parse_snippet(snippet, &MarkdownFormat::default()).unwrap();

    assert_eq!(title, "Onboarding");
    assert_eq!(body, "\nsteps\n");
}

#[test]
fn test_verify_names_the_first_differing_title() {
    let format = MarkdownFormat::default();
    let expected = parse_document("## 1. A\n## 2. B\n", &format).unwrap();

    let err = verify("## 1. A\n## 2. C\n", &expected, &format).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("\"C\" as section 2"), "got {message}");
    assert!(message.contains("expected \"B\""), "got {message}");

    let err = verify("## 1. A\n", &expected, &format).unwrap_err();
    assert!(err.to_string().contains("parses to 1 sections, expected 2"));

    verify("## 1. A\n## 2. B\n", &expected, &format).unwrap();
}
