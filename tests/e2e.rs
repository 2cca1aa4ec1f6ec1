//! End-to-end integration tests for slidebrief.
//!
//! Extraction tests run against synthetic decks assembled on the fly —
//! a .pptx is a ZIP of slide XML parts, so fixtures are built in a temp
//! directory and no binary files live in the repo.
//!
//! Tests that make live LLM API calls are gated behind the `E2E_ENABLED`
//! environment variable (plus `OPENAI_API_KEY`) so they do not run in CI
//! unless explicitly requested.
//!
//! Run with:
//!   cargo test --test e2e -- --nocapture
//!
//! Live tests:
//!   E2E_ENABLED=1 OPENAI_API_KEY=sk-... cargo test --test e2e -- --nocapture

use slidebrief::{
    default_output_path, extract_text, summarize, summarize_to_file, SlideSelection,
    SlidebriefError, SummaryConfig,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

// ── Fixture helpers ──────────────────────────────────────────────────────────

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#;

/// Render a minimal PresentationML slide part with one text shape per entry.
fn slide_xml(shape_texts: &[&str]) -> String {
    let shapes: String = shape_texts
        .iter()
        .map(|t| {
            format!(
                "<p:sp><p:txBody><a:bodyPr/><a:p><a:r><a:t>{t}</a:t></a:r></a:p></p:txBody></p:sp>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:sld \
         xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
         xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
         <p:cSld><p:spTree>{shapes}</p:spTree></p:cSld></p:sld>"
    )
}

/// Assemble a .pptx in `dir` from per-slide XML parts (slide 1 first).
fn build_deck(dir: &Path, name: &str, slides: &[String]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).expect("create deck file");
    let mut zip = zip::ZipWriter::new(file);

    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .expect("start content types");
    zip.write_all(CONTENT_TYPES.as_bytes())
        .expect("write content types");

    for (i, xml) in slides.iter().enumerate() {
        zip.start_file(
            format!("ppt/slides/slide{}.xml", i + 1),
            SimpleFileOptions::default(),
        )
        .expect("start slide part");
        zip.write_all(xml.as_bytes()).expect("write slide part");
    }

    zip.finish().expect("finish deck");
    path
}

fn live_enabled() -> bool {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run live e2e tests");
        return false;
    }
    if std::env::var("OPENAI_API_KEY").is_err() {
        println!("SKIP — OPENAI_API_KEY not set");
        return false;
    }
    true
}

// ── Extraction tests (no LLM, always run) ────────────────────────────────────

#[tokio::test]
async fn three_slide_deck_skips_textless_middle() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "lecture.pptx",
        &[
            slide_xml(&["Intro", "Welcome everyone"]),
            slide_xml(&[]),
            slide_xml(&["Summary"]),
        ],
    );

    let deck = extract_text(deck_path.to_str().unwrap())
        .await
        .expect("extraction should succeed");

    assert_eq!(deck.slide_count, 3);
    let numbers: Vec<u32> = deck.slides.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![1, 3], "text-less slide 2 must be absent");
    assert_eq!(deck.slides[0].text, "Intro Welcome everyone");
    assert_eq!(deck.slides[1].text, "Summary");
}

#[tokio::test]
async fn whitespace_only_deck_extracts_nothing() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "blank.pptx",
        &[slide_xml(&["   ", "\t"]), slide_xml(&[" "])],
    );

    let deck = extract_text(deck_path.to_str().unwrap())
        .await
        .expect("extraction should succeed");

    assert_eq!(deck.slide_count, 2);
    assert!(deck.slides.is_empty(), "whitespace-only shapes carry no text");
}

#[tokio::test]
async fn slides_past_nine_stay_in_numeric_order() {
    // The container lists archive entries lexicographically, so slide10.xml
    // sorts before slide2.xml there. Extraction must come back numeric.
    let dir = TempDir::new().unwrap();
    let slides: Vec<String> = (1..=11)
        .map(|n| slide_xml(&[&format!("Slide {n} content")]))
        .collect();
    let deck_path = build_deck(dir.path(), "big.pptx", &slides);

    let deck = extract_text(deck_path.to_str().unwrap())
        .await
        .expect("extraction should succeed");

    assert_eq!(deck.slide_count, 11);
    let numbers: Vec<u32> = deck.slides.iter().map(|s| s.number).collect();
    assert_eq!(numbers, (1..=11).collect::<Vec<u32>>());
    assert_eq!(deck.slides[1].text, "Slide 2 content");
    assert_eq!(deck.slides[9].text, "Slide 10 content");
}

#[tokio::test]
async fn extraction_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "repeat.pptx",
        &[slide_xml(&["Alpha", "Beta"]), slide_xml(&["Gamma"])],
    );

    let first = extract_text(deck_path.to_str().unwrap()).await.unwrap();
    let second = extract_text(deck_path.to_str().unwrap()).await.unwrap();

    assert_eq!(first.slide_count, second.slide_count);
    assert_eq!(first.slides, second.slides);
}

#[tokio::test]
async fn extraction_joins_shapes_in_order_with_single_spaces() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "shapes.pptx",
        &[slide_xml(&["One", "  Two  ", "Three"])],
    );

    let deck = extract_text(deck_path.to_str().unwrap()).await.unwrap();
    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.slides[0].text, "One Two Three");
}

// ── Input validation tests (no LLM, always run) ──────────────────────────────

#[tokio::test]
async fn missing_file_is_file_not_found() {
    let err = extract_text("/definitely/not/a/real/deck.pptx")
        .await
        .unwrap_err();
    assert!(matches!(err, SlidebriefError::FileNotFound { .. }));
}

#[tokio::test]
async fn non_zip_file_is_not_a_pptx() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.pptx");
    std::fs::write(&path, b"%PDF-1.7 this is no deck").unwrap();

    let err = extract_text(path.to_str().unwrap()).await.unwrap_err();
    match err {
        SlidebriefError::NotAPptx { magic, .. } => assert_eq!(&magic, b"%PDF"),
        other => panic!("expected NotAPptx, got: {other}"),
    }
}

// ── Summarization structure tests (no LLM, always run) ───────────────────────

/// A deck with no slide text must summarize to an empty output without
/// needing any provider credentials — no call is ever dispatched.
#[tokio::test]
async fn empty_deck_summarizes_to_empty_output_without_credentials() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(dir.path(), "blank.pptx", &[slide_xml(&["   "])]);

    let config = SummaryConfig::default();
    let output = summarize(deck_path.to_str().unwrap(), &config)
        .await
        .expect("empty deck should not require a provider");

    assert!(output.lines.is_empty());
    assert!(output.slides.is_empty());
    assert_eq!(output.stats.total_slides, 1);
    assert_eq!(output.stats.summarized_slides, 0);
    assert_eq!(output.stats.skipped_slides, 1);
}

/// Selection is validated before any provider is resolved.
#[tokio::test]
async fn out_of_range_selection_fails_before_provider_resolution() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(dir.path(), "short.pptx", &[slide_xml(&["Only slide"])]);

    let config = SummaryConfig::builder()
        .slides(SlideSelection::Single(100))
        .build()
        .unwrap();

    let err = summarize(deck_path.to_str().unwrap(), &config)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SlidebriefError::SlideOutOfRange {
            slide: 100,
            total: 1
        }
    ));
}

#[tokio::test]
async fn summarizing_missing_deck_propagates_input_error() {
    let config = SummaryConfig::default();
    let err = summarize("/no/such/deck.pptx", &config).await.unwrap_err();
    assert!(matches!(err, SlidebriefError::FileNotFound { .. }));
}

/// A provider failure produces an error and no output at all — there is no
/// partial-result path.
#[tokio::test]
async fn unknown_provider_fails_whole_run() {
    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "deck.pptx",
        &[slide_xml(&["Some content"]), slide_xml(&["More content"])],
    );

    let config = SummaryConfig::builder()
        .provider_name("definitely-not-a-provider")
        .build()
        .unwrap();

    let err = summarize(deck_path.to_str().unwrap(), &config)
        .await
        .unwrap_err();
    assert!(matches!(err, SlidebriefError::ProviderNotConfigured { .. }));
}

// ── Live LLM tests (gated) ───────────────────────────────────────────────────

/// Summarize a small real deck end-to-end and check the output contract:
/// one line per text-bearing slide, ascending, correctly labelled.
#[tokio::test]
async fn live_summarize_three_slide_deck() {
    if !live_enabled() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "async_lecture.pptx",
        &[
            slide_xml(&["AsyncIO in Python", "Why concurrency matters"]),
            slide_xml(&[]),
            slide_xml(&["Event loops schedule coroutines cooperatively"]),
        ],
    );

    let config = SummaryConfig::default();
    let output = summarize(deck_path.to_str().unwrap(), &config)
        .await
        .expect("live summarization should succeed");

    assert_eq!(output.lines.len(), 2, "slide 2 has no text");
    assert!(output.lines[0].starts_with("Slide number: 1 -- "));
    assert!(output.lines[1].starts_with("Slide number: 3 -- "));
    assert_eq!(output.slides[0].slide_number, 1);
    assert_eq!(output.slides[1].slide_number, 3);
    assert!(output.stats.total_input_tokens > 0);

    for line in &output.lines {
        println!("{line}");
    }
}

/// Write the JSON-array artifact under its default name and read it back.
#[tokio::test]
async fn live_summarize_writes_default_named_artifact() {
    if !live_enabled() {
        return;
    }

    let dir = TempDir::new().unwrap();
    let deck_path = build_deck(
        dir.path(),
        "AsyncIO Lecture.pptx",
        &[slide_xml(&["Coroutines suspend at await points"])],
    );

    let out_path = dir.path().join(default_output_path(&deck_path));
    assert_eq!(out_path.file_name().unwrap(), "AsyncIO Lecture.json");

    let config = SummaryConfig::default();
    let stats = summarize_to_file(deck_path.to_str().unwrap(), &out_path, &config)
        .await
        .expect("live summarization should succeed");

    assert_eq!(stats.summarized_slides, 1);
    assert!(out_path.exists(), "artifact was not created");

    let json = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<String> = serde_json::from_str(&json).expect("artifact must be a JSON array");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Slide number: 1 -- "));

    println!("artifact: {}", out_path.display());
    println!("{json}");
}
