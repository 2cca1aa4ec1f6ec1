//! Slide text extraction: walk the parsed deck and collect per-slide text.
//!
//! The deck parser exposes each slide as a tree of typed elements. Text
//! bodies, tables, and lists carry text runs; pictures and unrecognised
//! shapes do not. Per slide, every text-bearing element contributes its
//! trimmed text, fragments are joined with a single space, and slides
//! contributing nothing are omitted entirely — so slide numbers in the
//! result are 1-based but not necessarily contiguous.
//!
//! Extraction is pure: the same file always yields the same result.

use crate::error::SlidebriefError;
use pptx_to_md::{ParserConfig, PptxContainer, Run, SlideElement};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Text extracted from one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideText {
    /// Physical slide number, 1-indexed.
    pub number: u32,
    /// Space-joined, order-preserving concatenation of the slide's trimmed
    /// element texts. Never empty.
    pub text: String,
}

/// Extraction result for a whole deck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckText {
    /// Physical slides in the deck, including text-less ones.
    pub slide_count: usize,
    /// Slides that carried text, ascending by slide number.
    pub slides: Vec<SlideText>,
}

/// Extract all slide text from a deck file.
///
/// Synchronous — container parsing does blocking file I/O. Async callers
/// wrap this in `spawn_blocking` (see [`crate::summarize`]).
pub fn extract_deck(path: &Path) -> Result<DeckText, SlidebriefError> {
    let config = ParserConfig::builder().extract_images(false).build();

    let mut container =
        PptxContainer::open(path, config).map_err(|e| SlidebriefError::DeckParseFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    let slide_count = container.slide_count as usize;

    let mut slides = Vec::new();
    for slide_result in container.iter_slides() {
        let slide = slide_result.map_err(|e| SlidebriefError::DeckParseFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        if let Some(text) = slide_text(&slide.elements) {
            slides.push(SlideText {
                number: slide.slide_number,
                text,
            });
        }
    }

    // The container yields slides in archive file-name order, which is
    // lexicographic (slide10.xml sorts before slide2.xml). Physical order
    // is numeric.
    slides.sort_by_key(|s| s.number);

    debug!(
        "Extracted text from {}/{} slides of {}",
        slides.len(),
        slide_count,
        path.display()
    );

    Ok(DeckText { slide_count, slides })
}

/// Collect the text of one slide from its elements, or `None` when no
/// element contributes any non-whitespace text.
pub fn slide_text(elements: &[SlideElement]) -> Option<String> {
    let fragments: Vec<String> = elements.iter().filter_map(element_text).collect();
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(" "))
    }
}

/// Trimmed text of a single element, or `None` for elements that carry no
/// text (pictures, unrecognised shapes) or only whitespace.
fn element_text(element: &SlideElement) -> Option<String> {
    let raw = match element {
        SlideElement::Text(text, _) => runs_text(&text.runs),
        SlideElement::List(list, _) => {
            runs_text(list.items.iter().flat_map(|item| item.runs.iter()))
        }
        SlideElement::Table(table, _) => {
            // Cell runs carry no separators of their own; join cells with a
            // space so adjacent cells don't run together.
            let cells: Vec<String> = table
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .map(|cell| runs_text(&cell.runs))
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            cells.join(" ")
        }
        _ => return None,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Concatenate the raw text of a run sequence. Paragraph breaks already
/// appear as trailing newlines on the final run of each paragraph.
fn runs_text<'a>(runs: impl IntoIterator<Item = &'a Run>) -> String {
    runs.into_iter().map(|r| r.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pptx_to_md::{
        ElementPosition, Formatting, ImageReference, ListElement, ListItem, TableCell,
        TableElement, TableRow, TextElement,
    };

    fn run(text: &str) -> Run {
        Run {
            text: text.to_string(),
            formatting: Formatting::default(),
        }
    }

    fn text_element(text: &str) -> SlideElement {
        SlideElement::Text(TextElement { runs: vec![run(text)] }, ElementPosition::default())
    }

    #[test]
    fn joins_shape_texts_with_single_space() {
        let elements = vec![text_element("Title\n"), text_element("Body text\n")];
        assert_eq!(slide_text(&elements), Some("Title Body text".to_string()));
    }

    #[test]
    fn preserves_element_order() {
        let elements = vec![text_element("b\n"), text_element("a\n"), text_element("c\n")];
        assert_eq!(slide_text(&elements), Some("b a c".to_string()));
    }

    #[test]
    fn whitespace_only_shapes_contribute_nothing() {
        let elements = vec![text_element("   \n"), text_element("\t")];
        assert_eq!(slide_text(&elements), None);
    }

    #[test]
    fn empty_slide_yields_none() {
        assert_eq!(slide_text(&[]), None);
    }

    #[test]
    fn images_and_unknown_elements_are_skipped() {
        let elements = vec![
            SlideElement::Image(ImageReference {
                id: "rId2".into(),
                target: "../media/image1.png".into(),
            }, ElementPosition::default()),
            SlideElement::Unknown,
            text_element("Caption\n"),
        ];
        assert_eq!(slide_text(&elements), Some("Caption".to_string()));
    }

    #[test]
    fn multi_run_shape_concatenates_runs() {
        let element = SlideElement::Text(TextElement {
            runs: vec![run("Hello "), run("world"), run("!\n")],
        }, ElementPosition::default());
        assert_eq!(slide_text(&[element]), Some("Hello world!".to_string()));
    }

    #[test]
    fn interior_paragraph_breaks_survive_trimming() {
        let element = SlideElement::Text(TextElement {
            runs: vec![run("Line one\n"), run("Line two\n")],
        }, ElementPosition::default());
        assert_eq!(
            slide_text(&[element]),
            Some("Line one\nLine two".to_string())
        );
    }

    #[test]
    fn table_cells_are_space_joined() {
        let table = SlideElement::Table(TableElement {
            rows: vec![
                TableRow {
                    cells: vec![
                        TableCell { runs: vec![run("Name")] },
                        TableCell { runs: vec![run("Age")] },
                    ],
                },
                TableRow {
                    cells: vec![
                        TableCell { runs: vec![run("Ada")] },
                        TableCell { runs: vec![run("36")] },
                    ],
                },
            ],
        }, ElementPosition::default());
        assert_eq!(slide_text(&[table]), Some("Name Age Ada 36".to_string()));
    }

    #[test]
    fn list_items_carry_their_text() {
        let list = SlideElement::List(ListElement {
            items: vec![
                ListItem {
                    level: 0,
                    is_ordered: false,
                    runs: vec![run("First point\n")],
                },
                ListItem {
                    level: 1,
                    is_ordered: false,
                    runs: vec![run("Nested point\n")],
                },
            ],
        }, ElementPosition::default());
        assert_eq!(
            slide_text(&[list]),
            Some("First point\nNested point".to_string())
        );
    }
}
