//! Output types for a summarization run.
//!
//! [`SummaryOutput`] carries the user-facing enumerated lines, the
//! per-slide detail behind them, and run statistics. Everything is
//! serde-serialisable so the CLI's `--json` mode and the JSON-array
//! artifact need no extra glue.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Result of summarizing one slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSummary {
    /// Physical slide number (1-indexed, non-contiguous when text-less
    /// slides were skipped).
    pub slide_number: u32,
    /// Trimmed text of the model's first response choice.
    pub summary: String,
    /// Prompt tokens consumed by this call.
    pub input_tokens: u64,
    /// Completion tokens produced by this call.
    pub output_tokens: u64,
    /// Wall-clock duration of this call in milliseconds.
    pub duration_ms: u64,
}

/// Complete result of a summarization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutput {
    /// One formatted line per summarized slide, ascending slide order:
    /// `"Slide number: {n} -- {summary}"`.
    pub lines: Vec<String>,
    /// Per-slide detail, positionally matching `lines`.
    pub slides: Vec<SlideSummary>,
    /// Run statistics.
    pub stats: SummaryStats,
}

/// Statistics for a summarization run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Physical slides in the deck, including text-less ones.
    pub total_slides: usize,
    /// Slides that were actually summarized.
    pub summarized_slides: usize,
    /// Slides skipped because they carried no text or fell outside the
    /// slide selection.
    pub skipped_slides: usize,
    /// Sum of prompt tokens across all calls.
    pub total_input_tokens: u64,
    /// Sum of completion tokens across all calls.
    pub total_output_tokens: u64,
    /// End-to-end wall-clock duration in milliseconds.
    pub total_duration_ms: u64,
    /// Time spent opening and extracting the deck.
    pub extract_duration_ms: u64,
    /// Time spent waiting on the model, all calls combined (wall clock of
    /// the joined fan-out, not the sum of individual calls).
    pub llm_duration_ms: u64,
}

/// Format the enumerated line for one slide.
pub fn format_line(slide_number: u32, summary: &str) -> String {
    format!("Slide number: {} -- {}", slide_number, summary)
}

/// Derive the default output artifact path for an input deck:
/// the input's file stem with a `.json` extension, in the current
/// directory.
///
/// `lectures/AsyncIO Lecture.pptx` → `AsyncIO Lecture.json`.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "summary".to_string());
    PathBuf::from(format!("{stem}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format_is_exact() {
        assert_eq!(
            format_line(3, "A quick tour of ownership."),
            "Slide number: 3 -- A quick tour of ownership."
        );
    }

    #[test]
    fn default_output_path_uses_file_stem() {
        assert_eq!(
            default_output_path("lectures/AsyncIO Lecture.pptx"),
            PathBuf::from("AsyncIO Lecture.json")
        );
        assert_eq!(default_output_path("deck.pptx"), PathBuf::from("deck.json"));
    }

    #[test]
    fn output_serialises_to_json() {
        let output = SummaryOutput {
            lines: vec![format_line(1, "Intro.")],
            slides: vec![SlideSummary {
                slide_number: 1,
                summary: "Intro.".into(),
                input_tokens: 42,
                output_tokens: 7,
                duration_ms: 120,
            }],
            stats: SummaryStats {
                total_slides: 2,
                summarized_slides: 1,
                skipped_slides: 1,
                total_input_tokens: 42,
                total_output_tokens: 7,
                total_duration_ms: 150,
                extract_duration_ms: 10,
                llm_duration_ms: 120,
            },
        };

        let json = serde_json::to_string_pretty(&output).unwrap();
        let back: SummaryOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lines, output.lines);
        assert_eq!(back.stats.total_slides, 2);
    }
}
