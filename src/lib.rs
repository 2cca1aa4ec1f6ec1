//! # slidebrief
//!
//! Summarise PowerPoint slide decks slide-by-slide using LLMs.
//!
//! ## Why this crate?
//!
//! A slide deck is a terrible reading format for someone who missed the
//! session: text is scattered across title boxes, bullet lists, and tables
//! with no connective prose. This crate extracts the text of every slide
//! and asks a chat model to restate each one in plain language, returning
//! an enumerated list that reads top-to-bottom like lecture notes.
//!
//! ## Pipeline Overview
//!
//! ```text
//! deck (.pptx)
//!  │
//!  ├─ 1. Input    resolve local file or download from URL
//!  ├─ 2. Extract  walk slides → elements → runs, one text blob per slide
//!  ├─ 3. LLM      one concurrent chat call per slide (gpt-3.5-turbo / …)
//!  └─ 4. Output   "Slide number: {n} -- {summary}" lines + per-run stats
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slidebrief::{summarize, SummaryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from OPENAI_API_KEY / ANTHROPIC_API_KEY / …
//!     let config = SummaryConfig::default();
//!     let output = summarize("lecture.pptx", &config).await?;
//!     for line in &output.lines {
//!         println!("{line}");
//!     }
//!     eprintln!("tokens: {} in / {} out",
//!         output.stats.total_input_tokens,
//!         output.stats.total_output_tokens);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! All-or-nothing: the per-slide calls are dispatched together and joined;
//! the first failure aborts the whole run and no output is produced. There
//! are no retries and no partial results. Decks whose slides carry no text
//! summarize to an empty output without touching the network.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `slidebrief` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! slidebrief = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod prompts;
pub mod summarize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SlideSelection, SummaryConfig, SummaryConfigBuilder, DEFAULT_MODEL};
pub use error::SlidebriefError;
pub use output::{default_output_path, SlideSummary, SummaryOutput, SummaryStats};
pub use pipeline::extract::{DeckText, SlideText};
pub use prompts::DEFAULT_PROMPT;
pub use summarize::{
    extract_text, summarize, summarize_from_bytes, summarize_sync, summarize_to_file,
};
