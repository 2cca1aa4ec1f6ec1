//! Error types for the slidebrief library.
//!
//! A single fatal error enum covers the whole pipeline. There is no
//! non-fatal, per-slide error type on purpose: one failed summarization
//! call aborts the entire batch, so a slide-level failure is just another
//! way for the top-level `summarize*` functions to return `Err`. Callers
//! never receive partial results.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the slidebrief library.
#[derive(Debug, Error)]
pub enum SlidebriefError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Deck file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a .pptx container.
    ///
    /// A PowerPoint deck is an OPC package, i.e. a ZIP archive; anything
    /// that does not start with the ZIP local-file signature cannot be one.
    #[error("File is not a valid .pptx deck: '{path}'\nFirst bytes: {magic:?}")]
    NotAPptx { path: PathBuf, magic: [u8; 4] },

    // ── Deck errors ───────────────────────────────────────────────────────
    /// The container opened but its slide parts could not be parsed.
    #[error("Deck '{path}' could not be parsed: {detail}")]
    DeckParseFailed { path: PathBuf, detail: String },

    /// Selected slide numbers match nothing in the deck.
    #[error("Slide {slide} is out of range (deck has {total} slides)")]
    SlideOutOfRange { slide: u32, total: usize },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// A summarization call failed. The whole batch is abandoned: no
    /// partial output is produced.
    #[error("Summarization failed for slide {slide}: {detail}")]
    SlideFailed { slide: u32, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output JSON file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
