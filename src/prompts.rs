//! The summarization prompt.
//!
//! Centralising the prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the default instruction requires
//!    editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the exact request text a
//!    slide produces without calling a model.
//!
//! Callers can override the default via
//! [`crate::config::SummaryConfig::prompt`]; the constant here is used only
//! when no override is provided.

/// Default instruction prepended to every slide's text.
pub const DEFAULT_PROMPT: &str = "Explain the given text of the slide in a simple way so every \
student who missed the class will understand the material as fast as he can.";

/// Build the request text for one slide: the instruction prefix, a colon,
/// then the slide's extracted text.
pub fn request_text(prompt: &str, slide_text: &str) -> String {
    format!("{}: {}", prompt, slide_text)
}
