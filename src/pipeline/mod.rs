//! Pipeline stages for slide-deck summarization.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the deck parser) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ llm
//! (URL/path) (deck text)  (one call per slide)
//! ```
//!
//! 1. [`input`]   — canonicalise the user-supplied path or URL to a local
//!    .pptx file
//! 2. [`extract`] — walk the parsed slide tree and collect per-slide text;
//!    runs in `spawn_blocking` because container parsing is synchronous
//! 3. [`llm`]     — drive one chat-completion call per slide; the only
//!    stage with network I/O

pub mod extract;
pub mod input;
pub mod llm;
