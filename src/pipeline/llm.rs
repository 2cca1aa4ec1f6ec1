//! LLM interaction: one chat-completion round trip per slide.
//!
//! This module is intentionally thin — the instruction text lives in
//! [`crate::prompts`] so it can be changed without touching the call logic
//! here. There is deliberately no retry loop and no per-call timeout:
//! every call either returns the model's answer or fails the whole batch.

use crate::config::SummaryConfig;
use crate::error::SlidebriefError;
use crate::output::SlideSummary;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Summarize a single slide's text.
///
/// The request is one user-role message containing the full request text
/// (instruction prefix + slide text). The returned summary is the trimmed
/// content of the model's first response choice.
///
/// # Errors
///
/// Any provider failure (network, authentication, malformed response) maps
/// to [`SlidebriefError::SlideFailed`], which aborts the enclosing batch.
pub async fn summarize_slide(
    provider: &Arc<dyn LLMProvider>,
    slide_number: u32,
    request_text: &str,
    config: &SummaryConfig,
) -> Result<SlideSummary, SlidebriefError> {
    let start = Instant::now();

    let messages = vec![ChatMessage::user(request_text)];
    let options = build_options(config);

    let response = provider
        .chat(&messages, Some(&options))
        .await
        .map_err(|e| SlidebriefError::SlideFailed {
            slide: slide_number,
            detail: e.to_string(),
        })?;

    let duration = start.elapsed();
    debug!(
        "Slide {}: {} input tokens, {} output tokens, {:?}",
        slide_number, response.prompt_tokens, response.completion_tokens, duration
    );

    Ok(SlideSummary {
        slide_number,
        summary: response.content.trim().to_string(),
        input_tokens: response.prompt_tokens as u64,
        output_tokens: response.completion_tokens as u64,
        duration_ms: duration.as_millis() as u64,
    })
}

/// Build `CompletionOptions` from the summary config.
fn build_options(config: &SummaryConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}
