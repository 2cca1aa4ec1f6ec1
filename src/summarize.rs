//! Eager (whole-deck) summarization entry points.
//!
//! ## Failure model
//!
//! Summarization is all-or-nothing: every per-slide call must succeed for
//! the run to produce output. The fan-out launches every call up front and
//! joins them with [`futures::future::try_join_all`], which resolves the
//! results positionally (dispatch order, i.e. ascending slide order — never
//! completion order) and returns the first error as soon as one call fails,
//! dropping whatever calls are still in flight. There is no retry, no
//! concurrency cap, and no partial-result path.

use crate::config::{SlideSelection, SummaryConfig, DEFAULT_MODEL};
use crate::error::SlidebriefError;
use crate::output::{format_line, SummaryOutput, SummaryStats};
use crate::pipeline::extract::DeckText;
use crate::pipeline::{extract, input, llm};
use crate::prompts::{self, DEFAULT_PROMPT};
use edgequake_llm::{LLMProvider, ProviderFactory};
use futures::future;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Summarize a slide deck from a file path or URL.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `input_str` — Local file path or HTTP/HTTPS URL to a .pptx deck
/// * `config` — Summarization configuration
///
/// # Returns
/// `Ok(SummaryOutput)` with one formatted line per text-bearing slide, in
/// ascending slide order. A deck whose slides carry no text yields an empty
/// output (and needs no API credentials).
///
/// # Errors
/// - File not found / permission denied / not a .pptx / parse failure
/// - No LLM provider configured
/// - Any single summarization call failing — the whole run fails with
///   [`SlidebriefError::SlideFailed`] and no output is produced
pub async fn summarize(
    input_str: impl AsRef<str>,
    config: &SummaryConfig,
) -> Result<SummaryOutput, SlidebriefError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting summarization: {}", input_str);

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let deck_path = resolved.path().to_path_buf();

    // ── Step 2: Extract slide text ───────────────────────────────────────
    // Container parsing is synchronous file I/O; keep it off the executor.
    let extract_start = Instant::now();
    let parse_path = deck_path.clone();
    let deck = tokio::task::spawn_blocking(move || extract::extract_deck(&parse_path))
        .await
        .map_err(|e| SlidebriefError::Internal(format!("Extraction task failed: {e}")))??;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;
    let total_slides = deck.slide_count;
    info!(
        "Deck has {} slides, {} with text",
        total_slides,
        deck.slides.len()
    );

    // ── Step 3: Apply slide selection ────────────────────────────────────
    let slides = select_slides(deck, &config.slides)?;
    debug!("Selected {} slides for summarization", slides.len());

    // ── Step 4: Empty deck short-circuit ─────────────────────────────────
    // No slides means no calls; resolving a provider would only force the
    // caller to configure credentials it never uses.
    if slides.is_empty() {
        info!("No slide text to summarize");
        return Ok(SummaryOutput {
            lines: Vec::new(),
            slides: Vec::new(),
            stats: SummaryStats {
                total_slides,
                summarized_slides: 0,
                skipped_slides: total_slides,
                total_duration_ms: total_start.elapsed().as_millis() as u64,
                extract_duration_ms,
                ..SummaryStats::default()
            },
        });
    }

    // ── Step 5: Resolve provider ─────────────────────────────────────────
    let provider = resolve_provider(config)?;

    // ── Step 6: Fan out one call per slide and join ──────────────────────
    // All futures are created before any is polled; they run concurrently
    // on the shared runtime and suspend only at their network round trips.
    let llm_start = Instant::now();
    let prompt = config.prompt.as_deref().unwrap_or(DEFAULT_PROMPT);
    let calls = slides.iter().map(|slide| {
        let provider = Arc::clone(&provider);
        let request = prompts::request_text(prompt, &slide.text);
        let number = slide.number;
        async move { llm::summarize_slide(&provider, number, &request, config).await }
    });
    let summaries = future::try_join_all(calls).await?;
    let llm_duration_ms = llm_start.elapsed().as_millis() as u64;

    // ── Step 7: Format lines ─────────────────────────────────────────────
    // `summaries` is positionally aligned with `slides`, so the lines come
    // out in ascending slide order with no re-sorting.
    let lines: Vec<String> = summaries
        .iter()
        .map(|s| format_line(s.slide_number, &s.summary))
        .collect();

    // ── Step 8: Compute stats ────────────────────────────────────────────
    let stats = SummaryStats {
        total_slides,
        summarized_slides: summaries.len(),
        skipped_slides: total_slides.saturating_sub(summaries.len()),
        total_input_tokens: summaries.iter().map(|s| s.input_tokens).sum(),
        total_output_tokens: summaries.iter().map(|s| s.output_tokens).sum(),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        extract_duration_ms,
        llm_duration_ms,
    };

    info!(
        "Summarization complete: {}/{} slides, {}ms total",
        stats.summarized_slides, total_slides, stats.total_duration_ms
    );

    Ok(SummaryOutput {
        lines,
        slides: summaries,
        stats,
    })
}

/// Summarize a deck and write the enumerated lines as a pretty-printed JSON
/// array to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn summarize_to_file(
    input_str: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &SummaryConfig,
) -> Result<SummaryStats, SlidebriefError> {
    let output = summarize(input_str, config).await?;
    let path = output_path.as_ref();

    let mut json = serde_json::to_string_pretty(&output.lines)
        .map_err(|e| SlidebriefError::Internal(format!("JSON encoding failed: {e}")))?;
    json.push('\n');

    // Atomic write: write to temp, then rename
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SlidebriefError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &json)
        .await
        .map_err(|e| SlidebriefError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| SlidebriefError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`summarize`].
///
/// Creates a temporary tokio runtime internally.
pub fn summarize_sync(
    input_str: impl AsRef<str>,
    config: &SummaryConfig,
) -> Result<SummaryOutput, SlidebriefError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| SlidebriefError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(summarize(input_str, config))
}

/// Summarize deck bytes held in memory.
///
/// The bytes are written to a managed [`tempfile`] which is cleaned up
/// automatically on return or panic. This is the recommended API when deck
/// data comes from a database, network stream, or in-memory buffer rather
/// than a file on disk.
pub async fn summarize_from_bytes(
    bytes: &[u8],
    config: &SummaryConfig,
) -> Result<SummaryOutput, SlidebriefError> {
    let mut tmp = tempfile::NamedTempFile::new()
        .map_err(|e| SlidebriefError::Internal(format!("tempfile: {e}")))?;
    tmp.write_all(bytes)
        .map_err(|e| SlidebriefError::Internal(format!("tempfile write: {e}")))?;
    let path = tmp.path().to_string_lossy().to_string();
    // `tmp` is dropped (and the file deleted) when `summarize` returns
    summarize(&path, config).await
}

/// Extract slide text without summarizing.
///
/// Does not require an LLM provider or API key. Useful for previewing what
/// would be sent to the model, and as the cheap half of the pipeline in
/// tests.
pub async fn extract_text(input_str: impl AsRef<str>) -> Result<DeckText, SlidebriefError> {
    let resolved = input::resolve_input(input_str.as_ref(), 120).await?;
    let deck_path = resolved.path().to_path_buf();
    tokio::task::spawn_blocking(move || extract::extract_deck(&deck_path))
        .await
        .map_err(|e| SlidebriefError::Internal(format!("Extraction task failed: {e}")))?
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Apply the configured slide selection to the extracted deck.
///
/// A non-`All` selection matching no physical slide is an error; `All`
/// over an empty or text-less deck is simply an empty result.
fn select_slides(
    deck: DeckText,
    selection: &SlideSelection,
) -> Result<Vec<extract::SlideText>, SlidebriefError> {
    let selected = selection.to_numbers(deck.slide_count);
    if selected.is_empty() && !matches!(selection, SlideSelection::All) {
        let slide = match selection {
            SlideSelection::Single(n) => *n,
            SlideSelection::Range(start, _) => *start,
            SlideSelection::Set(slides) => slides.first().copied().unwrap_or(0),
            SlideSelection::All => 0,
        };
        return Err(SlidebriefError::SlideOutOfRange {
            slide,
            total: deck.slide_count,
        });
    }

    Ok(deck
        .slides
        .into_iter()
        .filter(|s| selected.binary_search(&s.number).is_ok())
        .collect())
}

/// Instantiate a named provider with the given model.
fn create_chat_provider(
    provider_name: &str,
    model: &str,
) -> Result<Arc<dyn LLMProvider>, SlidebriefError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        SlidebriefError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// The four-level fallback chain lets library users and CLI users each set
/// exactly as much or as little as they need:
///
/// 1. **Pre-built provider** (`config.provider`) — the caller constructed
///    and configured the provider entirely; we use it as-is. Useful in tests
///    or when the caller needs custom middleware.
///
/// 2. **Named provider + model** (`config.provider_name`) — the caller named
///    a provider (e.g. `"openai"`) and optional model. The factory reads the
///    corresponding API key (`OPENAI_API_KEY`, etc.) from the environment.
///
/// 3. **Environment pair** (`EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`) —
///    both env vars set means the caller chose a provider and model at the
///    execution environment level (Makefile, shell script, CI). Checked
///    before full auto-detection so the model choice is honoured even when
///    multiple API keys are present.
///
/// 4. **Full auto-detection** (`ProviderFactory::from_env`) — the factory
///    scans all known API key variables and picks the first available
///    provider. `OPENAI_API_KEY` is preferred explicitly so users with
///    multiple keys get the default model they expect.
fn resolve_provider(config: &SummaryConfig) -> Result<Arc<dyn LLMProvider>, SlidebriefError> {
    // 1) User-provided provider takes priority
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    // 2) Provider name + model
    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_chat_provider(name, model);
    }

    // 3) Honour EDGEQUAKE_LLM_PROVIDER + EDGEQUAKE_MODEL when both set
    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_chat_provider(&prov, &model);
        }
    }

    // Prefer OpenAI explicitly when an OpenAI API key is present, so users
    // with multiple provider keys default to OpenAI unless they explicitly
    // request another provider.
    if let Ok(openai_key) = std::env::var("OPENAI_API_KEY") {
        if !openai_key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_chat_provider("openai", model);
        }
    }

    // 4) Full auto-detection
    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| SlidebriefError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
