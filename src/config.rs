//! Configuration types for slide-deck summarization.
//!
//! All behaviour is controlled through [`SummaryConfig`], built via its
//! [`SummaryConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely
//! on well-documented defaults for the rest.

use crate::error::SlidebriefError;
use edgequake_llm::LLMProvider;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Model used when the caller names no other.
///
/// The classic chat-completion workhorse: slide text is short and the
/// requested summaries are plain prose, so the cheapest chat tier is enough.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for a slide-deck summarization run.
///
/// Built via [`SummaryConfig::builder()`] or using
/// [`SummaryConfig::default()`].
///
/// # Example
/// ```rust
/// use slidebrief::SummaryConfig;
///
/// let config = SummaryConfig::builder()
///     .model("gpt-4.1-mini")
///     .temperature(0.2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SummaryConfig {
    /// LLM model identifier, e.g. "gpt-3.5-turbo", "gpt-4.1-mini".
    /// If None, uses [`DEFAULT_MODEL`].
    pub model: Option<String>,

    /// LLM provider name (e.g. "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is auto-detected from
    /// the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Instruction prefix prepended to every slide's text. If None, uses
    /// [`crate::prompts::DEFAULT_PROMPT`]. Set once per run; never mutated.
    pub prompt: Option<String>,

    /// Sampling temperature for the completion. Default: 0.3.
    ///
    /// Summaries should stay close to the slide content; a low temperature
    /// keeps the model from embellishing, while leaving a little room to
    /// rephrase jargon into plain language.
    pub temperature: f32,

    /// Maximum tokens the model may generate per slide. Default: 1024.
    ///
    /// A slide rarely carries more than a few hundred words, so 1024 output
    /// tokens covers even a verbose explanation without truncation.
    pub max_tokens: usize,

    /// Which slides to summarize. Default: all slides.
    ///
    /// Selection is applied to physical slide numbers, before text-less
    /// slides are dropped.
    pub slides: SlideSelection,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            prompt: None,
            temperature: 0.3,
            max_tokens: 1024,
            slides: SlideSelection::default(),
            download_timeout_secs: 120,
        }
    }
}

impl fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("prompt", &self.prompt)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("slides", &self.slides)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .finish()
    }
}

impl SummaryConfig {
    /// Create a new builder for `SummaryConfig`.
    pub fn builder() -> SummaryConfigBuilder {
        SummaryConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SummaryConfig`].
#[derive(Debug)]
pub struct SummaryConfigBuilder {
    config: SummaryConfig,
}

impl SummaryConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn slides(mut self, selection: SlideSelection) -> Self {
        self.config.slides = selection;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SummaryConfig, SlidebriefError> {
        let c = &self.config;
        if let Some(ref p) = c.prompt {
            if p.trim().is_empty() {
                return Err(SlidebriefError::InvalidConfig(
                    "Prompt override must not be empty".into(),
                ));
            }
        }
        if c.max_tokens == 0 {
            return Err(SlidebriefError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Specifies which slides of the deck to summarize.
///
/// Numbers refer to physical slide positions (1-indexed), independent of
/// whether a slide ends up carrying any text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum SlideSelection {
    /// Summarize all slides (default).
    #[default]
    All,
    /// Summarize a single slide (1-indexed).
    Single(u32),
    /// Summarize a contiguous range of slides (1-indexed, inclusive).
    Range(u32, u32),
    /// Summarize specific slides (1-indexed, deduplicated).
    Set(Vec<u32>),
}

impl SlideSelection {
    /// Expand the selection into a sorted, deduplicated list of 1-indexed
    /// slide numbers present in a deck of `total_slides`.
    pub fn to_numbers(&self, total_slides: usize) -> Vec<u32> {
        let total = total_slides as u32;
        let mut numbers: Vec<u32> = match self {
            SlideSelection::All => (1..=total).collect(),
            SlideSelection::Single(n) => {
                if *n >= 1 && *n <= total {
                    vec![*n]
                } else {
                    vec![]
                }
            }
            SlideSelection::Range(start, end) => {
                let s = (*start).max(1);
                let e = (*end).min(total);
                (s..=e).collect()
            }
            SlideSelection::Set(slides) => slides
                .iter()
                .filter(|&&n| n >= 1 && n <= total)
                .copied()
                .collect(),
        };
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }
}
