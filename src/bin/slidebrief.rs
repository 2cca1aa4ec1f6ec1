//! CLI binary for slidebrief.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `SummaryConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use slidebrief::{
    extract_text, summarize, summarize_to_file, SlideSelection, SummaryConfig,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize a deck (one line per slide, stdout)
  slidebrief lecture.pptx

  # Write the JSON-array artifact
  slidebrief lecture.pptx -o lecture.json

  # Specific slides, different model
  slidebrief --slides 1-5 --model gpt-4.1-mini lecture.pptx

  # Summarize from a URL
  slidebrief https://example.com/decks/onboarding.pptx

  # Preview what would be sent to the model (no API key needed)
  slidebrief --extract-only lecture.pptx

  # Custom instruction prompt from a file
  slidebrief --prompt prompt.txt lecture.pptx

  # Full structured JSON output with stats
  slidebrief --json lecture.pptx > lecture_full.json

ENVIRONMENT VARIABLES:
  OPENAI_API_KEY          OpenAI API key (default provider)
  ANTHROPIC_API_KEY       Anthropic API key
  GEMINI_API_KEY          Google Gemini API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (openai, anthropic, gemini, ollama)
  EDGEQUAKE_MODEL         Override model ID

SETUP:
  1. Set API key:     export OPENAI_API_KEY=sk-...
  2. Summarize:       slidebrief lecture.pptx -o lecture.json
"#;

/// Summarize PowerPoint decks slide-by-slide using LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "slidebrief",
    version,
    about = "Summarize PowerPoint decks slide-by-slide using LLMs",
    long_about = "Summarize PowerPoint decks (.pptx, local files or URLs) into plain-language \
per-slide explanations using chat LLMs. Supports OpenAI, Anthropic, Google Gemini, and \
any OpenAI-compatible endpoint (Ollama, vLLM, LiteLLM, etc.).",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local .pptx file path or HTTP/HTTPS URL.
    input: String,

    /// Write the JSON array of summary lines to this file instead of stdout.
    #[arg(short, long, env = "SLIDEBRIEF_OUTPUT")]
    output: Option<PathBuf>,

    /// LLM model ID (e.g. gpt-3.5-turbo, gpt-4.1-mini).
    #[arg(long, env = "SLIDEBRIEF_MODEL")]
    model: Option<String>,

    /// LLM provider: openai, anthropic, gemini, ollama.
    #[arg(
        long,
        env = "SLIDEBRIEF_PROVIDER",
        long_help = "LLM provider. Auto-detected from API key env vars if not set.\n\
          Supported: openai, anthropic, gemini, ollama, or any OpenAI-compatible endpoint."
    )]
    provider: Option<String>,

    /// Slide selection: all, 5, 3-15, or 1,3,5,7.
    #[arg(long, env = "SLIDEBRIEF_SLIDES", default_value = "all")]
    slides: String,

    /// Path to a text file containing a custom instruction prompt.
    #[arg(long, env = "SLIDEBRIEF_PROMPT")]
    prompt: Option<PathBuf>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "SLIDEBRIEF_TEMPERATURE", default_value_t = 0.3)]
    temperature: f32,

    /// Max LLM output tokens per slide.
    #[arg(long, env = "SLIDEBRIEF_MAX_TOKENS", default_value_t = 1024)]
    max_tokens: usize,

    /// Output structured JSON (SummaryOutput) instead of plain lines.
    #[arg(long, env = "SLIDEBRIEF_JSON")]
    json: bool,

    /// Print extracted slide text only, no summarization (no API key needed).
    #[arg(long)]
    extract_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SLIDEBRIEF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, env = "SLIDEBRIEF_QUIET")]
    quiet: bool,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "SLIDEBRIEF_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Results go to stdout; keep library logs on stderr and quiet by
    // default so piped output stays clean.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Extract-only mode ────────────────────────────────────────────────
    if cli.extract_only {
        let deck = extract_text(&cli.input)
            .await
            .context("Failed to extract slide text")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&deck).context("Failed to serialise deck text")?
            );
        } else {
            println!("Deck:    {}", cli.input);
            println!(
                "Slides:  {} total, {} with text",
                deck.slide_count,
                deck.slides.len()
            );
            for slide in &deck.slides {
                println!("\n--- Slide {} ---", slide.number);
                println!("{}", slide.text);
            }
        }
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli).await?;

    // ── Run summarization ────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = summarize_to_file(&cli.input, output_path, &config)
            .await
            .context("Summarization failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {}/{} slides  {}ms  →  {}",
                green("✔"),
                stats.summarized_slides,
                stats.total_slides,
                stats.total_duration_ms,
                bold(&output_path.display().to_string()),
            );
            eprintln!(
                "   {} tokens in  /  {} tokens out",
                dim(&stats.total_input_tokens.to_string()),
                dim(&stats.total_output_tokens.to_string()),
            );
        }
    } else {
        let output = summarize(&cli.input, &config)
            .await
            .context("Summarization failed")?;

        if cli.json {
            let json =
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
            println!("{json}");
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for line in &output.lines {
                writeln!(handle, "{line}").context("Failed to write to stdout")?;
            }
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "   {} tokens in  /  {} tokens out  —  {}ms total",
                dim(&output.stats.total_input_tokens.to_string()),
                dim(&output.stats.total_output_tokens.to_string()),
                output.stats.total_duration_ms,
            );
        }
    }

    Ok(())
}

/// Map CLI args to `SummaryConfig`.
async fn build_config(cli: &Cli) -> Result<SummaryConfig> {
    let prompt = if let Some(ref path) = cli.prompt {
        Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read prompt from {:?}", path))?,
        )
    } else {
        None
    };

    let slides = parse_slides(&cli.slides)?;

    let mut builder = SummaryConfig::builder()
        .slides(slides)
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens)
        .download_timeout_secs(cli.download_timeout);

    if let Some(ref model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(prompt) = prompt {
        builder = builder.prompt(prompt);
    }

    builder.build().context("Invalid configuration")
}

/// Parse `--slides` string into `SlideSelection`.
fn parse_slides(s: &str) -> Result<SlideSelection> {
    let s = s.trim().to_lowercase();

    if s == "all" {
        return Ok(SlideSelection::All);
    }

    // Range: "3-15"
    if let Some((start, end)) = s.split_once('-') {
        let start: u32 = start
            .trim()
            .parse()
            .context("Invalid start slide in range")?;
        let end: u32 = end.trim().parse().context("Invalid end slide in range")?;

        if start < 1 {
            anyhow::bail!("Slides are 1-indexed, minimum is 1 (got {})", start);
        }
        if start > end {
            anyhow::bail!(
                "Invalid slide range '{}-{}': start must be <= end",
                start,
                end
            );
        }

        return Ok(SlideSelection::Range(start, end));
    }

    // Set: "1,3,5,7"
    if s.contains(',') {
        let slides: Vec<u32> = s
            .split(',')
            .map(|n| {
                n.trim()
                    .parse::<u32>()
                    .context(format!("Invalid slide number: '{}'", n.trim()))
            })
            .collect::<Result<Vec<_>>>()?;

        for &n in &slides {
            if n < 1 {
                anyhow::bail!("Slides are 1-indexed, minimum is 1 (got {})", n);
            }
        }

        return Ok(SlideSelection::Set(slides));
    }

    // Single slide: "5"
    let slide: u32 = s.parse().context("Invalid slide number")?;
    if slide < 1 {
        anyhow::bail!("Slides are 1-indexed, minimum is 1 (got {})", slide);
    }

    Ok(SlideSelection::Single(slide))
}
