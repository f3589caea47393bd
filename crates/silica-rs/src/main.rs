//! Analyze a phytolith micrograph against its archaeological context and
//! print the structured report.
//!
//! Reads the API key from the `GEMINI_API_KEY` environment variable
//! (fallback: `API_KEY`).
//!
//! # Examples
//!
//! ```sh
//! # Validate a context file without calling the API
//! silica --context amostra.json --check
//!
//! # Full analysis, text report on stdout
//! silica --image lamina.png --context amostra.json
//!
//! # Raw result JSON, written to a file
//! silica --image lamina.png --context amostra.json --json --out resultado.json
//!
//! # Model and sampling overrides
//! silica --image lamina.png --context amostra.json \
//!   --model gemini-2.5-pro --temperature 0.2
//! ```

use clap::Parser;
use silica_rs::analysis::GeminiAnalyzer;
use silica_rs::form::{FormSession, TOTAL_FIELDS};
use silica_rs::image::ImageAttachment;
use silica_rs::report::render_report;
use silica_rs::workflow::AnalysisWorkflow;
use silica_rs::{DEFAULT_MODEL, GeminiClient, GenerationConfig};
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Analyze a phytolith micrograph against its archaeological context.
///
/// Reads the API key from the GEMINI_API_KEY environment variable
/// (fallback: API_KEY).
#[derive(Parser)]
#[command(name = "silica")]
struct Cli {
    // ── Inputs ─────────────────────────────────────────────────
    /// Micrograph to analyze (jpg, png, tif, bmp, or webp)
    #[arg(long)]
    image: Option<String>,

    /// Context record as a JSON file
    #[arg(long)]
    context: String,

    // ── Validation ─────────────────────────────────────────────
    /// Validate the context record and exit without calling the API
    #[arg(long)]
    check: bool,

    // ── Model selection ────────────────────────────────────────
    /// Gemini model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature (0.0 = deterministic)
    #[arg(long)]
    temperature: Option<f32>,

    /// Maximum tokens in the response
    #[arg(long)]
    max_output_tokens: Option<u32>,

    // ── Output control ─────────────────────────────────────────
    /// Print the raw result JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    out: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

// ── Helpers ────────────────────────────────────────────────────────

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{level},silica_rs={level}"))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_session(path: &str) -> Result<FormSession, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read context file '{path}': {e}"))?;
    let record = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse context file '{path}': {e}"))?;
    Ok(FormSession::with_record(record))
}

/// Validation-only mode: field errors plus the progress counter.
fn check_session(session: &FormSession) -> Result<String, String> {
    let filled = session.filled_field_count();
    let report = session.errors();
    if report.is_empty() {
        return Ok(format!(
            "Contexto válido. Campos preenchidos: {filled}/{TOTAL_FIELDS}\n"
        ));
    }
    let mut lines = vec![format!(
        "Contexto inválido. Campos preenchidos: {filled}/{TOTAL_FIELDS}"
    )];
    for (field, problem) in report.iter() {
        lines.push(format!("  - {field}: {problem}"));
    }
    Err(lines.join("\n"))
}

fn api_key() -> Result<String, String> {
    std::env::var("GEMINI_API_KEY")
        .or_else(|_| std::env::var("API_KEY"))
        .map_err(|_| "GEMINI_API_KEY environment variable is not set".to_string())
}

async fn run(cli: &Cli) -> Result<String, String> {
    let session = load_session(&cli.context)?;

    if cli.check {
        return check_session(&session);
    }

    let image_path = cli
        .image
        .as_deref()
        .ok_or_else(|| "provide --image (required unless --check)".to_string())?;
    let image = ImageAttachment::from_path(image_path).map_err(|e| e.to_string())?;

    let client = GeminiClient::new(api_key()?).map_err(|e| e.to_string())?;
    let mut analyzer = GeminiAnalyzer::new(client).with_model(&cli.model);
    if cli.temperature.is_some() || cli.max_output_tokens.is_some() {
        analyzer = analyzer.with_generation_config(GenerationConfig {
            temperature: cli.temperature,
            max_output_tokens: cli.max_output_tokens,
            ..GenerationConfig::default()
        });
    }

    let mut workflow = AnalysisWorkflow::with_session(session);
    workflow.attach_image(image);
    workflow
        .run_analysis(&analyzer)
        .await
        .map_err(|e| e.to_string())?;
    let result = workflow
        .result()
        .ok_or_else(|| "analysis finished without a result".to_string())?;

    let output = if cli.json {
        let mut json = serde_json::to_string_pretty(result)
            .map_err(|e| format!("failed to serialize result: {e}"))?;
        json.push('\n');
        json
    } else {
        render_report(result)
    };

    match &cli.out {
        Some(path) => {
            std::fs::write(path, &output).map_err(|e| format!("failed to write '{path}': {e}"))?;
            Ok(format!("Relatório salvo em {path}\n"))
        }
        None => Ok(output),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli).await {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
