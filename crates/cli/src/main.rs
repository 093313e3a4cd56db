use api_shared::{AnalyzeReq, HealthService, ResultEnvelope};
use clap::{Parser, Subcommand};
use mediscan_core::{analyze_offline, AnalysisService, CoreConfig, GeminiClient, UrgencyCategory};
use std::fmt::Write as _;

#[derive(Parser)]
#[command(name = "mediscan")]
#[command(about = "MediScan symptom checker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a symptom description
    Analyze {
        /// Patient age in years (1-120)
        #[arg(long)]
        age: String,
        /// Free-text symptom description
        #[arg(long)]
        symptoms: String,
        /// Print the raw JSON envelope instead of a summary
        #[arg(long)]
        json: bool,
        /// Skip the upstream model and use the local classifier
        #[arg(long)]
        local: bool,
    },
    /// Show service health and upstream configuration
    Health,
}

fn config_from_env() -> Result<CoreConfig, mediscan_core::AnalysisError> {
    CoreConfig::from_values(
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("GEMINI_MODEL").ok(),
        std::env::var("GEMINI_BASE_URL").ok(),
        std::env::var("MEDISCAN_UPSTREAM_TIMEOUT_SECS").ok(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            age,
            symptoms,
            json,
            local,
        }) => {
            let req = AnalyzeReq::new(age, symptoms);
            let envelope = if local {
                analyze_offline(&req)
            } else {
                let cfg = config_from_env()?;
                let service = AnalysisService::new(GeminiClient::new(&cfg)?);
                service.analyze(&req).await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                print!("{}", render_envelope(&envelope));
            }
            if !envelope.success {
                std::process::exit(2);
            }
        }
        Some(Commands::Health) => {
            let cfg = config_from_env()?;
            let health = HealthService::check_health(cfg.has_api_key());
            println!("{}", serde_json::to_string_pretty(&health)?);
        }
        None => {
            println!("Use 'mediscan --help' for commands");
        }
    }

    Ok(())
}

/// Plain-text rendering of an envelope for terminal output.
fn render_envelope(envelope: &ResultEnvelope) -> String {
    let mut out = String::new();

    let analysis = match (&envelope.analysis, envelope.success) {
        (Some(analysis), true) => analysis,
        _ => {
            let _ = writeln!(
                out,
                "Error: {}",
                envelope
                    .error
                    .as_deref()
                    .unwrap_or("Unable to analyze symptoms")
            );
            return out;
        }
    };

    let category = UrgencyCategory::from_label(&analysis.urgency);
    let _ = writeln!(
        out,
        "Recommended action: {} [{:?}]",
        analysis.urgency, category
    );
    if let Some(note) = &envelope.note {
        let _ = writeln!(out, "Note: {note}");
    }

    let _ = writeln!(out, "\nPossible conditions:");
    for condition in &analysis.conditions {
        let _ = write!(out, "- {}", condition.name);
        if let Some(confidence) = &condition.confidence {
            let _ = write!(out, " (confidence: {confidence})");
        }
        let _ = writeln!(out);
        if let Some(description) = &condition.description {
            let _ = writeln!(out, "  {description}");
        }
        for rec in &condition.recommendations {
            let _ = writeln!(out, "  * {rec}");
        }
    }

    if !analysis.immediate_attention.is_empty() {
        let _ = writeln!(out, "\nSeek immediate medical attention if:");
        for item in &analysis.immediate_attention {
            let _ = writeln!(out, "- {item}");
        }
    }

    out
}
