//! Routing diagnostics panel (CLI)
//!
//! Loads a router tree and presenter registry from TOML and reports, for one
//! request, which router matched and where it would be handled.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml ──▶ config ──▶ RouterConfig::build ──▶ dyn Router tree
//!                      │                                     │
//!                      └──▶ PresenterRegistry                ▼
//!   METHOD url ──▶ HttpRequest ───────────────────▶ analyzer::Analyzer
//!                                                            │
//!                                                            ▼
//!                                   AnalysisResult ──▶ report (text) / JSON
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use routing_panel::analyzer::Analyzer;
use routing_panel::config::watcher::ConfigWatcher;
use routing_panel::config::{load_config, PanelConfig};
use routing_panel::observability::logging;
use routing_panel::report;
use routing_panel::routing::HttpRequest;

#[derive(Parser)]
#[command(name = "routing-panel")]
#[command(about = "Show which router in a nested route tree matches a request", long_about = None)]
struct Cli {
    /// Route tree configuration (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// HTTP method of the request.
    #[arg(short, long, default_value = "GET")]
    method: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Re-run the analysis whenever the configuration changes.
    #[arg(long)]
    watch: bool,

    /// Absolute URL of the request, e.g. http://localhost/admin/users
    url: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability.log_level);

    tracing::info!(
        config = %cli.config.display(),
        presenters = config.presenters.classes.len(),
        "Configuration loaded"
    );

    let request = HttpRequest::parse(&cli.method, &cli.url)?;
    run(&config, &request, cli.format)?;

    if cli.watch {
        let (watcher, updates) = ConfigWatcher::new(&cli.config);
        let _watcher = watcher.run()?;

        for config in updates {
            if let Err(e) = run(&config, &request, cli.format) {
                tracing::error!(error = %e, "Analysis skipped for reloaded configuration");
            }
        }
    }

    Ok(())
}

/// Build the tree, analyze the request and print the result.
fn run(
    config: &PanelConfig,
    request: &HttpRequest,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let router = config.build_router()?;
    let registry = config.build_registry()?;
    let result = Analyzer::new(&registry).analyze(router.as_ref(), request);

    match format {
        Format::Text => println!("{}", report::render_text(&result, request)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}
