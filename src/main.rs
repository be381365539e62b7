//! qrcrop - QR code PNG export CLI.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrcrop::cli::Cli;
use qrcrop::config::{self, Config};
use qrcrop::context::ServiceContext;
use qrcrop::error::ExportError;
use qrcrop::export::ExportRequest;
use qrcrop::params::{parse_color, parse_level, parse_size, validate_text};
use qrcrop::ports::{Delivery, QrRegion, QrStyle};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `QRCROP_LOG` or the verbosity flag.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("QRCROP_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), ExportError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    // Resolve text
    let text = cli.resolve_text()?;
    validate_text(&text)?;

    // Merge flags over config
    let size = match cli.size.as_deref() {
        Some(s) => parse_size(s)?,
        None => config.render.size,
    };
    let level = match cli.level.as_deref() {
        Some(l) => parse_level(l)?,
        None => config.render.level,
    };
    let foreground = parse_color(cli.fg.as_deref().unwrap_or(&config.render.foreground))?;
    let background = if cli.transparent {
        [0, 0, 0, 0]
    } else {
        parse_color(cli.bg.as_deref().unwrap_or(&config.render.background))?
    };
    let include_margin = cli.margin || config.render.margin;
    let style = QrStyle { level, foreground, background, include_margin };
    let crop = !cli.no_crop && config.export.crop;

    let request = ExportRequest::new(QrRegion { text, size, style })?;

    let ctx = if cli.data_url {
        ServiceContext::to_stdout()
    } else {
        let out_dir = cli.out_dir.as_deref().map_or_else(|| config.out_dir(), PathBuf::from);
        ServiceContext::to_directory(out_dir)
    };

    // Export
    let report = ctx.into_exporter(crop).export(request).await?;

    if let Delivery::File(ref path) = report.delivery {
        eprintln!("Saved: {}", path.display());
    }
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ExportError::Encoding(format!("Failed to serialize report: {e}")))?;
        println!("{json}");
    }

    Ok(())
}
