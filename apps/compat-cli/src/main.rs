//! CSS compatibility checker binary
//!
//! Loads a browser-compat-data JSON file and checks a computed style layout
//! (a JSON object of property -> value) against the target browsers.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use compat_engine::{report, CompatDataset, CompatEngine, TargetConfig};
use shared_types::{ReleaseStatus, StyleLayout};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "compat-check")]
#[command(version, about = "Flag CSS properties and values unsupported by target browsers")]
struct Cli {
    /// Path to the browser-compat-data JSON file
    #[arg(long, env = "COMPAT_DATA_PATH")]
    data: PathBuf,

    /// Comma-separated browser ids (default: firefox, chrome, safari, edge and their mobile variants)
    #[arg(long, value_delimiter = ',')]
    browsers: Vec<String>,

    /// Comma-separated release channels to check
    #[arg(long, value_delimiter = ',', value_parser = parse_status, default_values = ["current", "beta", "nightly"])]
    status: Vec<ReleaseStatus>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a style layout; reads stdin when the path is "-"
    Check { layout: PathBuf },
    /// List the target browser releases that would be checked
    Targets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_status(value: &str) -> Result<ReleaseStatus, String> {
    match ReleaseStatus::parse(value) {
        ReleaseStatus::Unknown => Err(format!("unknown release status: {}", value)),
        status => Ok(status),
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the report, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    try_main().map_err(|err| {
        eprintln!("{err:#}");
        err
    })
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let engine = build_engine(&cli)?;

    let output = match &cli.command {
        Command::Check { layout } => {
            let layout = read_layout(layout)?;
            check(&engine, &layout, cli.format)?
        }
        Command::Targets => list_targets(&engine, cli.format)?,
    };

    println!("{}", output);
    Ok(())
}

fn build_engine(cli: &Cli) -> Result<CompatEngine> {
    tracing::info!("Loading compatibility data from {}", cli.data.display());
    let dataset = CompatDataset::load(&cli.data)
        .with_context(|| format!("loading compatibility data from {}", cli.data.display()))?;

    let mut config = TargetConfig::default().with_statuses(cli.status.iter().copied());
    if !cli.browsers.is_empty() {
        config = config.with_browsers(cli.browsers.iter().cloned());
    }

    let engine = CompatEngine::with_config(dataset, config);
    tracing::info!("Checking against {} target releases", engine.targets().len());
    Ok(engine)
}

fn read_layout(path: &Path) -> Result<StyleLayout> {
    if path == Path::new("-") {
        return parse_layout(std::io::stdin().lock()).context("reading layout from stdin");
    }

    let file = File::open(path).with_context(|| format!("reading layout {}", path.display()))?;
    parse_layout(BufReader::new(file)).with_context(|| format!("reading layout {}", path.display()))
}

fn parse_layout<R: Read>(reader: R) -> Result<StyleLayout> {
    serde_json::from_reader(reader).context("parsing style layout")
}

fn check(engine: &CompatEngine, layout: &StyleLayout, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(&engine.check_report(layout))?),
        Format::Text => {
            let issues = engine.check_layout(layout);
            Ok(report::render_issue_list(Some(issues.as_slice())).unwrap_or_default())
        }
    }
}

fn list_targets(engine: &CompatEngine, format: Format) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(engine.targets())?),
        Format::Text => Ok(engine
            .targets()
            .iter()
            .map(|t| format!("{} {} ({})", t.brand_name, t.version, t.status.as_str()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
