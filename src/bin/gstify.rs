//! # gstify CLI
//!
//! Ingests marketplace exports, prints per-file outcomes and the merged
//! totals, and writes the GSTR-1 reports as CSV.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gstify::core::{B2bTaxMode, BusinessConfig, Operator, Platform, StateCode};
use gstify::files::{read_upload, write_reports};
use gstify::report::Reports;
use gstify::store::{FileOutcome, Session};

/// GSTR-1 extracts from e-commerce marketplace exports.
///
/// Each input is given as PLATFORM=PATH, e.g. `-f amazon=mtr_march.csv`.
/// Platforms: amazon, flipkart, jiomart, meesho_sales, meesho_return,
/// glowroad, b2c_other, b2b_template, amazon_b2b.
#[derive(Parser, Debug)]
#[command(name = "gstify", version, about)]
struct Cli {
    /// Input file as PLATFORM=PATH. Repeat for more files.
    #[arg(short, long = "file", value_name = "PLATFORM=PATH", value_parser = parse_input, required = true)]
    files: Vec<(Platform, PathBuf)>,

    /// Business configuration (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// State the business is registered in; overrides the config file.
    #[arg(long, value_name = "STATE")]
    home_state: Option<StateCode>,

    /// Operator GSTIN as OPERATOR=GSTIN; overrides the config file.
    #[arg(long = "gstin", value_name = "OPERATOR=GSTIN", value_parser = parse_gstin)]
    gstins: Vec<(Operator, String)>,

    /// Split B2B tax by place of supply instead of reporting it all as IGST.
    #[arg(long)]
    b2b_state_aware: bool,

    /// Directory the reports are written to.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Only print the outcome, write no reports.
    #[arg(long)]
    dry_run: bool,
}

fn parse_input(s: &str) -> Result<(Platform, PathBuf), String> {
    let (platform, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PLATFORM=PATH, got '{s}'"))?;
    let platform = platform.parse::<Platform>().map_err(|e| e.to_string())?;
    Ok((platform, PathBuf::from(path)))
}

fn parse_gstin(s: &str) -> Result<(Operator, String), String> {
    let (operator, gstin) = s
        .split_once('=')
        .ok_or_else(|| format!("expected OPERATOR=GSTIN, got '{s}'"))?;
    let operator = operator.parse::<Operator>().map_err(|e| e.to_string())?;
    Ok((operator, gstin.trim().to_string()))
}

fn load_config(cli: &Cli) -> anyhow::Result<BusinessConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            BusinessConfig::from_json(&json)?
        }
        None => BusinessConfig::default(),
    };
    if let Some(state) = cli.home_state {
        config.home_state = Some(state);
    }
    for (operator, gstin) in &cli.gstins {
        config.operator_gstins.insert(*operator, gstin.clone());
    }
    if cli.b2b_state_aware {
        config.b2b_tax_mode = B2bTaxMode::StateAware;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut session = Session::new(config);

    let mut rejected = 0usize;
    for (platform, path) in &cli.files {
        let outcome = match read_upload(path) {
            Ok(upload) => session.ingest(*platform, &upload),
            Err(err) => {
                tracing::error!(file = %path.display(), "{err}");
                rejected += 1;
                println!("{:<14} {}  unreadable: {err}", platform.tag(), path.display());
                continue;
            }
        };
        if matches!(outcome, FileOutcome::Rejected(_)) {
            rejected += 1;
        }
        println!("{:<14} {}  {outcome}", platform.tag(), path.display());
    }

    let reports = Reports::build(&session);
    println!();
    for table in reports.tables() {
        println!("{:<12} {:>6} rows", table.kind.file_stem(), table.len());
    }

    if !cli.dry_run {
        let now = chrono::Local::now().naive_local();
        for path in write_reports(&reports, &cli.out_dir, now)? {
            println!("wrote {}", path.display());
        }
    }

    if rejected > 0 {
        anyhow::bail!("{rejected} file(s) rejected");
    }
    Ok(())
}
