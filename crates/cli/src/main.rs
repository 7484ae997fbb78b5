#![deny(warnings)]

use anyhow::Context;
use cefr_report_core::config::{Env, StdEnv, ValidatorConfig};
use cefr_report_core::schema::{tag_vocabulary, Dimension};
use cefr_report_core::{check_consistency, parse_payload, ConsistencyWarning, ReportError};
use clap::{ArgGroup, Parser};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cefr-report")]
#[command(about = "Validate CEFR evaluation webhook payloads")]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(false)
        .args(["file", "stdin", "list_tags"])
))]
struct Args {
    /// Webhook payload to validate.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Read the payload from standard input.
    #[arg(long)]
    stdin: bool,

    /// Print a dimension's tag vocabulary and exit.
    #[arg(long, value_name = "DIMENSION", value_parser = parse_dimension)]
    list_tags: Option<Dimension>,

    /// Also run the cross-field consistency checks.
    #[arg(long)]
    check_consistency: bool,

    /// Print results as JSON instead of text.
    #[arg(long)]
    emit_json: bool,

    #[arg(long)]
    preview_chars: Option<usize>,

    #[arg(long)]
    score_tolerance: Option<f64>,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    if let Some(dimension) = args.list_tags {
        for tag in tag_vocabulary(dimension) {
            println!("{tag}");
        }
        return Ok(());
    }

    let cfg = build_config(&args, &StdEnv)?;
    tracing::debug!(
        preview_chars = cfg.preview.chars(),
        score_tolerance = cfg.tolerance.points(),
        "config loaded"
    );

    let text = read_input(&args)?;
    run(&text, &cfg, &args)
}

fn run(text: &str, cfg: &ValidatorConfig, args: &Args) -> anyhow::Result<()> {
    let payload = match parse_payload(text, cfg) {
        Ok(payload) => payload,
        Err(errors) => {
            if args.emit_json {
                let out = serde_json::json!({"status": "invalid", "violations": errors.violations()});
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for violation in errors.iter() {
                    eprintln!("{violation}");
                }
            }
            anyhow::bail!(ReportError::Invalid(errors));
        }
    };

    tracing::info!(
        recording_id = payload.recording_id(),
        correlation_id = payload.correlation_id(),
        processing_time_ms = payload.processing_time_ms(),
        status = payload.status(),
        "payload valid"
    );

    let data = match payload.into_data() {
        Ok(data) => data,
        Err(failed) => {
            if args.emit_json {
                println!("{}", serde_json::to_string_pretty(&failed)?);
            }
            anyhow::bail!(ReportError::Failed(failed));
        }
    };

    let warnings: Vec<ConsistencyWarning> = if args.check_consistency {
        check_consistency(&data, cfg)
    } else {
        Vec::new()
    };

    if args.emit_json {
        let out = serde_json::json!({
            "status": "valid",
            "report": data,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (dimension, score) in data.reports.cefr.dimension_scores() {
            println!("{dimension:<14} {:>5.1}", score.value());
        }
        println!(
            "{:<14} {:>5.1}",
            "overall",
            data.reports.cefr.summary.score.score.value()
        );
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

fn read_input(args: &Args) -> anyhow::Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read payload from stdin")?;
            Ok(text)
        }
    }
}

fn parse_dimension(raw: &str) -> Result<Dimension, String> {
    Dimension::from_label(&raw.to_ascii_lowercase())
        .ok_or_else(|| format!("expected one of: {}", Dimension::LABELS.join(", ")))
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &Args, env: &impl Env) -> anyhow::Result<ValidatorConfig> {
    ValidatorConfig::resolve(args.preview_chars, args.score_tolerance, env)
        .context("invalid validator configuration")
}
