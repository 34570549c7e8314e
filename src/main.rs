//! formant-table - command-line entry point
//!
//! Reads every TextGrid in the input directory and writes the vowel formant
//! table once per configured output (tab- and semicolon-separated by default).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formant_table::{convert_directory, Config, Encoding};

/// Command-line arguments for formant-table
#[derive(Parser, Debug)]
#[command(name = "formant-table")]
#[command(about = "Convert TextGrid vowel annotations into a formant table")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "FORMANT_TABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing the TextGrid files
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Directory to write the output tables into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Speaker identifier written on every row
    #[arg(long, env = "FORMANT_TABLE_SPEAKER")]
    speaker: Option<String>,

    /// Speaker gender written on every row
    #[arg(long, env = "FORMANT_TABLE_GENDER")]
    gender: Option<String>,

    /// Input file encoding (utf-16 or utf-8)
    #[arg(short, long)]
    encoding: Option<Encoding>,

    /// Log per-vowel alignment details
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => Config::default(),
        };

        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(speaker) = self.speaker {
            config.speaker.id = speaker;
        }
        if let Some(gender) = self.gender {
            config.speaker.gender = gender;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "formant_table=debug"
    } else {
        "formant_table=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.into_config()?;
    info!(
        "Speaker {} ({}), encoding {}",
        config.speaker.id, config.speaker.gender, config.encoding
    );

    let report = convert_directory(&config).with_context(|| {
        format!("Failed to convert '{}'", config.input_dir.display())
    })?;

    info!(
        "Converted {} of {} files into {} rows",
        report.converted(),
        report.attempted,
        report.rows.len()
    );
    let mut summary = report.error_summary().into_iter();
    if let Some(count) = summary.next() {
        info!("{}", count);
    }
    for message in summary {
        warn!("{}", message);
    }
    for output in &config.outputs {
        info!("Wrote {}", output.path.display());
    }

    Ok(())
}
