//! Command line definition. Kept apart from `main` so tests can call
//! `Cli::try_parse_from`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tsdetect_core::config::{CliOverrides, Granularity};

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("invalid integer: {e}"))?;
    if value == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}

fn parse_positive_u32(s: &str) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|e| format!("invalid integer: {e}"))?;
    if value == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Detect test smells in Java test files.
///
/// INPUT is a text file with one file pair per line:
/// `app,path/to/FooTest.java[,path/to/Foo.java]`.
#[derive(Parser, Debug)]
#[command(name = "tsdetect")]
#[command(version)]
#[command(about = "Detect test smells in Java test files", long_about = None)]
pub struct Cli {
    /// File listing the test/production pairs to analyse.
    pub input: PathBuf,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// class, method or both. Overrides config and TSDETECT_GRANULARITY.
    #[arg(long)]
    pub granularity: Option<Granularity>,

    /// Worker threads. Defaults to the number of logical CPUs.
    #[arg(long, value_parser = parse_positive_usize)]
    pub threads: Option<usize>,

    /// Top-level statement count at which a test counts as verbose
    /// (inclusive).
    #[arg(long, value_parser = parse_positive_u32)]
    pub verbose_threshold: Option<u32>,

    /// Config file. Defaults to ./tsdetect.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threads: self.threads,
            granularity: self.granularity,
            verbose_threshold: self.verbose_threshold,
        }
    }
}
