//! Run driver: resolve configuration, analyse every file pair in
//! parallel and write the report.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tsdetect_analysis::report::{write_json, CsvReportWriter, FilePair, TestFileReport};
use tsdetect_analysis::SmellDetector;
use tsdetect_core::config::{Granularity, TsdetectConfig};
use tsdetect_core::errors::{ConfigError, OutputError, ParseError, TsdetectError};

use crate::cli::{Cli, OutputFormat};
use crate::input::load_file_pairs;

/// Worker stack size; lowering and visiting recurse once per nesting level,
/// up to the parser's nesting limit.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pairs: usize,
    pub reports: usize,
    pub warnings: usize,
}

pub fn run(cli: &Cli) -> Result<RunSummary, TsdetectError> {
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = TsdetectConfig::load(&root, cli.config.as_deref(), Some(&cli.overrides()))?;
    let granularity = config.run.effective_granularity();
    tracing::info!(%granularity, threads = ?config.run.threads, "configuration resolved");

    let pairs = load_file_pairs(&cli.input)?;
    let reports = analyse(&pairs, &config, granularity)?;

    let summary = RunSummary {
        pairs: pairs.len(),
        reports: reports.len(),
        warnings: reports.iter().map(|r| r.warnings.len()).sum(),
    };

    write_reports(&reports, cli.format, cli.output.as_deref())?;
    tracing::info!(
        pairs = summary.pairs,
        reports = summary.reports,
        warnings = summary.warnings,
        "run complete"
    );
    Ok(summary)
}

/// Analyse all pairs in input order. With `Both`, each pair's class-level
/// report is followed directly by its method-level report.
pub fn analyse(
    pairs: &[FilePair],
    config: &TsdetectConfig,
    granularity: Granularity,
) -> Result<Vec<TestFileReport>, TsdetectError> {
    let mut builder = rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE);
    if let Some(threads) = config.run.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build().map_err(|e| ConfigError::InvalidValue {
        field: "run.threads".to_string(),
        message: e.to_string(),
    })?;

    let detection = &config.detection;
    let per_pair: Vec<Vec<TestFileReport>> = pool.install(|| {
        pairs
            .par_iter()
            .map_init(
                || SmellDetector::new(detection.clone()),
                |detector, pair| match detector {
                    Ok(detector) => Ok(analyse_pair(detector, pair, granularity)),
                    Err(e) => Err(e.to_string()),
                },
            )
            .collect::<Result<Vec<_>, String>>()
    })
    .map_err(|message| ParseError::GrammarLoad { message })?;

    Ok(per_pair.into_iter().flatten().collect())
}

fn analyse_pair(
    detector: &mut SmellDetector,
    pair: &FilePair,
    granularity: Granularity,
) -> Vec<TestFileReport> {
    tracing::debug!(test = %pair.test_file_path, "analysing");
    match granularity {
        Granularity::Class => vec![detector.detect_class_level(pair)],
        Granularity::Method => vec![detector.detect_method_level(pair)],
        Granularity::Both => {
            let analysis = detector.detect(pair);
            vec![analysis.class_level, analysis.method_level]
        }
    }
}

fn write_reports(
    reports: &[TestFileReport],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), OutputError> {
    match output {
        Some(path) => {
            let target = path.display().to_string();
            let file = File::create(path).map_err(|source| OutputError::Write {
                target: target.clone(),
                source,
            })?;
            write_to(BufWriter::new(file), reports, format, &target)
        }
        None => write_to(io::stdout().lock(), reports, format, "stdout"),
    }
}

fn write_to<W: Write>(
    out: W,
    reports: &[TestFileReport],
    format: OutputFormat,
    target: &str,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Csv => {
            let mut writer = CsvReportWriter::new(out, target);
            for report in reports {
                writer.write_report(report)?;
            }
            writer.finish().map(|_| ())
        }
        OutputFormat::Json => {
            let mut out = out;
            write_json(&mut out, reports, target)?;
            out.flush().map_err(|source| OutputError::Write {
                target: target.to_string(),
                source,
            })
        }
    }
}
