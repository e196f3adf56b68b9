//! # sheethub-cli
//!
//! Command-line front end for sheethub: detect headers, clean and re-save
//! messy spreadsheets, one file at a time.

mod quota;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use quota::{DailyAllowance, QuotaGate, Unlimited};
use sheethub_clean::{
    clean_workbook_detailed, parse_keywords, serialize_workbook, CleanOptions, CleanOutcome,
    SheetReport,
};
use sheethub_insights::generate_insights;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// sheethub - clean messy spreadsheets
#[derive(Parser, Debug)]
#[command(name = "sheethub")]
#[command(author, version, about = "Detect headers and clean messy spreadsheets")]
struct Cli {
    /// Workbooks to clean (.xlsx, .xlsm, .xls, .ods)
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Directory for cleaned files (default: next to each input)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Cleaning options file (.yaml, .yml or .json)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Keep column names as they appear in the header row
    #[arg(long)]
    no_standardize: bool,

    /// Keep total/subtotal style rows
    #[arg(long)]
    no_summary: bool,

    /// Comma-separated summary keywords
    #[arg(long, value_name = "CSV")]
    keywords: Option<String>,

    /// Skip duplicate removal
    #[arg(long)]
    no_dedupe: bool,

    /// Duplicate key columns for one sheet (repeatable)
    #[arg(long = "dedupe-key", value_name = "SHEET=COL1,COL2", value_parser = parse_dedupe_key)]
    dedupe_keys: Vec<DedupeKey>,

    /// Drop rows that still have missing values
    #[arg(long)]
    drop_incomplete: bool,

    /// Print plain-language insights for every cleaned sheet
    #[arg(long)]
    insights: bool,

    /// Stop after this many files have been cleaned
    #[arg(long, value_name = "N")]
    max_files: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// `--dedupe-key` argument: a sheet name and the columns that identify a row.
#[derive(Debug, Clone, PartialEq)]
struct DedupeKey {
    sheet: String,
    columns: Vec<String>,
}

fn parse_dedupe_key(raw: &str) -> std::result::Result<DedupeKey, String> {
    let (sheet, columns) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SHEET=COL1,COL2, got '{raw}'"))?;
    let sheet = sheet.trim();
    if sheet.is_empty() {
        return Err(format!("missing sheet name in '{raw}'"));
    }
    let columns = parse_keywords(columns);
    if columns.is_empty() {
        return Err(format!("no key columns given for sheet '{sheet}'"));
    }
    Ok(DedupeKey {
        sheet: sheet.to_string(),
        columns,
    })
}

/// Counts for one invocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BatchSummary {
    processed: usize,
    failed: usize,
    skipped: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<BatchSummary> {
    let options = build_options(cli)?;
    let mut gate: Box<dyn QuotaGate> = match cli.max_files {
        Some(limit) => Box::new(DailyAllowance::new(limit)),
        None => Box::new(Unlimited),
    };
    Ok(run_batch(
        &cli.files,
        cli.output_dir.as_deref(),
        &options,
        cli.insights,
        gate.as_mut(),
    ))
}

/// Options from `--config` (or defaults), with command-line flags on top.
fn build_options(cli: &Cli) -> Result<CleanOptions> {
    let mut options = match &cli.config {
        Some(path) => CleanOptions::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => CleanOptions::default(),
    };

    if cli.no_standardize {
        options = options.with_standardize(false);
    }
    if cli.no_summary {
        options = options.with_summary_filter(false);
    }
    if let Some(keywords) = &cli.keywords {
        options = options.with_summary_keywords(parse_keywords(keywords));
    }
    if cli.no_dedupe {
        options = options.with_dedupe(false);
    }
    for key in &cli.dedupe_keys {
        options = options.with_sheet_dedup_keys(&key.sheet, key.columns.iter().cloned());
    }
    if cli.drop_incomplete {
        options = options.with_drop_incomplete(true);
    }

    options.validate()?;
    Ok(options)
}

/// Clean files in order. Stops early once the quota is used up; a failing
/// file is reported and the rest still run.
fn run_batch(
    files: &[PathBuf],
    output_dir: Option<&Path>,
    options: &CleanOptions,
    insights: bool,
    gate: &mut dyn QuotaGate,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (i, file) in files.iter().enumerate() {
        if !gate.has_quota() {
            summary.skipped = files.len() - i;
            println!(
                "{} limit reached, {} file(s) not processed",
                "Quota:".yellow().bold(),
                summary.skipped
            );
            break;
        }

        match process_file(file, output_dir, options, insights, gate) {
            Ok(written) => {
                summary.processed += 1;
                println!(
                    "{} {} -> {}",
                    "Saved:".green().bold(),
                    file.display(),
                    written.display()
                );
            }
            Err(e) => {
                summary.failed += 1;
                tracing::warn!(file = %file.display(), "cleaning failed");
                println!("{} {}: {e:#}", "Error:".red().bold(), file.display());
            }
        }
    }

    if let Some(remaining) = gate.remaining() {
        println!("{} {remaining} cleaning(s) left", "Quota:".cyan());
    }
    summary
}

fn process_file(
    file: &Path,
    output_dir: Option<&Path>,
    options: &CleanOptions,
    insights: bool,
    gate: &mut dyn QuotaGate,
) -> Result<PathBuf> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read file: {}", file.display()))?;
    let outcome = clean_workbook_detailed(&bytes, options)?;
    gate.record_use();
    tracing::info!(
        file = %file.display(),
        sheets = outcome.book.sheet_count(),
        failed_sheets = outcome.failures.len(),
        "cleaned workbook"
    );

    print_outcome(file, &outcome);
    if insights {
        print_insights(&outcome);
    }

    let target = output_path(file, output_dir);
    let cleaned = serialize_workbook(&outcome.book)?;
    std::fs::write(&target, cleaned)
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(target)
}

/// `cleaned_<stem>.xlsx`, in `output_dir` or next to the input.
fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("cleaned_{stem}.xlsx"))
}

fn print_outcome(file: &Path, outcome: &CleanOutcome) {
    println!("{}", file.display().to_string().cyan().bold());
    for report in &outcome.reports {
        println!("  {}", describe_report(report));
    }
    for failure in &outcome.failures {
        println!(
            "  {} {}: {}",
            "Skipped sheet".yellow(),
            failure.sheet,
            failure.error
        );
    }
}

fn describe_report(report: &SheetReport) -> String {
    let header = match report.header_row {
        Some(row) => format!("header on row {}", row + 1),
        None => "no data".to_string(),
    };
    let mut line = format!(
        "{}: {} rows x {} columns, {header}",
        report.sheet, report.rows, report.columns
    );

    let mut removed = Vec::new();
    if report.summary_rows_removed > 0 {
        removed.push(format!("{} summary", report.summary_rows_removed));
    }
    if report.duplicates_removed > 0 {
        removed.push(format!("{} duplicate", report.duplicates_removed));
    }
    if report.incomplete_rows_removed > 0 {
        removed.push(format!("{} incomplete", report.incomplete_rows_removed));
    }
    if !removed.is_empty() {
        line.push_str(&format!("; removed rows: {}", removed.join(", ")));
    }
    if !report.junk_columns_removed.is_empty() {
        line.push_str(&format!(
            "; dropped columns: {}",
            report.junk_columns_removed.join(", ")
        ));
    }
    line
}

fn print_insights(outcome: &CleanOutcome) {
    for (sheet, table) in outcome.book.sheets() {
        println!("  {} {sheet}", "Insights for".magenta().bold());
        for insight in generate_insights(table) {
            println!("    - {insight}");
        }
    }
}
