//! comment-cleaner CLI - social media comment cleaning tool
//!
//! Cleans comment exports (CSV) and reports what was removed and why.

mod table;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use comment_cleaner::{
    adaptive_min_length, classify_script, diagnose, BatchItem, BatchSummary, CleanOptions,
    CleaningStats, CommentCleaner, Dataset, ValidityClassifier, ValidityPolicy, Verdict,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Social media comment cleaning
#[derive(Parser)]
#[command(
    name = "comment-cleaner",
    author = "iyulab",
    version,
    about = "Clean and filter social media comment exports",
    long_about = "comment-cleaner - Clean and filter social media comment datasets.\n\n\
                  Strips URLs, mentions, hashtags and repeated punctuation, drops\n\
                  blank, emoji-only, too-short and meaningless comments, and reports\n\
                  retention statistics.\n\n\
                  Usage:\n  \
                  comment-cleaner <file>...           Clean with default settings\n  \
                  comment-cleaner clean <file>...     Clean with options\n  \
                  comment-cleaner inspect <file>      Show columns and blank cells"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input CSV files (for default cleaning)
    #[arg(global = false)]
    input: Vec<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one or more comment files
    Clean(CleanArgs),

    /// Show columns, row count and blank cells of a file
    Inspect {
        /// Input CSV file
        input: PathBuf,
    },

    /// Classify a single comment (script, minimum length, verdict)
    Classify {
        /// Comment text
        text: String,

        /// Base minimum length
        #[arg(long, default_value_t = comment_cleaner::DEFAULT_MIN_LENGTH)]
        min_length: usize,

        /// Validity policy
        #[arg(long, default_value = "unicode-adaptive")]
        policy: PolicyArg,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct CleanArgs {
    /// Input CSV files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Comment column (default: auto-detect)
    #[arg(short, long)]
    column: Option<String>,

    /// Options preset
    #[arg(long)]
    preset: Option<Preset>,

    /// JSON options file (overrides the preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base minimum comment length
    #[arg(long)]
    min_length: Option<usize>,

    /// Validity policy
    #[arg(long)]
    policy: Option<PolicyArg>,

    /// Keep URLs in comments
    #[arg(long)]
    keep_urls: bool,

    /// Strip @mentions
    #[arg(long)]
    mentions: bool,

    /// Strip #hashtags
    #[arg(long)]
    hashtags: bool,

    /// Keep rows that contain only emoji
    #[arg(long)]
    keep_emoji_only: bool,

    /// Strip emoji from kept comments
    #[arg(long)]
    strip_emoji: bool,

    /// Apply Unicode NFC normalization first
    #[arg(long)]
    normalize_unicode: bool,

    /// Process rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Print cleaned comment previews (first N rows per file)
    #[arg(long, default_value_t = 0)]
    preview: usize,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,
}

/// Options preset
#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Canonical settings
    Default,
    /// Earlier behavior: strip emoji, strict ASCII validity
    Legacy,
    /// Also strip mentions and hashtags
    Aggressive,
    /// Short minimum, keep URLs
    Lenient,
}

impl From<Preset> for CleanOptions {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Default => CleanOptions::default(),
            Preset::Legacy => CleanOptions::legacy(),
            Preset::Aggressive => CleanOptions::aggressive(),
            Preset::Lenient => CleanOptions::lenient(),
        }
    }
}

/// Validity policy
#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Meaningful-content test with script-adaptive minimum length
    UnicodeAdaptive,
    /// Flat minimum length, require an ASCII letter
    StrictAscii,
}

impl From<PolicyArg> for ValidityPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::UnicodeAdaptive => ValidityPolicy::UnicodeAdaptive,
            PolicyArg::StrictAscii => ValidityPolicy::StrictAscii,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        if cli.input.is_empty() {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            return Ok(());
        }
        let args = CleanArgs {
            inputs: cli.input,
            ..CleanArgs::default()
        };
        return run_clean(&args);
    };

    match command {
        Commands::Clean(args) => run_clean(&args)?,

        Commands::Inspect { input } => run_inspect(&input)?,

        Commands::Classify {
            text,
            min_length,
            policy,
        } => {
            let policy: ValidityPolicy = policy.into();
            let script = classify_script(Some(&text));
            let classifier = ValidityClassifier::new(min_length).with_policy(policy);
            let diagnostics = diagnose(Some(&text));

            println!("{}: {}", "Script".bold(), script);
            if policy == ValidityPolicy::UnicodeAdaptive {
                println!(
                    "{}: {}",
                    "Minimum length".bold(),
                    adaptive_min_length(script, min_length)
                );
            } else {
                println!("{}: {}", "Minimum length".bold(), min_length);
            }
            println!("{}: {}", "Characters".bold(), diagnostics.char_count);
            println!("{}: {}", "Words".bold(), diagnostics.word_count);
            match classifier.classify(Some(&text)) {
                Verdict::Keep => println!("{}: {}", "Verdict".bold(), "keep".green()),
                Verdict::Reject(category) => println!(
                    "{}: {} ({})",
                    "Verdict".bold(),
                    "remove".red(),
                    category
                ),
            }
        }

        Commands::Version => print_version(),
    }

    Ok(())
}

fn build_options(args: &CleanArgs) -> Result<CleanOptions, Box<dyn std::error::Error>> {
    let mut options = match &args.config {
        Some(path) => CleanOptions::from_json(&fs::read_to_string(path)?)?,
        None => args.preset.map(CleanOptions::from).unwrap_or_default(),
    };

    if let Some(min_length) = args.min_length {
        options.min_length = min_length;
    }
    if let Some(policy) = args.policy {
        options.validity_policy = policy.into();
    }
    if args.keep_urls {
        options.remove_urls = false;
    }
    if args.mentions {
        options.remove_mentions = true;
    }
    if args.hashtags {
        options.remove_hashtags = true;
    }
    if args.keep_emoji_only {
        options.remove_emoji_only = false;
    }
    if args.strip_emoji {
        options.strip_emoji = true;
    }
    if args.normalize_unicode {
        options.normalize_unicode = true;
    }
    if args.parallel {
        options.parallel = true;
    }

    Ok(options)
}

/// Clean every input independently, write `<stem>_cleaned.csv` for each and
/// report per-file and aggregate statistics.
fn run_clean(args: &CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let options = build_options(args)?;
    debug!(?options, "cleaning options");
    let cleaner = CommentCleaner::new(options);

    let pb = create_spinner("Reading files...");
    let mut datasets: Vec<(String, Dataset)> = Vec::with_capacity(args.inputs.len());
    let mut io_failures: Vec<(String, String)> = Vec::new();
    for input in &args.inputs {
        pb.set_message(format!("Reading {}...", input.display()));
        match table::read_csv(input) {
            Ok(dataset) => datasets.push((input.display().to_string(), dataset)),
            Err(e) => {
                warn!(file = %input.display(), error = %e, "failed to read input");
                io_failures.push((input.display().to_string(), e.to_string()));
            }
        }
    }

    pb.set_message("Cleaning comments...");
    let batch = cleaner.clean_batch(&datasets, args.column.as_deref());

    pb.set_message("Writing output...");
    let (written, write_failures) = write_outputs(&batch.items, args.output.as_deref());
    io_failures.extend(write_failures);
    pb.finish_and_clear();

    if args.json {
        print_json(&batch.items, &batch.summary, &io_failures)?;
    } else {
        for item in &batch.items {
            match &item.result {
                Ok(report) => {
                    println!("{} {}", "File:".cyan().bold(), item.name);
                    println!("{}: '{}'", "Comment column".bold(), report.column);
                    print_stats(&report.stats);
                    if let Some((_, path)) = written.iter().find(|(name, _)| name == &item.name) {
                        println!("{} Written to {}\n", "✓".green().bold(), path.display());
                    }
                    if args.preview > 0 {
                        print_preview(report, args.preview);
                    }
                }
                Err(e) => eprintln!("{} {}: {}", "✗".red().bold(), item.name, e),
            }
        }
        for (name, error) in &io_failures {
            eprintln!("{} {}: {}", "✗".red().bold(), name, error);
        }
        if args.inputs.len() > 1 {
            print_summary(&batch.summary);
        }
    }

    let failed = io_failures.len() + batch.summary.failed;
    if failed > 0 {
        return Err(format!("{} of {} file(s) failed", failed, args.inputs.len()).into());
    }
    Ok(())
}

/// Writes `<stem>_cleaned.csv` for every cleaned item. A failed write is
/// recorded and the remaining items are still written.
fn write_outputs(
    items: &[BatchItem],
    output_dir: Option<&Path>,
) -> (Vec<(String, PathBuf)>, Vec<(String, String)>) {
    let mut written = Vec::new();
    let mut failures = Vec::new();
    for item in items {
        let Ok(report) = &item.result else {
            continue;
        };
        let path = output_path(Path::new(&item.name), output_dir);
        let result = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .map_err(|e| e.to_string())
            .and_then(|_| table::write_csv(&path, &report.dataset).map_err(|e| e.to_string()));
        match result {
            Ok(()) => written.push((item.name.clone(), path)),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to write output");
                failures.push((item.name.clone(), format!("failed to write {}: {}", path.display(), e)));
            }
        }
    }
    (written, failures)
}

fn run_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner("Reading file...");
    let dataset = table::read_csv(input)?;
    pb.finish_and_clear();

    println!("{}", "File Inspection".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("{}: {}", "Rows".bold(), dataset.len());

    println!("\n{}", "Columns".cyan().bold());
    println!("{}", "─".repeat(40));
    for (index, name) in dataset.columns().iter().enumerate() {
        let blanks = dataset
            .column_values(index)
            .filter(|v| comment_cleaner::transform::is_blank(*v))
            .count();
        if blanks > 0 {
            println!("  {}. {} ({} blank cells)", index + 1, name, blanks);
        } else {
            println!("  {}. {}", index + 1, name);
        }
    }

    println!();
    match dataset.detect_comment_column() {
        Ok(index) => println!(
            "{} Detected comment column: '{}'",
            "✓".green().bold(),
            dataset.columns()[index]
        ),
        Err(_) => println!(
            "{} Could not detect a comment column; pass --column",
            "!".yellow().bold()
        ),
    }

    Ok(())
}

fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };
    dir.join(format!("{}_cleaned.csv", stem))
}

fn print_stats(stats: &CleaningStats) {
    let removed = &stats.removed;
    println!("{}", "─".repeat(48));
    println!("{:<30}{:>10}", "Original comments:", stats.original_count);
    println!("{:<30}{:>10}", "After blank removal:", stats.after_blank_removal);
    println!("{}", "─".repeat(48));
    println!("{}", "Removed by category:".bold());
    println!("{:<30}{:>10}", "  • Blank/empty cells:", removed.blank_empty);
    println!("{:<30}{:>10}", "  • Emoji-only:", removed.only_emojis);
    println!("{:<30}{:>10}", "  • Too short:", removed.too_short);
    println!("{:<30}{:>10}", "  • Only special chars:", removed.only_special_chars);
    println!("{}", "─".repeat(48));
    println!("{:<30}{:>10}", "Final cleaned comments:", stats.final_count);
    println!("{:<30}{:>10}", "Total removed:", stats.total_removed);
    println!("{:<30}{:>9.2}%", "Retention rate:", stats.retention_rate);
}

fn print_summary(summary: &BatchSummary) {
    println!("{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(48));
    println!("{:<30}{:>10}", "Files cleaned:", summary.datasets);
    println!("{:<30}{:>10}", "Files failed:", summary.failed);
    println!("{:<30}{:>10}", "Original comments:", summary.original_count);
    println!("{:<30}{:>10}", "Final cleaned comments:", summary.final_count);
    println!("{:<30}{:>10}", "Total removed:", summary.total_removed);
    println!("{:<30}{:>9.2}%", "Retention rate:", summary.retention_rate);
}

fn print_preview(report: &comment_cleaner::CleanReport, limit: usize) {
    println!("{}", "Cleaned Preview".cyan().bold());
    println!("{}", "─".repeat(48));
    for (text, diag) in report
        .cleaned_comments()
        .zip(report.diagnostics())
        .take(limit)
    {
        println!(
            "  [{} | {} chars | {} words] {}",
            diag.script, diag.char_count, diag.word_count, text
        );
    }
    println!();
}

fn print_json(
    items: &[BatchItem],
    summary: &BatchSummary,
    io_failures: &[(String, String)],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut files: Vec<serde_json::Value> = items
        .iter()
        .map(|item| match &item.result {
            Ok(report) => serde_json::json!({
                "file": item.name,
                "column": report.column,
                "stats": report.stats,
            }),
            Err(e) => serde_json::json!({
                "file": item.name,
                "error": e.to_string(),
            }),
        })
        .collect();
    files.extend(io_failures.iter().map(|(name, error)| {
        serde_json::json!({
            "file": name,
            "error": error,
        })
    }));

    let output = serde_json::json!({
        "files": files,
        "summary": summary,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_version() {
    println!("{} {}", "comment-cleaner".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Social media comment cleaning and filtering");
    println!();
    println!("Input format: CSV with a header row");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
