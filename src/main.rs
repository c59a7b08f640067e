use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;

use matterbatch::{clean_field_list, ops, Config, ExtractFormat, SetField};

#[derive(Parser)]
#[command(
    name = "matterbatch",
    version,
    about = "Batch-edit YAML, TOML, and JSON front matter in a content tree",
    long_about = "matterbatch walks a content tree of markdown files, selects documents \
                  whose front matter matches a condition, and applies field mutations, \
                  lint checks, or value extraction. Pending changes are previewed as \
                  field-level diffs and written atomically, with an optional git commit \
                  of the touched files."
)]
struct Cli {
    /// Root of the content tree
    #[arg(short, long, default_value = "content", value_name = "DIR")]
    content_dir: PathBuf,

    /// Set a field on matching documents
    #[arg(short, long, value_name = "KEY=VALUE")]
    set: Option<String>,

    /// Only touch documents whose front matter matches this condition
    #[arg(short = 'i', long = "if", value_name = "EXPR")]
    condition: Option<String>,

    /// Show diffs without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print a summary report after the run
    #[arg(long)]
    report: bool,

    /// Check required/prohibited fields
    #[arg(long)]
    lint: bool,

    /// Repair lint violations in place (with --lint)
    #[arg(long)]
    fix: bool,

    /// Comma-separated fields every document must carry
    #[arg(long, value_name = "FIELDS", value_delimiter = ',')]
    required: Vec<String>,

    /// Comma-separated fields no document may carry
    #[arg(long, value_name = "FIELDS", value_delimiter = ',')]
    prohibited: Vec<String>,

    /// Commit modified files with git when the run ends
    #[arg(long)]
    gc: bool,

    /// Commit message override (with --gc)
    #[arg(long, value_name = "MSG")]
    gc_msg: Option<String>,

    /// Apply changes without asking per file
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print a field's value for every document instead of editing
    #[arg(long, value_name = "KEY")]
    extract: Option<String>,

    /// Output syntax for extraction
    #[arg(long, value_enum, default_value = "plain", value_name = "FORMAT")]
    extract_format: ExtractFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let set = match cli.set.as_deref() {
        Some(raw) => Some(
            SetField::parse(raw)
                .ok_or_else(|| anyhow!("invalid --set '{}', expected KEY=VALUE", raw))?,
        ),
        None => None,
    };

    let config = Config {
        content_dir: cli.content_dir,
        set,
        condition: cli.condition,
        dry_run: cli.dry_run,
        lint: cli.lint,
        fix: cli.fix,
        required_fields: clean_field_list(cli.required),
        prohibited_fields: clean_field_list(cli.prohibited),
        git_commit: cli.gc,
        git_message: cli.gc_msg,
        assume_yes: cli.yes,
        extract: cli.extract,
    };

    let report = ops::run(&config, confirm_on_stdin)?;

    if config.extract.is_some() {
        print!("{}", report.render_extractions(cli.extract_format)?);
    } else if cli.report {
        print!("{}", report.render_summary(config.lint));
    }

    Ok(())
}

/// Ask on stdin whether a pending change should be written. Anything
/// other than `y` / `yes` (case-insensitive) declines.
fn confirm_on_stdin(path: &Path) -> matterbatch::Result<bool> {
    print!("Apply changes to {}? (y/N): ", path.display());
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
