use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use license_summary_analysis::{
    DEFAULT_SKIP_ROWS, ScanLayout, SummaryError, format_summary, load_role_catalog,
    read_report_rows, summarize,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Csv,
    Json,
    Yaml,
    Table,
}

impl From<CliOutputFormat> for license_summary_analysis::OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Csv => Self::Csv,
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "license-summary")]
#[command(about = "Summarize security role combinations and license needs from a license report")]
struct Cli {
    /// License report export to analyze.
    report: PathBuf,
    /// Role catalog mapping each role to its required license categories.
    roles: PathBuf,
    /// Output path (default: report path with `_summary` appended to the stem).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output format for the summary document.
    #[arg(long, default_value = "csv")]
    format: CliOutputFormat,
    /// Leading report rows to skip before data begins.
    #[arg(long, default_value_t = DEFAULT_SKIP_ROWS)]
    skip_rows: usize,
    /// Column holding the user block marker.
    #[arg(long, default_value_t = 3)]
    marker_column: usize,
    /// Column holding the user alias.
    #[arg(long, default_value_t = 3)]
    alias_column: usize,
    /// Column holding the role header and role lists.
    #[arg(long, default_value_t = 5)]
    role_column: usize,
    /// Print the run report as JSON to stderr.
    #[arg(long)]
    with_report: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if !cli.report.exists() {
        return Err(format!(
            "license report '{}' does not exist",
            cli.report.display()
        ));
    }
    if !cli.roles.exists() {
        return Err(format!(
            "role catalog '{}' does not exist",
            cli.roles.display()
        ));
    }

    let catalog = load_role_catalog(&cli.roles)
        .map_err(|e| format!("failed to load role catalog '{}': {e}", cli.roles.display()))?;
    let rows = read_report_rows(&cli.report, cli.skip_rows).map_err(|e| {
        format!(
            "failed to read license report '{}': {e}",
            cli.report.display()
        )
    })?;

    let layout = ScanLayout {
        marker_column: cli.marker_column,
        alias_column: cli.alias_column,
        role_column: cli.role_column,
        ..ScanLayout::default()
    };

    let summary = match summarize(&rows, &catalog, &layout) {
        Ok(summary) => summary,
        Err(SummaryError::NoMatchingUsers) => {
            // A report without matching users is an empty result, not a
            // failure; no summary document is written.
            println!("No matching roles found in the report.");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    if cli.with_report {
        let report = serde_json::to_string_pretty(&summary.report)
            .map_err(|e| format!("failed to serialize run report: {e}"))?;
        eprintln!("{report}");
    }

    let format: license_summary_analysis::OutputFormat = cli.format.into();
    let rendered = format_summary(&summary.result, format)?;

    let output = cli
        .output
        .unwrap_or_else(|| summary_output_path(&cli.report, format_extension(cli.format)));
    fs::write(&output, rendered)
        .map_err(|e| format!("failed to write '{}': {e}", output.display()))?;

    println!(
        "Wrote {} combination(s) covering {} user(s) to '{}'.",
        summary.result.combination_count(),
        summary.result.total_users(),
        output.display()
    );

    Ok(())
}

/// Derives the default output path: `_summary` appended to the input stem,
/// extension taken from the output format.
fn summary_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    input.with_file_name(format!("{stem}_summary.{extension}"))
}

/// Returns the file extension for the given output format.
fn format_extension(format: CliOutputFormat) -> &'static str {
    match format {
        CliOutputFormat::Csv => "csv",
        CliOutputFormat::Json => "json",
        CliOutputFormat::Yaml => "yaml",
        CliOutputFormat::Table => "txt",
    }
}

#[cfg(test)]
mod tests {
    use super::{CliOutputFormat, format_extension, summary_output_path};
    use std::path::Path;

    #[test]
    fn test_summary_output_path_appends_to_stem() {
        let path = summary_output_path(Path::new("/tmp/License Report.csv"), "csv");
        assert_eq!(path, Path::new("/tmp/License Report_summary.csv"));
    }

    #[test]
    fn test_summary_output_path_swaps_extension_for_format() {
        let path = summary_output_path(Path::new("report.csv"), "json");
        assert_eq!(path, Path::new("report_summary.json"));
    }

    #[test]
    fn test_format_extension_covers_all_formats() {
        assert_eq!(format_extension(CliOutputFormat::Csv), "csv");
        assert_eq!(format_extension(CliOutputFormat::Json), "json");
        assert_eq!(format_extension(CliOutputFormat::Yaml), "yaml");
        assert_eq!(format_extension(CliOutputFormat::Table), "txt");
    }
}
