//! panelstock CLI - wood-panel stock extraction tool
//!
//! Reads `.xls`/`.xlsx` stock workbooks, extracts one record per pack and
//! exports the records as a flat workbook, JSON, or a preview grid.

mod logger;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use panelstock::export::{self, ExportOutcome};
use panelstock::render::{JsonFormat, TableStyle};
use panelstock::{ExtractOptions, OutputRecord, WoodTypeMatch};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Wood-panel stock extraction from spreadsheet workbooks
#[derive(Parser)]
#[command(
    name = "panelstock",
    author = "iyulab",
    version,
    about = "Extract stock records from wood-panel workbooks",
    long_about = "panelstock - wood-panel stock record extraction.\n\n\
                  Reads XLS and XLSX stock lists and exports one row per pack \
                  with id, packId, amount and status."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Log decoding and section detection to stderr (-vv also logs each record)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Options shared by every command that extracts records.
#[derive(Args)]
struct ExtractArgs {
    /// Fail on sections without a PACK column or workbooks without sections
    #[arg(long, global = true)]
    strict: bool,

    /// Only accept the known wood types as section headers
    #[arg(long, global = true)]
    enumerated_wood_types: bool,

    /// Id prefix for a wood type, e.g. `--prefix larchwood=L1` (repeatable)
    #[arg(long = "prefix", value_name = "TYPE=PREFIX", value_parser = parse_prefix, global = true)]
    prefixes: Vec<(String, String)>,
}

impl ExtractArgs {
    fn to_options(&self) -> ExtractOptions {
        let mode = if self.enumerated_wood_types {
            WoodTypeMatch::Enumerated
        } else {
            WoodTypeMatch::Loose
        };
        self.prefixes.iter().fold(
            ExtractOptions::new()
                .with_wood_type_match(mode)
                .with_strict_sections(self.strict),
            |options, (wood_type, prefix)| options.with_id_prefix(wood_type, prefix),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract records and save them as a single-sheet workbook
    Export {
        /// Input workbook (.xls or .xlsx)
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = export::DEFAULT_FILE_NAME)]
        output: PathBuf,
    },

    /// Print the extracted records as a grid
    #[command(visible_alias = "show")]
    Preview {
        /// Input workbook (.xls or .xlsx)
        input: PathBuf,

        /// Grid style
        #[arg(long, default_value = "ascii")]
        style: GridStyle,
    },

    /// Print the extracted records as JSON
    Json {
        /// Input workbook (.xls or .xlsx)
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// Show workbook information and record counts
    Info {
        /// Input workbook (.xls or .xlsx)
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Preview grid style
#[derive(Clone, ValueEnum)]
enum GridStyle {
    /// Markdown pipe table
    Markdown,
    /// ASCII box table
    Ascii,
}

impl From<GridStyle> for TableStyle {
    fn from(style: GridStyle) -> Self {
        match style {
            GridStyle::Markdown => TableStyle::Markdown,
            GridStyle::Ascii => TableStyle::Ascii,
        }
    }
}

fn parse_prefix(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((wood_type, prefix)) if !wood_type.trim().is_empty() => {
            Ok((wood_type.trim().to_string(), prefix.trim().to_string()))
        }
        _ => Err(format!("expected TYPE=PREFIX, got '{}'", value)),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose > 0 {
        logger::init(cli.verbose > 1);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.extract.to_options();

    match cli.command {
        Commands::Export { input, output } => {
            let records = extract_with_spinner(&input, &options)?;

            match export::write_records(&records, &output)? {
                ExportOutcome::Written { path, rows } => {
                    println!(
                        "{} Exported {} records to {}",
                        "✓".green().bold(),
                        rows,
                        path.display()
                    );
                }
                ExportOutcome::NothingToExport => {
                    println!("{} No records found, nothing to export", "!".yellow().bold());
                }
            }
        }

        Commands::Preview { input, style } => {
            let records = extract_with_spinner(&input, &options)?;
            print!("{}", panelstock::render::to_table(&records, style.into()));
            println!("{} records", records.len());
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let records = extract_with_spinner(&input, &options)?;
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = panelstock::render::to_json(&records, format)?;
            write_output(output.as_deref(), &json)?;

            if let Some(path) = output {
                println!("{} Wrote JSON: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Info { input } => {
            let pb = create_spinner("Analyzing workbook...");

            let format = panelstock::detect_format_from_path(&input)?;
            let workbook = panelstock::read_workbook(&input)?;
            let records = panelstock::process_workbook(&workbook, &options)?;

            pb.finish_and_clear();

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Format".bold(), format);
            println!("{}: {}", "Sheets".bold(), workbook.sheets.len());
            for sheet in &workbook.sheets {
                println!(
                    "  {} ({} rows, {} cells)",
                    sheet.name,
                    sheet.rows.len(),
                    sheet.cell_count()
                );
            }

            println!("\n{}", "Extraction".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Records".bold(), records.len());
            print_status_counts(&records);
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn extract_with_spinner(
    input: &Path,
    options: &ExtractOptions,
) -> Result<Vec<OutputRecord>, Box<dyn std::error::Error>> {
    let pb = create_spinner("Reading workbook...");
    let workbook = panelstock::read_workbook(input)?;

    pb.set_message("Extracting records...");
    let records = panelstock::process_workbook(&workbook, options)?;

    pb.finish_and_clear();
    Ok(records)
}

fn print_status_counts(records: &[OutputRecord]) {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(status, _)| *status == record.status) {
            Some(entry) => entry.1 += 1,
            None => counts.push((record.status.as_str(), 1)),
        }
    }
    for (status, count) in counts {
        let label = if status.is_empty() { "(none)" } else { status };
        println!("  {}: {}", label.bold(), count);
    }
}

fn print_version() {
    println!("{} {}", "panelstock".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Wood-panel stock record extraction from spreadsheet workbooks");
    println!();
    println!("Supported formats: XLS, XLSX");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
