use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use floatchat::config::{self, Settings};
use floatchat::export::{
    DirectorySink, ExportFormat, ExportOutcome, ExportRequest, export_to_netcdf_with,
};
use floatchat::record::{ColumnDescriptor, Record};
use floatchat::report::{NumericDetection, generate_summary_stats_at};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "floatchat", about = "Export and summarise Argo float records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export a JSON array of records to one or more file formats
    Export {
        /// Path to a JSON file holding an array of flat objects
        #[arg(short, long)]
        input: PathBuf,

        /// Output format (csv, json, ascii, netcdf). Repeatable. Defaults to the configured formats.
        #[arg(short, long = "format", value_parser = parse_format)]
        formats: Vec<ExportFormat>,

        /// Base file name. Defaults to the input file stem.
        #[arg(short, long)]
        name: Option<String>,

        /// Column to export as `key=Label`. Repeatable. Defaults to the first record's keys.
        #[arg(short, long = "column", value_parser = parse_column)]
        columns: Vec<ColumnDescriptor>,

        /// Output directory. Defaults to the configured directory.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Path to a settings file
        #[arg(long, env = "FLOATCHAT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print a summary statistics report
    Report {
        /// Path to a JSON file holding an array of flat objects
        #[arg(short, long)]
        input: PathBuf,

        /// Report title
        #[arg(short, long)]
        title: String,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat a column as numeric if any record holds a number there
        #[arg(long)]
        any_record: bool,

        /// Path to a settings file
        #[arg(long, env = "FLOATCHAT_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Write a settings file with default values
    InitConfig {
        /// Target path. Defaults to the platform config location.
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_format(s: &str) -> std::result::Result<ExportFormat, String> {
    s.parse().map_err(|e: floatchat::error::FloatChatError| e.to_string())
}

fn parse_column(s: &str) -> std::result::Result<ColumnDescriptor, String> {
    s.parse().map_err(|e: floatchat::error::FloatChatError| e.to_string())
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Export {
            input,
            formats,
            name,
            columns,
            out_dir,
            config,
        } => handle_export(&input, formats, name, &columns, out_dir, config.as_deref()),
        Commands::Report {
            input,
            title,
            output,
            any_record,
            config,
        } => handle_report(&input, &title, output.as_deref(), any_record, config.as_deref()),
        Commands::InitConfig { path, force } => handle_init_config(path, force),
    }
}

fn handle_export(
    input: &Path,
    formats: Vec<ExportFormat>,
    name: Option<String>,
    columns: &[ColumnDescriptor],
    out_dir: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let settings = config::load_settings(config_path)?;
    let records = load_records(input)?;

    let name = match name {
        Some(n) => n,
        None => input
            .file_stem()
            .ok_or_else(|| anyhow::anyhow!("Invalid input file name"))?
            .to_string_lossy()
            .into_owned(),
    };
    let formats = if formats.is_empty() {
        settings.formats.clone()
    } else {
        formats
    };
    let out_dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());

    println!(
        "Exporting {} records from {} to {}...",
        records.len(),
        input.display(),
        out_dir.display()
    );

    let mut request = ExportRequest::new(&records, &name);
    if !columns.is_empty() {
        request = request.with_columns(columns);
    }

    let mut sink = DirectorySink::new(&out_dir);
    for format in formats {
        let outcome = export_format(format, &request, &settings, &mut sink)
            .with_context(|| format!("{format} export failed"))?;
        match outcome {
            ExportOutcome::Skipped => println!("{format}: no records, nothing written"),
            ExportOutcome::Saved { name } => {
                println!("{format}: {}", sink.path_for(&name).display());
            }
            ExportOutcome::FellBack { name } => {
                println!(
                    "{format}: failed, wrote JSON fallback {}",
                    sink.path_for(&name).display()
                );
            }
        }
    }
    Ok(())
}

fn export_format(
    format: ExportFormat,
    request: &ExportRequest<'_>,
    settings: &Settings,
    sink: &mut DirectorySink,
) -> floatchat::error::Result<ExportOutcome> {
    match format {
        ExportFormat::Netcdf => export_to_netcdf_with(request, &settings.netcdf, sink),
        other => floatchat::export::export(other, request, sink),
    }
}

fn handle_report(
    input: &Path,
    title: &str,
    output: Option<&Path>,
    any_record: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let settings = config::load_settings(config_path)?;
    let records = load_records(input)?;

    let detection = if any_record {
        NumericDetection::AnyRecord
    } else {
        settings.report.numeric_detection
    };
    let report = generate_summary_stats_at(&records, title, chrono::Utc::now(), detection);
    if report.is_empty() {
        println!("No records in {}, nothing to report.", input.display());
        return Ok(());
    }

    match output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn handle_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => config::config_path()?,
    };
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config::save_settings(&Settings::default(), &path)?;
    println!("Default settings written to {}", path.display());
    Ok(())
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of flat objects", path.display()))
}
