use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use extraction_formatter_lib::config::EXPORT_DIR_VAR;
use extraction_formatter_lib::{
    DocumentRequest, ExtractionService, FormattedReport, FormatterConfig, RecordedAgent,
    ReportFormatter,
};

#[derive(Parser, Debug)]
#[command(
    name = "format_extraction",
    version,
    about = "Format, validate, compare and export document extraction results"
)]
struct Cli {
    /// Directory for exports written under a generated name.
    #[arg(long, global = true, env = EXPORT_DIR_VAR)]
    export_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Format a recorded extraction of a document against an attribute list.
    Format {
        /// Attribute list spreadsheet (.xlsx/.xls), names in column A below a header row.
        #[arg(long)]
        attributes: PathBuf,
        /// Source document (.pdf).
        #[arg(long)]
        document: PathBuf,
        /// Captured extractor output: JSON object of attribute -> string | null.
        #[arg(long)]
        recorded: PathBuf,
        #[arg(long)]
        json_out: Option<PathBuf>,
        #[arg(long)]
        excel_out: Option<PathBuf>,
        /// Write JSON and Excel exports under generated names.
        #[arg(long, default_value_t = false)]
        export: bool,
    },
    /// Compare two or more formatted report JSON files.
    Compare { reports: Vec<PathBuf> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = FormatterConfig::from_env();
    if let Some(dir) = cli.export_dir {
        config = config.with_export_dir(dir);
    }
    let formatter = ReportFormatter::new(config);

    match cli.command {
        Commands::Format {
            attributes,
            document,
            recorded,
            json_out,
            excel_out,
            export,
        } => {
            let agent = RecordedAgent::from_json_file(&recorded)
                .with_context(|| format!("loading recorded extraction {}", recorded.display()))?;
            let service = ExtractionService::new(agent, formatter);
            let report = service.process_documents(&DocumentRequest {
                attributes_path: attributes,
                document_path: document,
            })?;

            if json_out.is_some() || export {
                service.formatter().export_to_json_file(&report, json_out.as_deref())?;
            }
            if excel_out.is_some() || export {
                service.formatter().export_to_excel(&report, excel_out.as_deref())?;
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Compare { reports } => {
            if reports.len() < 2 {
                bail!("Need at least 2 extraction results for comparison");
            }
            let mut loaded: Vec<FormattedReport> = Vec::with_capacity(reports.len());
            for path in &reports {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                loaded.push(
                    serde_json::from_str(&text)
                        .with_context(|| format!("parsing report {}", path.display()))?,
                );
            }
            let outcome = formatter.compare_extractions(&loaded);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
