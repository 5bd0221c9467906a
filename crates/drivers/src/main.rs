mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::AppConfig;
use labelset_adapters::{
    present_export_report, present_ingest_report, FsOutputFolders, ImageCrateInspector,
    LocalBlobStore, QuickXmlAnnotationWriter, SqliteMetadataStore, WalkdirDocumentScanner,
};
use labelset_application::{
    ExportCommand, ExportService, IngestDocumentsCommand, RecordFailurePolicy,
};
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "labelset")]
#[command(about = "Export labeled weld photos into a train/val object-detection dataset")]
#[command(version)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long, global = true, env = "LABELSET_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Deduplicate, split and write the dataset
    Export {
        /// Shuffle seed
        #[arg(long)]
        seed: Option<u64>,
        /// Output root that receives train/ and val/
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep going when a single photo fails to download or write
        #[arg(long)]
        skip_failures: bool,
    },
    /// Load a folder of <id>.json metadata documents into the catalog
    Ingest {
        collection: String,
        folder: PathBuf,
    },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            error!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            error!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let mut config = AppConfig::load(cli.config.as_deref()).map_err(CommandError::Usage)?;
    apply_overrides(&mut config, &cli.command);

    let catalog = SqliteMetadataStore::new(config.catalog_path.clone());
    catalog
        .initialize()
        .map_err(|error| CommandError::Runtime(format!("failed to open catalog: {error}")))?;
    let service = build_export_service(&config, catalog);

    run_command(cli.command, &service, config)
}

fn apply_overrides(config: &mut AppConfig, command: &Command) {
    if let Command::Export {
        seed,
        output,
        skip_failures,
    } = command
    {
        if let Some(seed) = seed {
            config.export.seed = *seed;
        }
        if let Some(output) = output {
            config.export.output_root = output.clone();
        }
        if *skip_failures {
            config.export.on_record_error = RecordFailurePolicy::Skip;
        }
    }
}

fn build_export_service(config: &AppConfig, catalog: SqliteMetadataStore) -> ExportService {
    ExportService::new(
        Box::new(catalog),
        Box::new(LocalBlobStore::new(config.blob_root.clone())),
        Box::new(ImageCrateInspector),
        Box::new(QuickXmlAnnotationWriter),
        Box::new(FsOutputFolders),
        Box::new(WalkdirDocumentScanner),
    )
}

fn run_command(
    command: Command,
    service: &ExportService,
    config: AppConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Export { .. } => {
            let report = service
                .export(ExportCommand {
                    config: config.export,
                })
                .map_err(|error| CommandError::Runtime(format!("export failed: {error}")))?;
            for line in present_export_report(&report) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Ingest { collection, folder } => {
            let report = service
                .ingest_documents(IngestDocumentsCommand {
                    collection: collection.clone(),
                    folder,
                })
                .map_err(|error| CommandError::Runtime(format!("ingest failed: {error}")))?;
            println!("{}", present_ingest_report(&collection, &report));
            Ok(())
        }
    }
}
