use clap::{Parser, Subcommand};
use ficopdf::config::DEFAULT_CONFIG_FILE;
use ficopdf::source::pdf_name;
use ficopdf::{AppConfig, Converter, FilesystemDocumentStore, PipelineError, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "ficopdf", version, about = "Converts styled text and CSV files to PDF")]
struct Cli {
    /// Path to the JSON config. Defaults are used when the file is missing.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the configured directory and convert new documents.
    Watch {
        /// Run a single pass and exit.
        #[arg(long)]
        once: bool,
    },
    /// Convert one file.
    Convert {
        input: PathBuf,
        /// Output path. Defaults to the input with a `.pdf` extension.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: &Path) -> Result<AppConfig, PipelineError> {
    if path.exists() {
        Ok(AppConfig::load(path)?)
    } else {
        log::warn!("Config {} not found, using defaults", path.display());
        Ok(AppConfig::default())
    }
}

fn main() -> Result<(), PipelineError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let converter = Converter::from_config(&config)?;

    match cli.command {
        Command::Watch { once } => {
            let store = FilesystemDocumentStore::create(config.watch_directory())?;
            let watcher = Watcher::new(store, converter, config.poll_interval());
            if once {
                let report = watcher.run_once()?;
                log::info!(
                    "{} converted, {} failed, {} skipped",
                    report.converted.len(),
                    report.failed.len(),
                    report.skipped.len()
                );
            } else {
                watcher.run();
            }
        }
        Command::Convert { input, output } => {
            let started = Instant::now();
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| PipelineError::UnsupportedInput(input.display().to_string()))?;
            let data = fs::read(&input)?;
            let pdf = converter.convert(&name, &data)?;
            let output = output.unwrap_or_else(|| input.with_file_name(pdf_name(&name)));
            fs::write(&output, pdf)?;
            log::info!(
                "Wrote {} in {:?}",
                output.display(),
                started.elapsed()
            );
        }
    }
    Ok(())
}
