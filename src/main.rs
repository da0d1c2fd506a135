use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glucose_series::{
    config::Config,
    export::{Export, ExportError, NO_EXPORT_MESSAGE},
    pipeline::Pipeline,
    series::NO_DATA_MESSAGE,
    ExportFormat,
};
use log::info;

#[derive(Parser)]
#[command(name = "glucose-series")]
#[command(about = "Normalize grouped glucose readings and export them")]
struct Cli {
    /// Provider payload, e.g. the response of a grouped glucose query
    payload: PathBuf,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Provider group to read; repeat to merge several. Overrides the config.
    #[arg(long)]
    provider: Vec<String>,

    /// Write the export file into this directory instead of printing chart data
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export format. Overrides the config.
    #[arg(long, value_parser = ["csv", "json"])]
    format: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if !cli.provider.is_empty() {
        config.providers = cli.provider.clone();
    }
    match cli.format.as_deref() {
        Some("json") => config.export_format = ExportFormat::Json,
        Some("csv") => config.export_format = ExportFormat::Csv,
        _ => {}
    }

    let pipeline = Pipeline::new(config)?;
    let file = File::open(&cli.payload)
        .with_context(|| format!("opening payload {}", cli.payload.display()))?;
    let assembly = pipeline.assemble_reader(BufReader::new(file))?;
    info!(
        "assembled {} samples ({} dropped)",
        assembly.series.len(),
        assembly.report.dropped()
    );

    match cli.export {
        Some(dir) => match Export::today(&assembly.series, pipeline.config().export_format) {
            Ok(export) => {
                let path = export.write_to_dir(&dir)?;
                info!(
                    "exported {} ({}, {} bytes)",
                    export.file_name,
                    export.format.content_type(),
                    export.content.len()
                );
                println!("wrote {}", path.display());
            }
            Err(ExportError::EmptySeries) => println!("{}", NO_EXPORT_MESSAGE),
            Err(e) => return Err(e.into()),
        },
        None if assembly.series.is_empty() => println!("{}", NO_DATA_MESSAGE),
        None => println!(
            "{}",
            serde_json::to_string_pretty(&assembly.series.chart_data())?
        ),
    }

    Ok(())
}
