// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2pdf::error::troubleshooting_hints;
use notion2pdf::output::{deliver, sanitize_filename, DeliveryTarget};
use notion2pdf::server::{serve, AppState};
use notion2pdf::{
    AppConfig, AppError, CommandLineInput, ExportAction, ExportWorkspace, Exported,
    NotionContentSource, OutputMode, PageReference, Task, WkhtmltopdfRenderer,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so Markdown printed to stdout stays clean.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2pdf.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}

fn build_export_action(config: &AppConfig) -> ExportAction {
    let mut source = NotionContentSource::new(config.api_key.clone(), config.conversion.clone())
        .with_fetch_depth(config.fetch_depth);
    if let Some(base_url) = &config.api_base_url {
        source = source.with_base_url(base_url.as_str());
    }
    let renderer = WkhtmltopdfRenderer::new(config.pdf.clone());

    ExportAction::new(
        Arc::new(source),
        Arc::new(renderer),
        ExportWorkspace::new(&config.output_dir),
    )
}

/// Runs one export from the command line and delivers the result locally.
async fn export_once(
    action: &ExportAction,
    notion_url: &str,
    mode: OutputMode,
    output_file: Option<PathBuf>,
) -> Result<(), AppError> {
    match action.run(notion_url, mode).await? {
        Exported::Markdown(markdown) => {
            let target = match output_file {
                Some(path) => DeliveryTarget::WriteFile {
                    path,
                    content: markdown,
                },
                None => DeliveryTarget::PrintToStdout { content: markdown },
            };
            if let Some(path) = deliver(target)?.destination {
                eprintln!("✓ Markdown saved to {}", path.display());
            }
        }
        Exported::Pdf(artifacts) => {
            let to = match output_file {
                Some(path) => path,
                None => {
                    let page = PageReference::from_url(notion_url)?;
                    PathBuf::from(format!("{}.pdf", sanitize_filename(page.as_str())))
                }
            };
            let delivered = deliver(DeliveryTarget::CopyFile {
                from: artifacts.pdf_path.clone(),
                to,
            });
            action.workspace().discard(&artifacts).await;
            if let Some(path) = delivered?.destination {
                eprintln!("✓ PDF saved to {}", path.display());
            }
        }
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    let action = build_export_action(&config);

    match config.task {
        Task::Serve { addr } => serve(Arc::new(AppState { export: action }), addr).await,
        Task::Export {
            notion_url,
            mode,
            output_file,
        } => export_once(&action, &notion_url, mode, output_file).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).map_err(|e| anyhow::anyhow!("{}", e))?;
    load_dotenv();

    let config = AppConfig::resolve(cli)?;

    if let Err(err) = run(config).await {
        for hint in troubleshooting_hints(&err) {
            eprintln!("  hint: {}", hint);
        }
        return Err(err.into());
    }

    Ok(())
}
