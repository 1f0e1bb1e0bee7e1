// src/config.rs
use crate::constants::*;
use crate::error::AppError;
use crate::formatting::ConversionSettings;
use crate::render::{PdfOptions, Theme};
use crate::types::{ApiKey, OutputMode, ValidatedUrl};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Directory served at `/tmp` when none is given.
const DEFAULT_SERVE_DIR: &str = "public/tmp";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Notion API root, for proxies (defaults to https://api.notion.com/v1)
    #[arg(long, global = true)]
    pub notion_api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web converter
    Serve(ServeArgs),
    /// Export a single page and exit
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND_ADDR)]
    pub addr: String,

    /// Directory for generated files, served at /tmp
    #[arg(short = 'd', long, default_value = DEFAULT_SERVE_DIR)]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub conversion: ConversionArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Notion page URL (e.g., "https://www.notion.so/My-Page-<id>")
    pub notion_url: String,

    /// Output format: markdown or pdf
    #[arg(short, long, default_value = "markdown")]
    pub format: OutputMode,

    /// Output file (Markdown goes to stdout and PDFs to ./<pageId>.pdf when omitted)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub conversion: ConversionArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ConversionArgs {
    /// Heading placed above the page content
    #[arg(long, default_value = DEFAULT_DOCUMENT_TITLE)]
    pub title: String,

    /// Render child pages as links instead of fetching their content
    #[arg(long, default_value_t = false)]
    pub no_child_pages: bool,

    /// Emit child pages as separate sections instead of inline
    #[arg(long, default_value_t = false)]
    pub separate_child_pages: bool,

    /// Maximum nesting depth fetched below the page
    #[arg(long, default_value_t = NOTION_MAX_FETCH_DEPTH)]
    pub depth: u8,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// PDF theme: dark or light
    #[arg(long, default_value = "dark")]
    pub theme: Theme,

    /// HTML-to-PDF executable
    #[arg(long, default_value = DEFAULT_PDF_RENDERER)]
    pub renderer: String,

    /// Render timeout in milliseconds
    #[arg(long, default_value_t = PDF_RENDER_TIMEOUT_MS)]
    pub render_timeout_ms: u64,
}

/// What the binary was asked to do, validated.
#[derive(Debug, Clone)]
pub enum Task {
    Serve {
        addr: SocketAddr,
    },
    Export {
        notion_url: String,
        mode: OutputMode,
        output_file: Option<PathBuf>,
    },
}

/// Resolved configuration, ready to build the export action.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: ApiKey,
    pub api_base_url: Option<ValidatedUrl>,
    pub conversion: ConversionSettings,
    pub fetch_depth: u8,
    pub pdf: PdfOptions,
    /// Root of the request-scoped artifact directories.
    pub output_dir: PathBuf,
    pub task: Task,
    pub verbose: bool,
}

impl AppConfig {
    /// Resolves configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::from_parts(cli, &api_key_str)
    }

    /// Resolution with the API key already looked up.
    pub fn from_parts(cli: CommandLineInput, api_key: &str) -> Result<Self, AppError> {
        let api_key = ApiKey::new(api_key)?;
        let api_base_url = cli
            .notion_api_url
            .as_deref()
            .map(ValidatedUrl::parse)
            .transpose()?;

        let (task, output_dir, conversion, render) = match cli.command {
            Command::Serve(args) => {
                let addr = args.addr.parse::<SocketAddr>().map_err(|e| {
                    AppError::MissingConfiguration(format!(
                        "Invalid listen address '{}': {}",
                        args.addr, e
                    ))
                })?;
                (Task::Serve { addr }, args.output_dir, args.conversion, args.render)
            }
            Command::Export(args) => (
                Task::Export {
                    notion_url: args.notion_url,
                    mode: args.format,
                    output_file: args.output_file,
                },
                std::env::temp_dir().join("notion2pdf"),
                args.conversion,
                args.render,
            ),
        };

        let settings = ConversionSettings {
            parse_child_pages: !conversion.no_child_pages,
            separate_child_pages: conversion.separate_child_pages,
            document_title: conversion.title.clone(),
        };

        let pdf = PdfOptions {
            title: conversion.title,
            ..PdfOptions::default()
        }
        .with_program(render.renderer)
        .with_theme(render.theme)
        .with_timeout(Duration::from_millis(render.render_timeout_ms));

        Ok(AppConfig {
            api_key,
            api_base_url,
            conversion: settings,
            fetch_depth: conversion.depth,
            pdf,
            output_dir,
            task,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_serve_defaults() {
        let config = AppConfig::from_parts(parse(&["notion2pdf", "serve"]), KEY).unwrap();

        assert!(matches!(config.task, Task::Serve { addr } if addr.port() == 3000));
        assert_eq!(config.output_dir, PathBuf::from("public/tmp"));
        assert_eq!(config.conversion, ConversionSettings::default());
        assert_eq!(config.pdf.theme, Theme::Dark);
        assert_eq!(config.pdf.program, "wkhtmltopdf");
        assert_eq!(config.fetch_depth, NOTION_MAX_FETCH_DEPTH);
        assert!(config.api_base_url.is_none());
    }

    #[test]
    fn test_api_url_override_must_be_http() {
        let ok = AppConfig::from_parts(
            parse(&["notion2pdf", "serve", "--notion-api-url", "http://localhost:8080/v1"]),
            KEY,
        )
        .unwrap();
        assert_eq!(
            ok.api_base_url.map(|u| u.as_str().to_string()),
            Some("http://localhost:8080/v1".to_string())
        );

        let bad = AppConfig::from_parts(
            parse(&["notion2pdf", "serve", "--notion-api-url", "ftp://proxy"]),
            KEY,
        );
        assert!(matches!(bad, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_export_flags() {
        let cli = parse(&[
            "notion2pdf",
            "export",
            "https://www.notion.so/Page-abc",
            "--format",
            "pdf",
            "-o",
            "out.pdf",
            "--theme",
            "light",
            "--separate-child-pages",
            "--title",
            "Handbook",
            "-v",
        ]);
        let config = AppConfig::from_parts(cli, KEY).unwrap();

        match config.task {
            Task::Export {
                notion_url,
                mode,
                output_file,
            } => {
                assert_eq!(notion_url, "https://www.notion.so/Page-abc");
                assert_eq!(mode, OutputMode::Pdf);
                assert_eq!(output_file, Some(PathBuf::from("out.pdf")));
            }
            other => panic!("unexpected task {:?}", other),
        }
        assert!(config.verbose);
        assert!(config.conversion.separate_child_pages);
        assert_eq!(config.conversion.document_title, "Handbook");
        assert_eq!(config.pdf.title, "Handbook");
        assert_eq!(config.pdf.theme, Theme::Light);
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let result = AppConfig::from_parts(parse(&["notion2pdf", "serve"]), "sk_nope");
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let result = AppConfig::from_parts(
            parse(&["notion2pdf", "serve", "--addr", "not-an-address"]),
            KEY,
        );
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn test_unknown_format_fails_to_parse() {
        assert!(
            CommandLineInput::try_parse_from(["notion2pdf", "export", "x", "--format", "docx"])
                .is_err()
        );
    }
}
