// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use crate::app_log;
use crate::core::{ConfigManager, ConfigOverrides, ServiceClient};
use crate::render::{html, Renderer, Tab};
use crate::session::{Session, SubmitOutcome};
use crate::types::{DownloadFormat, ResultKind};
use crate::upload::{UploadValidator, UploadedFile};
use crate::utils;

#[derive(Parser)]
#[command(name = "ats-client")]
#[command(about = "Analyze a resume against a job description with the ATS optimization service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Give up on a pending analysis after this many seconds (default: wait)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Configuration file with `local` / `production` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a resume and show the score, breakdown and recommendations
    Analyze(AnalyzeArgs),
    /// Check a resume file against the upload rules without sending it
    Validate { resume: PathBuf },
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Resume file (.pdf, .docx or .txt, at most 5MB)
    #[arg(long)]
    pub resume: PathBuf,

    /// Target job title
    #[arg(long)]
    pub title: String,

    /// Job description text
    #[arg(long, conflicts_with = "description_file")]
    pub description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub description_file: Option<PathBuf>,

    /// Resume pane to print after the report
    #[arg(long, default_value = "cleaned", value_parser = parse_tab)]
    pub tab: Tab,

    /// Print the final score without the counter animation
    #[arg(long)]
    pub no_animate: bool,

    /// Also write the results section as HTML
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Save a result after analysis, as TYPE=FORMAT (e.g. final=pdf); repeatable
    #[arg(long = "download", value_parser = parse_download_spec)]
    pub downloads: Vec<(ResultKind, DownloadFormat)>,

    /// Directory for downloaded files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

fn parse_tab(s: &str) -> Result<Tab, String> {
    Tab::from_id(&s.to_lowercase())
        .ok_or_else(|| format!("unknown tab '{}': use cleaned, optimized, final or evaluation", s))
}

pub fn parse_download_spec(s: &str) -> Result<(ResultKind, DownloadFormat), String> {
    let (kind, format) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=FORMAT, got '{}'", s))?;
    let kind = kind.trim().parse::<ResultKind>().map_err(|e| e.to_string())?;
    let format = DownloadFormat::from_str(format.trim(), true)
        .map_err(|_| format!("unknown format '{}': use txt, docx or pdf", format.trim()))?;
    Ok((kind, format))
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let Cli {
        command,
        service_url,
        timeout,
        config,
        ..
    } = cli;

    match command {
        Command::Validate { resume } => {
            let file = UploadedFile::from_path(&resume).await?;
            match UploadValidator::validate(&file) {
                Ok(()) => {
                    println!("✓ {} ({}) can be uploaded", file.name, file.display_size());
                    Ok(())
                }
                Err(e) => anyhow::bail!("{} [{}]", e.message, e.error_type.code()),
            }
        }
        Command::Analyze(args) => {
            let config = ConfigManager::load(ConfigOverrides {
                service_url,
                request_timeout_secs: timeout,
                output_path: args.output_dir.clone(),
                config_path: config,
            })?;
            run_analyze(args, config).await
        }
    }
}

async fn run_analyze(args: AnalyzeArgs, config: ConfigManager) -> Result<()> {
    let description = match (&args.description, &args.description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description: {}", path.display()))?,
        (None, None) => anyhow::bail!("Provide --description or --description-file"),
    };

    let client = ServiceClient::new(config.service.base_url.clone(), config.request_timeout())?;
    let mut session = Session::new();
    app_log!(info, "Session {} using {}", session.id(), client.base_url());

    let file = UploadedFile::from_path(&args.resume).await?;
    session.select_file(file)?;
    session.set_title(args.title.as_str());
    session.set_description(description);

    if !session.form_ready() {
        anyhow::bail!("Job title and description are required");
    }

    println!("⏳ Analyzing {} ...", args.resume.display());
    match session.submit(&client).await? {
        SubmitOutcome::Rendered => {}
        SubmitOutcome::ServerError(message) => anyhow::bail!("Server error: {}", message),
        SubmitOutcome::Failed(message) => anyhow::bail!("An error occurred: {}", message),
    }

    if args.no_animate {
        session.settle_reveal();
    } else {
        let mut stdout = std::io::stdout();
        session
            .play_reveal(|view| {
                let _ = write!(stdout, "\rScore: {:>3}", view.score.readout);
                let _ = stdout.flush();
            })
            .await;
        println!();
    }

    session.select_tab(args.tab);
    if let Some(toast) = session.toasts().current() {
        println!("✓ {}", toast.message);
    }
    println!("{}", Renderer::render_text(session.view()));

    if let Some(path) = &args.html {
        utils::write_bytes_safe(path, html::results_html(session.view()).as_bytes()).await?;
        println!("📄 Results written to {}", path.display());
    }

    for (kind, format) in &args.downloads {
        let request = session.download_request(client.base_url(), *format, *kind)?;
        let bytes = client.download(&request).await?;
        let path = config.output_path.join(&request.file_name);
        utils::write_bytes_safe(&path, &bytes).await?;
        println!("⬇️  Saved {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_download_spec() {
        assert_eq!(
            parse_download_spec("final=pdf").unwrap(),
            (ResultKind::Final, DownloadFormat::Pdf)
        );
        assert_eq!(
            parse_download_spec("Optimized=DOCX").unwrap(),
            (ResultKind::Optimized, DownloadFormat::Docx)
        );
        assert!(parse_download_spec("final").is_err());
        assert!(parse_download_spec("final=odt").is_err());
    }

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::try_parse_from([
            "ats-client",
            "analyze",
            "--resume",
            "cv.pdf",
            "--title",
            "Engineer",
            "--description",
            "Build things",
            "--download",
            "final=txt",
            "--tab",
            "evaluation",
            "--service-url",
            "http://localhost:5000",
        ])
        .unwrap();

        assert_eq!(cli.service_url.as_deref(), Some("http://localhost:5000"));
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.tab, Tab::Evaluation);
                assert_eq!(args.downloads, vec![(ResultKind::Final, DownloadFormat::Txt)]);
                assert!(!args.no_animate);
            }
            Command::Validate { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_description_sources_conflict() {
        let result = Cli::try_parse_from([
            "ats-client",
            "analyze",
            "--resume",
            "cv.pdf",
            "--title",
            "Engineer",
            "--description",
            "x",
            "--description-file",
            "jd.txt",
        ]);
        assert!(result.is_err());
    }
}
