use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    BackendAddress, HttpUploadBackend, SelectedVideo, SubmissionState, UploadBackend,
    UploadController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod view;

use config::load_settings;

/// Upload a video for profanity beeping and report the result.
#[derive(Parser, Debug)]
#[command(name = "beep-upload", version)]
struct Args {
    /// Video file to submit.
    file: PathBuf,
    /// Processing backend origin, e.g. http://localhost:5000.
    #[arg(long)]
    backend_url: Option<String>,
    #[arg(long, default_value = "client.toml")]
    config: PathBuf,
    /// Save the processed video here on success.
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }

    let address = BackendAddress::parse(&settings.backend_url)
        .with_context(|| format!("invalid backend url '{}'", settings.backend_url))?;
    let backend = HttpUploadBackend::new(address.clone(), settings.request_timeout())
        .context("failed to initialize upload transport")?;
    let mut controller = UploadController::new(address);

    let video = SelectedVideo::from_path(&args.file)
        .await
        .with_context(|| format!("failed to load '{}'", args.file.display()))?;
    controller.select_file(video);
    println!("{}", view::render(&controller.view()));

    if let Some(ticket) = controller.begin_submit() {
        println!("{}", view::render(&controller.view()));
        let outcome = backend.upload(ticket.video()).await;
        controller.complete_submit(ticket, outcome);
    }
    println!("{}", view::render(&controller.view()));

    match controller.state() {
        SubmissionState::Success { result_url } => {
            if let Some(output) = &args.output {
                let written = backend
                    .download(result_url, output)
                    .await
                    .with_context(|| format!("failed to download {result_url}"))?;
                info!(size_bytes = written, "saved processed video");
                println!("Saved to {}", output.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
