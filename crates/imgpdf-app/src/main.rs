// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imgpdf — images in, one PDF out.
//
// Entry point. Initialises logging, parses the command line, builds the app
// services and runs one workflow.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use imgpdf_bridge::{FileDialogs, PresetDialogs, platform_dialogs};
use imgpdf_core::error::Result;
use imgpdf_core::human_errors::{ErrorCategory, humanize_error};
use imgpdf_core::types::{MoveIntent, format_file_size};

use imgpdf_app::AppServices;
use imgpdf_app::cli::{self, Cli, Commands};
use imgpdf_app::services::export::ExportOutcome;
use imgpdf_app::services::notify::ConsoleNotifier;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("imgpdf starting");

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            let human = humanize_error(&e);
            eprintln!("{} {}", human.message, human.suggestion);
            match human.category {
                ErrorCategory::System => tracing::error!("{e}"),
                ErrorCategory::User | ErrorCategory::Validation => tracing::debug!("{e}"),
            }
            ExitCode::from(cli::exit_status(human.category))
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::Convert {
            images,
            output,
            pick,
            moves,
        } => {
            let app = AppServices::init(data_dir, platform_dialogs(), Arc::new(ConsoleNotifier));
            convert(&app, images, output, pick, &moves).await
        }

        Commands::Inspect { images } => {
            let app = headless(data_dir);
            app.add_paths(images).await;
            app.store().read(|state| {
                for (position, image) in state.images.iter().enumerate() {
                    match &image.info {
                        Some(info) => println!(
                            "{:>3}  {}  {}x{}  {}  {}",
                            position + 1,
                            image.name,
                            info.width,
                            info.height,
                            info.format,
                            format_file_size(info.size_bytes),
                        ),
                        None => println!("{:>3}  {}  (no metadata)", position + 1, image.name),
                    }
                }
            });
            Ok(ExitCode::SUCCESS)
        }

        Commands::Settings {
            page_size,
            orientation,
            fit,
            width,
            height,
            reset,
        } => {
            let app = headless(data_dir);
            if reset {
                app.store().reset_settings();
            }
            let patch = cli::settings_patch(page_size, orientation, fit, width, height);
            if !patch.is_empty() {
                app.store().update_settings(patch);
            }
            let settings = app.store().read(|s| s.settings.clone());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if let Err(e) = settings.validate() {
                eprintln!("{}", humanize_error(&e).suggestion);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Services for commands that never open a dialog.
fn headless(data_dir: Option<&std::path::Path>) -> AppServices {
    let dialogs: Arc<dyn FileDialogs> = Arc::new(PresetDialogs::new());
    AppServices::init(data_dir, dialogs, Arc::new(ConsoleNotifier))
}

async fn convert(
    app: &AppServices,
    images: Vec<PathBuf>,
    output: Option<PathBuf>,
    pick: bool,
    moves: &[(usize, usize)],
) -> Result<ExitCode> {
    if pick {
        app.pick_images().await;
    }
    app.add_paths(images).await;

    for &(from, to) in moves {
        let ids = app.store().read(|s| {
            let id_at = |position: usize| s.images.get(position - 1).map(|i| i.id);
            (id_at(from), id_at(to))
        });
        match ids {
            (Some(source), target @ Some(_)) => {
                app.move_image(MoveIntent { source, target });
            }
            _ => tracing::warn!(from, to, "move ignored: position out of range"),
        }
    }

    let outcome = match output {
        Some(path) => app.export_to(path).await,
        None => app.export().await,
    };

    Ok(match outcome {
        ExportOutcome::Written(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        ExportOutcome::Cancelled => ExitCode::SUCCESS,
        ExportOutcome::Failed(_) | ExportOutcome::Refused(_) => ExitCode::FAILURE,
    })
}
