//! One-shot hardware commands: capture a frame, speak a text

use std::path::Path;
use std::process::ExitCode;

use tokio::fs;

use crate::application::ports::{Announcer, Camera, PlaybackOutcome};
use crate::domain::config::AppConfig;
use crate::infrastructure::SystemClock;

use super::app::{build_announcer, open_camera, EXIT_ERROR, EXIT_SUCCESS};
use super::presenter::Presenter;

/// Capture one frame and write it to `output`
pub async fn handle_capture(config: &AppConfig, output: &Path) -> ExitCode {
    let mut presenter = Presenter::new();

    let camera = match open_camera(config, SystemClock::new()) {
        Ok(camera) => camera,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.start_spinner("Capturing image...");
    let frame = match camera.capture().await {
        Ok(frame) => frame,
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = fs::write(output, frame.data()).await {
        presenter.spinner_fail(&format!("Failed to write {}: {}", output.display(), e));
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.spinner_success(&format!(
        "Captured {} to {}",
        frame.human_readable_size(),
        output.display()
    ));
    ExitCode::from(EXIT_SUCCESS)
}

/// Fetch and play one announcement
pub async fn handle_announce(config: &AppConfig, text: &str) -> ExitCode {
    let mut presenter = Presenter::new();
    let announcer = build_announcer(config, SystemClock::new());

    presenter.start_spinner("Speaking...");
    match announcer.announce(text).await {
        Ok(PlaybackOutcome::Finished) => {
            presenter.spinner_success("Announcement played");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(PlaybackOutcome::TimedOut) => {
            presenter.spinner_success(&format!(
                "Announcement cut off after {}",
                announcer.deadline()
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
