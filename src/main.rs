mod config;
mod controller;
mod logging;
mod media;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, Mutex};

use config::Settings;
use controller::AppController;
use media::RodioMedia;
use model::{AppModel, Library};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Lossless Player Starting ===");

    let settings = Settings::from_env();
    tracing::info!(api_url = %settings.api_url, "Settings loaded");

    let library = match &settings.library_path {
        Some(path) => Library::from_path(path)?,
        None => Library::embedded()?,
    };

    let (media_tx, media_rx) = mpsc::unbounded_channel();
    let media = RodioMedia::new(media_tx).context("Failed to open audio output")?;

    let mut app_model = AppModel::new();
    app_model.ui_state.user = settings.user.clone();
    let model = Arc::new(Mutex::new(app_model));

    let controller = AppController::new(model.clone(), Box::new(media), settings);
    controller.start_media_event_listener(media_rx);
    controller.start_time_poller();
    controller.load_library(library).await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop the background tasks if the loop exited on an error
    model.lock().await.set_should_quit(true);

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Lossless Player shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        let (playback, ui_state, content_view, drawer_open, should_quit) = {
            let mut model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors();

            (
                model_guard.get_playback_info(),
                model_guard.get_ui_state(),
                model_guard.content_view(),
                model_guard.library().drawer_open,
                model_guard.should_quit(),
            )
        };

        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &content_view, drawer_open);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }
    }

    Ok(())
}
