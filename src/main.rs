//! Symptom survey TUI - Terminal User Interface for a multi-locale survey
//!
//! A Ratatui-based form that shows questions from a locale-keyed catalog,
//! validates the answers and posts them to the survey API.

mod app;
mod catalog;
mod config;
mod error;
mod i18n;
mod state;
mod submission;
mod ui;

use anyhow::Result;
use app::App;
use config::{SurveyConfig, FALLBACK_LOCALE};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use error::ConfigError;
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{AppState, LocaleController, QuestionSelector};
use std::fs::{self, File};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use submission::HttpSubmitClient;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Event poll interval; outcomes of background submissions are picked up
/// at this rate too
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "symptom_survey=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_writer()),
        )
        .init();

    // Configuration problems are reported before the terminal is touched
    let (state, client) = match build_session() {
        Ok(parts) => parts,
        Err(err) => {
            let err = anyhow::Error::new(err);
            tracing::error!("Startup failed: {err:#}");
            eprintln!("Error: {err:#}");
            std::process::exit(2);
        }
    };
    let title = ui::window_title(state.locale.active());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(state, client);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to a file so they never draw over the TUI; stderr is the
/// fallback when no data directory is available.
fn log_writer() -> BoxMakeWriter {
    let file = config::project_dirs().and_then(|dirs| {
        let dir = dirs.data_local_dir();
        fs::create_dir_all(dir).ok()?;
        File::options()
            .create(true)
            .append(true)
            .open(dir.join("survey.log"))
            .ok()
    });
    match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(io::stderr),
    }
}

/// Load configuration and catalog and assemble the first session
fn build_session() -> Result<(AppState, Arc<HttpSubmitClient>), ConfigError> {
    let settings = SurveyConfig::load()?.with_env()?.resolve()?;
    let catalog = settings.load_catalog()?;
    tracing::debug!(
        "Catalog locales: {:?}",
        catalog.locales().collect::<Vec<_>>()
    );
    tracing::info!(
        "Starting survey against {} in {} mode",
        settings.api_base_url,
        settings.selection_mode
    );

    let locale = LocaleController::initial(settings.default_locale, FALLBACK_LOCALE);
    let selector = QuestionSelector::new(settings.selection_mode, FALLBACK_LOCALE);
    let state = AppState::new(Arc::new(catalog), locale, selector)?;
    let client = HttpSubmitClient::new(&settings.api_base_url);

    Ok((state, Arc::new(client)))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }
                app.handle_key(key)?;
            }
        }

        app.poll_submission()?;

        if let Some(locale) = app.take_locale_change() {
            execute!(io::stdout(), SetTitle(ui::window_title(locale)))?;
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }

        // Let spawned submissions make progress between polls
        tokio::task::yield_now().await;
    }
}
