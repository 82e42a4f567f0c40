mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;
use url::Url;

use config::Config;
use controller::AppController;
use model::{AppModel, LibraryClient, NavEntry};
use view::AppView;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: logging setup failed: {e}");
    }

    let config = Config::load()?;
    let base_url = Url::parse(&config.server_url)
        .with_context(|| format!("Invalid server URL: {}", config.server_url))?;
    let client = LibraryClient::new(
        base_url,
        Duration::from_secs(config.request_timeout_secs),
        config.search_limit,
    )?;

    let mut app_model = AppModel::new();
    app_model.set_client(client);

    tracing::info!(server = %config.server_url, "Melodeon starting");

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    // Back/forward moves deliver the entry navigated to as a pop event; feed
    // those through a channel to a task that reconstructs the matching view.
    let (pop_tx, mut pop_rx) = tokio::sync::mpsc::unbounded_channel();
    let pop_subscription = {
        let model_guard = model.lock().await;
        model_guard
            .navigation
            .subscribe(move |entry: &NavEntry| {
                let _ = pop_tx.send(entry.clone());
            })
            .await
    };

    let controller_for_pops = controller.clone();
    tokio::spawn(async move {
        while let Some(entry) = pop_rx.recv().await {
            controller_for_pops.restore_entry(entry).await;
        }
    });

    let mut terminal = setup_terminal()?;
    let res = run_app(&mut terminal, model.clone(), controller).await;

    // Drop the pop handler before tearing down.
    model.lock().await.navigation.unsubscribe(pop_subscription).await;

    restore_terminal(&mut terminal)?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Melodeon shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Snapshot the state once per frame so rendering never holds locks.
        let (ui_state, content_state, location, should_quit) = {
            let model_guard = model.lock().await;
            model_guard.auto_clear_old_errors().await;
            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.navigation.location().await,
                model_guard.should_quit().await,
            )
        };

        if should_quit {
            return Ok(());
        }

        terminal.draw(|f| AppView::render(f, &ui_state, &content_state, &location))?;

        // Short poll so spawned search results show up without a keypress.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Failures surface through the model's error overlay.
                let _ = controller.handle_key_event(key).await;
            }
        }
    }
}
