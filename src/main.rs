use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use campaign_companion::config::AppConfig;
use campaign_companion::core::api::ApiClient;
use campaign_companion::core::logging;
use campaign_companion::tui::app::AppState;
use campaign_companion::tui::services::Services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    let _log_guard = logging::init(&config.data_dir());
    log::info!(
        "{} v{} starting (service: {})",
        campaign_companion::NAME,
        campaign_companion::VERSION,
        config.api.base_url
    );

    let api = Arc::new(ApiClient::new(&config.api)?);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(api, event_tx.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let mut app = AppState::new(event_rx, event_tx, services);
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms);
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop error: {e}");
        return Err(e.into());
    }

    Ok(())
}
