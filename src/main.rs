use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use std::{error::Error, io};

mod app;

use app::config::Config;
use app::storage::SqliteStorage;
use app::todo_store::TodoStore;

// Start the app.
// Terminal setup and teardown follow the ratatui list example.
pub fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env();
    app::logging::init_logging(&config.log_file)?;
    info!("Starting with {:?}", config);

    // Open the key-value store before touching the terminal so errors print normally
    let storage = SqliteStorage::open(&config.db_path)?;
    let store = TodoStore::load(storage)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app::ui::run_app(&mut terminal, app::ui::App::new(store), config.tick_rate);

    // Restore previous terminal state after exit
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("UI loop failed: {err}");
        println!("{err:?}");
    }

    info!("Exiting");
    Ok(())
}
