mod app;
pub mod keybindings;
mod message;
pub mod search;
pub mod ui;

use crate::config::{self, Config};
use crate::data::Catalog;
use crate::theme::{initial_theme, toggle_handler, ThemeStore};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub use app::{App, FilterControls, ReloadResult};
pub use message::Message;

/// Frame interval; also paces the smooth-scroll animation
const TICK_RATE: Duration = Duration::from_millis(50);

pub async fn run(config: Config, catalog: Catalog, data_path: PathBuf) -> Result<()> {
    // Check if stdout is a terminal
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("bluefin-releases requires an interactive terminal");
    }

    let store = ThemeStore::new(config::theme_path()?);
    let theme = initial_theme(store.load(), config.ui.theme);
    let watch = config.data.watch;

    let mut app = App::with_handlers(
        config,
        catalog,
        Box::new(crate::nav::SystemOpener),
        Some(toggle_handler(store)),
    );
    app.document.apply_theme(theme);
    app.attach_data_path(data_path, watch);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    // Last row is the status bar
    app.resize(size.height.saturating_sub(1));

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Resize(_width, height) => {
                    app.resize(height.saturating_sub(1));
                }
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key)? {
                        return Ok(()); // Quit requested
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
}
