//! TUI rendering module.
//!
//! - `layout` - text fitting, card borders and popup geometry
//! - `header` - sticky header (title, search bar, filter bar, counts)
//! - `cards` - the scrolled card list
//! - `status` - status bar and help popup

pub mod layout;
mod cards;
mod header;
mod status;

// Re-export the main draw function
pub use self::draw::draw;

mod draw {

    use super::cards::draw_cards;
    use super::header::{draw_header, draw_search_results};
    use super::status::{draw_help_popup, draw_status_bar};
    use crate::tui::App;
    use ratatui::{
        layout::{Constraint, Direction, Layout, Rect},
        style::Style,
        widgets::Block,
        Frame,
    };

    /// Main draw function - renders the entire TUI.
    pub fn draw(f: &mut Frame, app: &App) {
        let palette = app.document.theme.palette();
        f.render_widget(
            Block::default().style(Style::default().fg(palette.fg).bg(palette.bg)),
            f.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Document viewport
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        let viewport = chunks[0];
        let header_rows = u16::try_from(app.document.header_height)
            .unwrap_or(0)
            .min(viewport.height);
        let header_area = Rect {
            height: header_rows,
            ..viewport
        };

        // Cards first; the sticky header is drawn over them
        draw_cards(f, app, viewport);
        draw_header(f, app, header_area);
        draw_status_bar(f, app, chunks[1]);

        // Overlays
        draw_search_results(f, app, header_area, viewport);

        if app.document.help_visible() {
            draw_help_popup(f, app);
        }
    }
}
