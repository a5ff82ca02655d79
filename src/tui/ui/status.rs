//! Status bar and help popup rendering.

use super::layout::{fit_lines_to_area, popup_rect};
use crate::tui::keybindings::{
    current_mode, generate_footer_hints, generate_keyboard_shortcuts, Mode, HELP_TITLE,
};
use crate::tui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the status bar at the bottom of the screen.
///
/// Priority: error, then key hints while typing in search, then the
/// live-region announcement, then key hints.
pub fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.document.theme.palette();
    let mode = current_mode(app);
    let announcement = match mode {
        Mode::Search => None,
        Mode::Normal => app.document.announcement(),
    };

    let status = if let Some(err) = &app.error_message {
        Span::styled(format!(" {}", err), Style::default().fg(palette.error))
    } else if let Some(text) = announcement {
        Span::styled(
            format!(" {}", text),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        let hints = generate_footer_hints(mode);
        let text = if area.width >= 80 {
            hints
        } else if area.width >= 30 {
            "  ?: help | q: quit"
        } else {
            " ? help "
        };
        Span::styled(text, Style::default().fg(palette.muted))
    };

    let paragraph = Paragraph::new(Line::from(status));
    f.render_widget(paragraph, area);
}

/// Draw the help popup.
pub fn draw_help_popup(f: &mut Frame, app: &App) {
    let palette = app.document.theme.palette();
    let area = popup_rect(60, 80, 44, 12, f.area());

    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = generate_keyboard_shortcuts()
        .into_iter()
        .map(Line::from)
        .collect();
    lines.push(Line::from(Span::styled(
        "  Press Esc to close",
        Style::default().fg(palette.muted),
    )));

    let block = Block::default()
        .title(format!(" {} ", HELP_TITLE))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    let lines = fit_lines_to_area(lines, inner, 1);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(palette.fg).bg(palette.bg));

    f.render_widget(paragraph, area);
}
