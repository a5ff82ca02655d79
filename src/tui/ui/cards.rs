//! Release card rendering.
//!
//! Cards live on the document canvas at absolute rows; the viewport shows
//! rows `scroll..scroll + height`, minus the rows the sticky header covers.
//! A card cut off at either edge is rendered with `Paragraph::scroll`.

use super::layout::{bottom_border, framed_line, top_border};
use crate::data::filters::parse_date;
use crate::nav::document::MAX_RELEASE_LINES;
use crate::nav::links::first_allowed_link;
use crate::nav::Card;
use crate::theme::Palette;
use crate::tui::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw_cards(f: &mut Frame, app: &App, area: Rect) {
    let doc = &app.document;
    let palette = doc.theme.palette();
    let scroll = doc.scroll_y();
    let header = doc.header_height;
    let view_height = i64::from(area.height);
    let width = area.width as usize;

    let mut any_visible = false;
    for card in doc.cards.iter().filter(|c| c.visible) {
        any_visible = true;

        let y0 = card.top - scroll;
        if y0 >= view_height {
            break;
        }
        let y1 = y0 + card.height;
        let lo = y0.max(header);
        let hi = y1.min(view_height);
        if hi <= lo {
            continue;
        }

        let rect = Rect {
            x: area.x,
            y: area.y + lo as u16,
            width: area.width,
            height: (hi - lo) as u16,
        };
        let skip = (lo - y0) as u16;
        let paragraph = Paragraph::new(card_lines(card, width, &palette)).scroll((skip, 0));
        f.render_widget(paragraph, rect);
    }

    if !any_visible {
        let row = header + 1 - scroll;
        if row >= 0 && row < view_height {
            let rect = Rect {
                x: area.x,
                y: area.y + row as u16,
                width: area.width,
                height: 1,
            };
            let text = if doc.cards.is_empty() {
                "No packages in the catalog"
            } else {
                "No packages match the current filters"
            };
            f.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(palette.muted)))
                    .alignment(Alignment::Center),
                rect,
            );
        }
    }
}

/// Date as `YYYY-MM-DD` when parseable, else as given
fn short_date(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// The card's rows, exactly `card.natural_height()` of them.
fn card_lines<'a>(card: &'a Card, width: usize, palette: &Palette) -> Vec<Line<'a>> {
    let app = &card.app;
    let border = if card.focused {
        Style::default()
            .fg(palette.focus)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };
    let muted = Style::default().fg(palette.muted);

    let kind = app.package_type.map(|t| t.label()).unwrap_or("Package");
    let mut lines = vec![top_border(
        vec![Span::styled(kind, Style::default().fg(palette.tag))],
        width,
        border,
    )];

    // Title row
    let mut title = Vec::new();
    if card.focused {
        title.push(Span::styled("▶ ", Style::default().fg(palette.focus)));
    }
    let name = card.title.as_deref().unwrap_or(app.name.as_str());
    title.push(Span::styled(
        name,
        Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    ));
    if let Some(version) = &card.subtitle {
        title.push(Span::raw("  "));
        title.push(Span::styled(version.as_str(), Style::default().fg(palette.accent)));
    }
    if app.is_verified {
        title.push(Span::styled("  ✓ verified", Style::default().fg(palette.verified)));
    }
    lines.push(framed_line(Line::from(title), width, border));

    lines.push(framed_line(
        Line::from(Span::raw(app.summary.as_str())),
        width,
        border,
    ));

    // Meta row
    let mut meta: Vec<Span> = Vec::new();
    if let Some(dev) = &app.developer_name {
        meta.push(Span::styled(dev.as_str(), muted));
    }
    if let Some(updated) = &app.updated_at {
        if !meta.is_empty() {
            meta.push(Span::styled(" · ", muted));
        }
        meta.push(Span::styled(format!("Updated {}", short_date(updated)), muted));
    }
    if let Some(set) = &app.app_set {
        if !meta.is_empty() {
            meta.push(Span::styled(" · ", muted));
        }
        meta.push(Span::styled(set.as_str(), Style::default().fg(palette.tag)));
    }
    for category in &app.categories {
        meta.push(Span::raw(" "));
        meta.push(Span::styled(
            format!("[{}]", category),
            Style::default().fg(palette.tag),
        ));
    }
    lines.push(framed_line(Line::from(meta), width, border));

    if !card.links.is_empty() {
        let link = first_allowed_link(&card.links).unwrap_or(card.links[0].as_str());
        lines.push(framed_line(
            Line::from(vec![
                Span::styled("↗ ", muted),
                Span::styled(link, Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED)),
            ]),
            width,
            border,
        ));
    }

    for release in app.releases.iter().take(MAX_RELEASE_LINES) {
        let mut spans = vec![
            Span::styled("• ", muted),
            Span::styled(release.version.as_str(), Style::default().fg(palette.accent)),
        ];
        if let Some(date) = &release.date {
            spans.push(Span::styled(format!("  {}", short_date(date)), muted));
        }
        if !release.title.is_empty() {
            spans.push(Span::raw(format!("  {}", release.title)));
        }
        lines.push(framed_line(Line::from(spans), width, border));
    }

    lines.push(bottom_border(width, border));
    lines
}
