//! Sticky header: title and counts, search bar, filter bar.

use super::layout::{pad_line_to_width, popup_rect, truncate_with_ellipsis};
use crate::data::filters::{active_filter_labels, date_range_label, format_count, format_stats};
use crate::tui::search::{no_results_message, result_count_label};
use crate::tui::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Rows of the results dropdown, excluding borders
const MAX_RESULT_ROWS: usize = 8;

pub fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let doc = &app.document;
    let palette = doc.theme.palette();
    let width = area.width as usize;
    let muted = Style::default().fg(palette.muted);

    let mut lines: Vec<Line> = Vec::new();

    // Title and counts
    let stats = app.filter_stats();
    let mut title = vec![
        Span::styled(
            " Bluefin Releases",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(format_count(&stats), Style::default().fg(palette.fg)),
    ];
    let breakdown = format_stats(&stats);
    if !breakdown.is_empty() {
        title.push(Span::raw(" "));
        title.push(Span::styled(breakdown, muted));
    }
    if app.is_loading {
        title.push(Span::styled("  reloading…", muted));
    }
    lines.push(Line::from(title));

    if let Some(input) = &doc.search_input {
        let label_style = if input.focused {
            Style::default()
                .fg(palette.focus)
                .add_modifier(Modifier::BOLD)
        } else {
            muted
        };
        let mut spans = vec![Span::styled(" Search: ", label_style)];
        if input.value.is_empty() && !input.focused {
            spans.push(Span::styled("press / to search apps", muted));
        } else {
            let value_style = if input.all_selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(palette.fg)
            };
            spans.push(Span::styled(input.value.as_str(), value_style));
            if input.focused {
                spans.push(Span::styled("▏", Style::default().fg(palette.focus)));
            }
        }
        lines.push(Line::from(spans));
    }

    if doc.filter_bar {
        let (controls, tags) = filter_lines(app);
        lines.push(controls);
        lines.push(tags);
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(palette.border),
    )));

    let lines: Vec<Line> = lines
        .into_iter()
        .map(|l| pad_line_to_width(l, width))
        .collect();
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).style(Style::default().fg(palette.fg).bg(palette.bg)),
        area,
    );
}

fn filter_lines(app: &App) -> (Line<'static>, Line<'static>) {
    let palette = app.document.theme.palette();
    let muted = Style::default().fg(palette.muted);
    let on = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);

    let Some(filters) = &app.filters else {
        return (Line::default(), Line::default());
    };
    let state = &filters.state;

    let check = |checked: bool| if checked { "☑" } else { "☐" };
    let control = |key: &str, label: String, active: bool| {
        vec![
            Span::styled(format!(" [{}] ", key), muted),
            Span::styled(label, if active { on } else { Style::default().fg(palette.fg) }),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(control(
        "v",
        format!("{} Verified", check(state.verified)),
        state.verified,
    ));
    spans.extend(control(
        "u",
        format!("{} Unverified", check(state.unverified)),
        state.unverified,
    ));
    spans.extend(control(
        "p",
        format!(
            "Type: {}",
            state.package_type.map(|t| t.label()).unwrap_or("All")
        ),
        state.package_type.is_some(),
    ));
    spans.extend(control(
        "c",
        format!(
            "Category: {}",
            truncate_with_ellipsis(state.category.as_deref().unwrap_or("All"), 16)
        ),
        state.category.is_some(),
    ));
    spans.extend(control(
        "a",
        format!("App Set: {}", state.app_set.as_deref().unwrap_or("All")),
        state.app_set.is_some(),
    ));
    spans.extend(control(
        "d",
        format!(
            "Updated: {}",
            state.days.map(date_range_label).unwrap_or_else(|| "Any time".to_string())
        ),
        state.days.is_some(),
    ));

    let labels = active_filter_labels(state);
    let tags = if labels.is_empty() {
        Line::from(Span::styled(" No filters active", muted))
    } else {
        let mut tag_spans = vec![Span::styled(" Active:", muted)];
        for label in labels {
            tag_spans.push(Span::raw(" "));
            tag_spans.push(Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(palette.bg)
                    .bg(palette.tag),
            ));
        }
        tag_spans.push(Span::styled("  [x] clear", muted));
        Line::from(tag_spans)
    };

    (Line::from(spans), tags)
}

/// Results dropdown under the search bar.
pub fn draw_search_results(f: &mut Frame, app: &App, header: Rect, viewport: Rect) {
    let Some(search) = &app.search else {
        return;
    };
    if !search.results_visible || app.document.search_input.is_none() {
        return;
    }
    let palette = app.document.theme.palette();

    let rows = search.results.len().clamp(1, MAX_RESULT_ROWS) as u16;
    // Search bar is the second header row
    let top = header.y + 2;
    let bottom = viewport.y + viewport.height;
    let height = (rows + 2).min(bottom.saturating_sub(top));
    if height < 3 {
        return;
    }
    let width = popup_rect(60, 100, 30, 3, viewport).width;
    let area = Rect {
        x: viewport.x + 1,
        y: top,
        width: width.min(viewport.width.saturating_sub(2)),
        height,
    };

    let lines: Vec<Line> = if search.results.is_empty() {
        vec![Line::from(Span::styled(
            no_results_message(&search.last_query),
            Style::default().fg(palette.muted),
        ))]
    } else {
        // Keep the selection in view
        let visible = (height - 2) as usize;
        let start = search.selected.saturating_sub(visible.saturating_sub(1));
        search
            .results
            .iter()
            .enumerate()
            .skip(start)
            .take(visible)
            .map(|(i, r)| {
                let style = if i == search.selected {
                    Style::default()
                        .fg(palette.bg)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg)
                };
                Line::from(Span::styled(format!(" {} ", r.app_name), style))
            })
            .collect()
    };

    let block = Block::default()
        .title(format!(" {} ", result_count_label(search.results.len())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(palette.fg).bg(palette.bg)),
        area,
    );
}
