//! Layout calculations and text utilities for the TUI.

use once_cell::sync::Lazy;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
};
use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pre-computed padding strings to avoid repeated " ".repeat(n) allocations.
static PADDING: Lazy<Vec<String>> = Lazy::new(|| (0..=200).map(|n| " ".repeat(n)).collect());

/// Get a padding string of the given width. Widths past the table are allocated.
#[inline]
fn get_padding(width: usize) -> Cow<'static, str> {
    match PADDING.get(width) {
        Some(pad) => Cow::Borrowed(pad.as_str()),
        None => Cow::Owned(" ".repeat(width)),
    }
}

/// Card border glyphs
pub const BORDER_TOP_LEFT: &str = "╭";
pub const BORDER_TOP_RIGHT: &str = "╮";
pub const BORDER_BOTTOM_LEFT: &str = "╰";
pub const BORDER_BOTTOM_RIGHT: &str = "╯";
pub const BORDER_H: &str = "─";
pub const BORDER_V: &str = "│";

/// Calculate the display width of text (accounting for Unicode).
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate text to a maximum display width.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out
}

/// Truncate text with an ellipsis if it exceeds max width.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let truncated = truncate_to_width(text, max_width.saturating_sub(1));
    format!("{truncated}…")
}

/// Pad text to a specific width with given alignment.
pub fn pad_to_width(text: &str, width: usize, alignment: Alignment) -> String {
    let mut trimmed = truncate_to_width(text, width);
    let current = display_width(&trimmed);
    let pad = width.saturating_sub(current);
    match alignment {
        Alignment::Left => {
            trimmed.push_str(&get_padding(pad));
            trimmed
        }
        Alignment::Right => format!("{}{}", get_padding(pad), trimmed),
        Alignment::Center => {
            let left = pad / 2;
            let right = pad.saturating_sub(left);
            format!("{}{}{}", get_padding(left), trimmed, get_padding(right))
        }
    }
}

/// Fit a Line to a maximum width by truncating spans.
pub fn fit_line_to_width<'a>(line: Line<'a>, max_width: usize) -> Line<'a> {
    if max_width == 0 {
        return Line::from(Vec::<Span>::new());
    }

    let Line {
        spans,
        alignment,
        style,
    } = line;
    let mut out: Vec<Span<'a>> = Vec::new();
    let mut used = 0usize;

    for span in spans {
        if used >= max_width {
            break;
        }
        let content = span.content.as_ref();
        let span_width = display_width(content);
        if used + span_width <= max_width {
            used += span_width;
            out.push(span);
        } else {
            let remaining = max_width.saturating_sub(used);
            let truncated = truncate_to_width(content, remaining);
            if !truncated.is_empty() {
                out.push(Span::styled(truncated, span.style));
            }
            break;
        }
    }

    Line {
        spans: out,
        alignment,
        style,
    }
}

/// Calculate the display width of a Line.
pub fn line_display_width(line: &Line<'_>) -> usize {
    line.spans
        .iter()
        .map(|span| display_width(span.content.as_ref()))
        .sum()
}

/// Pad a Line to a specific width by adding trailing spaces.
pub fn pad_line_to_width<'a>(mut line: Line<'a>, width: usize) -> Line<'a> {
    let current = line_display_width(&line);
    if current < width {
        line.spans.push(Span::raw(get_padding(width - current)));
    }
    line
}

/// Wrap a content line in vertical borders: `│ content │`, fitted to `width`.
pub fn framed_line<'a>(content: Line<'a>, width: usize, border: Style) -> Line<'a> {
    let inner = width.saturating_sub(4);
    let body = pad_line_to_width(fit_line_to_width(content, inner), inner);

    let mut spans = vec![Span::styled(BORDER_V, border), Span::raw(" ")];
    spans.extend(body.spans);
    spans.push(Span::raw(" "));
    spans.push(Span::styled(BORDER_V, border));
    Line::from(spans)
}

/// Top border with an embedded title: `╭─ title ─────╮`.
pub fn top_border<'a>(title: Vec<Span<'a>>, width: usize, border: Style) -> Line<'a> {
    if width < 2 {
        return Line::from(Span::styled(BORDER_H.repeat(width), border));
    }
    let inner = width - 2;
    let mut spans = vec![Span::styled(BORDER_TOP_LEFT, border)];

    let title = fit_line_to_width(Line::from(title), inner.saturating_sub(3));
    let title_width = line_display_width(&title);
    if title_width > 0 && inner >= 3 {
        spans.push(Span::styled(format!("{} ", BORDER_H), border));
        spans.extend(title.spans);
        spans.push(Span::raw(" "));
        let rest = inner.saturating_sub(title_width + 3);
        spans.push(Span::styled(BORDER_H.repeat(rest), border));
    } else {
        spans.push(Span::styled(BORDER_H.repeat(inner), border));
    }

    spans.push(Span::styled(BORDER_TOP_RIGHT, border));
    Line::from(spans)
}

pub fn bottom_border(width: usize, border: Style) -> Line<'static> {
    if width < 2 {
        return Line::from(Span::styled(BORDER_H.repeat(width), border));
    }
    Line::from(Span::styled(
        format!(
            "{}{}{}",
            BORDER_BOTTOM_LEFT,
            BORDER_H.repeat(width - 2),
            BORDER_BOTTOM_RIGHT
        ),
        border,
    ))
}

/// Create an ellipsis line centered in the given width.
pub fn ellipsis_line(width: u16) -> Line<'static> {
    let text = pad_to_width("…", width as usize, Alignment::Center);
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

/// Fit lines to an area, adding ellipsis if content is truncated.
pub fn fit_lines_to_area<'a>(
    lines: Vec<Line<'a>>,
    inner: Rect,
    keep_bottom: usize,
) -> Vec<Line<'a>> {
    let width = inner.width as usize;
    let height = inner.height as usize;
    if height == 0 || width == 0 {
        return Vec::new();
    }

    let mut fitted: Vec<Line<'a>> = lines
        .into_iter()
        .map(|line| fit_line_to_width(line, width))
        .collect();

    if fitted.len() <= height {
        return fitted;
    }

    let keep_bottom = keep_bottom.min(height);
    let top_space = height.saturating_sub(keep_bottom);
    let mut out: Vec<Line<'a>> = Vec::with_capacity(height);

    if top_space > 0 {
        let top_take = top_space.saturating_sub(1);
        if top_take > 0 {
            out.extend(fitted.drain(..top_take));
        }
        out.push(ellipsis_line(inner.width));
    }

    if keep_bottom > 0 {
        let start = fitted.len().saturating_sub(keep_bottom);
        out.extend(fitted.drain(start..));
    }

    if out.is_empty() {
        out.push(ellipsis_line(inner.width));
    }

    out
}

/// Calculate a centered popup rectangle within a container.
pub fn popup_rect(
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
    r: Rect,
) -> Rect {
    let max_width = r.width.saturating_sub(2).max(1);
    let max_height = r.height.saturating_sub(2).max(1);

    let target_width = (r.width.saturating_mul(percent_x) / 100).max(min_width);
    let target_height = (r.height.saturating_mul(percent_y) / 100).max(min_height);

    let width = target_width.min(max_width);
    let height = target_height.min(max_height);

    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Firefox", 10), "Firefox");
        assert_eq!(truncate_with_ellipsis("Firefox", 4), "Fir…");
    }

    #[test]
    fn test_framed_line_has_exact_width() {
        let line = framed_line(Line::from("hello world"), 10, Style::default());
        assert_eq!(line_display_width(&line), 10);
    }

    #[test]
    fn test_framed_line_on_wide_terminal() {
        let line = framed_line(Line::from("hello"), 250, Style::default());
        assert_eq!(line_display_width(&line), 250);
        assert_eq!(pad_to_width("x", 300, Alignment::Left).len(), 300);
    }

    #[test]
    fn test_borders_have_exact_width() {
        let top = top_border(vec![Span::raw("Maps")], 20, Style::default());
        assert_eq!(line_display_width(&top), 20);
        assert_eq!(line_display_width(&bottom_border(20, Style::default())), 20);
    }
}
