use super::announce::announcement_text;
use super::document::{CardId, Document, SCROLL_MARGIN};

/// Remove the focus marker from every tracked item.
pub fn clear_focus_markers(items: &[CardId], doc: &mut Document) {
    for &id in items {
        doc.set_focus_marker(id, false);
    }
}

/// Scroll offset that puts a card just below the sticky header.
///
/// The margin above the card shrinks when keeping it would push the card's
/// bottom past the viewport, but the card's top never goes under the header.
pub fn scroll_target(
    item_top: i64,
    item_height: i64,
    header_height: i64,
    viewport_height: i64,
) -> i64 {
    let preferred = item_top - header_height - SCROLL_MARGIN;
    let bottom_fits = item_top + item_height - viewport_height;
    preferred.max(bottom_fits.min(item_top - header_height))
}

/// Mark `items[index]` as focused, scroll it into view and announce it.
///
/// Out-of-range indices and empty lists are ignored.
pub fn focus_item(index: isize, items: &[CardId], doc: &mut Document) {
    if items.is_empty() || index < 0 || index as usize >= items.len() {
        return;
    }
    let id = items[index as usize];

    clear_focus_markers(items, doc);
    doc.set_focus_marker(id, true);

    if let Some((top, height)) = doc.card(id).map(|c| (c.top, c.height)) {
        doc.scroll_to(scroll_target(top, height, doc.header_height, doc.viewport_height));
    }

    let text = announcement_text(doc.card(id));
    doc.announce(&text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target_keeps_margin_when_room() {
        assert_eq!(scroll_target(100, 6, 5, 40), 87);
    }

    #[test]
    fn test_scroll_target_shrinks_margin_on_short_viewport() {
        // bottom of the card lands on the last viewport row
        assert_eq!(scroll_target(100, 6, 5, 14), 92);
    }

    #[test]
    fn test_scroll_target_never_hides_top_under_header() {
        assert_eq!(scroll_target(100, 30, 5, 14), 95);
    }
}
