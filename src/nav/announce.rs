use super::document::Card;

const FALLBACK_TITLE: &str = "Item";

/// Screen-reader text for a focused card: `Focused: <title>`.
///
/// Uses the first heading present on the card (primary, then secondary).
pub fn announcement_text(item: Option<&Card>) -> String {
    let Some(card) = item else {
        return String::new();
    };

    let title = card
        .title
        .as_deref()
        .or(card.subtitle.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(FALLBACK_TITLE);

    format!("Focused: {}", title)
}
