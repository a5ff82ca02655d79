//! Auto-generate help text from the navigator's key table and the registry.

use super::registry::BINDINGS;
use super::{Category, KeyBinding, KeyPattern, Mode};
use crate::nav::NavCommand;

pub const HELP_TITLE: &str = "Keyboard Shortcuts";

/// Generate compact footer hints for a given mode.
pub fn generate_footer_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "  j/k: nav | o: open | /: search | v/u/p/c/a/d: filter | t: theme | ?: help",
        Mode::Search => "  ↑/↓: results | Enter: jump | Esc: clear/back",
    }
}

/// Lines of the help modal: navigation keys first, then registry bindings
/// grouped by category.
pub fn generate_keyboard_shortcuts() -> Vec<String> {
    let mut lines = vec![String::new()];

    push_header(&mut lines, Category::Navigation.label());
    for cmd in NavCommand::ALL {
        lines.push(format!("  {:14}{}", cmd.keys(), cmd.description()));
    }

    for category in [Category::Search, Category::Filters, Category::Application] {
        let bindings: Vec<&KeyBinding> = BINDINGS
            .iter()
            .filter(|b| b.category == category && b.show_in_help)
            .collect();
        if bindings.is_empty() {
            continue;
        }

        lines.push(String::new());
        push_header(&mut lines, category.label());
        for binding in bindings {
            let keys = format_binding_keys(&binding.pattern, binding.alternatives);
            lines.push(format!("  {:14}{}", keys, binding.description));
        }
    }

    lines.push(String::new());
    lines
}

fn push_header(lines: &mut Vec<String>, label: &str) {
    lines.push(format!("  {}", label));
    lines.push(format!("  {}", "─".repeat(label.len())));
}

/// Format a binding's keys for display (primary + alternatives).
fn format_binding_keys(pattern: &KeyPattern, alternatives: &[KeyPattern]) -> String {
    let mut parts = vec![pattern.display()];
    for alt in alternatives {
        parts.push(alt.display());
    }
    parts.join(", ")
}
