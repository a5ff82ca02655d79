//! Opening the focused card's outbound link.

use super::document::{CardId, Document};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::process::{Command, Stdio};

/// Hosts a card link may point at: package registry, source hosting, formula repository.
pub const ALLOWED_HOSTS: [&str; 3] = ["flathub.org", "github.com", "formulae.brew.sh"];

/// http(s) URL whose host is one of [`ALLOWED_HOSTS`] or a subdomain of one
static ALLOWED_LINK: Lazy<Regex> = Lazy::new(|| {
    let hosts: Vec<String> = ALLOWED_HOSTS.iter().map(|h| regex::escape(h)).collect();
    Regex::new(&format!(
        r"^https?://(?:[A-Za-z0-9-]+\.)*(?:{})(?::\d+)?(?:[/?#]|$)",
        hosts.join("|")
    ))
    .expect("allowed-link pattern is valid")
});

/// Something that can hand a URL to an external browser.
pub trait LinkOpener: Send {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Opens URLs with the platform's URL handler, fully detached from this process.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        spawn_detached(url)
    }
}

#[cfg(target_os = "macos")]
fn spawn_detached(url: &str) -> Result<()> {
    detached(Command::new("open").arg(url)).spawn()?;
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn spawn_detached(url: &str) -> Result<()> {
    // Fall back to wslview under WSL
    detached(Command::new("xdg-open").arg(url))
        .spawn()
        .or_else(|_| detached(Command::new("wslview").arg(url)).spawn())?;
    Ok(())
}

/// No inherited stdio, so the browser gets nothing back from the TUI.
fn detached(cmd: &mut Command) -> &mut Command {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
}

pub fn is_allowed_link(url: &str) -> bool {
    ALLOWED_LINK.is_match(url.trim())
}

/// First allow-listed link on a card, in card order.
pub fn first_allowed_link(links: &[String]) -> Option<&str> {
    links.iter().map(String::as_str).find(|l| is_allowed_link(l))
}

/// Open the focused card's first allow-listed link. No-op if nothing is focused
/// or the card has no such link.
pub fn open_focused(index: isize, items: &[CardId], doc: &Document, opener: &mut dyn LinkOpener) {
    let Some(card) = usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .and_then(|&id| doc.card(id))
    else {
        return;
    };

    let Some(url) = first_allowed_link(&card.links) else {
        return;
    };

    match opener.open(url) {
        Ok(()) => tracing::info!("opened {}", url),
        Err(e) => tracing::warn!("Failed to open {}: {}", url, e),
    }
}
