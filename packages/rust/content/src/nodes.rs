//! Body-node splitting.
//!
//! The raw body HTML is parsed once and split into its first-level nodes.
//! Downstream classification works on one fragment at a time.

use scraper::{ElementRef, Html, Node};
use tracing::debug;

/// Split an HTML body into first-level node fragments.
///
/// Element children are emitted as their outer HTML. Non-blank loose text is
/// wrapped in a `<p>` so it survives classification; comments and
/// whitespace-only text are dropped.
pub(crate) fn split_top_level(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    let mut nodes = Vec::new();
    for child in fragment.root_element().children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    nodes.push(element.html());
                }
            }
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    nodes.push(format!("<p>{trimmed}</p>"));
                }
            }
            _ => {}
        }
    }

    debug!(count = nodes.len(), "split body into nodes");
    nodes
}
