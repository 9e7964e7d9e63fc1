//! Article component assembly.
//!
//! Orders meta components (cover, title, byline) ahead of the body stream,
//! splits body nodes into typed components, inserts the configured pullquote,
//! and anchors anchorable components to their immediate predecessor.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use pressroom_components::{Anchor, Component, ComponentFactory, IdentifierSource};
use pressroom_content::Content;

/// Title used when the content has none.
pub(crate) const UNTITLED_FALLBACK: &str = "Untitled Article";

/// Build the full ordered component list for a content document.
///
/// Meta components come first and are never anchored; body components are
/// classified from the content nodes, the pullquote (if configured) is
/// inserted into the emitted stream, and the anchoring pass wires each
/// anchorable component to its predecessor.
#[instrument(skip_all, fields(content_id = %content.id))]
pub fn assemble(
    content: &Content,
    factory: &ComponentFactory,
    ids: &dyn IdentifierSource,
) -> Vec<Value> {
    let mut components = meta_components(content, factory);

    let body = anchor_components(split_into_components(content, factory), ids);
    components.extend(body.iter().map(Component::to_value));

    debug!(count = components.len(), "component assembly complete");
    components
}

/// The title to use for a content document, with the untitled fallback.
pub(crate) fn content_title(content: &Content) -> &str {
    non_blank(content.title.as_deref()).unwrap_or(UNTITLED_FALLBACK)
}

// ---------------------------------------------------------------------------
// Meta components
// ---------------------------------------------------------------------------

/// Components synthesized from document metadata rather than body nodes.
/// The cover is optional, the title always present, the byline optional.
fn meta_components(content: &Content, factory: &ComponentFactory) -> Vec<Value> {
    let mut components = Vec::new();

    if let Some(cover) = non_blank(content.cover.as_deref()) {
        components.push(factory.cover(cover).to_value());
    }

    components.push(factory.title(content_title(content)).to_value());

    if let Some(byline) = non_blank(content.byline.as_deref()) {
        components.push(factory.byline(byline).to_value());
    }

    components
}

// ---------------------------------------------------------------------------
// Body splitting and pullquote insertion
// ---------------------------------------------------------------------------

/// Pending pullquote insertion.
///
/// `remaining` counts emitted body components down to the insertion point;
/// the slot is consumed on insertion, so at most one pullquote is emitted
/// per run.
struct PullquoteSlot {
    text: String,
    remaining: usize,
}

fn pullquote_slot(content: &Content) -> Option<PullquoteSlot> {
    let text = content.settings.pullquote()?;
    let position = content.settings.pullquote_position();
    if position == 0 {
        return None;
    }
    Some(PullquoteSlot {
        text: text.to_string(),
        remaining: position,
    })
}

/// Split the content nodes into body components, inserting the pullquote
/// directly after the Nth emitted component. The count runs across all
/// nodes, not per node.
fn split_into_components(content: &Content, factory: &ComponentFactory) -> Vec<Component> {
    let mut slot = pullquote_slot(content);
    let mut result = Vec::new();

    for node in content.nodes() {
        for component in factory.get_components_from_node(&node) {
            result.push(component);

            slot = match slot.take() {
                Some(slot) if slot.remaining == 1 => {
                    result.push(pullquote_component(factory, &slot.text));
                    None
                }
                Some(slot) => Some(PullquoteSlot {
                    remaining: slot.remaining - 1,
                    ..slot
                }),
                None => None,
            };
        }
    }

    result
}

fn pullquote_component(factory: &ComponentFactory, text: &str) -> Component {
    let mut component = factory.blockquote(&format!("<blockquote>{text}</blockquote>"));
    component.set_anchorable(true);
    component
}

// ---------------------------------------------------------------------------
// Anchoring
// ---------------------------------------------------------------------------

/// Anchor pass over the body components.
///
/// Each anchorable component is pinned to its immediate predecessor via a
/// freshly generated identifier; the predecessor relation is positional. A
/// component can itself be the target of a later anchorable one. A leading
/// anchorable component has no predecessor and is left unanchored.
fn anchor_components(
    mut components: Vec<Component>,
    ids: &dyn IdentifierSource,
) -> Vec<Component> {
    for index in 0..components.len() {
        if !components[index].is_anchorable() {
            continue;
        }
        if index == 0 {
            warn!("anchorable component at position 0 has no predecessor, leaving unanchored");
            continue;
        }

        let identifier = ids.component_identifier();
        components[index - 1].set_identifier(identifier.clone());
        components[index].set_anchor(Anchor::centered(identifier));
    }

    components
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_components::SequentialSource;
    use pressroom_content::ContentSettings;

    fn make_content(body: &str) -> Content {
        Content {
            id: "test-article".into(),
            title: Some("A Test Article".into()),
            byline: None,
            cover: None,
            intro: None,
            body: body.into(),
            settings: ContentSettings::default(),
        }
    }

    fn with_pullquote(body: &str, text: &str, position: usize) -> Content {
        let mut content = make_content(body);
        content.settings.set("pullquote", text);
        content
            .settings
            .set("pullquote_position", position.to_string());
        content
    }

    fn assemble_seq(content: &Content) -> Vec<Value> {
        assemble(content, &ComponentFactory::new(), &SequentialSource::default())
    }

    const FIVE_PARAGRAPHS: &str =
        "<p>One.</p><p>Two.</p><p>Three.</p><p>Four.</p><p>Five.</p>";

    #[test]
    fn empty_title_falls_back_to_untitled() {
        let mut content = make_content("");
        content.title = None;

        let components = assemble_seq(&content);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0]["role"], "title");
        assert_eq!(components[0]["text"], "Untitled Article");

        content.title = Some("   ".into());
        let components = assemble_seq(&content);
        assert_eq!(components[0]["text"], "Untitled Article");
    }

    #[test]
    fn cover_component_comes_first() {
        let mut content = make_content("<p>Body.</p>");
        content.cover = Some("uploads/2026/hero.jpg".into());
        content.byline = Some("by Jordan Lee".into());

        let components = assemble_seq(&content);
        assert_eq!(components[0]["role"], "cover");
        assert_eq!(components[0]["URL"], "bundle://hero.jpg");
        assert_eq!(components[1]["role"], "title");
        assert_eq!(components[1]["text"], "A Test Article");
        assert_eq!(components[2]["role"], "byline");
        assert_eq!(components[3]["role"], "body");
    }

    #[test]
    fn body_components_follow_meta_in_node_order() {
        let content = make_content("<h2>Section</h2><p>First.</p><p>Second.</p>");
        let components = assemble_seq(&content);

        assert_eq!(components.len(), 4);
        assert_eq!(components[0]["role"], "title");
        assert_eq!(components[1]["role"], "heading");
        assert_eq!(components[2]["role"], "body");
        assert_eq!(components[3]["role"], "body");
    }

    #[test]
    fn pullquote_inserted_after_nth_component() {
        let content = with_pullquote(FIVE_PARAGRAPHS, "A bold claim", 3);
        let components = assemble_seq(&content);

        // 1 title + 5 paragraphs + 1 inserted pullquote
        assert_eq!(components.len(), 7);

        let quote = &components[4];
        assert_eq!(quote["role"], "quote");
        assert!(quote["text"].as_str().unwrap().contains("A bold claim"));

        // The pullquote anchors to the 3rd body component.
        let target = &components[3];
        let identifier = target["identifier"].as_str().expect("target identifier");
        assert_eq!(identifier, "component-0");
        assert_eq!(quote["anchor"]["targetComponentIdentifier"], identifier);
        assert_eq!(quote["anchor"]["targetAnchorPosition"], "center");
        assert_eq!(quote["anchor"]["rangeStart"], 0);
        assert_eq!(quote["anchor"]["rangeLength"], 1);

        // Components after the insertion are shifted, not replaced.
        assert_eq!(components[5]["text"], "Four.");
        assert_eq!(components[6]["text"], "Five.");
    }

    #[test]
    fn pullquote_position_zero_disables_insertion() {
        let content = with_pullquote(FIVE_PARAGRAPHS, "A bold claim", 0);
        let components = assemble_seq(&content);

        assert_eq!(components.len(), 6);
        assert!(components.iter().all(|c| c["role"] != "quote"));
    }

    #[test]
    fn missing_pullquote_text_disables_insertion() {
        let mut content = make_content(FIVE_PARAGRAPHS);
        content.settings.set("pullquote_position", "3");

        let components = assemble_seq(&content);
        assert_eq!(components.len(), 6);
        assert!(components.iter().all(|c| c["role"] != "quote"));
    }

    #[test]
    fn pullquote_position_beyond_stream_never_inserts() {
        let content = with_pullquote(FIVE_PARAGRAPHS, "A bold claim", 10);
        let components = assemble_seq(&content);

        assert_eq!(components.len(), 6);
        assert!(components.iter().all(|c| c["role"] != "quote"));
    }

    #[test]
    fn pullquote_count_runs_across_multi_component_nodes() {
        // The figure expands into photo + caption, so position 2 lands on
        // the caption, not on the paragraph.
        let body = "<figure><img src=\"a.jpg\"><figcaption>Cap</figcaption></figure><p>Text.</p>";
        let content = with_pullquote(body, "A bold claim", 2);
        let components = assemble_seq(&content);

        assert_eq!(components[1]["role"], "photo");
        assert_eq!(components[2]["role"], "caption");
        assert_eq!(components[3]["role"], "quote");
        assert_eq!(components[4]["role"], "body");
    }

    #[test]
    fn caption_anchors_to_its_photo() {
        let body = "<figure><img src=\"a.jpg\"><figcaption>Cap</figcaption></figure>";
        let components = assemble_seq(&make_content(body));

        let photo = &components[1];
        let caption = &components[2];
        let identifier = photo["identifier"].as_str().expect("photo identifier");
        assert_eq!(caption["anchor"]["targetComponentIdentifier"], identifier);
    }

    #[test]
    fn meta_components_are_never_anchor_targets() {
        let mut content = with_pullquote("<p>Only one.</p>", "A bold claim", 1);
        content.cover = Some("hero.jpg".into());
        content.byline = Some("by Jordan Lee".into());

        let components = assemble_seq(&content);
        // cover, title, byline, body, quote
        assert_eq!(components.len(), 5);
        assert!(components[0].get("identifier").is_none());
        assert!(components[1].get("identifier").is_none());
        assert!(components[2].get("identifier").is_none());
        assert!(components[3].get("identifier").is_some());
        assert_eq!(
            components[4]["anchor"]["targetComponentIdentifier"],
            components[3]["identifier"]
        );
    }

    #[test]
    fn assembly_is_deterministic_with_a_fixed_source() {
        let mut content = with_pullquote(FIVE_PARAGRAPHS, "A bold claim", 2);
        content.cover = Some("hero.jpg".into());

        let first = assemble_seq(&content);
        let second = assemble_seq(&content);
        assert_eq!(first, second);
    }

    #[test]
    fn anchored_identifiers_are_unique_and_resolvable() {
        let body = "<figure><img src=\"a.jpg\"><figcaption>One</figcaption></figure>\
                    <figure><img src=\"b.jpg\"><figcaption>Two</figcaption></figure>\
                    <p>Text.</p>";
        let content = with_pullquote(body, "A bold claim", 5);
        let components = assemble_seq(&content);

        let identifiers: Vec<&str> = components
            .iter()
            .filter_map(|c| c.get("identifier").and_then(Value::as_str))
            .collect();
        let anchors: Vec<&str> = components
            .iter()
            .filter_map(|c| c["anchor"]["targetComponentIdentifier"].as_str())
            .collect();

        assert_eq!(identifiers.len(), 3);
        assert_eq!(anchors.len(), 3);
        for target in &anchors {
            assert_eq!(
                identifiers.iter().filter(|id| *id == target).count(),
                1,
                "anchor target {target} must exist exactly once"
            );
        }
    }

    #[test]
    fn leading_anchorable_component_is_left_unanchored() {
        let factory = ComponentFactory::new();
        let ids = SequentialSource::default();

        let anchored = anchor_components(
            vec![pullquote_component(&factory, "Orphan quote")],
            &ids,
        );

        assert_eq!(anchored.len(), 1);
        assert!(anchored[0].anchor().is_none());
        assert!(anchored[0].identifier().is_none());
    }
}
