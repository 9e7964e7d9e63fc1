//! Side-channel article metadata.
//!
//! A flat string record carried next to the component list: the excerpt
//! (from the content intro) and a thumbnail reference (from the cover).

use std::collections::BTreeMap;

use tracing::instrument;

use pressroom_components::bundle_url;
use pressroom_content::Content;

/// Build the metadata record for a content document.
///
/// Keys are emitted conditionally: `excerpt` when the content has an intro
/// (verbatim), `thumbnailURL` when it has a cover (`bundle://<basename>`).
/// Empty record otherwise.
#[instrument(skip_all, fields(content_id = %content.id))]
pub fn build_metadata(content: &Content) -> BTreeMap<String, String> {
    let mut meta = BTreeMap::new();

    let intro = content.intro.as_deref().filter(|text| !text.trim().is_empty());
    if let Some(intro) = intro {
        meta.insert("excerpt".to_string(), intro.to_string());
    }

    let cover = content.cover.as_deref().filter(|path| !path.trim().is_empty());
    if let Some(cover) = cover {
        meta.insert("thumbnailURL".to_string(), bundle_url(cover));
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use pressroom_content::ContentSettings;

    fn make_content() -> Content {
        Content {
            id: "test-article".into(),
            title: Some("A Test Article".into()),
            byline: None,
            cover: None,
            intro: None,
            body: String::new(),
            settings: ContentSettings::default(),
        }
    }

    #[test]
    fn empty_without_intro_or_cover() {
        let meta = build_metadata(&make_content());
        assert!(meta.is_empty());
    }

    #[test]
    fn excerpt_from_intro_verbatim() {
        let mut content = make_content();
        content.intro = Some("  An introduction.  ".into());

        let meta = build_metadata(&content);
        assert_eq!(meta.len(), 1);
        assert_eq!(meta["excerpt"], "  An introduction.  ");
    }

    #[test]
    fn thumbnail_from_cover_basename() {
        let mut content = make_content();
        content.cover = Some("wp-content/uploads/2026/07/hero.jpg".into());

        let meta = build_metadata(&content);
        assert_eq!(meta["thumbnailURL"], "bundle://hero.jpg");
    }

    #[test]
    fn blank_intro_is_omitted() {
        let mut content = make_content();
        content.intro = Some("   ".into());
        content.cover = Some("hero.jpg".into());

        let meta = build_metadata(&content);
        assert_eq!(meta.len(), 1);
        assert!(meta.contains_key("thumbnailURL"));
    }

    #[test]
    fn both_keys_when_both_present() {
        let mut content = make_content();
        content.intro = Some("Intro text.".into());
        content.cover = Some("https://cdn.example.com/img/hero.png?w=1200".into());

        let meta = build_metadata(&content);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["excerpt"], "Intro text.");
        assert_eq!(meta["thumbnailURL"], "bundle://hero.png");
    }
}
