//! Component classification: raw body nodes → typed components.
//!
//! Meta components (cover, title, byline, blockquote) are built from
//! shortnames; body nodes are HTML fragments classified by their first-level
//! element. Body copy is converted to Markdown via `htmd`. A single node can
//! expand into more than one component (an image with a caption).

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::component::{Component, ComponentRole};

static IMG_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));
static FIGCAPTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("figcaption").expect("valid selector"));
static IFRAME_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("iframe").expect("valid selector"));

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{6,})")
        .expect("valid regex")
});
static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("valid regex")
});

// ---------------------------------------------------------------------------
// ComponentFactory
// ---------------------------------------------------------------------------

/// Builds typed components from shortnames and raw body nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentFactory;

impl ComponentFactory {
    pub fn new() -> Self {
        Self
    }

    // --- Shortname construction (meta and pullquote components) ---

    /// Build a single component by shortname. Returns `None` for unknown
    /// shortnames.
    pub fn get_component(&self, shortname: &str, html: &str) -> Option<Component> {
        match shortname {
            "cover" => Some(self.cover(html)),
            "title" => Some(self.title(html)),
            "byline" => Some(self.byline(html)),
            "blockquote" => Some(self.blockquote(html)),
            other => {
                debug!(shortname = other, "unknown component shortname");
                None
            }
        }
    }

    /// Cover component referencing a bundled image.
    pub fn cover(&self, source: &str) -> Component {
        let mut component = Component::new(ComponentRole::Cover);
        component.set_json("URL", Value::String(bundle_url(source)));
        component
    }

    /// Title component.
    pub fn title(&self, text: &str) -> Component {
        Component::with_text(ComponentRole::Title, text)
    }

    /// Byline component.
    pub fn byline(&self, text: &str) -> Component {
        Component::with_text(ComponentRole::Byline, text)
    }

    /// Quote component from block-quote markup, converted to Markdown.
    pub fn blockquote(&self, html: &str) -> Component {
        let mut component = Component::with_text(ComponentRole::Quote, self.markdown(html));
        component.set_json("format", Value::String("markdown".into()));
        component
    }

    // --- Node classification ---

    /// Classify a raw body node into zero or more components.
    pub fn get_components_from_node(&self, node: &str) -> Vec<Component> {
        let fragment = Html::parse_fragment(node);
        let root = fragment.root_element();

        let Some(element) = root.children().filter_map(ElementRef::wrap).next() else {
            // Bare text — treat as body copy.
            let text = collapse_whitespace(&root.text().collect::<String>());
            if text.is_empty() {
                return Vec::new();
            }
            return vec![self.body(text)];
        };

        self.classify_element(element)
    }

    fn classify_element(&self, element: ElementRef<'_>) -> Vec<Component> {
        let name = element.value().name();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let text = collapse_whitespace(&element.text().collect::<String>());
                if text.is_empty() {
                    return Vec::new();
                }
                let level = name[1..].parse::<u8>().unwrap_or(1);
                let mut heading = Component::with_text(ComponentRole::Heading, text);
                heading.set_json("level", Value::from(level));
                vec![heading]
            }
            "p" => self.classify_paragraph(element),
            "ul" | "ol" | "pre" => {
                let markdown = self.markdown(&element.html());
                if markdown.is_empty() {
                    Vec::new()
                } else {
                    vec![self.body(markdown)]
                }
            }
            "blockquote" => {
                let markdown = self.markdown(&element.html());
                if markdown.is_empty() {
                    Vec::new()
                } else {
                    let mut quote = Component::with_text(ComponentRole::Quote, markdown);
                    quote.set_json("format", Value::String("markdown".into()));
                    vec![quote]
                }
            }
            "hr" => vec![Component::new(ComponentRole::Divider)],
            "img" | "figure" => self.photo_components(element),
            "iframe" => self.embed_components(element),
            // Wrapper elements: classify their children in order.
            "div" | "section" | "article" => element
                .children()
                .filter_map(ElementRef::wrap)
                .flat_map(|child| self.classify_element(child))
                .collect(),
            other => {
                debug!(element = other, "no component mapping for element, skipping");
                Vec::new()
            }
        }
    }

    /// Paragraphs carry most body copy but also wrap images, embeds, and
    /// bare video links.
    fn classify_paragraph(&self, element: ElementRef<'_>) -> Vec<Component> {
        if element.select(&IMG_SEL).next().is_some() {
            return self.photo_components(element);
        }
        if let Some(iframe) = element.select(&IFRAME_SEL).next() {
            return self.embed_components(iframe);
        }

        let text = collapse_whitespace(&element.text().collect::<String>());

        // A paragraph holding nothing but a video URL is an embed.
        if !text.contains(char::is_whitespace) {
            if let Some(embed_url) = embed_video_url(&text) {
                let mut embed = Component::new(ComponentRole::EmbedWebVideo);
                embed.set_json("URL", Value::String(embed_url));
                return vec![embed];
            }
        }

        let markdown = self.markdown(&element.html());
        if markdown.is_empty() {
            Vec::new()
        } else {
            vec![self.body(markdown)]
        }
    }

    /// A photo component, plus an anchorable caption when the node carries
    /// caption text.
    fn photo_components(&self, element: ElementRef<'_>) -> Vec<Component> {
        let img = if element.value().name() == "img" {
            Some(element)
        } else {
            element.select(&IMG_SEL).next()
        };
        let Some(img) = img else {
            return Vec::new();
        };
        let Some(src) = img.value().attr("src").filter(|src| !src.trim().is_empty()) else {
            debug!("image node without src, skipping");
            return Vec::new();
        };

        let mut photo = Component::new(ComponentRole::Photo);
        photo.set_json("URL", Value::String(bundle_url(src)));
        let mut components = vec![photo];

        if let Some(caption) = caption_text(element, img) {
            let mut caption_component = Component::with_text(ComponentRole::Caption, caption);
            caption_component.set_anchorable(true);
            components.push(caption_component);
        }

        components
    }

    fn embed_components(&self, iframe: ElementRef<'_>) -> Vec<Component> {
        let Some(src) = iframe.value().attr("src") else {
            return Vec::new();
        };
        match embed_video_url(src) {
            Some(embed_url) => {
                let mut embed = Component::new(ComponentRole::EmbedWebVideo);
                embed.set_json("URL", Value::String(embed_url));
                vec![embed]
            }
            None => {
                debug!(src, "iframe is not a recognized video embed, skipping");
                Vec::new()
            }
        }
    }

    fn body(&self, markdown: String) -> Component {
        let mut component = Component::with_text(ComponentRole::Body, markdown);
        component.set_json("format", Value::String("markdown".into()));
        component
    }

    /// Convert an HTML fragment to trimmed Markdown. Falls back to plain
    /// text extraction when conversion fails.
    fn markdown(&self, html: &str) -> String {
        let converter = htmd::HtmlToMarkdown::builder()
            .skip_tags(vec!["script", "style", "iframe", "noscript"])
            .build();

        match converter.convert(html) {
            Ok(markdown) => markdown.trim().to_string(),
            Err(e) => {
                debug!(error = %e, "markdown conversion failed, extracting plain text");
                plain_text(html)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert an image path or URL into an article-bundle reference
/// (`bundle://<basename>`). Directory path and query string are discarded.
pub fn bundle_url(source: &str) -> String {
    format!("bundle://{}", basename(source))
}

fn basename(source: &str) -> String {
    if let Ok(parsed) = Url::parse(source) {
        if let Some(name) = parsed
            .path_segments()
            .and_then(|segments| segments.filter(|segment| !segment.is_empty()).next_back())
        {
            return name.to_string();
        }
    }

    // Relative path: strip query/fragment, keep the last path segment.
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// Caption text for an image node: `<figcaption>` wins, then the image
/// `title` attribute.
fn caption_text(element: ElementRef<'_>, img: ElementRef<'_>) -> Option<String> {
    if let Some(figcaption) = element.select(&FIGCAPTION_SEL).next() {
        let text = collapse_whitespace(&figcaption.text().collect::<String>());
        if !text.is_empty() {
            return Some(text);
        }
    }

    img.value()
        .attr("title")
        .map(collapse_whitespace)
        .filter(|text| !text.is_empty())
}

fn embed_video_url(source: &str) -> Option<String> {
    if let Some(caps) = YOUTUBE_RE.captures(source) {
        return Some(format!("https://www.youtube.com/embed/{}", &caps[1]));
    }
    if let Some(caps) = VIMEO_RE.captures(source) {
        return Some(format!("https://player.vimeo.com/video/{}", &caps[1]));
    }
    None
}

fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    collapse_whitespace(&fragment.root_element().text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
