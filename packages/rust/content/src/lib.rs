//! Content document model for Pressroom.
//!
//! A [`Content`] is the read-only source document an article is built from:
//! title, byline, cover, intro, and a raw HTML body. [`Content::nodes`]
//! splits the body into first-level fragments, which the component factory
//! classifies one at a time.

mod nodes;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A source content document.
///
/// All fields except `id` are optional — an article can be built from a bare
/// body, and the builders fall back where metadata is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Stable identifier; becomes the bundle directory name.
    pub id: String,

    /// Article title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Author byline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byline: Option<String>,

    /// Cover image path or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    /// Intro/excerpt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    /// Raw body HTML.
    #[serde(default)]
    pub body: String,

    /// Per-article settings (pullquote text/position, etc.).
    #[serde(default)]
    pub settings: ContentSettings,
}

impl Content {
    /// Split the raw body into first-level node fragments.
    ///
    /// Each fragment is the outer HTML of one top-level element; loose text
    /// is wrapped in a paragraph so it is not dropped.
    pub fn nodes(&self) -> Vec<String> {
        nodes::split_top_level(&self.body)
    }

    /// Look up a raw setting value by name.
    pub fn get_setting(&self, name: &str) -> Option<&str> {
        self.settings.get(name)
    }
}

// ---------------------------------------------------------------------------
// ContentSettings
// ---------------------------------------------------------------------------

/// String key/value settings attached to a content document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSettings(BTreeMap<String, String>);

impl ContentSettings {
    /// Look up a raw setting value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Set a setting value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// The pullquote text, if configured and non-blank.
    pub fn pullquote(&self) -> Option<&str> {
        self.get("pullquote").filter(|text| !text.trim().is_empty())
    }

    /// The 1-based pullquote position within the emitted body component
    /// stream. Absent, non-numeric, or negative values all read as 0
    /// (disabled).
    pub fn pullquote_position(&self) -> usize {
        self.get("pullquote_position")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
