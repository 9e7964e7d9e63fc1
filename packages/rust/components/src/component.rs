//! Component and anchor types.
//!
//! A [`Component`] is built once during assembly, optionally gains an
//! `identifier` (anchor target) or an [`Anchor`] (anchor source) during the
//! anchoring pass, and is then serialized with [`Component::to_value`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// ComponentRole
// ---------------------------------------------------------------------------

/// Role tag identifying what a component renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentRole {
    Cover,
    Title,
    Byline,
    Heading,
    Body,
    Photo,
    Caption,
    Quote,
    EmbedWebVideo,
    Divider,
}

impl ComponentRole {
    /// The wire string written into the `role` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Title => "title",
            Self::Byline => "byline",
            Self::Heading => "heading",
            Self::Body => "body",
            Self::Photo => "photo",
            Self::Caption => "caption",
            Self::Quote => "quote",
            Self::EmbedWebVideo => "embedwebvideo",
            Self::Divider => "divider",
        }
    }
}

impl std::fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Anchor
// ---------------------------------------------------------------------------

/// Vertical attachment point on the anchor target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPosition {
    Top,
    Center,
    Bottom,
}

/// Descriptor pinning a component to a previously emitted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    /// Identifier of the component this one is pinned to.
    pub target_component_identifier: String,
    /// Where on the target the anchor attaches.
    pub target_anchor_position: AnchorPosition,
    /// Start of the anchored range within the target.
    pub range_start: u32,
    /// Length of the anchored range.
    pub range_length: u32,
}

impl Anchor {
    /// A centered single-range anchor targeting `identifier`.
    pub fn centered(identifier: impl Into<String>) -> Self {
        Self {
            target_component_identifier: identifier.into(),
            target_anchor_position: AnchorPosition::Center,
            range_start: 0,
            range_length: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One typed, serializable unit of the exported article.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    role: ComponentRole,
    payload: Map<String, Value>,
    anchorable: bool,
    identifier: Option<String>,
    anchor: Option<Anchor>,
}

impl Component {
    /// An empty component with the given role.
    pub fn new(role: ComponentRole) -> Self {
        Self {
            role,
            payload: Map::new(),
            anchorable: false,
            identifier: None,
            anchor: None,
        }
    }

    /// A component whose payload is a single `text` field.
    pub fn with_text(role: ComponentRole, text: impl Into<String>) -> Self {
        let mut component = Self::new(role);
        component.set_json("text", Value::String(text.into()));
        component
    }

    pub fn role(&self) -> ComponentRole {
        self.role
    }

    /// Set a payload field.
    pub fn set_json(&mut self, field: impl Into<String>, value: Value) {
        self.payload.insert(field.into(), value);
    }

    /// Read a payload field.
    pub fn get_json(&self, field: &str) -> Option<&Value> {
        self.payload.get(field)
    }

    /// Mark whether this component should be pinned to its predecessor
    /// during the anchoring pass.
    pub fn set_anchorable(&mut self, anchorable: bool) {
        self.anchorable = anchorable;
    }

    pub fn is_anchorable(&self) -> bool {
        self.anchorable
    }

    /// The identifier assigned when this component is an anchor target.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = Some(identifier.into());
    }

    /// The anchor assigned when this component is an anchor source.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = Some(anchor);
    }

    /// Serialize to the article wire form: `role` plus the payload fields,
    /// with `identifier`/`anchor` included only when assigned.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("role".into(), Value::String(self.role.as_str().into()));

        for (field, value) in &self.payload {
            object.insert(field.clone(), value.clone());
        }

        if let Some(identifier) = &self.identifier {
            object.insert("identifier".into(), Value::String(identifier.clone()));
        }
        if let Some(anchor) = &self.anchor {
            object.insert(
                "anchor".into(),
                serde_json::to_value(anchor).unwrap_or_default(),
            );
        }

        Value::Object(object)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
