//! Typed article components for Pressroom.
//!
//! This crate provides:
//! - [`Component`] — one serializable unit of the exported article, with
//!   anchor fields assigned during assembly
//! - [`ComponentFactory`] — classification of raw body nodes into components
//! - [`IdentifierSource`] — injected unique-token generation for anchors

pub mod component;
pub mod factory;
pub mod identifier;

pub use component::{Anchor, AnchorPosition, Component, ComponentRole};
pub use factory::{ComponentFactory, bundle_url};
pub use identifier::{IdentifierSource, SequentialSource, UuidSource};
