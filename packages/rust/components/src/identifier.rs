//! Unique identifier generation for anchor targets.
//!
//! The assembler takes an [`IdentifierSource`] rather than reaching for a
//! process global, so uniqueness and determinism are testable. Tokens only
//! need to be unique within a single assembly run.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Source of unique tokens for component identifiers.
pub trait IdentifierSource: Send + Sync {
    /// Produce the next unique token.
    fn next_token(&self) -> String;

    /// Produce a full component identifier (`component-<token>`).
    fn component_identifier(&self) -> String {
        format!("component-{}", self.next_token())
    }
}

/// Production source backed by UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdentifierSource for UuidSource {
    fn next_token(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}

/// Deterministic counter source for tests and reproducible exports.
#[derive(Debug, Default)]
pub struct SequentialSource(AtomicU64);

impl IdentifierSource for SequentialSource {
    fn next_token(&self) -> String {
        self.0.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_tokens_are_unique() {
        let source = UuidSource;
        let a = source.next_token();
        let b = source.next_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn component_identifier_format() {
        let source = SequentialSource::default();
        assert_eq!(source.component_identifier(), "component-0");
        assert_eq!(source.component_identifier(), "component-1");
    }

    #[test]
    fn sequential_source_is_deterministic() {
        let a = SequentialSource::default();
        let b = SequentialSource::default();
        for _ in 0..5 {
            assert_eq!(a.next_token(), b.next_token());
        }
    }
}
