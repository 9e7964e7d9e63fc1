//! Article bundle export.
//!
//! Wraps the assembled components and metadata into the article document,
//! then writes `article.json` plus a checksummed `manifest.json` into the
//! bundle directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use pressroom_components::{ComponentFactory, IdentifierSource, UuidSource};
use pressroom_content::Content;
use pressroom_shared::{LayoutConfig, PressroomError, Result};

use crate::{assembler, metadata};

/// Apple News Format version declared by exported articles.
const FORMAT_VERSION: &str = "1.7";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Options for a single article export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Root directory for article bundles.
    pub output_root: PathBuf,
    /// Article language tag (e.g., `en`).
    pub language: String,
    /// Column grid declared by the document.
    pub layout: LayoutConfig,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
    /// Pretty-print `article.json`.
    pub pretty: bool,
}

/// The article document written to `article.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDocument {
    pub version: String,
    pub identifier: String,
    pub language: String,
    pub title: String,
    pub layout: LayoutConfig,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    pub components: Vec<Value>,
}

/// Checksum entry for a written bundle file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChecksum {
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// The `manifest.json` written next to the article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<FileChecksum>,
}

/// Output from a successful export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Absolute path to the bundle directory.
    pub bundle_dir: PathBuf,
    /// Path to the written `article.json`.
    pub article_path: PathBuf,
    /// Number of components in the article.
    pub component_count: usize,
    /// The manifest that was written.
    pub manifest: ExportManifest,
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Build the article document without touching the filesystem.
pub fn build_article(
    content: &Content,
    factory: &ComponentFactory,
    ids: &dyn IdentifierSource,
    options: &ExportOptions,
) -> ArticleDocument {
    ArticleDocument {
        version: FORMAT_VERSION.into(),
        identifier: content.id.clone(),
        language: options.language.clone(),
        title: assembler::content_title(content).to_string(),
        layout: options.layout.clone(),
        metadata: metadata::build_metadata(content),
        components: assembler::assemble(content, factory, ids),
    }
}

/// Export a content document as an article bundle.
///
/// Creates the following layout:
/// ```text
/// <output_root>/<content-id>/
/// ├── article.json
/// └── manifest.json
/// ```
#[instrument(skip_all, fields(content_id = %content.id, output_root = %options.output_root.display()))]
pub fn export_article(content: &Content, options: &ExportOptions) -> Result<ExportResult> {
    let article = build_article(content, &ComponentFactory::new(), &UuidSource, options);

    let bundle_dir = options.output_root.join(&content.id);
    std::fs::create_dir_all(&bundle_dir).map_err(|e| PressroomError::io(&bundle_dir, e))?;

    let json = if options.pretty {
        serde_json::to_string_pretty(&article)
    } else {
        serde_json::to_string(&article)
    }
    .map_err(|e| PressroomError::validation(format!("article serialization failed: {e}")))?;

    let article_path = bundle_dir.join("article.json");
    write_atomic(&article_path, &json)?;

    let manifest = ExportManifest {
        tool_version: options.tool_version.clone(),
        generated_at: Utc::now(),
        files: vec![checksum("article.json", &json)],
    };
    let manifest_json = serde_json::to_string_pretty(&manifest)
        .map_err(|e| PressroomError::validation(format!("manifest serialization failed: {e}")))?;
    write_atomic(&bundle_dir.join("manifest.json"), &manifest_json)?;

    info!(
        path = %article_path.display(),
        components = article.components.len(),
        "article export complete"
    );

    Ok(ExportResult {
        bundle_dir,
        article_path,
        component_count: article.components.len(),
        manifest,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write a file atomically (write to temp, then rename).
fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let file_name = target
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("file");
    let temp = target.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| PressroomError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| PressroomError::io(target, e))?;

    debug!(path = %target.display(), size = content.len(), "wrote bundle file");
    Ok(())
}

fn checksum(filename: &str, content: &str) -> FileChecksum {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());

    FileChecksum {
        filename: filename.to_string(),
        sha256: format!("{:x}", hasher.finalize()),
        size_bytes: content.len(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
