//! Shared test utilities for the simple-photo test suite.
//!
//! Builders for image sources and manifests, plus a fixture writer for tests
//! that need a manifest on disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = sized(&[("a.webp", 400), ("b.webp", 800)]);
//! let tmp = write_manifest(r#"{"hero": {"source": "hero.svg"}}"#);
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

use crate::types::{ImageDescriptor, ImageSource};

// =========================================================================
// Source builders
// =========================================================================

/// Build a `Sized` source from `(src, w)` pairs, in the given order.
pub fn sized(renditions: &[(&str, u32)]) -> ImageSource {
    ImageSource::Sized(
        renditions
            .iter()
            .map(|(src, w)| ImageDescriptor::new(*src, *w))
            .collect(),
    )
}

/// The canonical three-rendition input: `a 400w, b 800w, c 1200w`.
pub fn abc_renditions() -> ImageSource {
    sized(&[("a", 400), ("b", 800), ("c", 1200)])
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Write `json` to `manifest.json` in a fresh temp directory.
///
/// Returns the directory (keep it alive for the duration of the test) and
/// the manifest path.
pub fn write_manifest(json: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("manifest.json");
    std::fs::write(&path, json).unwrap();
    (tmp, path)
}
