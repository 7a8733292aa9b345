//! Image registry: named image sources loaded from a JSON manifest.
//!
//! A manifest collects the outputs of the image pipeline in one place so a
//! site can refer to images by name:
//!
//! ```json
//! {
//!   "placeholder": { "source": "/assets/placeholder.svg" },
//!   "hero": {
//!     "source": [
//!       { "src": "/assets/hero-400.webp", "w": 400, "h": 300 },
//!       { "src": "/assets/hero-800.webp", "w": 800, "h": 600 }
//!     ],
//!     "link": "/gallery/hero"
//!   }
//! }
//! ```
//!
//! Parsing is lenient per entry: a `source` that is missing, `null`, or not
//! one of the two recognized shapes is logged and treated as absent, so one
//! bad entry degrades to a missing image instead of failing the whole file.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ImagesConfig;
use crate::imagetools::normalize_with;
use crate::types::{ImageSource, NormalizedImage};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One named image in the registry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Pipeline output. `None` when missing or unrecognized.
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: Option<ImageSource>,
    /// Page the image links to, if any.
    #[serde(default)]
    pub link: Option<String>,
}

/// Image registry keyed by name, iterated in name order.
pub type Manifest = BTreeMap<String, ManifestEntry>;

fn lenient_source<'de, D>(deserializer: D) -> Result<Option<ImageSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match serde_json::from_value::<ImageSource>(raw.clone()) {
        Ok(source) => Ok(Some(source)),
        Err(e) => {
            warn!(value = %raw, error = %e, "unrecognized image source, treating as absent");
            Ok(None)
        }
    }
}

/// Parse a manifest from a JSON string.
pub fn parse_manifest(json: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    let manifest = parse_manifest(&content)?;
    debug!(path = %path.display(), entries = manifest.len(), "loaded manifest");
    Ok(manifest)
}

/// Normalize every entry in the manifest.
pub fn normalize_manifest(
    manifest: &Manifest,
    config: &ImagesConfig,
) -> BTreeMap<String, NormalizedImage> {
    manifest
        .iter()
        .map(|(name, entry)| {
            let normalized = normalize_with(entry.source.as_ref(), entry.link.as_deref(), config);
            if normalized.image.is_none() {
                warn!(name = %name, "no usable image source");
            } else {
                debug!(
                    name = %name,
                    renditions = normalized.rendition_count(),
                    "normalized image"
                );
            }
            (name.clone(), normalized)
        })
        .collect()
}

/// Names of entries that ended up without a primary image.
pub fn missing_images(normalized: &BTreeMap<String, NormalizedImage>) -> Vec<&str> {
    normalized
        .iter()
        .filter(|(_, img)| img.image.is_none())
        .map(|(name, _)| name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sized, write_manifest};

    const SAMPLE: &str = r#"{
        "placeholder": { "source": "/assets/placeholder.svg" },
        "hero": {
            "source": [
                { "src": "/hero-400.webp", "w": 400, "h": 300 },
                { "src": "/hero-800.webp", "w": 800, "h": 600 }
            ],
            "link": "/gallery/hero"
        },
        "broken": { "source": 42 },
        "empty": {}
    }"#;

    #[test]
    fn parse_recognizes_both_shapes() {
        let manifest = parse_manifest(SAMPLE).unwrap();
        assert_eq!(manifest.len(), 4);
        assert_eq!(
            manifest["placeholder"].source,
            Some(ImageSource::from("/assets/placeholder.svg"))
        );
        assert!(matches!(
            manifest["hero"].source,
            Some(ImageSource::Sized(ref r)) if r.len() == 2
        ));
        assert_eq!(manifest["hero"].link.as_deref(), Some("/gallery/hero"));
    }

    #[test]
    fn parse_degrades_bad_sources_to_absent() {
        let manifest = parse_manifest(SAMPLE).unwrap();
        assert_eq!(manifest["broken"].source, None);
        assert_eq!(manifest["empty"], ManifestEntry::default());
    }

    #[test]
    fn parse_null_source_is_absent() {
        let manifest = parse_manifest(r#"{"x": {"source": null}}"#).unwrap();
        assert_eq!(manifest["x"].source, None);
    }

    #[test]
    fn parse_array_of_strings_is_absent() {
        let manifest = parse_manifest(r#"{"x": {"source": ["a.webp", "b.webp"]}}"#).unwrap();
        assert_eq!(manifest["x"].source, None);
    }

    #[test]
    fn null_width_keeps_primary_but_drops_srcset() {
        let manifest = parse_manifest(
            r#"{"x":{"source":[{"src":"a.webp","w":400},{"src":"b.webp","w":null}]}}"#,
        )
        .unwrap();
        let normalized = normalize_manifest(&manifest, &ImagesConfig::default());
        assert_eq!(normalized["x"].image.as_deref(), Some("b.webp"));
        assert_eq!(normalized["x"].src_set, None);
        assert_eq!(normalized["x"].sizes, None);
    }

    #[test]
    fn null_src_before_last_keeps_primary() {
        let manifest = parse_manifest(
            r#"{"x":{"source":[{"src":null,"w":400},{"src":"b.webp","w":800}]}}"#,
        )
        .unwrap();
        let normalized = normalize_manifest(&manifest, &ImagesConfig::default());
        assert_eq!(normalized["x"].image.as_deref(), Some("b.webp"));
        assert_eq!(normalized["x"].src_set, None);
    }

    #[test]
    fn parse_rejects_unknown_entry_keys() {
        let result = parse_manifest(r#"{"x": {"sorce": "a.svg"}}"#);
        assert!(matches!(result, Err(ManifestError::Json(_))));
    }

    #[test]
    fn parse_rejects_non_object_root() {
        assert!(parse_manifest("[]").is_err());
    }

    #[test]
    fn load_manifest_from_file() {
        let (_tmp, path) = write_manifest(SAMPLE);
        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn load_manifest_missing_file_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let result = load_manifest(&tmp.path().join("nope.json"));
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }

    #[test]
    fn normalize_manifest_all_entries() {
        let manifest = parse_manifest(SAMPLE).unwrap();
        let normalized = normalize_manifest(&manifest, &ImagesConfig::default());

        let names: Vec<&str> = normalized.keys().map(String::as_str).collect();
        assert_eq!(names, ["broken", "empty", "hero", "placeholder"]);

        let hero = &normalized["hero"];
        assert_eq!(hero.image.as_deref(), Some("/hero-800.webp"));
        assert_eq!(
            hero.src_set.as_deref(),
            Some("/hero-400.webp 400w, /hero-800.webp 800w")
        );
        assert!(hero.sizes.is_some());
        assert_eq!(hero.link.as_deref(), Some("/gallery/hero"));

        let placeholder = &normalized["placeholder"];
        assert_eq!(placeholder.image.as_deref(), Some("/assets/placeholder.svg"));
        assert_eq!(placeholder.src_set, None);
    }

    #[test]
    fn missing_images_lists_degraded_entries() {
        let manifest = parse_manifest(SAMPLE).unwrap();
        let normalized = normalize_manifest(&manifest, &ImagesConfig::default());
        assert_eq!(missing_images(&normalized), ["broken", "empty"]);
    }

    #[test]
    fn missing_images_empty_when_all_resolve() {
        let mut manifest = Manifest::new();
        manifest.insert(
            "a".into(),
            ManifestEntry {
                source: Some(sized(&[("a.webp", 400)])),
                link: None,
            },
        );
        let normalized = normalize_manifest(&manifest, &ImagesConfig::default());
        assert!(missing_images(&normalized).is_empty());
    }
}
