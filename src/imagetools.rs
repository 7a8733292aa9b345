//! Normalization of build-time image transformation output.
//!
//! An image pipeline emits either a bare URL (e.g. an SVG imported as-is) or
//! a list of renditions such as `?w=400;800;1200&format=webp` produces. This
//! module reconciles both shapes into one [`NormalizedImage`] that can be
//! bound straight onto an `<img>` element.
//!
//! Every operation is fail-soft: malformed or missing input degrades to
//! absent fields, never to an error or an empty attribute. A missing image
//! must not break page rendering.

use crate::config::{ImagesConfig, PrimarySelection};
use crate::types::{ImageDescriptor, ImageSource, NormalizedImage};

const DEFAULT_SIZES: &str = "(min-width: 1024px) 20vw, (min-width: 768px) 33vw, 50vw";

/// The single best-effort source URL.
///
/// For renditions this is the last one, which the pipeline orders by
/// ascending width. Empty URLs come back as `None`.
///
/// ```
/// # use simple_photo::imagetools::extract_primary_source;
/// # use simple_photo::types::{ImageDescriptor, ImageSource};
/// let source = ImageSource::Sized(vec![
///     ImageDescriptor::new("a.webp", 400),
///     ImageDescriptor::new("b.webp", 800),
/// ]);
/// assert_eq!(extract_primary_source(Some(&source)).as_deref(), Some("b.webp"));
/// assert_eq!(extract_primary_source(None), None);
/// ```
pub fn extract_primary_source(input: Option<&ImageSource>) -> Option<String> {
    select_primary(input, PrimarySelection::Last)
}

/// Comma-separated `"<src> <w>w"` candidates, in input order.
///
/// Returns `None` for bare URLs, empty input, or when any rendition lacks a
/// width or a URL without whitespace. Never returns a partial set.
pub fn build_responsive_source_set(input: Option<&ImageSource>) -> Option<String> {
    let renditions = match input? {
        ImageSource::Opaque(_) => return None,
        ImageSource::Sized(renditions) => renditions,
    };
    if renditions.is_empty() || !renditions.iter().all(ImageDescriptor::is_well_formed) {
        return None;
    }
    let candidates: Vec<String> = renditions
        .iter()
        .map(|d| format!("{} {}w", d.src, d.w))
        .collect();
    Some(candidates.join(", "))
}

/// Fixed `sizes` hint for a gallery grid: 20vw from 1024px, 33vw from 768px,
/// 50vw below.
pub fn default_responsive_sizes() -> &'static str {
    DEFAULT_SIZES
}

/// Convert pipeline output into a [`NormalizedImage`] using default policy.
pub fn normalize(input: Option<&ImageSource>, link: Option<&str>) -> NormalizedImage {
    normalize_with(input, link, &ImagesConfig::default())
}

/// Same as [`normalize`], with the sizes hint and primary selection taken
/// from config.
pub fn normalize_with(
    input: Option<&ImageSource>,
    link: Option<&str>,
    config: &ImagesConfig,
) -> NormalizedImage {
    let image = select_primary(input, config.primary);
    let src_set = build_responsive_source_set(input);
    // sizes travels with srcset, never alone
    let sizes = src_set.as_ref().map(|_| config.sizes.clone());
    let link = link.filter(|l| !l.is_empty()).map(str::to_string);

    NormalizedImage {
        image,
        src_set,
        sizes,
        link,
    }
}

fn select_primary(input: Option<&ImageSource>, policy: PrimarySelection) -> Option<String> {
    let chosen = match input? {
        ImageSource::Opaque(url) => url,
        ImageSource::Sized(renditions) => {
            let pick = match policy {
                PrimarySelection::Last => renditions.last(),
                // max_by_key keeps the last of equal maxima
                PrimarySelection::Widest => renditions.iter().max_by_key(|d| d.w),
            };
            &pick?.src
        }
    };
    (!chosen.is_empty()).then(|| chosen.clone())
}
