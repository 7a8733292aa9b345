//! Shared types for image sources and their normalized form.
//!
//! [`ImageSource`] is what the upstream image transformer hands us at build
//! time; [`NormalizedImage`] is what the rendering layer binds to. Both are
//! plain values, serialized as JSON in manifests and CLI output.

use serde::{Deserialize, Deserializer, Serialize};

/// One rendition of an image at a specific width.
///
/// Missing or `null` fields deserialize to empty/zero instead of failing the
/// parse; the normalizer treats an empty `src` or a zero `w` as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// URL or path of this rendition.
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
    /// Intrinsic pixel width. Zero means unknown.
    #[serde(default, deserialize_with = "null_as_default")]
    pub w: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>, w: u32) -> Self {
        Self {
            src: src.into(),
            w,
            h: None,
        }
    }

    /// Attach a pixel height.
    pub fn with_height(mut self, h: u32) -> Self {
        self.h = Some(h);
        self
    }

    /// True when this descriptor can appear in a source set.
    ///
    /// Whitespace separates a candidate URL from its width, so a `src`
    /// containing any is rejected.
    pub fn is_well_formed(&self) -> bool {
        !self.src.is_empty() && !self.src.contains(char::is_whitespace) && self.w > 0
    }
}

/// Raw upstream output: either a bare URL or renditions in ascending width.
///
/// The order of `Sized` is trusted as given and never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// A single URL with no size variants.
    Opaque(String),
    /// Ordered renditions, smallest first by convention.
    Sized(Vec<ImageDescriptor>),
}

impl From<&str> for ImageSource {
    fn from(url: &str) -> Self {
        ImageSource::Opaque(url.to_string())
    }
}

impl From<String> for ImageSource {
    fn from(url: String) -> Self {
        ImageSource::Opaque(url)
    }
}

impl From<Vec<ImageDescriptor>> for ImageSource {
    fn from(renditions: Vec<ImageDescriptor>) -> Self {
        ImageSource::Sized(renditions)
    }
}

/// Uniform descriptor for a rendering layer's image element.
///
/// `src_set` and `sizes` are either both present or both absent. Absent
/// optional fields are omitted from JSON; `image` is always written (as
/// `null` when there is nothing to show).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedImage {
    pub image: Option<String>,
    #[serde(
        rename = "srcSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub src_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl NormalizedImage {
    /// Number of candidates in the source set (0 when there is none).
    ///
    /// Counts `<N>w` width descriptors, so commas inside URLs do not matter.
    pub fn rendition_count(&self) -> usize {
        self.src_set
            .as_deref()
            .map(|set| set.split_whitespace().filter(|t| is_width_descriptor(t)).count())
            .unwrap_or(0)
    }
}

fn is_width_descriptor(token: &str) -> bool {
    let token = token.strip_suffix(',').unwrap_or(token);
    match token.strip_suffix('w') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
