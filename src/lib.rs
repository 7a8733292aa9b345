//! # Simple Photo
//!
//! Turns the build-time output of an image pipeline into something an
//! `<img>` element can bind to directly.
//!
//! An image transformer emits one of two shapes per imported asset: a bare
//! URL (vector graphics, or anything imported without width directives), or
//! an ordered list of `{src, w, h}` renditions. Simple Photo reconciles both
//! into a single contract:
//!
//! ```text
//! "x.svg"                          →  { image: "x.svg" }
//! [{a,400},{b,800},{c,1200}]       →  { image: "c",
//!                                       srcSet: "a 400w, b 800w, c 1200w",
//!                                       sizes: "(min-width: 1024px) 20vw, ..." }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageDescriptor`, `ImageSource`, `NormalizedImage` |
//! | [`imagetools`] | The normalizer: primary source, srcset, sizes hint |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`manifest`] | JSON registry of named images, normalized in bulk |
//! | [`render`] | Maud rendering of `<img>` / linked photos / galleries |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fail Soft, Never Empty
//!
//! Nothing in the normalizer returns an error. Missing input, an empty list,
//! a rendition without a URL or without a width: each one degrades to an
//! absent field. Absent means absent: there is no `src=""`, no half-built
//! `srcset`, and `sizes` never appears without `srcset`. A broken image
//! reference costs one picture, not the page.
//!
//! ## Trust the Pipeline's Order
//!
//! Renditions arrive smallest first. The primary source is the last one and
//! the srcset keeps input order. Pipelines that do not sort can opt into
//! `primary = "widest"` in `config.toml`.
//!
//! ## Shapes as a Sum Type
//!
//! [`types::ImageSource`] is an enum, deserialized untagged from JSON. Every
//! operation matches both variants exhaustively.

pub mod config;
pub mod imagetools;
pub mod manifest;
pub mod output;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
