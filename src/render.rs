//! HTML rendering of normalized images.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every attribute is escaped and
//! optional attributes simply disappear when absent. An image without a
//! primary source renders as nothing at all, never as `<img src="">`.

use maud::{Markup, html};
use std::collections::BTreeMap;

use crate::config::RenderConfig;
use crate::types::NormalizedImage;

/// Render a bare `<img>` element.
pub fn render_img(photo: &NormalizedImage, alt: &str, config: &RenderConfig) -> Markup {
    html! {
        @if let Some(src) = &photo.image {
            img
                src=(src)
                srcset=[photo.src_set.as_deref()]
                sizes=[photo.sizes.as_deref()]
                alt=(alt)
                loading=(config.loading.as_str())
                class=[config.class.as_deref()];
        }
    }
}

/// Render an `<img>`, wrapped in `<a>` when the photo has a link.
pub fn render_photo(photo: &NormalizedImage, alt: &str, config: &RenderConfig) -> Markup {
    let img = render_img(photo, alt, config);
    match (&photo.image, &photo.link) {
        (None, _) => html! {},
        (Some(_), Some(link)) => html! { a href=(link) { (img) } },
        (Some(_), None) => img,
    }
}

/// Render every photo in a `div.gallery`, using the entry name as alt text.
/// Entries without an image are skipped.
pub fn render_gallery(
    photos: &BTreeMap<String, NormalizedImage>,
    config: &RenderConfig,
) -> Markup {
    html! {
        div.gallery {
            @for (name, photo) in photos {
                @if photo.image.is_some() {
                    figure.photo {
                        (render_photo(photo, name, config))
                    }
                }
            }
        }
    }
}
