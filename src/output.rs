//! CLI output formatting.
//!
//! Each entry leads with its positional index and name; the resolved values
//! follow as indented context lines.
//!
//! ```text
//! Images
//! 001 broken
//!     Image: (none)
//! 002 hero (2 renditions)
//!     Image: /hero-800.webp
//!     Srcset: /hero-400.webp 400w, /hero-800.webp 800w
//!     Link: /gallery/hero
//! 003 placeholder
//!     Image: /assets/placeholder.svg
//!
//! Normalized 3 images: 1 responsive, 1 missing
//! ```
//!
//! `format_*` functions return lines and do no I/O; `print_*` wrappers write
//! them to stdout.

use std::collections::BTreeMap;

use crate::types::NormalizedImage;

/// Longest srcset shown before it is cut with `...`.
const MAX_SRCSET_CHARS: usize = 80;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Entry header: index + name, with the rendition count when responsive.
///
/// ```text
/// 002 hero (3 renditions)
/// 003 placeholder
/// ```
fn entry_header(index: usize, name: &str, renditions: usize) -> String {
    match renditions {
        0 => format!("{} {}", format_index(index), name),
        1 => format!("{} {} (1 rendition)", format_index(index), name),
        n => format!("{} {} ({} renditions)", format_index(index), name, n),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Format the normalized registry as an inventory tree plus a summary line.
pub fn format_normalize_output(images: &BTreeMap<String, NormalizedImage>) -> Vec<String> {
    let mut lines = vec!["Images".to_string()];
    let ctx = indent(1);

    for (i, (name, img)) in images.iter().enumerate() {
        lines.push(entry_header(i + 1, name, img.rendition_count()));
        match &img.image {
            Some(src) => lines.push(format!("{}Image: {}", ctx, src)),
            None => lines.push(format!("{}Image: (none)", ctx)),
        }
        if let Some(set) = &img.src_set {
            lines.push(format!("{}Srcset: {}", ctx, truncate(set, MAX_SRCSET_CHARS)));
        }
        if let Some(link) = &img.link {
            lines.push(format!("{}Link: {}", ctx, link));
        }
    }

    lines.push(String::new());
    lines.push(summary_line(images));
    lines
}

fn summary_line(images: &BTreeMap<String, NormalizedImage>) -> String {
    let responsive = images.values().filter(|i| i.src_set.is_some()).count();
    let missing = images.values().filter(|i| i.image.is_none()).count();
    let noun = if images.len() == 1 { "image" } else { "images" };
    format!(
        "Normalized {} {}: {} responsive, {} missing",
        images.len(),
        noun,
        responsive,
        missing
    )
}

/// Format the result of a `check`: OK line, or one line per missing entry.
pub fn format_check_output(missing: &[&str]) -> Vec<String> {
    if missing.is_empty() {
        return vec!["All images resolved".to_string()];
    }
    let mut lines = vec![format!("{} image(s) without a usable source", missing.len())];
    lines.extend(missing.iter().map(|name| format!("{}{}", indent(1), name)));
    lines
}

/// Print normalize output to stdout.
pub fn print_normalize_output(images: &BTreeMap<String, NormalizedImage>) {
    for line in format_normalize_output(images) {
        println!("{}", line);
    }
}

/// Print check output to stdout.
pub fn print_check_output(missing: &[&str]) {
    for line in format_check_output(missing) {
        println!("{}", line);
    }
}
