// src/utils/html_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::StorageError;
use regex::Regex;

/// Markers highlighted in debug snapshots of a directory page.
pub const DIRECTORY_DEBUG_PATTERNS: [(&str, &str); 4] = [
    (r#"(?i)<div[^>]*class="[^"]*accordion-item[^"]*\binter\b[^"]*"[^>]*>"#, "entry"),
    (r#"(?i)<[a-z0-9]+[^>]*class="[^"]*inter-item-title[^"]*"[^>]*>"#, "label"),
    (r#"(?i)<[a-z0-9]+[^>]*id="(?:name|mail|mobile|fixe)-[^"]*"[^>]*>"#, "field"),
    (r#"(?i)<a[^>]*aria-label=["']Next["'][^>]*>"#, "next"),
];

/// Saves a HTML document to a file with debug highlights.
/// Highlights are `(start, end, kind)` byte ranges into `html`; overlapping
/// ranges after the first are dropped.
pub fn save_debug_html(html: &str, path: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), StorageError> {
    let mut file = File::create(path)?;

    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
    debug_html.push_str(".highlight-entry { outline: 2px solid #90EE90; }\n");
    debug_html.push_str(".highlight-label { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-field { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-next { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0);

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos || end > html.len() {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "entry" => "highlight-entry",
            "label" => "highlight-label",
            "field" => "highlight-field",
            "next" => "highlight-next",
            _ => "highlight-custom",
        };

        // Markers are emitted as escaped text so the tag itself stays visible.
        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&escape_html(&html[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    debug_html.push_str("\n</body>\n</html>");

    file.write_all(debug_html.as_bytes())?;

    tracing::debug!("Saved debug HTML to {}", path.display());
    Ok(())
}

/// Creates a debug copy of `html` with every match of `patterns` highlighted.
pub fn create_debug_html(html: &str, path: &Path, patterns: &[(&str, &str)]) -> Result<(), StorageError> {
    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            StorageError::SerializationError(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, path, &highlights)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
