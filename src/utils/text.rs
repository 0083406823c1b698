// src/utils/text.rs
//! Text helpers shared by the name parser and the record extractor.
//!
//! Directory content is free-form French text typed by humans, so every
//! comparison goes through [`normalize`], which folds case and strips accents.
//! [`normalize`] output is only ever used for matching and identity keys; it
//! is never written to a record.

use unicode_normalization::UnicodeNormalization;

/// Trims and collapses every whitespace run to a single space.
/// `None` yields an empty string.
pub fn clean(text: Option<&str>) -> String {
    match text {
        Some(t) => clean_str(t),
        None => String::new(),
    }
}

pub fn clean_str(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans the text, then keeps only ASCII digits and `+`.
pub fn digits_only(text: Option<&str>) -> String {
    clean(text)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Cleans, decomposes (NFD), drops combining diacritical marks and lower-cases.
pub fn normalize(text: &str) -> String {
    clean_str(text)
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect::<String>()
        .to_lowercase()
}

// Combining Diacritical Marks block.
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
