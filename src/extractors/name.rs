// src/extractors/name.rs
use crate::utils::text::clean_str;
use once_cell::sync::Lazy;
use regex::Regex;

// Leading honorific. "M" needs its period; the others may stand alone but must
// end the token, so surnames such as "Drouot" are left intact.
static HONORIFIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:M|Mme|Mlle|Mr|Ms|Dr)\.\s*|(?:Mme|Mlle|Mr|Ms|Dr)(?:\s+|$))")
        .expect("Failed to compile HONORIFIC_RE")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub first_name: String,
    pub last_name: String,
}

/// Splits a display name into first and last name.
///
/// An all-caps leading token is read as "SURNAME Firstname" and the surname is
/// re-cased ("DUPONT" -> "Dupont"); otherwise the order is "Firstname Surname"
/// and any all-caps surname token is re-cased the same way. This is a
/// heuristic: a multi-word surname that is not in capitals ends up partly in
/// the wrong field.
pub fn parse_name(raw: &str) -> ParsedName {
    let cleaned = clean_str(raw);
    let name = HONORIFIC_RE.replace(&cleaned, "");
    let tokens: Vec<&str> = name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => ParsedName::default(),
        [single] => ParsedName {
            first_name: single.to_string(),
            last_name: String::new(),
        },
        [head, rest @ ..] if is_all_caps(head) => ParsedName {
            first_name: rest.join(" "),
            last_name: recase_surname(head),
        },
        [head, rest @ ..] => ParsedName {
            first_name: head.to_string(),
            last_name: rest
                .iter()
                .map(|token| if is_caps_word(token) { recase_surname(token) } else { token.to_string() })
                .collect::<Vec<_>>()
                .join(" "),
        },
    }
}

fn is_all_caps(token: &str) -> bool {
    token == token.to_uppercase()
}

// All caps with at least one letter, so "06" or "-" stay as they are.
fn is_caps_word(token: &str) -> bool {
    token.chars().any(char::is_alphabetic) && is_all_caps(token)
}

fn recase_surname(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
