// src/extractors/contact.rs
use crate::directory::models::{Category, ContactEntry, ContactRecord, IdentityKey};
use crate::extractors::name::parse_name;
use crate::utils::text::{clean, digits_only, normalize};
use std::collections::HashSet;

/// Job-title keywords that make a contact `Targeted`.
pub const DEFAULT_KEYWORDS: [&str; 4] = ["direction", "gerant", "dirigeant", "ressource"];

const FONCTION_LABEL: &str = "fonction";

/// Turns the entry blocks of one page into classified contact records.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    keywords: Vec<String>, // normalized
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl RecordExtractor {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| normalize(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Extracts records in document order. `seen` spans the whole run, so an
    /// identity met on an earlier page is skipped here too.
    pub fn extract(&self, entries: &[ContactEntry], seen: &mut HashSet<IdentityKey>) -> Vec<ContactRecord> {
        let mut records = Vec::new();

        for (position, entry) in entries.iter().enumerate() {
            let Some(fonction) = fonction_of(entry) else {
                tracing::debug!("Skipping entry #{}: no 'Fonction' attribute", position + 1);
                continue;
            };

            let record = self.build_record(entry, fonction);
            if !seen.insert(record.identity().clone()) {
                tracing::debug!("Skipping duplicate contact #{}: {:?}", position + 1, record.identity());
                continue;
            }
            tracing::debug!(
                "Contact #{}: {} {} <{}> mobile={} fixe={} fonction='{}' ({:?})",
                position + 1,
                record.first_name(),
                record.last_name(),
                record.email(),
                record.mobile(),
                record.fixe(),
                record.fonction(),
                record.category()
            );
            records.push(record);
        }

        records
    }

    pub fn classify(&self, fonction: &str) -> Category {
        let fonction = normalize(fonction);
        if self.keywords.iter().any(|k| fonction.contains(k.as_str())) {
            Category::Targeted
        } else {
            Category::Other
        }
    }

    fn build_record(&self, entry: &ContactEntry, fonction: String) -> ContactRecord {
        let category = self.classify(&fonction);
        let name = parse_name(entry.name.as_deref().unwrap_or_default());

        ContactRecord::new(
            name.first_name,
            name.last_name,
            email_of(entry),
            digits_only(entry.mobile.as_deref()),
            digits_only(entry.fixe.as_deref()),
            fonction,
            category,
        )
    }
}

/// Cleaned value of the first attribute labelled "Fonction...", if non-empty.
fn fonction_of(entry: &ContactEntry) -> Option<String> {
    entry
        .attributes
        .iter()
        .find(|(label, _)| normalize(label).starts_with(FONCTION_LABEL))
        .map(|(_, value)| clean(Some(value.as_str())))
        .filter(|value| !value.is_empty())
}

/// Address from a `mailto:` link target, otherwise from the display text.
/// Other hrefs (`#`, `javascript:...`) are click handlers, not addresses.
fn email_of(entry: &ContactEntry) -> String {
    let href = clean(entry.email_href.as_deref());
    let raw = match strip_mailto(&href) {
        Some(address) => address,
        None => clean(entry.email_text.as_deref()),
    };
    let raw = strip_mailto(&raw).unwrap_or(raw);
    raw.split('?').next().unwrap_or_default().trim().to_string()
}

/// The part after a case-insensitive `mailto:` scheme, `None` without one.
fn strip_mailto(raw: &str) -> Option<String> {
    match raw.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("mailto:") => Some(raw[7..].trim_start().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, email: &str, fonction: &str) -> ContactEntry {
        ContactEntry {
            name: Some(name.to_string()),
            email_text: Some(email.to_string()),
            attributes: vec![("Fonction".to_string(), fonction.to_string())],
            ..Default::default()
        }
    }

    #[test]
    fn test_classification_by_keyword() {
        let extractor = RecordExtractor::default();
        assert_eq!(extractor.classify("Direction Générale"), Category::Targeted);
        assert_eq!(extractor.classify("Dirigeant fondateur"), Category::Targeted);
        assert_eq!(extractor.classify("Direction financière"), Category::Targeted);
        assert_eq!(extractor.classify("GÉRANT"), Category::Targeted);
        assert_eq!(extractor.classify("Responsable Ressources Humaines"), Category::Targeted);
        assert_eq!(extractor.classify("Assistant Commercial"), Category::Other);
    }

    #[test]
    fn test_directeur_needs_an_extra_keyword() {
        // "directeur" contains neither "direction" nor "dirigeant"
        assert_eq!(RecordExtractor::default().classify("Directeur Général"), Category::Other);

        let extended = RecordExtractor::new(DEFAULT_KEYWORDS.iter().copied().chain(["directeur"]));
        assert_eq!(extended.classify("Directeur Général"), Category::Targeted);
    }

    #[test]
    fn test_entry_without_fonction_is_skipped() {
        let extractor = RecordExtractor::default();
        let mut no_label = entry("Jean Dupont", "jean@exemple.fr", "Gérant");
        no_label.attributes = vec![("Service".to_string(), "Achats".to_string())];
        let empty_value = entry("Paul Petit", "paul@exemple.fr", "   ");

        let records = extractor.extract(&[no_label, empty_value], &mut HashSet::new());
        assert!(records.is_empty());
    }

    #[test]
    fn test_fonction_label_is_matched_loosely() {
        let extractor = RecordExtractor::default();
        let mut e = entry("Jean Dupont", "", "ignored");
        e.attributes = vec![
            ("Société".to_string(), "ACME".to_string()),
            ("  FONCTION  :".to_string(), "  Gérant   associé ".to_string()),
            ("Fonction secondaire".to_string(), "Comptable".to_string()),
        ];

        let records = extractor.extract(&[e], &mut HashSet::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fonction(), "Gérant associé");
        assert_eq!(records[0].category(), Category::Targeted);
    }

    #[test]
    fn test_fields_are_normalized_and_optional() {
        let extractor = RecordExtractor::default();
        let e = ContactEntry {
            name: Some("  M.  Jean   DUPONT ".to_string()),
            email_href: Some("MAILTO:Jean.Dupont@Exemple.fr".to_string()),
            email_text: Some("Écrire".to_string()),
            mobile: Some("+33 6 12 34 56 78".to_string()),
            fixe: None,
            attributes: vec![("Fonction".to_string(), "Dirigeant".to_string())],
        };

        let records = extractor.extract(&[e], &mut HashSet::new());
        let r = &records[0];
        assert_eq!(r.first_name(), "Jean");
        assert_eq!(r.last_name(), "Dupont");
        assert_eq!(r.email(), "Jean.Dupont@Exemple.fr");
        assert_eq!(r.mobile(), "+33612345678");
        assert_eq!(r.fixe(), "");
    }

    #[test]
    fn test_email_falls_back_to_display_text() {
        let extractor = RecordExtractor::default();
        let mut e = entry("Marie Curie", " mailto:marie@exemple.fr ", "Assistante");
        e.email_href = Some("   ".to_string());

        let records = extractor.extract(&[e], &mut HashSet::new());
        assert_eq!(records[0].email(), "marie@exemple.fr");
    }

    #[test]
    fn test_non_mailto_href_uses_display_text() {
        let extractor = RecordExtractor::default();
        let mut anchor = entry("Jean Dupont", "jean@exemple.fr", "Gérant");
        anchor.email_href = Some("#".to_string());
        let mut script = entry("Anne Roux", "anne@exemple.fr", "Vendeuse");
        script.email_href = Some("javascript:void(0)".to_string());

        let records = extractor.extract(&[anchor, script], &mut HashSet::new());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email(), "jean@exemple.fr");
        assert_eq!(records[1].email(), "anne@exemple.fr");
    }

    #[test]
    fn test_mailto_query_is_dropped() {
        let extractor = RecordExtractor::default();
        let mut e = entry("Jean Dupont", "Écrire", "Gérant");
        e.email_href = Some("mailto:jean@exemple.fr?subject=Contact&cc=x@y.fr".to_string());
        let mut text_only = entry("Anne Roux", "mailto:anne@exemple.fr?subject=Bonjour", "Vendeuse");
        text_only.email_href = None;

        let records = extractor.extract(&[e, text_only], &mut HashSet::new());
        assert_eq!(records[0].email(), "jean@exemple.fr");
        assert_eq!(records[1].email(), "anne@exemple.fr");
    }

    #[test]
    fn test_duplicate_emails_keep_first_occurrence() {
        let extractor = RecordExtractor::default();
        let entries = vec![
            entry("Jean Dupont", "Jean.Dupont@exemple.fr", "Gérant"),
            entry("J. Dupont", "  jean.dupont@EXEMPLE.fr ", "Assistant"),
        ];

        let records = extractor.extract(&entries, &mut HashSet::new());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name(), "Jean");
        assert_eq!(records[0].fonction(), "Gérant");
    }

    #[test]
    fn test_composite_key_without_email() {
        let extractor = RecordExtractor::default();
        let mut a = entry("Hélène MARTIN", "", "Comptable");
        a.mobile = Some("06 11 22 33 44".to_string());
        let mut same = entry("helene martin", "", "Comptable");
        same.mobile = Some("0611223344".to_string());
        let mut other_phone = entry("Hélène MARTIN", "", "Comptable");
        other_phone.mobile = Some("06 99 99 99 99".to_string());

        let records = extractor.extract(&[a, same, other_phone], &mut HashSet::new());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_seen_set_is_shared_across_calls() {
        let extractor = RecordExtractor::default();
        let mut seen = HashSet::new();

        let first_page = extractor.extract(&[entry("Jean Dupont", "jean@exemple.fr", "Gérant")], &mut seen);
        let second_page = extractor.extract(
            &[
                entry("Jean Dupont", "JEAN@exemple.fr", "Gérant"),
                entry("Anne Roux", "anne@exemple.fr", "Vendeuse"),
            ],
            &mut seen,
        );

        assert_eq!(first_page.len(), 1);
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].email(), "anne@exemple.fr");
    }

    #[test]
    fn test_custom_keywords_are_normalized() {
        let extractor = RecordExtractor::new(["Comptabilité", " "]);
        assert_eq!(extractor.keywords(), &["comptabilite".to_string()]);
        assert_eq!(extractor.classify("Chef COMPTABILITE"), Category::Targeted);
        assert_eq!(extractor.classify("Gérant"), Category::Other);
    }
}
