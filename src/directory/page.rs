// src/directory/page.rs

// --- Imports ---
use crate::directory::models::{ContactEntry, DirectoryPage};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
// One accordion item per contact ("interlocuteur")
static ENTRY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".accordion-item.inter").expect("Failed to compile ENTRY_SELECTOR")
});

// Attribute labels; the value is the label's next element sibling
static ATTRIBUTE_LABEL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".inter-item-title").expect("Failed to compile ATTRIBUTE_LABEL_SELECTOR")
});

static NAME_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[id^='name-']").expect("Failed to compile NAME_SELECTOR")
});

// Header button, used when the name has no dedicated element
static NAME_FALLBACK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".accordion-button").expect("Failed to compile NAME_FALLBACK_SELECTOR")
});

static MAIL_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[id^='mail-'] a").expect("Failed to compile MAIL_LINK_SELECTOR")
});

static MAIL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[id^='mail-']").expect("Failed to compile MAIL_SELECTOR")
});

static MOBILE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[id^='mobile-']").expect("Failed to compile MOBILE_SELECTOR")
});

static FIXE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("[id^='fixe-']").expect("Failed to compile FIXE_SELECTOR")
});

// Enabled pagination control only; a disabled <li> hides the link
static NEXT_CONTROL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("li.page-item:not(.disabled) a[aria-label='Next']")
        .expect("Failed to compile NEXT_CONTROL_SELECTOR")
});

/// Parses one directory page into its contact entries and next-page link.
pub fn parse_directory_page(html_content: &str) -> DirectoryPage {
    let document = Html::parse_document(html_content);

    let entries: Vec<ContactEntry> = document
        .select(&ENTRY_SELECTOR)
        .map(entry_from_element)
        .collect();

    let next_href = document
        .select(&NEXT_CONTROL_SELECTOR)
        .next()
        .map(|a| a.value().attr("href").unwrap_or_default().trim().to_string());

    tracing::debug!("Parsed {} entry blocks, next control: {:?}", entries.len(), next_href);

    DirectoryPage { entries, next_href }
}

fn entry_from_element(item: ElementRef) -> ContactEntry {
    let name_el = item
        .select(&NAME_SELECTOR)
        .next()
        .or_else(|| item.select(&NAME_FALLBACK_SELECTOR).next());

    let mail_el = item
        .select(&MAIL_LINK_SELECTOR)
        .next()
        .or_else(|| item.select(&MAIL_SELECTOR).next());

    ContactEntry {
        name: name_el.map(element_text),
        email_href: mail_el.and_then(|el| el.value().attr("href")).map(str::to_string),
        email_text: mail_el.map(element_text),
        mobile: item.select(&MOBILE_SELECTOR).next().map(element_text),
        fixe: item.select(&FIXE_SELECTOR).next().map(element_text),
        attributes: attributes_of(item),
    }
}

fn attributes_of(item: ElementRef) -> Vec<(String, String)> {
    item.select(&ATTRIBUTE_LABEL_SELECTOR)
        .map(|label| {
            let value = label
                .next_siblings()
                .find_map(ElementRef::wrap)
                .map(element_text)
                .unwrap_or_default();
            (element_text(label), value)
        })
        .collect()
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <!DOCTYPE html>
        <html><body>
        <div class="accordion">
          <div class="accordion-item inter">
            <h2 class="accordion-header">
              <button class="accordion-button"><span id="name-101">M. Jean DUPONT</span></button>
            </h2>
            <div class="accordion-body">
              <div><span class="inter-item-title">Service</span><span>Siège</span></div>
              <div><span class="inter-item-title">Fonction :</span> <span>Directeur Général</span></div>
              <div id="mail-101"><a href="mailto:Jean.Dupont@exemple.fr">jean.dupont@exemple.fr</a></div>
              <div id="mobile-101">+33 6 12 34 56 78</div>
              <div id="fixe-101">01 40 00 00 00</div>
            </div>
          </div>
          <div class="accordion-item inter">
            <h2 class="accordion-header"><button class="accordion-button">Marie Curie</button></h2>
            <div class="accordion-body">
              <div><span class="inter-item-title">Fonction</span><span>Assistant Commercial</span></div>
              <div id="mail-102">marie@exemple.fr</div>
            </div>
          </div>
          <div class="accordion-item">
            <button class="accordion-button">Not a contact</button>
          </div>
        </div>
        <ul class="pagination">
          <li class="page-item disabled"><a aria-label="Previous" href="#">«</a></li>
          <li class="page-item"><a aria-label="Next" href="/annuaire?page=2">»</a></li>
        </ul>
        </body></html>
    "##;

    #[test]
    fn test_parse_entries_and_fields() {
        let page = parse_directory_page(PAGE);
        assert_eq!(page.entries.len(), 2, "only .accordion-item.inter blocks are entries");

        let first = &page.entries[0];
        assert_eq!(first.name.as_deref(), Some("M. Jean DUPONT"));
        assert_eq!(first.email_href.as_deref(), Some("mailto:Jean.Dupont@exemple.fr"));
        assert_eq!(first.email_text.as_deref(), Some("jean.dupont@exemple.fr"));
        assert_eq!(first.mobile.as_deref(), Some("+33 6 12 34 56 78"));
        assert_eq!(first.fixe.as_deref(), Some("01 40 00 00 00"));
        assert_eq!(
            first.attributes,
            vec![
                ("Service".to_string(), "Siège".to_string()),
                ("Fonction :".to_string(), "Directeur Général".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_falls_back_to_accordion_button() {
        let page = parse_directory_page(PAGE);
        let second = &page.entries[1];
        assert_eq!(second.name.as_deref(), Some("Marie Curie"));
        assert_eq!(second.email_href, None);
        assert_eq!(second.email_text.as_deref(), Some("marie@exemple.fr"));
        assert_eq!(second.mobile, None);
        assert_eq!(second.fixe, None);
    }

    #[test]
    fn test_enabled_next_control_is_detected() {
        let page = parse_directory_page(PAGE);
        assert!(page.has_next());
        assert_eq!(page.next_href.as_deref(), Some("/annuaire?page=2"));
    }

    #[test]
    fn test_disabled_next_control_ends_pagination() {
        let html = r##"<html><body><ul>
            <li class="page-item"><a aria-label="Previous" href="?page=1">«</a></li>
            <li class="page-item disabled"><a aria-label="Next" href="#">»</a></li>
        </ul></body></html>"##;
        let page = parse_directory_page(html);
        assert!(!page.has_next());
        assert!(page.entries.is_empty());
    }

    #[test]
    fn test_next_control_without_href_is_still_present() {
        let html = r#"<html><body><ul><li class="page-item"><a aria-label="Next">»</a></li></ul></body></html>"#;
        let page = parse_directory_page(html);
        assert_eq!(page.next_href.as_deref(), Some(""));
    }
}
