// src/directory/models.rs
use serde::Serialize;
use crate::utils::text::normalize;

/// Raw fields of one contact entry block, as found on the page.
/// Every field is optional; only the `fonction` attribute decides whether the
/// entry becomes a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactEntry {
    pub name: Option<String>,
    pub email_href: Option<String>, // link target of the mail anchor
    pub email_text: Option<String>, // display text of the mail field
    pub mobile: Option<String>,
    pub fixe: Option<String>,
    pub attributes: Vec<(String, String)>, // (label, value) in document order
}

/// Everything extracted from one loaded directory page.
#[derive(Debug, Clone, Default)]
pub struct DirectoryPage {
    pub entries: Vec<ContactEntry>,
    /// Set only when an enabled "Next" control exists. The href may be empty.
    pub next_href: Option<String>,
}

impl DirectoryPage {
    pub fn has_next(&self) -> bool {
        self.next_href.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Targeted,
    Other,
}

/// Deduplication key of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Email(String),
    Composite {
        first: String,
        last: String,
        mobile: String,
        fixe: String,
    },
}

/// One extracted contact. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    first_name: String,
    last_name: String,
    email: String,
    mobile: String,
    fixe: String,
    fonction: String,
    category: Category,
    #[serde(skip)]
    identity: IdentityKey,
}

impl ContactRecord {
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        mobile: String,
        fixe: String,
        fonction: String,
        category: Category,
    ) -> Self {
        let identity = if email.is_empty() {
            IdentityKey::Composite {
                first: normalize(&first_name),
                last: normalize(&last_name),
                mobile: mobile.clone(),
                fixe: fixe.clone(),
            }
        } else {
            IdentityKey::Email(normalize(&email))
        };

        Self { first_name, last_name, email, mobile, fixe, fonction, category, identity }
    }

    pub fn category(&self) -> Category { self.category }
    pub fn identity(&self) -> &IdentityKey { &self.identity }
    pub fn first_name(&self) -> &str { &self.first_name }
    pub fn last_name(&self) -> &str { &self.last_name }
    pub fn email(&self) -> &str { &self.email }
    pub fn mobile(&self) -> &str { &self.mobile }
    pub fn fixe(&self) -> &str { &self.fixe }
    pub fn fonction(&self) -> &str { &self.fonction }
}
