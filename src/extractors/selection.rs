// src/extractors/selection.rs
use crate::directory::models::{Category, ContactRecord};

/// How many `Other` contacts are kept in the final sample.
pub const OTHER_SAMPLE_SIZE: usize = 3;

/// Every `Targeted` record, then the first `OTHER_SAMPLE_SIZE` `Other` ones,
/// each group in encounter order.
pub fn select_sample(records: Vec<ContactRecord>) -> Vec<ContactRecord> {
    let (targeted, other): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.category() == Category::Targeted);

    targeted
        .into_iter()
        .chain(other.into_iter().take(OTHER_SAMPLE_SIZE))
        .collect()
}

/// Summary line shown next to the JSON sample.
/// The announced `Other` count is always `OTHER_SAMPLE_SIZE`, even when fewer
/// were available.
pub fn summary_line(sample: &[ContactRecord]) -> String {
    format!("{} contact(s) (including {} \"Other\")", sample.len(), OTHER_SAMPLE_SIZE)
}
