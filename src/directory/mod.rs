// src/directory/mod.rs
pub mod client;
pub mod models;
pub mod page;
pub mod snapshot;

use async_trait::async_trait;
use std::time::Duration;
use crate::utils::error::DirectoryError;
use models::ContactEntry;

/// Gives access to the entry blocks of the currently loaded page.
pub trait PageContentProvider {
    fn entries(&self) -> &[ContactEntry];

    /// Raw HTML of the current page, when the source keeps it (debug snapshots).
    fn raw_html(&self) -> Option<&str> {
        None
    }
}

/// Moves through the directory one page at a time.
#[async_trait]
pub trait PageNavigator {
    /// True when an enabled "Next" control exists on the current page.
    fn has_next_page(&self) -> bool;

    async fn advance(&mut self) -> Result<(), DirectoryError>;

    /// Waits for the freshly loaded page to settle.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
