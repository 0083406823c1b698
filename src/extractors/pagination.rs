// src/extractors/pagination.rs
use crate::directory::models::ContactRecord;
use crate::directory::{PageContentProvider, PageNavigator};
use crate::extractors::contact::RecordExtractor;
use crate::utils::html_debug::{create_debug_html, DIRECTORY_DEBUG_PATTERNS};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SETTLE_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone)]
pub struct PaginationSettings {
    /// Pause after each page change, before the next scan.
    pub settle_delay: Duration,
    /// Stop after this many pages. `None` follows the pagination to its end.
    pub max_pages: Option<usize>,
    /// When set, every scanned page is saved there as annotated HTML.
    pub debug_dir: Option<PathBuf>,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            max_pages: None,
            debug_dir: None,
        }
    }
}

#[derive(Debug)]
pub struct CrawlOutcome {
    pub records: Vec<ContactRecord>,
    pub pages_scanned: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning { page: usize },
    Done { pages: usize },
}

/// Scans page after page until no enabled "Next" control remains.
pub struct PaginationDriver {
    extractor: RecordExtractor,
    settings: PaginationSettings,
}

impl PaginationDriver {
    pub fn new(extractor: RecordExtractor, settings: PaginationSettings) -> Self {
        Self { extractor, settings }
    }

    pub async fn run<S>(&self, source: &mut S) -> CrawlOutcome
    where
        S: PageContentProvider + PageNavigator + Send + Sync,
    {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        let mut state = ScanState::Scanning { page: 1 };

        while let ScanState::Scanning { page } = state {
            tracing::info!("Scanning page {}", page);
            self.save_debug_snapshot(&*source, page);

            let found = self.extractor.extract(source.entries(), &mut seen);
            tracing::info!(
                "Page {}: {} entry blocks, {} new contacts ({} total)",
                page,
                source.entries().len(),
                found.len(),
                records.len() + found.len()
            );
            records.extend(found);

            state = self.next_state(source, page).await;
        }

        let pages_scanned = match state {
            ScanState::Done { pages } => pages,
            ScanState::Scanning { page } => page,
        };
        tracing::info!("Pagination finished after {} page(s), {} unique contacts", pages_scanned, records.len());

        CrawlOutcome { records, pages_scanned }
    }

    async fn next_state<S>(&self, source: &mut S, page: usize) -> ScanState
    where
        S: PageNavigator + Send + Sync,
    {
        if self.settings.max_pages.is_some_and(|max| page >= max) {
            tracing::info!("Reached the page limit ({})", page);
            return ScanState::Done { pages: page };
        }
        if !source.has_next_page() {
            tracing::info!("No enabled next-page control, done");
            return ScanState::Done { pages: page };
        }

        if let Err(e) = source.advance().await {
            tracing::warn!("Could not advance past page {}: {}", page, e);
            return ScanState::Done { pages: page };
        }
        source.pause(self.settings.settle_delay).await;

        ScanState::Scanning { page: page + 1 }
    }

    fn save_debug_snapshot<S: PageContentProvider>(&self, source: &S, page: usize) {
        let (Some(dir), Some(html)) = (&self.settings.debug_dir, source.raw_html()) else {
            return;
        };

        let path = dir.join(format!("page_{:03}.html", page));
        let saved = std::fs::create_dir_all(dir)
            .map_err(Into::into)
            .and_then(|_| create_debug_html(html, &path, &DIRECTORY_DEBUG_PATTERNS));
        match saved {
            Ok(()) => tracing::info!("Saved annotated page to {}", path.display()),
            Err(e) => tracing::warn!("Failed to save debug snapshot {}: {}", path.display(), e),
        }
    }
}
