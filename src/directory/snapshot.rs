// src/directory/snapshot.rs
use crate::directory::models::{ContactEntry, DirectoryPage};
use crate::directory::page::parse_directory_page;
use crate::directory::{PageContentProvider, PageNavigator};
use crate::utils::error::DirectoryError;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory pages saved to disk, visited in order.
///
/// A snapshot only leads to the next one when it still shows an enabled
/// "Next" control, so a saved series behaves like the live pagination.
pub struct SnapshotDirectory {
    paths: Vec<PathBuf>,
    index: usize,
    current_html: String,
    page: DirectoryPage,
}

impl SnapshotDirectory {
    /// Uses the given files in the given order.
    pub fn from_files(paths: Vec<PathBuf>) -> Result<Self, DirectoryError> {
        let first = paths.first().ok_or(DirectoryError::NoPages)?;
        let current_html = read_snapshot(first)?;
        let page = parse_directory_page(&current_html);

        tracing::info!("Loaded {} directory snapshots", paths.len());
        Ok(Self { paths, index: 0, current_html, page })
    }

    /// Uses every `*.html` / `*.htm` file of `dir`, sorted by file name.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DirectoryError> {
        let dir = dir.as_ref();
        let read_dir = fs::read_dir(dir).map_err(|source| DirectoryError::Snapshot {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| DirectoryError::Snapshot {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_html = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
                .unwrap_or(false);
            if path.is_file() && is_html {
                paths.push(path);
            }
        }
        paths.sort();

        Self::from_files(paths)
    }

    pub fn current_path(&self) -> &Path {
        &self.paths[self.index]
    }
}

fn read_snapshot(path: &Path) -> Result<String, DirectoryError> {
    tracing::debug!("Reading snapshot {}", path.display());
    fs::read_to_string(path).map_err(|source| DirectoryError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

impl PageContentProvider for SnapshotDirectory {
    fn entries(&self) -> &[ContactEntry] {
        &self.page.entries
    }

    fn raw_html(&self) -> Option<&str> {
        Some(&self.current_html)
    }
}

#[async_trait]
impl PageNavigator for SnapshotDirectory {
    fn has_next_page(&self) -> bool {
        self.page.has_next() && self.index + 1 < self.paths.len()
    }

    async fn advance(&mut self) -> Result<(), DirectoryError> {
        let next = self.index + 1;
        let path = self.paths.get(next).ok_or(DirectoryError::NoPages)?;
        let html = read_snapshot(path)?;

        self.page = parse_directory_page(&html);
        self.current_html = html;
        self.index = next;
        tracing::debug!("Advanced to snapshot {}", self.current_path().display());
        Ok(())
    }
}
