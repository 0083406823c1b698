// src/directory/client.rs
use crate::directory::models::{ContactEntry, DirectoryPage};
use crate::directory::page::parse_directory_page;
use crate::directory::{PageContentProvider, PageNavigator};
use crate::utils::error::DirectoryError;
use async_trait::async_trait;
use reqwest::{header, Url};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout: Duration,
    /// Extra request headers, each written as "Name: value".
    pub headers: Vec<String>,
    /// Raw `Cookie` header value, e.g. a logged-in session copied from a browser.
    pub cookie: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: Vec::new(),
            cookie: None,
        }
    }
}

/// Live directory reached over HTTP. Pagination follows the href of the
/// enabled "Next" link, resolved against the current page URL.
pub struct HttpDirectory {
    client: reqwest::Client,
    current_url: Url,
    current_html: String,
    page: DirectoryPage,
}

/// Creates a reqwest client configured for directory browsing.
fn build_directory_client(settings: &HttpSettings) -> Result<reqwest::Client, DirectoryError> {
    let client = reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout)
        .default_headers(default_headers(settings)?)
        .build()?;
    Ok(client)
}

/// Headers sent with every request: the `--header` entries, then the cookie.
fn default_headers(settings: &HttpSettings) -> Result<header::HeaderMap, DirectoryError> {
    let mut headers = header::HeaderMap::new();
    for raw in &settings.headers {
        let (name, value) = parse_header(raw)?;
        headers.append(name, value);
    }
    if let Some(cookie) = settings.cookie.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        let value = header::HeaderValue::from_str(cookie)
            .map_err(|e| DirectoryError::InvalidHeader(format!("Cookie: {}", e)))?;
        headers.insert(header::COOKIE, value);
    }
    Ok(headers)
}

/// Parses a "Name: value" header line.
pub fn parse_header(raw: &str) -> Result<(header::HeaderName, header::HeaderValue), DirectoryError> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| DirectoryError::InvalidHeader(format!("'{}' is not 'Name: value'", raw)))?;

    let name = header::HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| DirectoryError::InvalidHeader(format!("'{}': {}", raw, e)))?;
    let value = header::HeaderValue::from_str(value.trim())
        .map_err(|e| DirectoryError::InvalidHeader(format!("'{}': {}", raw, e)))?;
    Ok((name, value))
}

impl HttpDirectory {
    /// Downloads the first page of the directory.
    pub async fn open(start_url: &str, settings: &HttpSettings) -> Result<Self, DirectoryError> {
        let url = Url::parse(start_url)
            .map_err(|e| DirectoryError::InvalidUrl(format!("{}: {}", start_url, e)))?;
        let client = build_directory_client(settings)?;

        tracing::debug!(
            "Using User-Agent: {} ({} extra header(s), cookie: {})",
            settings.user_agent,
            settings.headers.len(),
            settings.cookie.is_some()
        );
        let html = download_page(&client, &url).await?;
        let page = parse_directory_page(&html);

        Ok(Self { client, current_url: url, current_html: html, page })
    }

    pub fn current_url(&self) -> &Url {
        &self.current_url
    }
}

impl PageContentProvider for HttpDirectory {
    fn entries(&self) -> &[ContactEntry] {
        &self.page.entries
    }

    fn raw_html(&self) -> Option<&str> {
        Some(&self.current_html)
    }
}

#[async_trait]
impl PageNavigator for HttpDirectory {
    fn has_next_page(&self) -> bool {
        self.page.has_next()
    }

    async fn advance(&mut self) -> Result<(), DirectoryError> {
        let href = self.page.next_href.clone().unwrap_or_default();
        let next_url = resolve_next_url(&self.current_url, &href)?;

        let html = download_page(&self.client, &next_url).await?;
        self.page = parse_directory_page(&html);
        self.current_html = html;
        self.current_url = next_url;
        Ok(())
    }
}

/// Resolves a "Next" href against the page it was found on.
/// Fragment-only and `javascript:` links are client-side handlers and cannot
/// be followed without a browser.
pub fn resolve_next_url(current: &Url, href: &str) -> Result<Url, DirectoryError> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.to_ascii_lowercase().starts_with("javascript:") {
        return Err(DirectoryError::NoNextLink(href.to_string()));
    }

    current
        .join(href)
        .map_err(|e| DirectoryError::InvalidUrl(format!("{}: {}", href, e)))
}

/// Downloads one directory page as text.
async fn download_page(client: &reqwest::Client, url: &Url) -> Result<String, DirectoryError> {
    tracing::info!("Downloading directory page: {}", url);

    let response = client
        .get(url.clone())
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!("Received 403 Forbidden - check --user-agent, or pass the session with --cookie.");
            return Err(DirectoryError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DirectoryError::PageNotFound(url.to_string()));
        }
        return Err(DirectoryError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
