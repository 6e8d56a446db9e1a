//! Fetches Disconnect's tracker list and writes the domains of one category (by default
//! "Content") to a newline-delimited blocklist file.
//!
//! ```no_run
//! # async fn run() -> Result<(), disconnect_content::DisconnectError> {
//! let domains = disconnect_content::fetch_content_domains().await?;
//! println!("{} content domains", domains.len());
//! # Ok(())
//! # }
//! ```

pub mod blocklist;
pub mod error;
pub mod fetcher;
pub mod list;
pub mod logging;

pub use blocklist::{ write_blocklist, DEFAULT_OUTPUT };
pub use error::{ DisconnectError, Result };
pub use fetcher::Fetcher;
pub use list::{ DomainGroup, GroupSelection, SiteEntry, TrackerList };

use std::path::PathBuf;
use tracing::info;
use url::Url;

pub const DISCONNECT_URL: &str = "https://services.disconnect.me/disconnect-plaintext.json";

pub const CONTENT_CATEGORY: &str = "Content";

/// Downloads the list from [`DISCONNECT_URL`], writes the "Content" domains to
/// [`DEFAULT_OUTPUT`] in the current directory and returns them.
///
/// On failure the output file is not created or truncated; an existing one is left as is.
pub async fn fetch_content_domains() -> Result<Vec<String>> {
    ContentFetcherBuilder::new().build()?.run().await
}

/// Configures a [`ContentFetcher`]; defaults reproduce [`fetch_content_domains`].
pub struct ContentFetcherBuilder {
    url: String,
    category: String,
    output: PathBuf,
    selection: GroupSelection,
    timeout: Option<u64>,
}

impl ContentFetcherBuilder {
    pub fn new() -> Self {
        ContentFetcherBuilder {
            url: DISCONNECT_URL.to_string(),
            category: CONTENT_CATEGORY.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            selection: GroupSelection::default(),
            timeout: None,
        }
    }

    pub fn url(mut self, url: String) -> Self {
        self.url = url;
        self
    }

    pub fn category(mut self, category: String) -> Self {
        self.category = category;
        self
    }

    pub fn output(mut self, output: PathBuf) -> Self {
        self.output = output;
        self
    }

    pub fn selection(mut self, selection: GroupSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Request timeout in seconds. Unset by default.
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the URL and builds the HTTP client.
    pub fn build(self) -> Result<ContentFetcher> {
        Ok(ContentFetcher {
            url: Url::parse(&self.url)?,
            category: self.category,
            output: self.output,
            selection: self.selection,
            fetcher: Fetcher::new(self.timeout)?,
        })
    }
}

impl Default for ContentFetcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A configured fetch-flatten-write pipeline, built by [`ContentFetcherBuilder`].
pub struct ContentFetcher {
    url: Url,
    category: String,
    output: PathBuf,
    selection: GroupSelection,
    fetcher: Fetcher,
}

impl ContentFetcher {
    /// Downloads and decodes the list without writing anything.
    pub async fn fetch_list(&self) -> Result<TrackerList> {
        self.fetcher.fetch(&self.url).await
    }

    /// Fetches the list, flattens the configured category and writes the output file.
    ///
    /// The file is only written once every site has been flattened, so a failed run
    /// leaves a previous output in place.
    pub async fn run(&self) -> Result<Vec<String>> {
        let list = self.fetch_list().await?;
        let domains = list.category_domains(&self.category, self.selection)?;

        write_blocklist(&self.output, &domains)?;
        info!(
            category = %self.category,
            domains = domains.len(),
            output = %self.output.display(),
            "blocklist written"
        );

        Ok(domains)
    }

    pub fn output(&self) -> &std::path::Path {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{ Mock, Server, ServerGuard };
    use std::fs;

    const SAMPLE: &str =
        r#"{"categories":{"Content":[{"provider":{"group":["a.com","b.com"]}}]}}"#;

    // The mock is removed when dropped, so callers keep it alive alongside the server.
    async fn serve(status: usize, body: &str) -> (ServerGuard, Mock) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/disconnect-plaintext.json")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async().await;
        (server, mock)
    }

    fn fetcher_for(server: &ServerGuard, output: PathBuf) -> ContentFetcher {
        ContentFetcherBuilder::new()
            .url(format!("{}/disconnect-plaintext.json", server.url()))
            .output(output)
            .timeout(5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let fetcher = ContentFetcherBuilder::new().build().unwrap();

        assert_eq!(fetcher.url.as_str(), DISCONNECT_URL);
        assert_eq!(fetcher.category, "Content");
        assert_eq!(fetcher.output(), std::path::Path::new("disconnect-content.txt"));
        assert_eq!(fetcher.selection, GroupSelection::FirstGroup);
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        let result = ContentFetcherBuilder::new().url("not a url".to_string()).build();

        assert!(matches!(result, Err(DisconnectError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_run_writes_and_returns_domains() {
        let (server, _mock) = serve(200, SAMPLE).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);

        let domains = fetcher_for(&server, output.clone()).run().await.unwrap();

        assert_eq!(domains, vec!["a.com", "b.com"]);
        assert_eq!(fs::read_to_string(&output).unwrap(), "a.com\nb.com\n");
    }

    #[tokio::test]
    async fn test_run_bad_status_writes_nothing() {
        let (server, _mock) = serve(404, "").await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);

        let err = fetcher_for(&server, output.clone()).run().await.unwrap_err();

        assert!(matches!(err, DisconnectError::BadStatus(s) if s.as_u16() == 404));
        assert!(err.to_string().contains("404"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_bad_status_keeps_previous_output() {
        let (server, _mock) = serve(503, "").await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);
        fs::write(&output, "previous.com\n").unwrap();

        let err = fetcher_for(&server, output.clone()).run().await.unwrap_err();

        assert!(matches!(err, DisconnectError::BadStatus(s) if s.as_u16() == 503));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous.com\n");
    }

    #[tokio::test]
    async fn test_run_missing_content_fails() {
        let (server, _mock) = serve(200, r#"{"categories":{"Advertising":[]}}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);

        let err = fetcher_for(&server, output.clone()).run().await.unwrap_err();

        assert!(matches!(err, DisconnectError::MissingCategory(_)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_failed_run_keeps_previous_output() {
        let (server, _mock) = serve(200, r#"{"categories":{"Content":[{"ok":{"g":["ok.com"]}},{}]}}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);
        fs::write(&output, "previous.com\n").unwrap();

        let err = fetcher_for(&server, output.clone()).run().await.unwrap_err();

        assert!(matches!(err, DisconnectError::InvalidSite { index: 1, .. }));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous.com\n");
    }

    #[tokio::test]
    async fn test_repeated_runs_are_byte_identical() {
        let body =
            r#"{"categories":{"Content":[{"x":{"u":["x.com","y.com"]}},{"z":{"v":["x.com"]}}]}}"#;
        let (server, _mock) = serve(200, body).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(DEFAULT_OUTPUT);
        let fetcher = fetcher_for(&server, output.clone());

        fetcher.run().await.unwrap();
        let first = fs::read(&output).unwrap();
        fetcher.run().await.unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"x.com\ny.com\nx.com\n");
    }

    #[tokio::test]
    async fn test_other_category_and_all_groups() {
        let body =
            r#"{"categories":{"Social":[{"Net":{"http://net.example/":["net.com"],"http://cdn.example/":["cdn.net"]}}]}}"#;
        let (server, _mock) = serve(200, body).await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("social.txt");

        let fetcher = ContentFetcherBuilder::new()
            .url(format!("{}/disconnect-plaintext.json", server.url()))
            .category("Social".to_string())
            .selection(GroupSelection::AllGroups)
            .output(output.clone())
            .build()
            .unwrap();
        let domains = fetcher.run().await.unwrap();

        assert_eq!(domains, vec!["net.com", "cdn.net"]);
        assert_eq!(fs::read_to_string(&output).unwrap(), "net.com\ncdn.net\n");
    }
}
