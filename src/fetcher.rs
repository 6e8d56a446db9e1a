use crate::error::{ DisconnectError, Result };
use crate::list::TrackerList;
use reqwest::{ Client, StatusCode };
use std::time::Duration;
use tracing::{ debug, error };
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Downloads and decodes the tracker list.
///
/// Certificate verification is always on; there is no switch to turn it off.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new `Fetcher`. `timeout` of `None` means the request may block indefinitely.
    pub fn new(timeout: Option<u64>) -> Result<Self> {
        let client_builder = Client::builder().user_agent(USER_AGENT);

        let client_builder = if let Some(secs) = timeout {
            client_builder.timeout(Duration::from_secs(secs))
        } else {
            client_builder
        };

        let client = client_builder.build()?;

        Ok(Fetcher { client })
    }

    /// Fetches `url` once and decodes the body.
    ///
    /// # Errors
    ///
    /// * [`DisconnectError::BadStatus`] for any status other than 200 OK. The body is not read.
    /// * [`DisconnectError::Http`] when the request itself fails.
    /// * [`DisconnectError::Malformed`] when the body is not a tracker list.
    pub async fn fetch(&self, url: &Url) -> Result<TrackerList> {
        debug!(%url, "requesting tracker list");
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), %url, "Request returned status code {}", status.as_u16());
            return Err(DisconnectError::BadStatus(status));
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "tracker list downloaded");

        TrackerList::from_slice(&body)
    }
}
