//! Octocrab client wrapper.
//!
//! `OctocrabClient` wraps an authenticated `Octocrab` instance and adds the one
//! thing octocrab's typed API does not give the bot: a raw, JSON-decoding GET
//! that also exposes the `Link` header, so that pagination is driven by the
//! bot's own cursor walker.

use octocrab::Octocrab;
use serde::de::DeserializeOwned;

use crate::pagination::{Page, PageCursor, next_page_url};

use super::error::GitHubApiError;

/// Public GitHub REST API root.
pub const GITHUB_API: &str = "https://api.github.com";

/// An authenticated GitHub API client.
///
/// Cloning is cheap: octocrab shares its connection pool between clones, so a
/// clone is handed to every concurrently running sync unit.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// Root URL that relative API paths are resolved against.
    api_base: String,
}

impl OctocrabClient {
    /// Creates a client talking to the public GitHub API.
    pub fn new(client: Octocrab) -> Self {
        Self {
            client,
            api_base: GITHUB_API.to_string(),
        }
    }

    /// Creates a client from a personal access token.
    pub fn from_token(token: impl Into<String>) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Resolves an API path (`/orgs/...`) to an absolute URL.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Authenticated GET of an absolute URL, decoding the JSON body.
    ///
    /// Returns the decoded body along with the next-page cursor advertised in
    /// the response's `Link` header, if any.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<(T, Option<PageCursor>), GitHubApiError> {
        let response = self
            .client
            ._get(url)
            .await
            .map_err(GitHubApiError::from_octocrab)?;
        let response = octocrab::map_github_error(response)
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        let next = response
            .headers()
            .get(http::header::LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);

        let body = self
            .client
            .body_to_string(response)
            .await
            .map_err(GitHubApiError::from_octocrab)?;
        let decoded = serde_json::from_str(&body)
            .map_err(|e| GitHubApiError::decode(format!("undecodable response from {}", url), e))?;

        Ok((decoded, next))
    }

    /// Fetches one page of a list endpoint.
    ///
    /// `first_page` is the API path of the initial request; once a cursor is
    /// known it replaces the path entirely, since GitHub's next links already
    /// carry every query parameter.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        first_page: &str,
        cursor: Option<PageCursor>,
    ) -> Result<Page<T>, GitHubApiError> {
        let url = match cursor {
            Some(cursor) => cursor.into_string(),
            None => self.api_url(first_page),
        };

        let (items, next) = self.get_json::<Vec<T>>(&url).await?;
        Ok(Page::new(items, next))
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
