//! HTTP client for the social identity provider's REST API.
//!
//! Two calls, matching what the friend-list screen needs: the signed-in
//! user's profile and their friend list. A successful profile call doubles
//! as token validation. Session persistence, transport, and image hosting
//! are all the provider's problem; we only hold a bearer token.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

/// Field selector sent with the friend-list request.
pub const FRIEND_FIELDS: &str = "id,name,picture";

/// The signed-in user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

/// One entry of the friend list.
#[derive(Debug, Clone, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    /// Profile picture reference; absent when the friend has none.
    #[serde(default)]
    pub picture: Option<PictureRef>,
}

/// Reference to a hosted profile picture.
#[derive(Debug, Clone, Deserialize)]
pub struct PictureRef {
    pub url: String,
}

/// Friend lists arrive wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct FriendsEnvelope {
    data: Vec<Friend>,
}

/// Error kinds the event loop cares about distinguishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// The provider rejected the session token; the session is closed.
    SessionInvalid,
    /// Anything else: transport failure, server error, malformed body.
    Other,
}

/// Classify an error produced by this module's calls.
///
/// A 401 means the provider no longer honors the session; the caller should
/// treat the session as closed rather than show a transient failure.
pub fn classify_error(err: &anyhow::Error) -> ProviderErrorKind {
    for cause in err.chain() {
        if let Some(status) = cause.downcast_ref::<ApiStatusError>() {
            if status.status == reqwest::StatusCode::UNAUTHORIZED {
                return ProviderErrorKind::SessionInvalid;
            }
        }
    }
    ProviderErrorKind::Other
}

/// Non-success HTTP status from the provider, kept as a typed error so the
/// caller can tell an invalidated session apart from other failures.
#[derive(Debug)]
pub struct ApiStatusError {
    pub status: reqwest::StatusCode,
    pub body: String,
}

impl std::fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "provider API error ({}): {}", self.status, self.body)
    }
}

impl std::error::Error for ApiStatusError {}

/// Client for the provider API, bound to one session token.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    http_client: Client,
    api_base: String,
    token: String,
}

impl ProviderClient {
    /// Create a client for `api_base` using `token` as the bearer token.
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Fetch the signed-in user's profile.
    ///
    /// A success means the token is valid; a 401 means the provider closed
    /// or rejected the session.
    pub async fn get_profile(&self) -> Result<Profile> {
        let url = format!("{}/me", self.api_base);
        info!("fetching profile: GET {url}");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .header("User-Agent", "socialite")
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach the provider")?;

        let response = Self::check_status(response).await?;

        let profile: Profile = response
            .json()
            .await
            .context("Failed to parse profile response")?;
        debug!("profile loaded for user {}", profile.id);
        Ok(profile)
    }

    /// Fetch the signed-in user's friend list.
    ///
    /// `fields` selects which attributes the provider includes per friend;
    /// callers pass [`FRIEND_FIELDS`].
    pub async fn get_friends(&self, fields: &str) -> Result<Vec<Friend>> {
        let url = format!("{}/me/friends", self.api_base);
        info!("fetching friends: GET {url}?fields={fields}");

        let response = self
            .http_client
            .get(&url)
            .query(&[("fields", fields)])
            .bearer_auth(&self.token)
            .header("User-Agent", "socialite")
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach the provider")?;

        let response = Self::check_status(response).await?;

        let envelope: FriendsEnvelope = response
            .json()
            .await
            .context("Failed to parse friend list response")?;
        debug!("friend list loaded: {} entries", envelope.data.len());
        Ok(envelope.data)
    }

    /// Turn a non-success status into a typed error, keeping the body for
    /// the logs.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!("provider API error: {} {}", status.as_u16(), body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiStatusError { status, body }).context(
                "The provider rejected the session token.\n\
                 It may have expired or been revoked; sign in again to continue.",
            );
        }

        Err(ApiStatusError { status, body }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friend_list_envelope_parses() {
        let body = r#"{
            "data": [
                {"id": "10", "name": "Ada Lovelace", "picture": {"url": "https://cdn.example.com/10.jpg"}},
                {"id": "11", "name": "Alan Turing"}
            ]
        }"#;
        let envelope: FriendsEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[0].name, "Ada Lovelace");
        assert!(envelope.data[0].picture.is_some());
        assert!(envelope.data[1].picture.is_none());
    }

    #[test]
    fn unauthorized_classifies_as_session_invalid() {
        let err: anyhow::Error = ApiStatusError {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "token expired".to_string(),
        }
        .into();
        assert_eq!(classify_error(&err), ProviderErrorKind::SessionInvalid);
    }

    #[test]
    fn server_error_classifies_as_other() {
        let err: anyhow::Error = ApiStatusError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".to_string(),
        }
        .into();
        assert_eq!(classify_error(&err), ProviderErrorKind::Other);
    }

    #[test]
    fn api_base_trailing_slash_is_normalized() {
        let client = ProviderClient::new("https://graph.example.com/v1/", "t");
        assert_eq!(client.api_base, "https://graph.example.com/v1");
    }
}
