use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tokio_util::sync::CancellationToken;

use super::error::{classify_response, ClipError};
use super::http::{HttpClient, HttpResponse, ReqwestClient};
use super::types::*;
use crate::config::Config;

const API_BASE_URL: &str = "https://api.twitch.tv";
const TOKEN_PATH: &str = "/kraken/oauth2/token";
const CLIPS_PATH: &str = "/helix/clips";

const CLIENT_ID_HEADER: &str = "Client-ID";

/// Application credentials plus an optional token pair from an earlier session
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            access_token: None,
            refresh_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    fn validate(&self) -> Result<(), ClipError> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(ClipError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
}

/// Twitch clips API client
///
/// Holds the session: application credentials and the current token pair.
/// Only [`refresh_auth_token`](Self::refresh_auth_token) changes the session,
/// and it takes `&mut self`. Share a client between tasks by wrapping it in a
/// mutex.
pub struct TwitchClient<H: HttpClient = ReqwestClient> {
    http: H,
    client_id: String,
    client_secret: String,
    access_token: String,
    refresh_token: String,
    auth: Option<AuthResponse>,
    refresh_scope: Option<String>,
}

impl TwitchClient<ReqwestClient> {
    /// Creates a client with the default configuration
    pub fn new(credentials: Credentials) -> Result<Self, ClipError> {
        Self::with_config(credentials, &Config::default())
    }

    /// Creates a client using the timeout and refresh scope from `config`
    pub fn with_config(credentials: Credentials, config: &Config) -> Result<Self, ClipError> {
        credentials.validate()?;
        let http = ReqwestClient::new(config.request_timeout()).map_err(ClipError::Transport)?;

        Ok(Self::from_parts(
            credentials,
            http,
            config.refresh_scope.clone(),
        ))
    }
}

impl<H: HttpClient> TwitchClient<H> {
    /// Creates a client on top of a custom HTTP implementation
    pub fn with_http_client(credentials: Credentials, http: H) -> Result<Self, ClipError> {
        credentials.validate()?;
        Ok(Self::from_parts(
            credentials,
            http,
            Config::default().refresh_scope,
        ))
    }

    fn from_parts(credentials: Credentials, http: H, refresh_scope: Option<String>) -> Self {
        Self {
            http,
            client_id: credentials.client_id,
            client_secret: credentials.client_secret,
            access_token: credentials.access_token.unwrap_or_default(),
            refresh_token: credentials.refresh_token.unwrap_or_default(),
            auth: None,
            refresh_scope,
        }
    }

    /// Overrides the scope requested on token refresh
    pub fn with_refresh_scope(mut self, scope: Option<String>) -> Self {
        self.refresh_scope = scope;
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// The response of the last successful refresh
    pub fn auth(&self) -> Option<&AuthResponse> {
        self.auth.as_ref()
    }

    fn bearer_token(&self) -> &str {
        match &self.auth {
            Some(auth) if self.access_token.is_empty() => &auth.access_token,
            _ => &self.access_token,
        }
    }

    fn bearer_headers(&self) -> Result<HeaderMap, ClipError> {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.bearer_token()))
            .map_err(|_| {
                ClipError::InvalidInput("access token is not a valid header value".into())
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn client_id_headers(&self) -> Result<HeaderMap, ClipError> {
        let value = HeaderValue::from_str(&self.client_id).map_err(|_| {
            ClipError::InvalidInput("client id is not a valid header value".into())
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ID_HEADER, value);
        Ok(headers)
    }

    /// Sends a request, giving up as soon as `cancel` fires
    async fn send(
        &self,
        method: Method,
        path: &str,
        url: &str,
        headers: &HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ClipError> {
        tracing::debug!(?method, path, "Sending request");

        let request = async {
            match method {
                Method::Get => self.http.get_response(url, headers).await,
                Method::Post => self.http.post_response(url, headers).await,
            }
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!(?method, path, "Request cancelled");
                Err(ClipError::Cancelled)
            }
            response = request => response.map_err(ClipError::Transport),
        }
    }
}

// Auth-related methods
impl<H: HttpClient> TwitchClient<H> {
    /// Exchanges the stored refresh token for a new token pair
    ///
    /// Both stored tokens are replaced on success. On any error the session is
    /// left untouched.
    pub async fn refresh_auth_token(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<AuthResponse, ClipError> {
        let url = self.refresh_url();
        let response = self
            .send(Method::Post, TOKEN_PATH, &url, &HeaderMap::new(), cancel)
            .await?;

        let body = expect_status(&response, 200, TOKEN_PATH)?;
        let auth: AuthResponse =
            serde_json::from_str(body).map_err(|e| ClipError::decode(body, e))?;

        self.access_token.clone_from(&auth.access_token);
        self.refresh_token.clone_from(&auth.refresh_token);
        self.auth = Some(auth.clone());

        tracing::info!(scopes = ?auth.scope, "Refreshed auth token");
        Ok(auth)
    }

    // Credentials go in the query string, matching what the token endpoint
    // accepts for this grant
    fn refresh_url(&self) -> String {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
        ];
        if let Some(scope) = &self.refresh_scope {
            params.push(("scope", scope.as_str()));
        }

        build_url(TOKEN_PATH, &params)
    }
}

// Clip-related methods
impl<H: HttpClient> TwitchClient<H> {
    /// Creates a clip of the broadcaster's live stream
    ///
    /// Returns the new clip's id. Needs a user access token with the
    /// `clips:edit` scope. Twitch answers 202 Accepted and keeps processing the
    /// clip, so a lookup right after may not find it yet.
    pub async fn create_clip(
        &self,
        broadcaster_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ClipError> {
        if self.access_token.is_empty() && self.auth.is_none() {
            return Err(ClipError::Unauthenticated);
        }
        require_id("broadcaster id", broadcaster_id)?;

        let url = build_url(CLIPS_PATH, &[("broadcaster_id", broadcaster_id)]);
        let headers = self.bearer_headers()?;
        let response = self
            .send(Method::Post, CLIPS_PATH, &url, &headers, cancel)
            .await?;

        let body = expect_status(&response, 202, CLIPS_PATH)?;
        let created: ClipCreateResponse =
            serde_json::from_str(body).map_err(|e| ClipError::decode(body, e))?;

        created
            .data
            .into_iter()
            .next()
            .map(|clip| clip.id)
            .ok_or(ClipError::EmptyResult)
    }

    /// Looks up a clip by id
    ///
    /// Only the Client-ID is sent; no user token is needed. When the body does
    /// not decode, the error carries whatever clips could be salvaged (see
    /// [`ClipError::partial_clips`]).
    pub async fn get_clip(
        &self,
        clip_id: &str,
        cancel: &CancellationToken,
    ) -> Result<ClipsResponse, ClipError> {
        if self.client_id.is_empty() {
            return Err(ClipError::MissingClientId);
        }
        require_id("clip id", clip_id)?;

        let url = build_url(CLIPS_PATH, &[("id", clip_id)]);
        let headers = self.client_id_headers()?;
        let response = self
            .send(Method::Get, CLIPS_PATH, &url, &headers, cancel)
            .await?;

        let body = expect_status(&response, 200, CLIPS_PATH)?;
        serde_json::from_str(body).map_err(|source| ClipError::Decode {
            raw_body: body.to_string(),
            source,
            partial: Some(Box::new(ClipsResponse::best_effort(body))),
        })
    }
}

fn require_id(what: &str, id: &str) -> Result<(), ClipError> {
    if id.trim().is_empty() {
        return Err(ClipError::InvalidInput(format!("{} is empty", what)));
    }
    Ok(())
}

fn build_url(path: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}?{}", API_BASE_URL, path, query)
}

fn expect_status<'a>(
    response: &'a HttpResponse,
    expected: u16,
    path: &str,
) -> Result<&'a str, ClipError> {
    classify_response(response.status, &response.body, expected).map_err(|e| {
        tracing::warn!(path, status = response.status, "Request failed: {}", e);
        e
    })
}
