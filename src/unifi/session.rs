//! Login and session state for one controller connection.
use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Response, StatusCode};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::config::{ClientUrls, UnifiConfig};
use crate::error::UnifiError;
use crate::unifi::cookies::PublicSuffixJar;
use crate::unifi::types::Login;

pub const CSRF_HEADER: &str = "X-CSRF-Token";
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Upper bound on error body bytes kept for diagnostics.
pub const ERROR_BODY_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
    Reauthenticating,
}

/// Mutable part of the session, guarded by [`Session::lock`].
#[derive(Debug)]
pub struct SessionState {
    csrf: Option<String>,
    status: SessionStatus,
}

impl SessionState {
    pub fn csrf(&self) -> Option<&str> {
        self.csrf.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Store the CSRF token carried by a response, if any.
    pub fn capture_csrf(&mut self, headers: &HeaderMap) {
        let token = headers
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());
        if let Some(token) = token {
            self.csrf = Some(token.to_string());
        }
    }

    pub(crate) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }
}

/// Credentials, transport and session state for a controller.
///
/// The cookie jar lives inside the transport, so cookies set by the login
/// response are replayed on every later request from this session.
pub struct Session {
    http: Client,
    login_url: String,
    username: String,
    password: String,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(config: &UnifiConfig, urls: &ClientUrls) -> Result<Self, UnifiError> {
        let http = Client::builder()
            .cookie_provider(Arc::new(PublicSuffixJar::default()))
            .danger_accept_invalid_certs(config.skip_tls_verify)
            .build()?;

        Ok(Self {
            http,
            login_url: urls.login.clone(),
            username: config.user.clone(),
            password: config.password.clone(),
            state: Mutex::new(SessionState {
                csrf: None,
                status: SessionStatus::Unauthenticated,
            }),
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Take exclusive hold of the session state.
    ///
    /// Held for a whole request cycle so token updates and reauthentication
    /// never interleave between callers.
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().await
    }

    pub async fn status(&self) -> SessionStatus {
        self.lock().await.status()
    }

    /// Authenticate against the controller and refresh the CSRF token.
    pub async fn login(&self, state: &mut SessionState) -> Result<(), UnifiError> {
        let body = Login {
            username: &self.username,
            password: &self.password,
            remember: true,
        };
        let body = serde_json::to_vec(&body).map_err(UnifiError::Encode)?;

        debug!(url = %self.login_url, "logging in");
        let res = self
            .http
            .post(&self.login_url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        state.capture_csrf(res.headers());

        let status = res.status();
        if status != StatusCode::OK {
            let body = read_prefix(res, ERROR_BODY_LIMIT).await.unwrap_or_default();
            let body = String::from_utf8_lossy(&body).into_owned();
            info!(%status, response = %body, "login failed");
            state.set_status(SessionStatus::Unauthenticated);
            return Err(UnifiError::Auth { status, body });
        }

        state.set_status(SessionStatus::Authenticated);
        Ok(())
    }
}

/// Read at most `limit` bytes of a response body.
pub async fn read_prefix(mut res: Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut buf = Vec::new();
    while buf.len() < limit {
        let Some(chunk) = res.chunk().await? else {
            break;
        };
        let take = chunk.len().min(limit - buf.len());
        buf.extend_from_slice(&chunk[..take]);
    }
    Ok(buf)
}
