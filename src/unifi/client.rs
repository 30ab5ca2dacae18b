use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{ClientUrls, UnifiConfig};
use crate::endpoint::Endpoint;
use crate::error::UnifiError;
use crate::unifi::codec;
use crate::unifi::session::{
    CSRF_HEADER, ERROR_BODY_LIMIT, JSON_CONTENT_TYPE, Session, SessionState, SessionStatus,
    read_prefix,
};
use crate::unifi::types::{DnsRecord, ErrorResponse};

/// Client for the static DNS API of a UniFi controller.
pub struct UnifiClient {
    session: Session,
    urls: ClientUrls,
}

impl UnifiClient {
    /// Build a client without logging in.
    pub fn new(config: &UnifiConfig) -> Result<Self, UnifiError> {
        let urls = ClientUrls::new(config);
        let session = Session::new(config, &urls)?;
        Ok(Self { session, urls })
    }

    /// Build a client and log in so the session cookies are in place.
    pub async fn connect(config: &UnifiConfig) -> Result<Self, UnifiError> {
        let client = Self::new(config)?;
        client.login().await?;
        Ok(client)
    }

    pub async fn login(&self) -> Result<(), UnifiError> {
        let mut state = self.session.lock().await;
        self.session.login(&mut state).await
    }

    pub fn urls(&self) -> &ClientUrls {
        &self.urls
    }

    pub async fn session_status(&self) -> SessionStatus {
        self.session.status().await
    }

    /// Send an authenticated request, logging in again once on a 401.
    ///
    /// Only a `200 OK` response is returned; anything else becomes
    /// [`UnifiError::Api`], or [`UnifiError::Decode`] when the error body is
    /// not the controller's error payload.
    pub async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Response, UnifiError> {
        let mut state = self.session.lock().await;

        let mut res = self.send(&state, method.clone(), url, body.as_deref()).await?;
        state.capture_csrf(res.headers());

        if res.status() == StatusCode::UNAUTHORIZED {
            info!(%method, url, "received 401 unauthorized, attempting to re-login");
            state.set_status(SessionStatus::Reauthenticating);
            if let Err(err) = self.session.login(&mut state).await {
                warn!(error = %err, "re-login failed");
                state.set_status(SessionStatus::Unauthenticated);
                return Err(err);
            }

            info!(%method, url, "retrying request after re-login");
            res = self.send(&state, method.clone(), url, body.as_deref()).await?;
            state.capture_csrf(res.headers());
        }
        drop(state);

        let status = res.status();
        if status != StatusCode::OK {
            let body = read_prefix(res, ERROR_BODY_LIMIT).await?;
            let api_error: ErrorResponse = serde_json::from_slice(&body).map_err(|e| {
                UnifiError::decode(format!("error response of {method} {url}"), e)
            })?;
            return Err(UnifiError::Api {
                method,
                url: url.to_string(),
                status,
                message: api_error.message,
            });
        }

        Ok(res)
    }

    async fn send(
        &self,
        state: &SessionState,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Response, reqwest::Error> {
        debug!(%method, url, "sending request");
        let mut req = self
            .session
            .http()
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(token) = state.csrf() {
            req = req.header(CSRF_HEADER, token);
        }
        if let Some(body) = body {
            req = req.body(body.to_vec());
        }
        req.send().await
    }

    /// Fetch every static DNS record of the site, SRV values packed.
    pub async fn list(&self) -> Result<Vec<DnsRecord>, UnifiError> {
        let res = self.execute(Method::GET, self.urls.records(), None).await?;
        let records: Vec<DnsRecord> = decode_json(res, "record list").await?;
        let records: Vec<DnsRecord> = records.into_iter().map(codec::normalize).collect();

        info!(count = records.len(), "retrieved records");
        Ok(records)
    }

    /// Create one record from the endpoint's first target.
    pub async fn create(&self, endpoint: &Endpoint) -> Result<DnsRecord, UnifiError> {
        let record = codec::record_for_endpoint(endpoint)?;
        let body = serde_json::to_vec(&record).map_err(UnifiError::Encode)?;

        let res = self
            .execute(Method::POST, self.urls.records(), Some(body))
            .await?;
        let created: DnsRecord = decode_json(res, "created record").await?;

        info!(key = %created.key, record_type = %created.record_type, "created record");
        Ok(codec::normalize(created))
    }

    /// Delete the record matching the endpoint's name, type and targets.
    pub async fn delete(&self, endpoint: &Endpoint) -> Result<(), UnifiError> {
        let record = self
            .lookup_identifier(&endpoint.dns_name, &endpoint.record_type, &endpoint.targets)
            .await?;
        let id = record
            .id
            .ok_or_else(|| UnifiError::NotFound(endpoint.dns_name.clone()))?;

        self.execute(Method::DELETE, &self.urls.record(&id), None)
            .await?;

        info!(key = %endpoint.dns_name, record_type = %endpoint.record_type, %id, "deleted record");
        Ok(())
    }

    /// Find the current record for a name, type and optional values.
    pub async fn lookup_identifier(
        &self,
        key: &str,
        record_type: &str,
        values: &[String],
    ) -> Result<DnsRecord, UnifiError> {
        debug!(key, record_type, "looking up identifier");
        let records = self.list().await?;

        resolve_identifier(&records, key, record_type, values)
            .cloned()
            .ok_or_else(|| UnifiError::NotFound(key.to_string()))
    }
}

/// Pick the record an endpoint refers to.
///
/// Without values the first record with the same key and type wins. With
/// values, every (value, record) pair is scanned value-major and the last
/// full match wins.
pub fn resolve_identifier<'a>(
    records: &'a [DnsRecord],
    key: &str,
    record_type: &str,
    values: &[String],
) -> Option<&'a DnsRecord> {
    let same_name = |r: &&DnsRecord| r.key == key && r.record_type == record_type;

    if values.is_empty() {
        return records.iter().find(same_name);
    }

    let mut found = None;
    for value in values {
        for record in records.iter().filter(same_name) {
            if record.value == *value {
                found = Some(record);
            }
        }
    }
    found
}

async fn decode_json<T: DeserializeOwned>(res: Response, context: &str) -> Result<T, UnifiError> {
    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| UnifiError::decode(context, e))
}
