use super::{
    error::{decode_error, network_error, status_error, unauthenticated, Error, Kind, Result},
    retry::async_retry,
};
use crate::{
    config::session::{REQUEST_TIMEOUT, VERBOSE},
    credential::Credentials,
};
use log::{debug, warn};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct Detail {
    detail: serde_json::Value,
}

pub(super) fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .timeout(REQUEST_TIMEOUT)
        .connection_verbose(VERBOSE)
}

/// Connection to one backend, signed in (or not) through `credentials`.
pub struct Session {
    pub(super) client: Client,
    base: Url,
    credentials: Credentials,
}
impl Session {
    pub fn new(backend: &str, credentials: Credentials) -> Result<Self> {
        Self::with_client(backend, credentials, client_builder())
    }
    pub(super) fn with_client(
        backend: &str,
        credentials: Credentials,
        builder: ClientBuilder,
    ) -> Result<Self> {
        let mut base = Url::parse(backend)
            .map_err(|e| Error::with_description(Kind::Url, format!("{}: {}", backend, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = builder
            .build()
            .map_err(|e| Error::with_kind(Kind::Builder(e)))?;
        Ok(Session {
            client,
            base,
            credentials,
        })
    }
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
    pub fn backend(&self) -> &Url {
        &self.base
    }

    pub(super) fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::with_description(Kind::Url, format!("{}: {}", path, e)))
    }
    /// Attaches the bearer token when one is stored.
    pub(super) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
    /// Fails without touching the network when no token is stored.
    pub(super) fn require_token(&self) -> Result<()> {
        if self.credentials.is_signed_in() {
            Ok(())
        } else {
            Err(unauthenticated())
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("{} {}", status, response.url());
        }
        let detail = response
            .json::<Detail>()
            .await
            .ok()
            .map(|d| match d.detail {
                serde_json::Value::String(s) => s,
                v => v.to_string(),
            });
        Err(status_error(status, detail))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        debug!("{} {}", response.status(), response.url());
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(decode_error)
    }

    /// Sends the request built by `build`, retrying while the backend is
    /// unreachable or failing, and decodes a JSON body. Reads only.
    pub(super) async fn fetch<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let response = async_retry(|| self.authorize(build()).send())
            .await
            .map_err(network_error)?;
        Self::decode(response).await
    }
    /// Sends `request` exactly once. Judge requests are not idempotent: every
    /// one that reaches the backend is recorded.
    pub(super) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(network_error)?;
        Self::decode(response).await
    }
}
