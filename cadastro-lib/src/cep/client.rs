//! HTTP client for the ViaCEP address service

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use super::response::ViaCepResponse;
use super::{Address, AddressLookup, Cep};
use crate::error::LookupError;

/// Public ViaCEP endpoint.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// Client for the ViaCEP address service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use cadastro_lib::cep::{AddressLookup, Cep, ViaCepClient};
///
/// let client = ViaCepClient::builder()
///     .timeout(Duration::from_secs(5))
///     .build()?;
///
/// let address = client.lookup(&Cep::parse("01001-000")?).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    inner: Arc<ViaCepClientInner>,
}

#[derive(Debug)]
struct ViaCepClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl ViaCepClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ViaCepClientBuilder {
        ViaCepClientBuilder::new()
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn lookup_url(&self, cep: &Cep) -> String {
        format!(
            "{}/{}/json/",
            self.inner.base_url.trim_end_matches('/'),
            cep.digits()
        )
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, cep: &Cep) -> Result<Option<Address>, LookupError> {
        let url = self.lookup_url(cep);
        log::debug!("Looking up CEP {} at {}", cep, url);

        let mut request = self
            .inner
            .http_client
            .get(&url)
            .header(CONTENT_TYPE, "application/json;charset=utf-8");

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LookupError::from_transport(e, self.inner.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::http(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_transport(e, self.inner.timeout))?;

        let parsed: ViaCepResponse = serde_json::from_str(&body)
            .map_err(|e| LookupError::parse_with_body(e.to_string(), body.as_str()))?;

        Ok(parsed.into_address())
    }
}

/// Builder for constructing a [`ViaCepClient`].
///
/// # Example
///
/// ```ignore
/// let client = ViaCepClient::builder()
///     .base_url("http://localhost:8080/ws")
///     .timeout(Duration::from_secs(10))
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ViaCepClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ViaCepClientBuilder {
    /// Creates a new builder pointing at the public service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the service base URL.
    ///
    /// Requests go to `{base_url}/{digits}/json/`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`ViaCepClient`].
    pub fn build(self) -> Result<ViaCepClient, LookupError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| LookupError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LookupError::InvalidUrl(self.base_url));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(LookupError::Network)?
            }
        };

        Ok(ViaCepClient {
            inner: Arc::new(ViaCepClientInner {
                base_url: self.base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ViaCepClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
