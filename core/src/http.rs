// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use url::Url;

#[cfg(feature = "reqwest")]
use std::time::Duration;

#[cfg(feature = "reqwest")]
use crate::query::EnumerationQuery;
#[cfg(feature = "reqwest")]
use crate::response::ParseError;
#[cfg(feature = "reqwest")]
use crate::response::SoapResponse;
#[cfg(feature = "reqwest")]
use crate::selectors::PropertySet;
#[cfg(feature = "reqwest")]
use crate::selectors::SelectorSet;
#[cfg(feature = "reqwest")]
use crate::soap;
#[cfg(feature = "reqwest")]
use crate::wsman::BmcCredentials;
#[cfg(feature = "reqwest")]
use crate::wsman::Wsman;
#[cfg(feature = "reqwest")]
use tracing::debug;
#[cfg(feature = "reqwest")]
use uuid::Uuid;

/// Network location of a WS-Management service.
///
/// Defaults to the endpoint exposed by the iDRAC: HTTPS on port 443 at
/// `/wsman`.
///
/// # Examples
///
/// ```rust
/// use nv_drac_core::http::WsmanEndpoint;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let endpoint = WsmanEndpoint::new("192.0.2.1").port(8443);
/// assert_eq!(endpoint.to_url()?.as_str(), "https://192.0.2.1:8443/wsman");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WsmanEndpoint {
    /// Controller hostname or address
    pub host: String,
    /// TCP port of the service
    pub port: u16,
    /// Path of the service
    pub path: String,
    /// URL scheme
    pub scheme: String,
}

impl WsmanEndpoint {
    /// Create an endpoint for a host with default port, path and scheme.
    #[must_use]
    pub fn new<S: Into<String>>(host: S) -> Self {
        Self {
            host: host.into(),
            port: 443,
            path: "/wsman".to_string(),
            scheme: "https".to_string(),
        }
    }

    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Full URL of the service.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the parts do not form a valid URL.
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}://{}:{}{}",
            self.scheme, self.host, self.port, self.path
        ))
    }
}

impl From<Url> for WsmanEndpoint {
    fn from(url: Url) -> Self {
        Self {
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port_or_known_default().unwrap_or(443),
            path: url.path().to_string(),
            scheme: url.scheme().to_string(),
        }
    }
}

#[cfg(feature = "reqwest")]
#[derive(Debug)]
pub enum WsmanReqwestError {
    ReqwestError(reqwest::Error),
    EndpointError(url::ParseError),
    InvalidResponse(reqwest::StatusCode),
    Fault {
        status: reqwest::StatusCode,
        reason: String,
    },
    ParseError(ParseError),
    MissingEnumerationContext,
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for WsmanReqwestError {
    fn from(value: reqwest::Error) -> Self {
        Self::ReqwestError(value)
    }
}

#[cfg(feature = "reqwest")]
#[allow(clippy::absolute_paths)]
impl std::fmt::Display for WsmanReqwestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReqwestError(e) => write!(f, "HTTP client error: {e}"),
            Self::EndpointError(e) => write!(f, "Invalid endpoint URL: {e}"),
            Self::InvalidResponse(status) => write!(f, "Invalid HTTP response: {status}"),
            Self::Fault { status, reason } => write!(f, "SOAP fault ({status}): {reason}"),
            Self::ParseError(e) => write!(f, "Malformed response document: {e}"),
            Self::MissingEnumerationContext => {
                write!(f, "Enumeration response carried no context to pull from")
            }
        }
    }
}

#[cfg(feature = "reqwest")]
#[allow(clippy::absolute_paths)]
impl std::error::Error for WsmanReqwestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReqwestError(e) => Some(e),
            Self::EndpointError(e) => Some(e),
            Self::ParseError(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(feature = "reqwest")]
/// Configuration parameters for the reqwest HTTP client.
///
/// This struct allows customizing various aspects of the reqwest client
/// behavior, including timeouts, TLS settings and connection retries.
///
/// Invalid TLS certificates are accepted by default: iDRACs ship with
/// self-signed certificates.
///
/// # Examples
///
/// ```rust
/// use nv_drac_core::http::ReqwestClientParams;
/// use std::time::Duration;
///
/// let params = ReqwestClientParams::new()
///     .timeout(Duration::from_secs(120))
///     .connect_timeout(Duration::from_secs(10))
///     .user_agent("MyApp/1.0")
///     .accept_invalid_certs(false)
///     .connect_retries(5);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClientParams {
    /// HTTP request timeout
    pub timeout: Option<Duration>,
    /// TCP connection timeout
    pub connect_timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Whether to accept invalid TLS certificates
    pub accept_invalid_certs: bool,
    /// Maximum number of HTTP redirects to follow
    pub max_redirects: Option<usize>,
    /// TCP keep-alive timeout
    pub tcp_keepalive: Option<Duration>,
    /// Number of times to attempt connecting before giving up
    pub connect_retries: u32,
    /// Delay between connection attempts
    pub connect_retry_delay: Duration,
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClientParams {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: Some("nv-drac/0.1.0".to_string()),
            accept_invalid_certs: true,
            max_redirects: Some(10),
            tcp_keepalive: Some(Duration::from_secs(60)),
            connect_retries: 3,
            connect_retry_delay: Duration::from_secs(1),
        }
    }
}

#[cfg(feature = "reqwest")]
impl ReqwestClientParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    #[must_use]
    pub const fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    #[must_use]
    pub const fn connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    #[must_use]
    pub const fn connect_retry_delay(mut self, delay: Duration) -> Self {
        self.connect_retry_delay = delay;
        self
    }

    #[must_use]
    pub const fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

#[cfg(feature = "reqwest")]
/// WS-Management client implementation using the reqwest library.
///
/// Requests are SOAP envelopes posted over HTTPS with basic
/// authentication. Transient connection failures are retried a
/// configurable number of times before giving up; HTTP error statuses are
/// surfaced as [`WsmanReqwestError::Fault`] when the body carries a SOAP
/// fault and as [`WsmanReqwestError::InvalidResponse`] otherwise.
///
/// # Examples
///
/// ```rust,no_run
/// use nv_drac_core::http::{ReqwestClient, WsmanEndpoint};
/// use nv_drac_core::BmcCredentials;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = BmcCredentials::new("root".to_string(), "calvin".to_string());
/// let client = ReqwestClient::new(&WsmanEndpoint::new("192.0.2.1"), credentials)?;
/// # Ok(())
/// # }
/// ```
pub struct ReqwestClient {
    client: reqwest::Client,
    endpoint: Url,
    credentials: BmcCredentials,
    connect_retries: u32,
    connect_retry_delay: Duration,
}

#[cfg(feature = "reqwest")]
#[allow(clippy::missing_errors_doc)]
impl ReqwestClient {
    pub fn new(
        endpoint: &WsmanEndpoint,
        credentials: BmcCredentials,
    ) -> Result<Self, WsmanReqwestError> {
        Self::with_params(endpoint, credentials, ReqwestClientParams::default())
    }

    pub fn with_params(
        endpoint: &WsmanEndpoint,
        credentials: BmcCredentials,
        params: ReqwestClientParams,
    ) -> Result<Self, WsmanReqwestError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = params.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if let Some(user_agent) = params.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if params.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(max_redirects) = params.max_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::limited(max_redirects));
        }

        if let Some(keepalive) = params.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.to_url().map_err(WsmanReqwestError::EndpointError)?,
            credentials,
            connect_retries: params.connect_retries,
            connect_retry_delay: params.connect_retry_delay,
        })
    }

    /// Wrap an already configured [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        endpoint: &WsmanEndpoint,
        credentials: BmcCredentials,
    ) -> Result<Self, WsmanReqwestError> {
        Ok(Self {
            client,
            endpoint: endpoint.to_url().map_err(WsmanReqwestError::EndpointError)?,
            credentials,
            connect_retries: 1,
            connect_retry_delay: Duration::from_secs(1),
        })
    }
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    async fn request(&self, payload: String) -> Result<SoapResponse, WsmanReqwestError> {
        debug!("TX to {}: {payload}", self.endpoint);
        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            let result = self
                .client
                .post(self.endpoint.clone())
                .basic_auth(&self.credentials.username, Some(self.credentials.password()))
                .header("Content-Type", "application/soap+xml;charset=UTF-8")
                .body(payload.clone())
                .send()
                .await;
            match result {
                Ok(response) => break response,
                Err(e) if e.is_connect() && attempt < self.connect_retries => {
                    debug!("connection to {} failed, retrying: {e}", self.endpoint);
                    tokio::time::sleep(self.connect_retry_delay).await;
                }
                Err(e) => return Err(WsmanReqwestError::ReqwestError(e)),
            }
        };

        let status = response.status();
        let body = response.text().await?;
        debug!("RX ({status}): {body}");

        if !status.is_success() {
            let reason = SoapResponse::parse(&body)
                .ok()
                .and_then(|fault| fault.find(soap::SOAP_ENV, "Text").map(ToString::to_string));
            return Err(match reason {
                Some(reason) => WsmanReqwestError::Fault { status, reason },
                None => WsmanReqwestError::InvalidResponse(status),
            });
        }

        SoapResponse::parse(&body).map_err(WsmanReqwestError::ParseError)
    }
}

#[cfg(feature = "reqwest")]
impl Wsman for ReqwestClient {
    type Error = WsmanReqwestError;

    async fn invoke(
        &self,
        resource_uri: &str,
        method: &str,
        selectors: &SelectorSet,
        properties: &PropertySet,
    ) -> Result<SoapResponse, Self::Error> {
        let payload = soap::invoke(
            self.endpoint.as_str(),
            resource_uri,
            method,
            selectors,
            properties,
            Uuid::new_v4(),
        );
        self.request(payload).await
    }

    async fn enumerate(
        &self,
        resource_uri: &str,
        query: &EnumerationQuery,
    ) -> Result<SoapResponse, Self::Error> {
        let payload =
            soap::enumerate(self.endpoint.as_str(), resource_uri, query, Uuid::new_v4());
        let mut page = self.request(payload).await?;
        if !query.auto_pull {
            return Ok(page);
        }

        let mut pages = Vec::new();
        while !(page.contains(soap::WS_ENUM, "EndOfSequence")
            || page.contains(soap::WSMAN, "EndOfSequence"))
        {
            let context = match page.find(soap::WS_ENUM, "EnumerationContext") {
                Some(context) => context.to_string(),
                None => return Err(WsmanReqwestError::MissingEnumerationContext),
            };
            pages.push(page);
            let payload = soap::pull(
                self.endpoint.as_str(),
                resource_uri,
                &context,
                query.max_elems,
                Uuid::new_v4(),
            );
            page = self.request(payload).await?;
        }
        pages.push(page);
        Ok(SoapResponse::from_pages(pages))
    }
}
