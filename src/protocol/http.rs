// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for Shelly devices.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::ProtocolError;
use crate::protocol::{RequestFrame, ResponseFrame, Transport};

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for reaching a device over HTTP.
///
/// HTTP is stateless: every call is an independent `POST /rpc` carrying one
/// request frame.
///
/// # Examples
///
/// ```
/// use shelly_rpc::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.40");
///
/// let config = HttpConfig::new("192.168.1.40")
///     .with_port(8080)
///     .with_https()
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given host name or IP address.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If the port hasn't been explicitly set, it changes to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpTransport`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            rpc_url: format!("{}/rpc", self.base_url()),
            client,
        })
    }
}

// ============================================================================
// HttpTransport
// ============================================================================

/// Sends request frames to a device's `/rpc` endpoint.
///
/// # Examples
///
/// ```no_run
/// use shelly_rpc::Client;
/// use shelly_rpc::protocol::HttpTransport;
///
/// # async fn example() -> shelly_rpc::Result<()> {
/// let client = Client::new(HttpTransport::new("192.168.1.40")?);
/// let info = client.get_device_info(false).await?;
/// println!("{} runs {}", info.id, info.ver);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    rpc_url: String,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport for the given host.
    ///
    /// `host` may be a bare address (`192.168.1.40`) or a base URL
    /// (`https://shelly.local:8443`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        let host = host.into();
        if host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{host}")
        };

        let client = Client::builder()
            .timeout(HttpConfig::DEFAULT_TIMEOUT)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            rpc_url: format!("{base_url}/rpc"),
            client,
        })
    }

    /// Returns the RPC endpoint URL.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl Transport for HttpTransport {
    async fn call(&self, request: &RequestFrame) -> Result<ResponseFrame, ProtocolError> {
        tracing::debug!(
            url = %self.rpc_url,
            method = %request.method,
            id = %request.id,
            "Sending HTTP RPC request"
        );

        let response = self
            .client
            .post(&self.rpc_url)
            .json(request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationRequired);
        }

        let body = response.bytes().await.map_err(ProtocolError::Http)?;

        tracing::trace!(
            status = status.as_u16(),
            body = %String::from_utf8_lossy(&body),
            "Received HTTP response"
        );

        // Devices answer RPC errors with a non-2xx status and a regular frame.
        match serde_json::from_slice::<ResponseFrame>(&body) {
            Ok(frame) => Ok(frame),
            Err(_) if !status.is_success() => Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))),
            Err(e) => Err(ProtocolError::MalformedFrame(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_url_from_host() {
        let transport = HttpTransport::new("192.168.1.40").unwrap();
        assert_eq!(transport.rpc_url(), "http://192.168.1.40/rpc");
    }

    #[test]
    fn rpc_url_from_base_url() {
        let transport = HttpTransport::new("https://shelly.local:8443/").unwrap();
        assert_eq!(transport.rpc_url(), "https://shelly.local:8443/rpc");
    }

    #[test]
    fn empty_host_rejected() {
        assert!(matches!(
            HttpTransport::new(""),
            Err(ProtocolError::InvalidAddress(_))
        ));
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.40");
        assert_eq!(config.host(), "192.168.1.40");
        assert_eq!(config.port(), 80);
        assert!(!config.use_https());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_with_https() {
        let config = HttpConfig::new("192.168.1.40").with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
    }

    #[test]
    fn http_config_with_https_custom_port() {
        let config = HttpConfig::new("192.168.1.40").with_port(8443).with_https();
        assert_eq!(config.port(), 8443);
        assert_eq!(config.base_url(), "https://192.168.1.40:8443");
    }

    #[test]
    fn http_config_base_url() {
        assert_eq!(
            HttpConfig::new("192.168.1.40").base_url(),
            "http://192.168.1.40"
        );
        assert_eq!(
            HttpConfig::new("192.168.1.40").with_port(8080).base_url(),
            "http://192.168.1.40:8080"
        );
        assert_eq!(
            HttpConfig::new("192.168.1.40").with_https().base_url(),
            "https://192.168.1.40"
        );
    }

    #[test]
    fn http_config_into_transport() {
        let transport = HttpConfig::new("192.168.1.40")
            .with_port(8080)
            .with_timeout(Duration::from_secs(2))
            .into_transport()
            .unwrap();
        assert_eq!(transport.rpc_url(), "http://192.168.1.40:8080/rpc");
    }
}
