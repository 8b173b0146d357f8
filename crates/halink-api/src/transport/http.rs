// Primary delivery mechanism: the pooled async `reqwest` client.
//
// TLS and user-agent settings live in `TransportConfig` so the gateway can
// build one client per configuration and reuse its connection pool.

use std::path::PathBuf;

use reqwest::header::HeaderValue;
use tracing::trace;

use super::{RawResponse, Transport, TransportRequest, USER_AGENT};
use crate::error::Error;

/// TLS verification mode for the primary mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsMode {
    /// Use the bundled web PKI roots.
    #[default]
    System,
    /// Trust an additional CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (self-signed hubs on the local network).
    DangerAcceptInvalid,
}

/// Settings for building the primary HTTP client.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub tls: TlsMode,
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    ///
    /// No client-wide timeout is set: each request carries its own.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Primary mechanism backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn build(&self, request: &TransportRequest) -> Result<reqwest::RequestBuilder, String> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            let mut value = HeaderValue::from_str(value)
                .map_err(|e| format!("invalid value for header {name}: {e}"))?;
            if name.eq_ignore_ascii_case("authorization") {
                value.set_sensitive(true);
            }
            builder = builder.header(name.as_str(), value);
        }

        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder)
    }
}

impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn execute(&self, request: &TransportRequest) -> RawResponse {
        let builder = match self.build(request) {
            Ok(builder) => builder,
            Err(reason) => return RawResponse::unreachable(reason),
        };

        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                trace!(error = %e, "primary send failed");
                return RawResponse::unreachable(e.to_string());
            }
        };

        let status = resp.status().as_u16();
        match resp.text().await {
            Ok(body) => RawResponse::new(status, body),
            Err(e) => RawResponse::unreadable(status, e.to_string()),
        }
    }
}
