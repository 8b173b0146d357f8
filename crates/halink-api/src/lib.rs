// halink-api: authenticated HTTP delivery for Home Assistant service calls

pub mod client;
pub mod diagnostics;
pub mod error;
pub mod transport;

pub use client::{Classification, DefaultFallback, TransportClient, TransportOutcome};
pub use diagnostics::{DiagnosticSink, NullSink, TracingSink};
pub use error::Error;
#[cfg(feature = "fallback")]
pub use transport::fallback::UreqTransport;
pub use transport::http::{ReqwestTransport, TlsMode, TransportConfig};
pub use transport::{
    FALLBACK_CONNECT_TIMEOUT, FALLBACK_TIMEOUT, GET_TIMEOUT, Method, NoFallback, POST_TIMEOUT,
    RawResponse, Transport, TransportRequest,
};
