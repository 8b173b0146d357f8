//! Service-call gateway between a home-automation controller and a
//! Home Assistant hub.
//!
//! - **[`Gateway`]** — Composition root. Resolves the target entity, builds
//!   a [`ServiceCall`], and delivers it through `halink_api`'s
//!   [`TransportClient`](halink_api::TransportClient), which falls back to a
//!   second HTTP stack when the first gives no usable answer.
//!
//! - **[`ServiceCall`]** — The domain/service/payload triple, with
//!   constructors for the light commands.
//!
//! - **[`brightness`]** / **[`entity`]** — Percent-to-brightness mapping and
//!   default-entity resolution.
//!
//! - **[`GatewayConfig`]** — Base URL, bearer token, default entity. Built by
//!   the caller; this crate never reads config files.

pub mod brightness;
pub mod config;
pub mod entity;
pub mod error;
pub mod gateway;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use brightness::to_device_range;
pub use config::GatewayConfig;
pub use error::CoreError;
pub use gateway::Gateway;
pub use service::ServiceCall;

pub use halink_api::{Classification, TlsMode};
