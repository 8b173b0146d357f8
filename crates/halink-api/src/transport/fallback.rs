// Fallback delivery mechanism: a blocking `ureq` agent.
//
// A different HTTP stack from the primary, with its own connect and
// overall timeouts. Runs on tokio's blocking pool.

use std::time::Duration;

use super::{
    FALLBACK_CONNECT_TIMEOUT, FALLBACK_TIMEOUT, RawResponse, Transport, TransportRequest,
    USER_AGENT,
};

/// Fallback mechanism backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Agent with the fixed 3 s connect / 5 s overall timeouts.
    pub fn new() -> Self {
        Self::with_timeouts(FALLBACK_CONNECT_TIMEOUT, FALLBACK_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, overall: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect)
            .timeout(overall)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn name(&self) -> &'static str {
        "ureq"
    }

    async fn execute(&self, request: &TransportRequest) -> RawResponse {
        let agent = self.agent.clone();
        let request = request.clone();

        tokio::task::spawn_blocking(move || execute_blocking(&agent, &request))
            .await
            .unwrap_or_else(|e| RawResponse::unreachable(format!("fallback task failed: {e}")))
    }
}

fn execute_blocking(agent: &ureq::Agent, request: &TransportRequest) -> RawResponse {
    let mut req = agent.request(request.method.as_ref(), request.url.as_str());
    for (name, value) in &request.headers {
        req = req.set(name, value);
    }

    let result = match request.body {
        Some(ref body) => req.send_string(body),
        None => req.call(),
    };

    // ureq reports 4xx/5xx as `Error::Status`, which still carries a response.
    match result {
        Ok(resp) | Err(ureq::Error::Status(_, resp)) => read_response(resp),
        Err(ureq::Error::Transport(t)) => RawResponse::unreachable(t.to_string()),
    }
}

fn read_response(resp: ureq::Response) -> RawResponse {
    let status = resp.status();
    match resp.into_string() {
        Ok(body) => RawResponse::new(status, body),
        Err(e) => RawResponse::unreadable(status, e.to_string()),
    }
}
