use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use super::page::PageMeta;
use crate::config::BackendSettings;
use crate::error::{CajaError, Result};
use crate::payment::{PaymentIntent, VoidIntent};

/// JSON envelope every mutating endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(backend: &BackendSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(backend.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Fetch the server-rendered invoice page and read its metadata.
    pub fn fetch_invoice(&self, invoice_id: u64) -> Result<PageMeta> {
        let html = self.fetch_html(&format!("/facturas/{invoice_id}"))?;
        PageMeta::from_html(&html)
    }

    /// Re-read server state after a successful mutation. Prefers the
    /// server-provided redirect, falls back to the invoice page. Best-effort:
    /// returns None on any failure so a completed mutation is still reported.
    pub fn refresh(&self, redirect: Option<&str>, invoice_id: u64) -> Option<PageMeta> {
        let path = match redirect {
            Some(p) => p.to_string(),
            None => format!("/facturas/{invoice_id}"),
        };
        let html = self.fetch_html(&path).ok()?;
        PageMeta::from_html(&html).ok()
    }

    /// True when the backend answers at all.
    pub fn ping(&self) -> bool {
        self.agent.get(&self.url("/")).call().is_ok()
    }

    pub fn submit_payment(
        &self,
        invoice_id: u64,
        intent: &PaymentIntent,
        token: Option<&str>,
    ) -> Result<ActionResponse> {
        let body = serde_json::to_string(intent)?;
        self.post_json(&format!("/facturas/{invoice_id}/pagar"), &body, token)
    }

    pub fn void_invoice(
        &self,
        invoice_id: u64,
        intent: &VoidIntent,
        token: Option<&str>,
    ) -> Result<ActionResponse> {
        let body = serde_json::to_string(intent)?;
        self.post_json(&format!("/facturas/{invoice_id}/anular"), &body, token)
    }

    fn fetch_html(&self, path: &str) -> Result<String> {
        let mut response = self.agent.get(&self.url(path)).call()?;
        let status = response.status();
        let body = response.body_mut().read_to_string()?;

        if !status.is_success() {
            return Err(CajaError::HttpStatus {
                status: status.as_u16(),
                message: extract_message(&body)
                    .unwrap_or_else(|| format!("request to {path} failed")),
            });
        }

        Ok(body)
    }

    fn post_json(&self, path: &str, body: &str, token: Option<&str>) -> Result<ActionResponse> {
        let mut request = self
            .agent
            .post(&self.url(path))
            .header("Content-Type", "application/json")
            .header("X-Requested-With", "XMLHttpRequest");
        if let Some(token) = token {
            request = request.header("X-CSRF-Token", token);
        }

        let mut response = request.send(body)?;
        let status = response.status();
        let text = response.body_mut().read_to_string()?;

        // Non-2xx is a failure even when a body is present; pull a message
        // out of the body when we can.
        if !status.is_success() {
            return Err(CajaError::HttpStatus {
                status: status.as_u16(),
                message: extract_message(&text)
                    .unwrap_or_else(|| "the backend rejected the request".to_string()),
            });
        }

        serde_json::from_str(&text).map_err(|_| CajaError::MalformedResponse(truncate_body(&text)))
    }
}

/// Best-effort message extraction from a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(String::from)
}

fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 120;
    if body.chars().count() <= LIMIT {
        body.to_string()
    } else {
        let head: String = body.chars().take(LIMIT).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_from_json_body() {
        let body = r#"{"success": false, "message": "Factura ya anulada"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Factura ya anulada"));
    }

    #[test]
    fn non_json_body_yields_no_message() {
        assert_eq!(extract_message("<html>500</html>"), None);
    }

    #[test]
    fn truncates_long_bodies() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert!(truncated.len() < 200);
        assert!(truncated.ends_with("..."));
    }
}
