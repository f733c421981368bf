//! Best-effort outbound notification capability.
//!
//! The login ping is a nice-to-have: the contract is "try, report whether
//! it went out". No implementation may propagate an error or block the
//! app from starting; failures are logged and swallowed.

use async_trait::async_trait;

/// An injected notification channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt delivery; `true` means the gateway accepted the message.
    async fn notify(&self, user: &str, message: &str) -> bool;
}

/// Used when no gateway is configured.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, user: &str, message: &str) -> bool {
        tracing::debug!(user, message, "notifier disabled; dropping message");
        false
    }
}

/// WhatsApp-gateway settings, typically read from the environment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub from: String,
    pub to: String,
    pub token: String,
}

impl GatewayConfig {
    /// Build from `DAWA_NOTIFY_URL`, `DAWA_NOTIFY_FROM`, `DAWA_NOTIFY_TO`
    /// and `DAWA_NOTIFY_TOKEN`; `None` unless all four are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            url: std::env::var("DAWA_NOTIFY_URL").ok()?,
            from: std::env::var("DAWA_NOTIFY_FROM").ok()?,
            to: std::env::var("DAWA_NOTIFY_TO").ok()?,
            token: std::env::var("DAWA_NOTIFY_TOKEN").ok()?,
        })
    }
}

/// Posts messages to a WhatsApp-style HTTP gateway.
#[derive(Debug)]
pub struct HttpNotifier {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HttpNotifier {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, user: &str, message: &str) -> bool {
        let body = serde_json::json!({
            "from": self.config.from,
            "to": self.config.to,
            "body": format!("{user}: {message}"),
        });
        let result = self
            .client
            .post(&self.config.url)
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await;
        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "notification gateway refused message");
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "notification delivery failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_notifier_reports_nothing_sent() {
        assert!(!NoopNotifier.notify("fridah", "logged in").await);
    }

    #[tokio::test]
    async fn unreachable_gateway_is_swallowed() {
        let notifier = HttpNotifier::new(GatewayConfig {
            // Nothing listens on this port; connection is refused fast.
            url: "http://127.0.0.1:1/send".to_string(),
            from: "pharmacy".to_string(),
            to: "owner".to_string(),
            token: "t".to_string(),
        });
        assert!(!notifier.notify("fridah", "logged in").await);
    }
}
