use serde_json::json;

/// Fire-and-forget webhook alerting.
///
/// Send failures raise a user-visible flag in the session and additionally
/// post a text notification to an external webhook. The post runs as a
/// detached task; nothing in the session waits on it, and its own failure
/// is only logged.
#[derive(Clone)]
pub struct Notifier {
    http_client: reqwest::Client,
    webhook_url: Option<String>,
}

impl Notifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            webhook_url: Some(webhook_url.into()),
        }
    }

    /// A notifier that drops every notification (tests, no webhook
    /// configured).
    pub fn disabled() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            webhook_url: None,
        }
    }

    pub fn notify(&self, message: impl Into<String>) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let payload = json!({
            "msgtype": "text",
            "text": { "content": message.into() },
            "at": { "atMobiles": [], "isAtAll": false },
        });

        let client = self.http_client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.post(&url).json(&payload).send().await {
                tracing::debug!("Notification webhook failed: {}", e);
            }
        });
    }
}
