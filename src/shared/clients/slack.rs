use serde_json::json;

/// Slack 에러 알림
/// Posts server failures to a Slack incoming webhook
#[derive(Clone)]
pub struct SlackNotifier {
    http_client: reqwest::Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(http_client: reqwest::Client, webhook_url: impl Into<String>) -> Self {
        Self {
            http_client,
            webhook_url: webhook_url.into(),
        }
    }

    /// 5xx 응답 알림 전송 (실패해도 요청에는 영향 없음)
    pub async fn notify_error(&self, method: &str, path: &str, status: u16) {
        let payload = json!({
            "attachments": [{
                "color": "danger",
                "title": format!("[{}] {} {}", status, method, path),
                "fields": [
                    { "title": "Method", "value": method, "short": true },
                    { "title": "Path", "value": path, "short": true },
                    { "title": "Status", "value": status.to_string(), "short": true },
                ],
                "ts": chrono::Utc::now().timestamp(),
            }]
        });

        let result = self
            .http_client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(status = %response.status(), "slack webhook rejected error report")
            }
            Err(e) => tracing::warn!(error = %e, "slack webhook request failed"),
        }
    }

    /// 백그라운드 전송
    pub fn spawn_notify_error(&self, method: String, path: String, status: u16) {
        let notifier = self.clone();
        tokio::spawn(async move {
            notifier.notify_error(&method, &path, status).await;
        });
    }
}
