use crate::config::DiscordConfig;
use crate::plugins::traits::{ChapterUpdate, Notifier};
use crate::utils::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const EMBED_COLOR: u32 = 0x0099ff;

pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
    username: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>, username: impl Into<String>) -> Self {
        DiscordNotifier {
            client: Client::new(),
            webhook_url: webhook_url.into(),
            username: username.into(),
        }
    }

    /// `None` when no webhook is configured.
    pub fn from_config(config: &DiscordConfig) -> Option<Self> {
        config
            .webhook_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.username.clone()))
    }

    fn create_embed(&self, update: &ChapterUpdate) -> serde_json::Value {
        json!({
            "title": format!("📖 {}", update.title),
            "url": update.chapter_url,
            "color": EMBED_COLOR,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "fields": [
                {
                    "name": "New Chapter",
                    "value": format!("**Chapter {}** (was {})", update.chapter_number, update.previous_chapter),
                    "inline": true
                },
                {
                    "name": "Site",
                    "value": update.site,
                    "inline": true
                }
            ],
            "footer": {
                "text": "Manga Watcher"
            }
        })
    }

    fn create_webhook_payload(&self, update: &ChapterUpdate) -> serde_json::Value {
        json!({
            "username": self.username,
            "embeds": [self.create_embed(update)]
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        "discord"
    }

    async fn notify(&self, update: &ChapterUpdate) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&self.create_webhook_payload(update))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Notification(format!(
                "Discord webhook returned {}: {}",
                status, body
            )));
        }

        tracing::debug!("Sent Discord notification for '{}'", update.title);
        Ok(())
    }
}
