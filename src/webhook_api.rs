use anyhow::{Context, Result, anyhow};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Бот хариу буцаагаагүй үед харуулах мөр.
pub const NO_REPLY_FALLBACK: &str = "Бот хариулт өгөөгүй байна.";
/// Сүлжээний алдаа гарсан үед харуулах мөр.
pub const SERVER_ERROR_FALLBACK: &str = "Алдаа гарлаа. Rasa сервер ажиллаж байна уу?";

const REST_WEBHOOK_PATH: &str = "/webhooks/rest/webhook";

#[derive(Clone, Debug)]
pub struct WebhookConfig {
    pub host: String,
    pub sender: String,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:5005".to_string(),
            sender: "user123".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Serialize, Debug)]
struct RestWebhookRequest<'a> {
    sender: &'a str,
    message: &'a str,
}

/// Rasa REST сувгийн хариултын нэг элемент. `text`-ээс бусад талбарыг
/// тоохгүй.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ReplyItem {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("failed to build the HTTP client")?;

        Ok(Self { client, config })
    }

    /// Нэг зурвас илгээж, серверийн бүх хариултыг буцаана.
    pub async fn send_message(&self, message: &str) -> Result<Vec<ReplyItem>> {
        let req = RestWebhookRequest {
            sender: &self.config.sender,
            message,
        };

        let resp = self
            .client
            .post(self.url(REST_WEBHOOK_PATH))
            .header(CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await
            .context("webhook request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("HTTP error {status}: {body}"));
        }

        let replies: Vec<ReplyItem> = resp
            .json()
            .await
            .context("webhook response is not a JSON reply array")?;

        Ok(replies)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }
}

/// Серверийн хариултуудыг харуулах мөрүүд болгож хөрвүүлнэ.
///
/// Хоосон жагсаалт ганц fallback мөр болно; `text`-гүй юм уу хоосон
/// `text`-тэй элементийг алгасна.
pub fn reply_lines(replies: &[ReplyItem]) -> Vec<String> {
    if replies.is_empty() {
        return vec![NO_REPLY_FALLBACK.to_string()];
    }

    replies
        .iter()
        .filter_map(|item| item.text.as_deref())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_lines_empty_array_falls_back() {
        assert_eq!(reply_lines(&[]), vec![NO_REPLY_FALLBACK.to_string()]);
    }

    #[test]
    fn reply_lines_keeps_array_order_and_skips_blank_items() {
        let replies = vec![
            ReplyItem {
                text: Some("Hello".to_string()),
            },
            ReplyItem {
                text: Some(String::new()),
            },
            ReplyItem { text: None },
            ReplyItem {
                text: Some("Bye".to_string()),
            },
        ];

        assert_eq!(reply_lines(&replies), vec!["Hello", "Bye"]);
    }

    #[test]
    fn reply_lines_non_empty_array_without_text_renders_nothing() {
        let replies = vec![ReplyItem { text: None }];

        assert!(reply_lines(&replies).is_empty());
    }

    #[test]
    fn reply_item_ignores_unknown_fields() {
        let replies: Vec<ReplyItem> = serde_json::from_str(
            r#"[{"recipient_id":"user123","text":"Сайн байна уу!"},{"custom":{"k":1}}]"#,
        )
        .unwrap();

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text.as_deref(), Some("Сайн байна уу!"));
        assert!(replies[1].text.is_none());
    }

    #[test]
    fn request_payload_serializes_sender_and_message() {
        let req = RestWebhookRequest {
            sender: "user123",
            message: "Номын сан хаана байдаг вэ?",
        };

        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(
            json,
            r#"{"sender":"user123","message":"Номын сан хаана байдаг вэ?"}"#
        );
    }
}
