// src/services/mailer.rs

use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::common::error::AppError;

/// Adapter do provedor de e-mail transacional. A API concreta é a clássica
/// "POST /messages com bearer token"; provedor trocável via env.
#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: String,
    base_url: String,
    from_address: String,
}

impl Mailer {
    /// None quando EMAIL_API_KEY não está definida (dev local sem provedor).
    /// O envio de broadcasts falha com erro explícito nesse caso.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("EMAIL_API_KEY").ok()?;
        let base_url = std::env::var("EMAIL_API_URL")
            .unwrap_or_else(|_| "https://api.mailprovider.com/v1".to_string());
        let from_address = std::env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "no-reply@comunidade.app".to_string());

        Some(Self {
            client: Client::new(),
            api_key,
            base_url,
            from_address,
        })
    }

    /// Um disparo para todos os destinatários (via BCC, o provedor
    /// individualiza). Resposta não-2xx vira erro.
    pub async fn send_bulk(
        &self,
        subject: &str,
        body_html: &str,
        recipients: &[String],
    ) -> Result<(), AppError> {
        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(30))
            .json(&json!({
                "from": self.from_address,
                "bcc": recipients,
                "subject": subject,
                "html": body_html,
            }))
            .send()
            .await?;

        response.error_for_status()?;

        tracing::info!(
            recipients = recipients.len(),
            "Broadcast entregue ao provedor de e-mail"
        );
        Ok(())
    }
}
