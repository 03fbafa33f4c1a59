//! Email notification service implementation
//!
//! Delivers transactional mail through the mail gateway's HTTP API.
//! Contact form messages are delivered inline; join request notifications
//! are fire-and-forget so review latency never blocks the response.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::utils::errors::{Result, StageCrewError};
use crate::utils::helpers::escape_html;

/// Request body for the gateway send endpoint
#[derive(Debug, Clone, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

/// Email service for admin notifications
#[derive(Debug, Clone)]
pub struct EmailService {
    client: Client,
    config: EmailConfig,
}

impl EmailService {
    /// Create a new EmailService instance
    pub fn new(config: EmailConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("StageCrew-Api/1.0")
            .build()
            .map_err(StageCrewError::Http)?;

        Ok(Self { client, config })
    }

    /// Deliver a contact form message to the admin inbox
    pub async fn send_contact_message(
        &self,
        name: &str,
        reply_to: &str,
        message: &str,
    ) -> Result<()> {
        let subject = format!("Contact form: {}", name);
        let text = format!("From: {} <{}>\n\n{}", name, reply_to, message);
        let html = format!(
            "<p><strong>From:</strong> {} &lt;{}&gt;</p><p>{}</p>",
            escape_html(name),
            escape_html(reply_to),
            escape_html(message).replace('\n', "<br>")
        );

        self.deliver(&self.config.admin_address, &subject, &text, &html)
            .await
    }

    /// Tell the admins someone asked to join. Spawned so the caller never
    /// waits on the mail gateway.
    pub fn notify_join_request(&self, applicant_name: &str, message: Option<&str>) {
        let service = self.clone();
        let subject = format!("Join request from {}", applicant_name);
        let text = match message {
            Some(body) => format!("{} wants to join the team.\n\n{}", applicant_name, body),
            None => format!("{} wants to join the team.", applicant_name),
        };
        let html = format!("<p>{}</p>", escape_html(&text).replace('\n', "<br>"));

        tokio::spawn(async move {
            if let Err(e) = service
                .deliver(&service.config.admin_address, &subject, &text, &html)
                .await
            {
                warn!(error = %e, "Failed to deliver join request notification");
            }
        });
    }

    async fn deliver(&self, to: &str, subject: &str, text: &str, html: &str) -> Result<()> {
        if !self.config.enabled {
            info!(to = %to, subject = %subject, "Email disabled, skipping delivery");
            return Ok(());
        }

        let url = format!("{}/send", self.config.endpoint.trim_end_matches('/'));
        let body = SendRequest {
            from: &self.config.from_address,
            to,
            subject,
            text,
            html,
        };

        debug!(to = %to, subject = %subject, "Sending email");

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StageCrewError::ServiceUnavailable(format!(
                "Mail gateway rejected message: HTTP {} {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[tokio::test]
    async fn test_disabled_email_is_a_noop() {
        let mut config = Settings::default().email;
        config.enabled = false;
        let service = EmailService::new(config).unwrap();

        let result = service
            .send_contact_message("Dana", "dana@example.com", "hello")
            .await;
        assert!(result.is_ok());
    }

    #[test]
    fn test_send_request_serializes_flat() {
        let body = SendRequest {
            from: "noreply@stagecrew.test",
            to: "admin@stagecrew.test",
            subject: "s",
            text: "t",
            html: "<p>t</p>",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["from"], "noreply@stagecrew.test");
        assert_eq!(json["html"], "<p>t</p>");
    }
}
