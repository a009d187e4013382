// src/delivery.rs - ships the result table over SMTP
use crate::models::Result;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub recipient: String,
}

impl DeliveryConfig {
    /// Every value must be present (and the port numeric) for delivery to be
    /// attempted. Anything missing means skip, not error.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            host: std::env::var("SMTP_HOST").ok()?,
            port: std::env::var("SMTP_PORT").ok()?.parse().ok()?,
            user: std::env::var("SMTP_USER").ok()?,
            password: std::env::var("SMTP_PASS").ok()?,
            recipient: std::env::var("MAIL_TO").ok()?,
        })
    }
}

pub struct ResultMailer {
    config: DeliveryConfig,
}

impl ResultMailer {
    pub fn new(config: DeliveryConfig) -> Self {
        debug!("Created ResultMailer for host: {}", config.host);
        Self { config }
    }

    pub async fn send_results(&self, csv_path: &str, found_count: usize) -> Result<()> {
        let csv_bytes = tokio::fs::read(csv_path).await?;
        let filename = Path::new(csv_path)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "emails.csv".to_string());

        let body = format!(
            "Attached are {} deduped emails scraped from targets.\nFile: {}",
            found_count, filename
        );

        let message = Message::builder()
            .from(self.config.user.parse()?)
            .to(self.config.recipient.parse()?)
            .subject(format!("[Sponsorship Bot] {} emails found", found_count))
            .multipart(
                MultiPart::mixed()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body),
                    )
                    .singlepart(
                        Attachment::new(filename)
                            .body(csv_bytes, ContentType::parse("text/csv")?),
                    ),
            )?;

        debug!(
            "Sending result table to {} via {}:{}",
            self.config.recipient, self.config.host, self.config.port
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(message).await?;

        Ok(())
    }
}
