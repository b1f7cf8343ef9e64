//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了通知的SMTP邮件实现。

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::info;

use super::Notifier;
use crate::config::MailConfig;
use crate::error::{PartitionError, Result};
use crate::report::MaintenanceReport;

/// SMTP邮件通知
///
/// 报告以HTML正文发送给配置的全部收件人，隐式TLS（默认465端口）
pub struct SmtpNotifier {
    config: MailConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn parse_mailbox(&self, address: &str) -> Result<Mailbox> {
        address.trim().parse().map_err(|e| {
            PartitionError::Mail(format!("Invalid mail address '{}': {}", address, e))
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, report: &MaintenanceReport) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.parse_mailbox(&self.config.username)?)
            .subject(self.config.subject.as_str())
            .header(ContentType::TEXT_HTML);

        for recipient in &self.config.recipients {
            builder = builder.to(self.parse_mailbox(recipient)?);
        }

        let message = builder
            .body(report.to_html())
            .map_err(|e| PartitionError::Mail(format!("Cannot build mail message: {}", e)))?;

        let credentials = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
            .map_err(|e| PartitionError::Mail(format!("Invalid SMTP relay configuration: {}", e)))?
            .port(self.config.port)
            .credentials(credentials)
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| PartitionError::Mail(format!("SMTP delivery failed: {}", e)))?;

        info!(
            "Maintenance report mailed to {} recipient(s)",
            self.config.recipients.len()
        );

        Ok(())
    }
}
