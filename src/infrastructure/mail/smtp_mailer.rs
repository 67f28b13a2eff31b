use anyhow::Context;
use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::application::ports::GatewayUnavailable;
use crate::application::ports::mailer::{MailReceipt, Mailer, PasswordReset};
use crate::bootstrap::config::MailConfig;

pub const PASSWORD_RESET_SUBJECT: &str = "Contraseña olvidada";

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    notify_to: Option<Mailbox>,
}

impl SmtpMailer {
    pub fn new(cfg: &MailConfig) -> anyhow::Result<Self> {
        let (Some(user), Some(password)) = (&cfg.smtp_user, &cfg.smtp_password) else {
            anyhow::bail!("SMTP_USER and PASSWORD_MAIL_SERVICE are required for mail delivery");
        };
        let from: Mailbox = cfg
            .from
            .as_deref()
            .unwrap_or(user)
            .parse()
            .context("MAIL_FROM is not a valid mailbox")?;
        let notify_to = cfg
            .notify_to
            .as_deref()
            .map(|s| s.parse::<Mailbox>())
            .transpose()
            .context("MAIL_NOTIFY_TO is not a valid mailbox")?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)?
            .credentials(Credentials::new(user.clone(), password.clone()))
            .build();
        Ok(Self {
            transport,
            from,
            notify_to,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_password_reset(&self, reset: &PasswordReset) -> anyhow::Result<MailReceipt> {
        let message = compose_password_reset(&self.from, self.notify_to.as_ref(), reset)?;
        let response = self
            .transport
            .send(message)
            .await
            .context("smtp relay rejected password reset mail")?;
        Ok(MailReceipt {
            code: response.code().to_string(),
            message: response.message().map(str::to_string).collect(),
        })
    }
}

/// Stand-in used when no SMTP credentials are configured.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_password_reset(&self, _reset: &PasswordReset) -> anyhow::Result<MailReceipt> {
        Err(GatewayUnavailable {
            gateway: "mail relay",
            reason: "SMTP credentials are not configured".into(),
        }
        .into())
    }
}

pub fn password_reset_body(reset: &PasswordReset) -> String {
    format!(
        "Usuario: {}\nEmail: {}\nNueva Contraseña: {}",
        reset.username, reset.email, reset.new_password
    )
}

/// Builds the reset mail. Goes to `notify_to` when set, otherwise to the user.
pub fn compose_password_reset(
    from: &Mailbox,
    notify_to: Option<&Mailbox>,
    reset: &PasswordReset,
) -> anyhow::Result<Message> {
    let to = match notify_to {
        Some(mb) => mb.clone(),
        None => reset
            .email
            .parse::<Mailbox>()
            .context("recipient email is not a valid mailbox")?,
    };
    let message = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(PASSWORD_RESET_SUBJECT)
        .header(ContentType::TEXT_PLAIN)
        .body(password_reset_body(reset))?;
    Ok(message)
}
