use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub email: String,
    pub new_password: String,
    pub username: String,
}

/// What the relay answered when it accepted the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailReceipt {
    pub code: String,
    pub message: Vec<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, reset: &PasswordReset) -> anyhow::Result<MailReceipt>;
}
