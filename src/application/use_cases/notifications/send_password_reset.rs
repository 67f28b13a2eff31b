use crate::application::ports::mailer::{MailReceipt, Mailer, PasswordReset};

pub struct SendPasswordReset<'a, M: Mailer + ?Sized> {
    pub mailer: &'a M,
}

impl<'a, M: Mailer + ?Sized> SendPasswordReset<'a, M> {
    pub async fn execute(&self, reset: &PasswordReset) -> anyhow::Result<MailReceipt> {
        let receipt = self.mailer.send_password_reset(reset).await.map_err(|err| {
            tracing::error!(error = ?err, username = %reset.username, "password_reset_mail_failed");
            err
        })?;
        tracing::info!(username = %reset.username, code = %receipt.code, "password_reset_mail_sent");
        Ok(receipt)
    }
}
