use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::mailer::{MailReceipt, PasswordReset};
use crate::application::use_cases::notifications::send_password_reset::SendPasswordReset;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendEmailResponse {
    pub accepted: bool,
    pub code: String,
    pub message: Vec<String>,
}

impl From<MailReceipt> for SendEmailResponse {
    fn from(r: MailReceipt) -> Self {
        SendEmailResponse {
            accepted: true,
            code: r.code,
            message: r.message,
        }
    }
}

#[utoipa::path(post, path = "/send-email", tag = "Mail", request_body = SendEmailRequest,
    responses(
        (status = 200, body = SendEmailResponse),
        (status = 400, body = ErrorBody),
        (status = 503, description = "Mail relay not configured or unreachable", body = ErrorBody),
    ))]
pub async fn send_email(
    State(ctx): State<AppContext>,
    body: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let Json(req) = body?;
    let (Some(email), Some(new_password), Some(username)) = (
        req.email.filter(|v| !v.trim().is_empty()),
        req.new_password.filter(|v| !v.is_empty()),
        req.username.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ApiError::validation(
            "fields 'email', 'newPassword' and 'username' are required",
        ));
    };
    let email = email.trim().to_string();
    if email.parse::<Mailbox>().is_err() {
        return Err(ApiError::validation("field 'email' is not a valid address"));
    }
    let reset = PasswordReset {
        email,
        new_password,
        username: username.trim().to_string(),
    };
    let mailer = ctx.mailer();
    let uc = SendPasswordReset {
        mailer: mailer.as_ref(),
    };
    let receipt = uc.execute(&reset).await?;
    Ok(Json(receipt.into()))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/send-email", post(send_email))
        .with_state(ctx)
}
