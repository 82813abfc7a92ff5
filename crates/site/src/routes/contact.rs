//! Contact form route handler.
//!
//! Validates the submission and notifies the company inbox by email. There is
//! no retry and no queue: a failed send is reported to the visitor.

use axum::{Json, extract::State};
use brand_mappers_core::Email;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::Inquiry;
use crate::state::AppState;

/// Longest accepted message body.
const MAX_MESSAGE_LENGTH: usize = 5_000;
/// Longest accepted short field (names, phone, business).
const MAX_FIELD_LENGTH: usize = 200;

/// Contact form payload. Missing fields deserialize as empty so they are
/// reported as missing rather than as a malformed body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_name: Option<String>,
    pub message: String,
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

impl ContactForm {
    /// Trim, check required fields and email format.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming what is wrong.
    pub fn validate(self) -> Result<Inquiry> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let message = self.message.trim();

        if first_name.is_empty()
            || last_name.is_empty()
            || self.email.trim().is_empty()
            || message.is_empty()
        {
            return Err(AppError::BadRequest("Missing required fields".to_string()));
        }

        let email = Email::parse(&self.email)
            .map_err(|_| AppError::BadRequest("Invalid email format".to_string()))?;

        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let phone = optional(self.phone);
        let business_name = optional(self.business_name);

        let too_long = [first_name, last_name]
            .into_iter()
            .chain(phone.as_deref())
            .chain(business_name.as_deref())
            .any(|field| field.chars().count() > MAX_FIELD_LENGTH);
        if too_long || message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(AppError::BadRequest("Submission is too long".to_string()));
        }

        Ok(Inquiry {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            phone,
            business_name,
            message: message.to_string(),
        })
    }
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>> {
    let inquiry = form.validate()?;
    add_breadcrumb("contact", "Inquiry submitted", None);

    match state.email() {
        Some(email) => {
            email.send_inquiry(state.contact_inbox(), &inquiry).await?;
        }
        None => {
            tracing::info!(
                from = %inquiry.email,
                subject = %inquiry.subject(),
                "SMTP not configured, inquiry logged only"
            );
        }
    }

    Ok(Json(ContactResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            first_name: " Omar ".to_string(),
            last_name: "Farouk".to_string(),
            email: "omar@events.eg".to_string(),
            phone: Some("  ".to_string()),
            business_name: Some(" Farouk Events ".to_string()),
            message: "We need a stand for March.".to_string(),
        }
    }

    fn bad_request_message(result: Result<Inquiry>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let inquiry = form().validate().unwrap();
        assert_eq!(inquiry.first_name, "Omar");
        assert_eq!(inquiry.phone, None);
        assert_eq!(inquiry.business_name.as_deref(), Some("Farouk Events"));
    }

    #[test]
    fn test_missing_required_field() {
        let mut missing = form();
        missing.last_name = String::new();
        assert_eq!(
            bad_request_message(missing.validate()),
            "Missing required fields"
        );

        let mut blank = form();
        blank.message = "   ".to_string();
        assert_eq!(bad_request_message(blank.validate()), "Missing required fields");
    }

    #[test]
    fn test_invalid_email() {
        let mut bad = form();
        bad.email = "omar at events".to_string();
        assert_eq!(bad_request_message(bad.validate()), "Invalid email format");
    }

    #[test]
    fn test_overlong_message() {
        let mut long = form();
        long.message = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(bad_request_message(long.validate()), "Submission is too long");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let form: ContactForm = serde_json::from_value(serde_json::json!({
            "firstName": "A", "lastName": "B", "email": "a@b.co", "message": "hi",
            "businessName": "Acme"
        }))
        .unwrap();
        assert_eq!(form.business_name.as_deref(), Some("Acme"));
        assert_eq!(form.phone, None);
    }
}
