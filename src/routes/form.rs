//! src/routes/form.rs

use std::fmt::Formatter;

use actix_web::error::UrlencodedError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::submission::INVALID_INPUT;
use crate::domain::Submission;
use crate::storage::{StoreError, SubmissionStore};
use crate::utils::error_helpers::error_chain_fmt;
use crate::views::{RenderError, ViewRenderer};

pub const FORM_SAVED: &str = "form saved";

#[derive(thiserror::Error)]
pub enum FormError {
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    ParseError(String),

    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// The default `error_response` writes the `Display` text as a plain-text
// body, which is what clients get back.
impl ResponseError for FormError {
    fn status_code(&self) -> StatusCode {
        match self {
            FormError::ValidationError(_) | FormError::ParseError(_) => StatusCode::BAD_REQUEST,
            FormError::StoreError(_) | FormError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// The url-encoded form body. Fields the client leaves out are empty.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
pub struct ContactForm {
    first_name: String,
    last_name: String,
    email: String,
    phone_number: String,
}

impl TryFrom<ContactForm> for Submission {
    type Error = String;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        Submission::parse(form.first_name, form.last_name, form.email, form.phone_number)
    }
}

/// A body that is not url-encoded carries none of the fields, so it is
/// `invalid input`. Other parse failures answer with the parser's message.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        let error = match err {
            UrlencodedError::ContentType => FormError::ValidationError(INVALID_INPUT.into()),
            other => FormError::ParseError(other.to_string()),
        };
        error.into()
    })
}

pub async fn form_page(views: web::Data<dyn ViewRenderer>) -> Result<HttpResponse, RenderError> {
    super::render_view(views.get_ref(), "form.html", None)
}

#[tracing::instrument(
    name = "Saving a contact form submission",
    skip(form, store),
    fields(submitter_email = %form.email)
)]
pub async fn submit_form(
    form: web::Form<ContactForm>,
    store: web::Data<dyn SubmissionStore>,
) -> Result<HttpResponse, FormError> {
    let submission: Submission = form.0.try_into().map_err(FormError::ValidationError)?;

    let store = store.into_inner();
    web::block(move || store.append(&submission))
        .await
        .map_err(|e| {
            FormError::UnexpectedError(anyhow::anyhow!("storage task did not complete: {}", e))
        })??;

    Ok(HttpResponse::Ok()
        .content_type(actix_web::http::header::ContentType::plaintext())
        .body(FORM_SAVED))
}
