//! src/routes/data.rs

use std::fmt::Formatter;

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::storage::{StoreError, SubmissionStore};
use crate::utils::error_helpers::error_chain_fmt;
use crate::views::{RenderError, ViewRenderer};

#[derive(thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    RenderError(#[from] RenderError),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for DataError {
    fn status_code(&self) -> StatusCode {
        match self {
            DataError::RenderError(e) => e.status_code(),
            DataError::StoreError(_) | DataError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            DataError::RenderError(e) => e.error_response(),
            // storage details stay in the logs.
            DataError::StoreError(_) | DataError::UnexpectedError(_) => {
                HttpResponse::new(self.status_code())
            }
        }
    }
}

#[tracing::instrument(name = "Listing contact form submissions", skip(store, views))]
pub async fn list_submissions(
    store: web::Data<dyn SubmissionStore>,
    views: web::Data<dyn ViewRenderer>,
) -> Result<HttpResponse, DataError> {
    let store = store.into_inner();
    let submissions = web::block(move || store.load_all())
        .await
        .map_err(|e| anyhow::anyhow!("storage task did not complete: {}", e))??;

    tracing::info!(count = submissions.len(), "Rendering submissions");
    Ok(super::render_view(
        views.get_ref(),
        "table.html",
        Some(submissions.as_slice()),
    )?)
}
