//! src/routes

use actix_web::http::header::ContentType;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::domain::Submission;
use crate::views::{RenderError, ViewRenderer};

pub mod data;
pub mod form;

pub const NOT_FOUND: &str = "not found";

/// Registers `/` and `/data`. A method a resource does not serve gets the
/// same 404 as an unknown path.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::get().to(form::form_page))
            .route(web::post().to(form::submit_form))
            .default_service(web::to(not_found)),
    )
    .service(
        web::resource("/data")
            .route(web::get().to(data::list_submissions))
            .default_service(web::to(not_found)),
    );
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        "No handler for request"
    );
    HttpResponse::NotFound()
        .content_type(ContentType::plaintext())
        .body(NOT_FOUND)
}

fn render_view(
    views: &dyn ViewRenderer,
    template: &str,
    submissions: Option<&[Submission]>,
) -> Result<HttpResponse, RenderError> {
    let body = views.render(template, submissions).map_err(|e| {
        tracing::error!(error.message = %e, template, "Failed to render view");
        e
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}
