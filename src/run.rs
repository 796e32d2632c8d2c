use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::config::AppSettings;
use crate::routes::form::form_config;
use crate::routes::{not_found, routes};
use crate::storage::SubmissionStore;
use crate::views::ViewRenderer;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn SubmissionStore>,
    views: Arc<dyn ViewRenderer>,
    settings: &AppSettings,
) -> Result<Server, std::io::Error> {
    let store = web::Data::from(store);
    let views = web::Data::from(views);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(form_config())
            .app_data(store.clone())
            .app_data(views.clone())
            .configure(routes)
            .default_service(web::to(not_found))
    })
    .client_request_timeout(Duration::from_secs(settings.request_timeout_secs))
    // grace period for in-flight requests once SIGINT/SIGTERM arrives.
    .shutdown_timeout(settings.shutdown_timeout_secs)
    .listen(listener)?
    .run())
}
