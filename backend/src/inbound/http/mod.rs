//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod payments;
pub mod schemas;
pub mod schools;
pub mod state;
pub mod students;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;

use actix_web::web;

pub use error::ApiResult;

/// Largest JSON body accepted by the API.
pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Register the `/api` handlers and their extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use school_portal::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(error::json_error_handler),
    )
    .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
    .service(schools::register_school)
    .service(schools::login)
    .service(schools::get_dashboard)
    .service(schools::search_students)
    .service(students::register_student)
    .service(payments::confirm_payment);
}
