pub mod handlers;
pub mod middleware;
pub mod result;

use actix_web::web;
use biz_service::biz_service::{self as services, ServiceRes};

/// Registers services, JSON config and every route on an actix `App`.
pub fn configure_app(cfg: &mut web::ServiceConfig, res: ServiceRes) {
    let verifier = res.token_verifier();
    services::configure(cfg, res);
    handlers::configure(cfg, verifier);
}
