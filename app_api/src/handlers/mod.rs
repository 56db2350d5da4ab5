pub mod common_handler;
pub mod group_handler;
pub mod swagger;

use actix_web::error::JsonPayloadError;
use actix_web::web;
use biz_service::biz_service::user_service::TokenVerifier;
use common::errors::AppError;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| json_error(err).into()));
    common_handler::configure(cfg);
    swagger::configure(cfg);
    group_handler::configure(cfg, verifier);
}

/// Oversized bodies keep 413; anything else unreadable is a 422.
fn json_error(err: JsonPayloadError) -> AppError {
    match err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => AppError::PayloadTooLarge,
        e => AppError::BadParams(e.to_string()),
    }
}
