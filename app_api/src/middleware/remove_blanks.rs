use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use common::errors::AppError;
use common::util::blank_util::remove_blank_fields;
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ops::Deref;

/// JSON body with every empty-string field removed before deserializing `T`.
///
/// `{ "group": { "name": "", "description": "x" } }` reaches the handler as if
/// `name` had never been sent.
#[derive(Debug)]
pub struct CleanJson<T>(pub T);

impl<T> CleanJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for CleanJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for CleanJson<T> {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<Value>::from_request(req, payload);
        Box::pin(async move {
            let web::Json(value) = body.await.map_err(|e| AppError::BadParams(e.to_string()))?;
            let cleaned = serde_json::from_value(remove_blank_fields(value))?;
            Ok(CleanJson(cleaned))
        })
    }
}
