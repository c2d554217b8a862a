//! Extractors whose rejections are answered through `AppError`, so a
//! malformed body or path still gets a `{ "error": ... }` response.

use axum::extract::{FromRequest, FromRequestParts};

use crate::routes::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
