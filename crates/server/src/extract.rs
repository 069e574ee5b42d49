//! # Request Extractors
//!
//! Wrappers around axum's `Json` and `Query` whose rejections render as the
//! standard `{"error": ...}` body.

use crate::errors::AppError;
use axum::extract::{FromRequest, FromRequestParts};

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
