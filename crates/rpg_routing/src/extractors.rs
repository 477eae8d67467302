use axum::extract::FromRequest;

use rpg_interface::errors::AppError;

// JSON body whose rejections (bad syntax, wrong types, missing content type)
// answer with the same 400 as a field failing validation.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
