//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, FieldError};

/// Validated JSON extractor that automatically validates requests.
///
/// A body that is not valid JSON for `T` is rejected with
/// [`AppError::Unprocessable`]; a body that parses but breaks a rule is
/// rejected with [`AppError::Validation`] listing every offending field.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use cake_store::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCakeRequest {
///     #[validate(required, length(min = 1))]
///     title: Option<String>,
/// }
///
/// async fn create_cake(ValidatedJson(payload): ValidatedJson<CreateCakeRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::unprocessable(e.body_text()))?;

        value.validate().map_err(into_app_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Like [`ValidatedJson`], but a request without a body yields `T::default()`.
///
/// Used for sparse updates, where sending nothing is a valid zero-field patch.
pub struct ValidatedJsonOrDefault<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJsonOrDefault<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::unprocessable(e.body_text()))?;

        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            T::default()
        } else if is_json {
            let Json(value) =
                Json::<T>::from_bytes(&bytes).map_err(|e| AppError::unprocessable(e.body_text()))?;
            value
        } else {
            return Err(AppError::unprocessable(
                "Expected request with `Content-Type: application/json`",
            ));
        };

        value.validate().map_err(into_app_error)?;

        Ok(ValidatedJsonOrDefault(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Turn validator output into a field list, ordered by field name.
pub(crate) fn into_app_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = match &e.message {
                    Some(message) => message.to_string(),
                    None => default_message(&field, &e.code),
                };
                FieldError::new(field.clone(), message)
            })
        })
        .collect();

    fields.sort_by(|a, b| a.name.cmp(&b.name));
    AppError::Validation(fields)
}

fn default_message(field: &str, code: &str) -> String {
    match code {
        "required" => format!("{field} is required"),
        "url" => format!("{field} is not valid url"),
        "range" => format!("{field} is out of range"),
        _ => format!("Validation error on field {field}"),
    }
}
