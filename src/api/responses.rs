//! Localized API response builders.
//!
//! Every public API response goes through here so the wire shape stays
//! uniform: `success`/`message`/`data` or `error`/`errorCode`, an ISO
//! 8601 `timestamp`, and a `Content-Language` header naming the locale
//! actually served. Nothing in this module can fail - locale loading
//! degrades internally and the builders always produce a response.

use std::collections::HashMap;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::locale::{LocaleService, Resolved};

/// Map an error code to its HTTP status.
///
/// Total over all strings: codes outside the table are internal errors.
pub fn status_for_code(code: &str) -> StatusCode {
    match code {
        "notFound" => StatusCode::NOT_FOUND,
        "unauthorized" => StatusCode::UNAUTHORIZED,
        "rateLimited" => StatusCode::TOO_MANY_REQUESTS,
        "invalidInput" => StatusCode::BAD_REQUEST,
        "emailExists" => StatusCode::CONFLICT,
        "paymentFailed" => StatusCode::PAYMENT_REQUIRED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds locale-aware JSON responses.
#[derive(Debug, Clone)]
pub struct ApiResponses {
    locale: LocaleService,
}

impl ApiResponses {
    pub fn new(locale: LocaleService) -> Self {
        Self { locale }
    }

    /// Localized error response, status per [`status_for_code`].
    pub async fn error(
        &self,
        error_code: &str,
        locale: &str,
        variables: Option<&HashMap<&str, String>>,
    ) -> Response {
        let doc = self.locale.load_locale(locale).await;
        let message = self
            .locale
            .token(&doc, &format!("api.errors.{error_code}"), variables);
        let status = status_for_code(error_code);

        warn!(
            locale = %doc.locale,
            code = %error_code,
            status = status.as_u16(),
            "api error response"
        );

        with_content_language(
            status,
            &doc.locale,
            json!({
                "success": false,
                "error": message,
                "errorCode": error_code,
                "timestamp": iso_now(),
            }),
        )
    }

    /// Localized success response, always HTTP 200.
    pub async fn success(
        &self,
        success_code: &str,
        data: Value,
        locale: &str,
        variables: Option<&HashMap<&str, String>>,
    ) -> Response {
        let doc = self.locale.load_locale(locale).await;
        let message = self
            .locale
            .token(&doc, &format!("api.success.{success_code}"), variables);

        info!(locale = %doc.locale, code = %success_code, "api success response");

        with_content_language(
            StatusCode::OK,
            &doc.locale,
            json!({
                "success": true,
                "message": message,
                "data": data,
                "timestamp": iso_now(),
            }),
        )
    }

    /// Per-field validation errors, HTTP 400.
    ///
    /// Each field tries its specific key (`validation.{field}.{error}`)
    /// first; a miss falls back to the generic `validation.{error}`
    /// key. The fallback decision reads the tagged resolution result,
    /// never the rendered string.
    pub async fn validation_error(
        &self,
        field_errors: &[(String, Vec<String>)],
        locale: &str,
    ) -> Response {
        let doc = self.locale.load_locale(locale).await;

        let mut validation = serde_json::Map::new();
        for (field, error_keys) in field_errors {
            let messages: Vec<String> = error_keys
                .iter()
                .map(
                    |key| match doc.resolve(&format!("validation.{field}.{key}")) {
                        Resolved::Found(message) => message,
                        Resolved::Missing(_) => doc.token(&format!("validation.{key}"), None),
                    },
                )
                .collect();
            validation.insert(field.clone(), json!(messages));
        }

        let error = self.locale.token(&doc, "api.errors.invalidInput", None);

        warn!(
            locale = %doc.locale,
            fields = ?field_errors.iter().map(|(f, _)| f).collect::<Vec<_>>(),
            "api validation error response"
        );

        with_content_language(
            StatusCode::BAD_REQUEST,
            &doc.locale,
            json!({
                "success": false,
                "error": error,
                "validationErrors": Value::Object(validation),
                "timestamp": iso_now(),
            }),
        )
    }

    /// Rate-limit response: HTTP 429 with a `Retry-After` header
    /// echoing the body's `retryAfter` field.
    pub async fn rate_limit(&self, retry_after_seconds: u64, locale: &str) -> Response {
        let doc = self.locale.load_locale(locale).await;
        let message = self.locale.token(&doc, "api.errors.rateLimited", None);

        warn!(
            locale = %doc.locale,
            retry_after = retry_after_seconds,
            "api rate limit response"
        );

        let mut response = with_content_language(
            StatusCode::TOO_MANY_REQUESTS,
            &doc.locale,
            json!({
                "success": false,
                "error": message,
                "errorCode": "rateLimited",
                "retryAfter": retry_after_seconds,
                "timestamp": iso_now(),
            }),
        );

        if let Ok(value) = HeaderValue::from_str(&retry_after_seconds.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    }

    /// Last-resort hardcoded English 500, for paths that must respond
    /// even when the rest of the pipeline is unusable.
    pub fn internal_fallback() -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "An unexpected error occurred. Please try again later.",
                "errorCode": "internalError",
                "timestamp": iso_now(),
            })),
        )
            .into_response()
    }
}

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn with_content_language(status: StatusCode, locale: &str, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    if let Ok(value) = HeaderValue::from_str(locale) {
        response
            .headers_mut()
            .insert(header::CONTENT_LANGUAGE, value);
    }
    response
}
