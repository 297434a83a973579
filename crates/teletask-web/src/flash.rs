//! One-shot status messages carried across the POST/redirect/GET cycle.
//!
//! A message set while handling a POST is stored in a cookie on the redirect
//! response; the next page render consumes it and expires the cookie. The
//! payload is a base64-encoded JSON array so several messages survive a
//! single hop unmangled.

use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

pub const COOKIE_NAME: &str = "teletask_flash";

const CLEAR_COOKIE: &str = "teletask_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Info,
    Success,
}

/// A single message queued for the next page render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }
}

/// A redirect to `location` that carries `flash` to the next page.
pub fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(location).into_response();
    if let Some(value) = cookie_value(&[flash]) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// Messages stored by the previous request, plus whether a flash cookie was
/// present at all. A present cookie must be expired on the response even when
/// its payload failed to decode.
pub fn take(headers: &HeaderMap) -> (Vec<Flash>, bool) {
    let Some(raw) = flash_cookie(headers) else {
        return (Vec::new(), false);
    };
    let flashes = URL_SAFE_NO_PAD
        .decode(raw)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default();
    (flashes, true)
}

/// `Set-Cookie` value that expires the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static(CLEAR_COOKIE)
}

fn cookie_value(flashes: &[Flash]) -> Option<HeaderValue> {
    let payload = serde_json::to_vec(flashes).ok()?;
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    HeaderValue::from_str(&format!(
        "{COOKIE_NAME}={encoded}; Path=/; HttpOnly; SameSite=Lax"
    ))
    .ok()
}

fn flash_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(COOKIE_NAME)
                .and_then(|rest| rest.strip_prefix('='))
        })
}
