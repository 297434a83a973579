//! Unified request error type.
//!
//! Handlers return `Result<T, WebError>`; internal failures are logged with
//! full detail while the browser only sees a short generic page, so SQL or
//! file paths never leak into a response.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use teletask_core::error::CoreError;

#[derive(Debug, Error)]
pub enum WebError {
    /// The request referenced a task that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Propagated from the storage layer.
    #[error("storage error: {0}")]
    Core(CoreError),

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl From<CoreError> for WebError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NotFound(what) => WebError::NotFound(what),
            other => WebError::Core(other),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(what) => {
                debug!(what = %what, "resource not found");
                (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
            }
            WebError::Core(e) => {
                error!(error = %e, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
            }
            WebError::Template(e) => {
                error!(error = %e, "template rendering error");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
            }
        }
    }
}

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Page introuvable</title></head>
<body>
<h1>Page introuvable</h1>
<p>La tache demandee n'existe pas ou a deja ete supprimee.</p>
<p><a href="/">Retour a la liste</a></p>
</body>
</html>
"#;

const ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html lang="fr">
<head><meta charset="utf-8"><title>Erreur</title></head>
<body>
<h1>Une erreur est survenue</h1>
<p>Reessayez dans quelques instants.</p>
<p><a href="/">Retour a la liste</a></p>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_renders_404() {
        let response = WebError::NotFound("42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_errors_render_500_without_detail() {
        let err = WebError::Core(CoreError::InvalidInput("secret detail".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn core_not_found_converts_to_web_not_found() {
        let err: WebError = CoreError::NotFound("7".to_string()).into();
        assert!(matches!(err, WebError::NotFound(_)));
    }
}
