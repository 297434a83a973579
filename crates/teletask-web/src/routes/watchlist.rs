//! Watchlist import endpoint.
//!
//! POST-only: browsing to the URL must never trigger an import, and axum
//! answers stray GETs with 405 because no GET handler is registered. Every
//! outcome, including catalog failures, lands back on the list page with a
//! flash message; only a storage failure surfaces as a server error.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tracing::{info, warn};

use teletask_core::catalog::CatalogError;
use teletask_core::providers;
use teletask_core::watchlist::{self, WatchlistError, DEFAULT_IMPORT_LIMIT};

use crate::error::WebError;
use crate::flash::{self, Flash};
use crate::state::AppState;

/// Register the import route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/watchlist/{provider_slug}/", post(import_watchlist))
}

/// POST `/watchlist/{provider_slug}/`: import up to ten top-rated series for
/// the platform, then redirect to the list with a status message.
async fn import_watchlist(
    State(state): State<Arc<AppState>>,
    Path(provider_slug): Path<String>,
) -> Result<Response, WebError> {
    let Some(provider) = providers::find(&provider_slug) else {
        warn!(slug = %provider_slug, "import requested for unsupported provider");
        return Ok(flash::redirect_with_flash(
            "/",
            Flash::error("Plateforme non supportee."),
        ));
    };

    let outcome = watchlist::import_provider_watchlist(
        &state.repo,
        &state.catalog,
        provider,
        DEFAULT_IMPORT_LIMIT,
    )
    .await;

    match outcome {
        Ok(0) => Ok(flash::redirect_with_flash(
            "/",
            Flash::info(format!(
                "Aucune nouvelle serie {} a ajouter.",
                provider.label
            )),
        )),
        Ok(created) => {
            info!(provider = provider.slug, created, "watchlist import finished");
            Ok(flash::redirect_with_flash(
                "/",
                Flash::success(format!(
                    "{} series {} ajoutees a votre watchlist.",
                    created, provider.label
                )),
            ))
        }
        Err(WatchlistError::Catalog(e)) => {
            warn!(provider = provider.slug, error = %e, "catalog import failed");
            Ok(flash::redirect_with_flash(
                "/",
                Flash::error(catalog_flash_message(&e)),
            ))
        }
        Err(WatchlistError::Core(e)) => Err(e.into()),
    }
}

/// The user-facing message for each way the catalog can fail.
fn catalog_flash_message(error: &CatalogError) -> String {
    match error {
        // Construction failures surface in `AppState::new`, before any
        // request is served.
        CatalogError::Client(_) => "Client HTTP indisponible.".to_string(),
        CatalogError::MissingToken => {
            "TMDB_READ_ACCESS_TOKEN manquant. Configurez cette variable d'environnement."
                .to_string()
        }
        CatalogError::Unauthorized => {
            "TMDB a refuse la requete (401). Verifiez votre Read Access Token.".to_string()
        }
        CatalogError::Status(status) => {
            format!("TMDB a retourne une erreur HTTP ({}).", status.as_u16())
        }
        CatalogError::Timeout => "TMDB ne repond pas (timeout).".to_string(),
        CatalogError::Network(_) => "Impossible de contacter TMDB (probleme reseau).".to_string(),
        CatalogError::Decode(_) => {
            "Reponse TMDB invalide. Reessayez dans quelques secondes.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn every_catalog_error_has_a_distinct_message() {
        let messages = [
            catalog_flash_message(&CatalogError::MissingToken),
            catalog_flash_message(&CatalogError::Unauthorized),
            catalog_flash_message(&CatalogError::Status(StatusCode::SERVICE_UNAVAILABLE)),
            catalog_flash_message(&CatalogError::Timeout),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn status_message_contains_the_code() {
        let message = catalog_flash_message(&CatalogError::Status(StatusCode::BAD_GATEWAY));
        assert_eq!(message, "TMDB a retourne une erreur HTTP (502).");
    }
}
