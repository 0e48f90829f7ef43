//! Favorites endpoints.

use axum::{
    Form, Json,
    extract::{Path, State},
};
use hotel_favorites_core::FavoriteSlug;
use hotel_favorites_core::wire::{FavoritesResponse, SYNC_FIELD, SyncResponse, ToggleResponse};
use tracing::{debug, info, instrument};

use crate::error::{AppError, Result};
use crate::middleware::{CsrfVerified, RequireCustomer};
use crate::state::AppState;

/// Toggle one slug on the customer's favorites.
#[instrument(skip_all, fields(account_id = %account.id, slug = %slug))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireCustomer(account): RequireCustomer,
    _csrf: CsrfVerified,
    Path(slug): Path<String>,
) -> Result<Json<ToggleResponse>> {
    let slug = FavoriteSlug::parse(&slug).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let added = state.favorites().toggle(account.id, slug).await;
    info!(added, "Favorite toggled");

    Ok(Json(ToggleResponse { added }))
}

/// Merge the `slugs[]` form fields into the customer's favorites.
///
/// Invalid slugs are skipped rather than failing the whole batch.
#[instrument(skip_all, fields(account_id = %account.id))]
pub async fn sync(
    State(state): State<AppState>,
    RequireCustomer(account): RequireCustomer,
    _csrf: CsrfVerified,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Json<SyncResponse>> {
    let slugs: Vec<FavoriteSlug> = fields
        .into_iter()
        .filter(|(name, _)| name == SYNC_FIELD)
        .filter_map(|(_, value)| match FavoriteSlug::parse(&value) {
            Ok(slug) => Some(slug),
            Err(e) => {
                debug!(value, error = %e, "Skipping invalid slug in sync");
                None
            }
        })
        .collect();

    let count = slugs.len();
    let added = state.favorites().merge(account.id, slugs).await;
    info!(count, added, "Favorites synced");

    Ok(Json(SyncResponse { added }))
}

/// List the customer's favorites.
pub async fn list(
    State(state): State<AppState>,
    RequireCustomer(account): RequireCustomer,
) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        slugs: state.favorites().list(account.id).await,
    })
}
