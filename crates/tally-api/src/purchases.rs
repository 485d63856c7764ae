use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use tally_types::api::PurchaseListResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /purchases/{user_id}: list the user's purchases, then mark them seen.
/// Each entry's `seen` is the state before this call.
pub async fn take_purchases(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<PurchaseListResponse>, ApiError> {
    if !state.store.user_exists(&user_id)? {
        return Err(ApiError::unknown_user(&user_id));
    }

    let purchases: Vec<_> = state
        .store
        .take_purchases(&user_id)?
        .into_iter()
        .map(|row| row.into_purchase())
        .collect();

    let unseen = purchases.iter().filter(|p| !p.seen).count();
    info!(
        "Listed {} purchases for user {} ({} new)",
        purchases.len(),
        user_id,
        unseen
    );

    Ok(Json(PurchaseListResponse { purchases }))
}
