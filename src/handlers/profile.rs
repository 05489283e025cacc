use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    models::{
        profile::{HoldersQuery, HoldersResponse, Profile, ProfilesQuery, ProfilesResponse},
        response::ErrorResponse,
    },
    AppState,
};

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> HandlerError {
    (status, Json(ErrorResponse { error: message }))
}

/// Handler for GET /profiles
/// Top Zora creator coins as dashboard profiles; demo data when Zora is down
pub async fn get_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfilesQuery>,
) -> Result<Json<ProfilesResponse>, HandlerError> {
    query
        .validate()
        .map_err(|e| error(StatusCode::BAD_REQUEST, e))?;

    let limit = query.get_limit();
    let (profiles, origin) = state.zora.profiles_or_demo(limit).await;

    tracing::info!("Serving {} profiles ({:?})", profiles.len(), origin);

    Ok(Json(ProfilesResponse::new(profiles)))
}

/// Handler for GET /profile/{address}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Profile>, HandlerError> {
    if address.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "address cannot be empty".to_string()));
    }

    match state.zora.fetch_profile(&address).await {
        Ok(Some(profile)) => Ok(Json(profile)),
        Ok(None) => Err(error(StatusCode::NOT_FOUND, "Profile not found".to_string())),
        Err(e) => {
            tracing::error!("Failed to fetch profile {}: {}", address, e);
            Err(error(
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch profile: {}", e),
            ))
        }
    }
}

/// Handler for GET /holders/{token_address}
pub async fn get_token_holders(
    State(state): State<AppState>,
    Path(token_address): Path<String>,
    Query(query): Query<HoldersQuery>,
) -> Result<Json<HoldersResponse>, HandlerError> {
    query
        .validate()
        .map_err(|e| error(StatusCode::BAD_REQUEST, e))?;

    match state
        .zora
        .fetch_holders(&token_address, query.get_limit())
        .await
    {
        Ok(holders) => Ok(Json(HoldersResponse {
            count: holders.len(),
            holders,
        })),
        Err(e) => {
            tracing::error!("Failed to fetch holders for {}: {}", token_address, e);
            Err(error(
                StatusCode::BAD_GATEWAY,
                format!("Failed to fetch holders: {}", e),
            ))
        }
    }
}
