// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::settings::ThemeResponse,
};

// GET /api/theme
#[utoipa::path(
    get,
    path = "/api/theme",
    tag = "Tema",
    responses((status = 200, description = "Tema atual e sua paleta", body = ThemeResponse))
)]
pub async fn get_theme(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let theme = app_state.theme_service.read().await;

    Ok((
        StatusCode::OK,
        Json(ThemeResponse { name: theme.current(), palette: theme.palette() }),
    ))
}

// POST /api/theme/toggle
#[utoipa::path(
    post,
    path = "/api/theme/toggle",
    tag = "Tema",
    responses((status = 200, description = "Tema alternado entre claro e escuro", body = ThemeResponse))
)]
pub async fn toggle_theme(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut theme = app_state.theme_service.write().await;
    let name = theme.toggle();
    tracing::info!("Tema alterado para {}", name.as_str());

    Ok((StatusCode::OK, Json(ThemeResponse { name, palette: name.palette() })))
}
