// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::DashboardResumo,
    services::DashboardService,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Resumo geral do estoque e das obras", body = DashboardResumo)
    )
)]
pub async fn get_summary(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = app_state.data_service.read().await;
    let resumo = DashboardService::resumo(&data);

    Ok((StatusCode::OK, Json(resumo)))
}
