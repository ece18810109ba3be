// src/handlers/database.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{inventory::{Material, Movimentacao}, obras::Obra},
    services::DataService,
};

// Tudo o que as telas precisam numa única leitura
#[derive(Debug, Serialize, ToSchema)]
pub struct DataSnapshot {
    pub materials: Vec<Material>,
    pub obras: Vec<Obra>,
    pub movimentacoes: Vec<Movimentacao>,
}

impl From<&DataService> for DataSnapshot {
    fn from(data: &DataService) -> Self {
        Self {
            materials: data.materials().to_vec(),
            obras: data.obras().to_vec(),
            movimentacoes: data.movimentacoes().to_vec(),
        }
    }
}

// GET /api/data
#[utoipa::path(
    get,
    path = "/api/data",
    tag = "Dados",
    responses((status = 200, description = "Coleções em memória", body = DataSnapshot))
)]
pub async fn get_snapshot(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = app_state.data_service.read().await;
    Ok((StatusCode::OK, Json(DataSnapshot::from(&*data))))
}

// POST /api/reset
// Destrutivo: volta tudo para os dados de exemplo.
#[utoipa::path(
    post,
    path = "/api/reset",
    tag = "Dados",
    responses((status = 200, description = "Banco restaurado para o estado inicial", body = DataSnapshot))
)]
pub async fn reset_database(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let mut data = app_state.data_service.write().await;
    data.reset_database().await;

    Ok((StatusCode::OK, Json(DataSnapshot::from(&*data))))
}
