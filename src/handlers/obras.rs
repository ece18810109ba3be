// src/handlers/obras.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        patch::double_option,
        validation::{validate_not_blank, validate_not_negative},
    },
    config::AppState,
    models::obras::{NovaObra, Obra, ObraPatch, ObraStatus},
    services::data_service::FiltroObras,
};

fn validate_dates(inicio: Option<NaiveDate>, fim: Option<NaiveDate>) -> Result<(), ValidationError> {
    if let (Some(inicio), Some(fim)) = (inicio, fim) {
        if fim < inicio {
            let mut err = ValidationError::new("EndBeforeStart");
            err.message = Some("A data prevista de término é anterior ao início.".into());
            return Err(err);
        }
    }
    Ok(())
}

fn date_errors(e: ValidationError) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add("data_fim_prevista", e);
    AppError::ValidationError(errors)
}

// ---
// Payload: CreateObra
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateObraPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome_cliente: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub local: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub metragem: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub valor_total: Option<Decimal>,

    // Sem data, a obra começa hoje
    pub data_inicio: Option<NaiveDate>,
    pub data_fim_prevista: Option<NaiveDate>,
    pub observacoes: Option<String>,
}

impl CreateObraPayload {
    fn into_nova_obra(self, hoje: NaiveDate) -> NovaObra {
        NovaObra {
            nome_cliente: self.nome_cliente.trim().to_string(),
            local: self.local.trim().to_string(),
            metragem: self.metragem,
            valor_total: self.valor_total,
            data_inicio: self.data_inicio.unwrap_or(hoje),
            data_fim_prevista: self.data_fim_prevista,
            observacoes: self.observacoes,
        }
    }
}

// ---
// Payload: UpdateObra
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateObraPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome_cliente: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub local: Option<String>,
    pub status: Option<ObraStatus>,
    // Nos três campos abaixo, `null` limpa o valor gravado
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub metragem: Option<Option<Decimal>>,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub valor_total: Option<Option<Decimal>>,
    pub data_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub data_fim_prevista: Option<Option<NaiveDate>>,
    pub observacoes: Option<String>,
}

impl From<UpdateObraPayload> for ObraPatch {
    fn from(payload: UpdateObraPayload) -> Self {
        Self {
            nome_cliente: payload.nome_cliente.map(|n| n.trim().to_string()),
            local: payload.local.map(|l| l.trim().to_string()),
            status: payload.status,
            metragem: payload.metragem,
            valor_total: payload.valor_total,
            data_inicio: payload.data_inicio,
            data_fim_prevista: payload.data_fim_prevista,
            observacoes: payload.observacoes,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ObraQuery {
    /// "todas" (padrão), "ativas" ou "arquivadas"
    pub status: Option<FiltroObras>,
}

// GET /api/obras
#[utoipa::path(
    get,
    path = "/api/obras",
    tag = "Obras",
    params(ObraQuery),
    responses((status = 200, description = "Obras filtradas por status", body = [Obra]))
)]
pub async fn list_obras(
    State(app_state): State<AppState>,
    Query(query): Query<ObraQuery>,
) -> Result<impl IntoResponse, AppError> {
    let obras = app_state
        .data_service
        .read()
        .await
        .obras_por_status(query.status.unwrap_or_default());
    Ok((StatusCode::OK, Json(obras)))
}

// POST /api/obras
#[utoipa::path(
    post,
    path = "/api/obras",
    tag = "Obras",
    request_body = CreateObraPayload,
    responses(
        (status = 201, description = "Obra cadastrada (sempre ativa)", body = Obra),
        (status = 400, description = "Um ou mais campos são inválidos")
    )
)]
pub async fn create_obra(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateObraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hoje = Local::now().date_naive();
    let nova = payload.into_nova_obra(hoje);
    validate_dates(Some(nova.data_inicio), nova.data_fim_prevista).map_err(date_errors)?;

    let obra = app_state.data_service.write().await.create_obra(nova);
    Ok((StatusCode::CREATED, Json(obra)))
}

// PUT /api/obras/{id}
#[utoipa::path(
    put,
    path = "/api/obras/{id}",
    tag = "Obras",
    params(("id" = String, Path, description = "Id da obra")),
    request_body = UpdateObraPayload,
    responses(
        (status = 200, description = "Obra atualizada", body = Obra),
        (status = 404, description = "Obra não encontrada")
    )
)]
pub async fn update_obra(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateObraPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut data = app_state.data_service.write().await;

    // As datas são conferidas contra o que já está gravado
    let atual = data.find_obra(&id).ok_or_else(|| AppError::ObraNotFound(id.clone()))?;
    let inicio = payload.data_inicio.unwrap_or(atual.data_inicio);
    let fim = payload.data_fim_prevista.unwrap_or(atual.data_fim_prevista);
    validate_dates(Some(inicio), fim).map_err(date_errors)?;

    let obra = data
        .update_obra(&id, payload.into())
        .ok_or(AppError::ObraNotFound(id))?;
    Ok((StatusCode::OK, Json(obra)))
}

// POST /api/obras/{id}/archive
#[utoipa::path(
    post,
    path = "/api/obras/{id}/archive",
    tag = "Obras",
    params(("id" = String, Path, description = "Id da obra")),
    responses(
        (status = 200, description = "Obra arquivada", body = Obra),
        (status = 404, description = "Obra não encontrada")
    )
)]
pub async fn archive_obra(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let obra = app_state
        .data_service
        .write()
        .await
        .archive_obra(&id)
        .ok_or(AppError::ObraNotFound(id))?;
    Ok((StatusCode::OK, Json(obra)))
}

// POST /api/obras/{id}/unarchive
#[utoipa::path(
    post,
    path = "/api/obras/{id}/unarchive",
    tag = "Obras",
    params(("id" = String, Path, description = "Id da obra")),
    responses(
        (status = 200, description = "Obra reativada", body = Obra),
        (status = 404, description = "Obra não encontrada")
    )
)]
pub async fn unarchive_obra(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let obra = app_state
        .data_service
        .write()
        .await
        .unarchive_obra(&id)
        .ok_or(AppError::ObraNotFound(id))?;
    Ok((StatusCode::OK, Json(obra)))
}
