// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::{
    common::{
        error::AppError,
        validation::{validate_not_blank, validate_not_negative, validate_positive},
    },
    config::AppState,
    models::inventory::{
        Material, MaterialPatch, Movimentacao, NovaMovimentacao, NovoMaterial, TipoMovimentacao,
        UnidadeMedida, UnidadeOpcao,
    },
    services::data_service::{FiltroEstoque, FiltroHistorico, FiltroMateriais},
};

// ---
// Payload: CreateMaterial
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome: String,

    #[serde(default)] // Sem unidade, assume "un"
    pub unidade_medida: UnidadeMedida,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub quantidade: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub estoque_minimo: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub valor_unitario: Decimal,

    pub local_compra: Option<String>,
}

impl From<CreateMaterialPayload> for NovoMaterial {
    fn from(payload: CreateMaterialPayload) -> Self {
        Self {
            nome: payload.nome.trim().to_string(),
            unidade_medida: payload.unidade_medida,
            quantidade: payload.quantidade,
            estoque_minimo: payload.estoque_minimo,
            valor_unitario: payload.valor_unitario,
            local_compra: payload.local_compra,
        }
    }
}

// ---
// Payload: UpdateMaterial (todos os campos opcionais)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaterialPayload {
    #[validate(custom(function = "validate_not_blank"))]
    pub nome: Option<String>,
    pub unidade_medida: Option<UnidadeMedida>,
    #[validate(custom(function = "validate_not_negative"))]
    pub quantidade: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub estoque_minimo: Option<Decimal>,
    #[validate(custom(function = "validate_not_negative"))]
    pub valor_unitario: Option<Decimal>,
    pub local_compra: Option<String>,
}

impl From<UpdateMaterialPayload> for MaterialPatch {
    fn from(payload: UpdateMaterialPayload) -> Self {
        Self {
            nome: payload.nome.map(|n| n.trim().to_string()),
            unidade_medida: payload.unidade_medida,
            quantidade: payload.quantidade,
            estoque_minimo: payload.estoque_minimo,
            valor_unitario: payload.valor_unitario,
            local_compra: payload.local_compra,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MaterialQuery {
    /// Busca por nome ou local de compra
    pub busca: Option<String>,
    /// "all" (padrão) ou "low" para estoque baixo
    pub estoque: Option<FiltroEstoque>,
}

// GET /api/materials
#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Materiais",
    params(MaterialQuery),
    responses((status = 200, description = "Materiais filtrados", body = [Material]))
)]
pub async fn list_materials(
    State(app_state): State<AppState>,
    Query(query): Query<MaterialQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtro = FiltroMateriais {
        termo: query.busca,
        estoque: query.estoque.unwrap_or_default(),
    };
    let materials = app_state.data_service.read().await.buscar_materiais(&filtro);
    Ok((StatusCode::OK, Json(materials)))
}

// POST /api/materials
#[utoipa::path(
    post,
    path = "/api/materials",
    tag = "Materiais",
    request_body = CreateMaterialPayload,
    responses(
        (status = 201, description = "Material criado", body = Material),
        (status = 400, description = "Um ou mais campos são inválidos")
    )
)]
pub async fn create_material(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .data_service
        .write()
        .await
        .create_material(payload.into());

    Ok((StatusCode::CREATED, Json(material)))
}

// PUT /api/materials/{id}
#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = "Materiais",
    params(("id" = String, Path, description = "Id do material")),
    request_body = UpdateMaterialPayload,
    responses(
        (status = 200, description = "Material atualizado", body = Material),
        (status = 404, description = "Material não encontrado")
    )
)]
pub async fn update_material(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let material = app_state
        .data_service
        .write()
        .await
        .update_material(&id, payload.into())
        .ok_or(AppError::MaterialNotFound(id))?;

    Ok((StatusCode::OK, Json(material)))
}

// DELETE /api/materials/{id}
// As movimentações antigas continuam apontando para o id removido.
#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = "Materiais",
    params(("id" = String, Path, description = "Id do material")),
    responses(
        (status = 204, description = "Material removido"),
        (status = 404, description = "Material não encontrado")
    )
)]
pub async fn delete_material(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let removed = app_state.data_service.write().await.delete_material(&id);
    if !removed {
        return Err(AppError::MaterialNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/units
#[utoipa::path(
    get,
    path = "/api/units",
    tag = "Materiais",
    responses((status = 200, description = "Unidades de medida", body = [UnidadeOpcao]))
)]
pub async fn list_units() -> impl IntoResponse {
    let units: Vec<UnidadeOpcao> = UnidadeMedida::ALL.into_iter().map(UnidadeOpcao::from).collect();
    Json(units)
}

// ---
// Payload: CreateMovimentacao
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMovimentacaoPayload {
    pub tipo: TipoMovimentacao,

    #[validate(custom(function = "validate_not_blank"))]
    pub material_id: String,

    // Obrigatória nas saídas, ignorada nas entradas
    pub obra_id: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub quantidade: Decimal,

    pub observacao: Option<String>,
}

impl CreateMovimentacaoPayload {
    fn validate_consistency(&self) -> Result<(), ValidationError> {
        let tem_obra = self.obra_id.as_deref().is_some_and(|id| !id.trim().is_empty());
        if self.tipo == TipoMovimentacao::Saida && !tem_obra {
            let mut err = ValidationError::new("ObraRequiredForSaida");
            err.message = Some("Selecione a obra de destino.".into());
            return Err(err);
        }
        Ok(())
    }
}

impl From<CreateMovimentacaoPayload> for NovaMovimentacao {
    fn from(payload: CreateMovimentacaoPayload) -> Self {
        let obra_id = match payload.tipo {
            TipoMovimentacao::Saida => payload.obra_id,
            TipoMovimentacao::Entrada => None,
        };
        Self {
            tipo: payload.tipo,
            material_id: payload.material_id,
            obra_id,
            quantidade: payload.quantidade,
            observacao: payload.observacao,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoricoQuery {
    /// Busca por material, obra ou observação
    pub busca: Option<String>,
    pub obra_id: Option<String>,
    pub material_id: Option<String>,
}

// GET /api/movimentacoes
#[utoipa::path(
    get,
    path = "/api/movimentacoes",
    tag = "Movimentações",
    params(HistoricoQuery),
    responses((status = 200, description = "Histórico, do mais recente ao mais antigo", body = [Movimentacao]))
)]
pub async fn list_movimentacoes(
    State(app_state): State<AppState>,
    Query(query): Query<HistoricoQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filtro = FiltroHistorico {
        termo: query.busca,
        obra_id: query.obra_id,
        material_id: query.material_id,
    };
    let historico = app_state.data_service.read().await.historico(&filtro);
    Ok((StatusCode::OK, Json(historico)))
}

// POST /api/movimentacoes
#[utoipa::path(
    post,
    path = "/api/movimentacoes",
    tag = "Movimentações",
    request_body = CreateMovimentacaoPayload,
    responses(
        (status = 201, description = "Movimentação registrada", body = Movimentacao),
        (status = 400, description = "Um ou mais campos são inválidos"),
        (status = 404, description = "Material ou obra não encontrados"),
        (status = 422, description = "Estoque insuficiente ou obra arquivada")
    )
)]
pub async fn create_movimentacao(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMovimentacaoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    payload.validate_consistency().map_err(|e| {
        // ValidationErrors manual para manter o padrão de resposta
        let mut errors = validator::ValidationErrors::new();
        errors.add("obra_id", e);
        AppError::ValidationError(errors)
    })?;

    let movimentacao = app_state
        .data_service
        .write()
        .await
        .create_movimentacao(payload.into())?;

    Ok((StatusCode::CREATED, Json(movimentacao)))
}
