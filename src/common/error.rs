// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

use crate::models::inventory::UnidadeMedida;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Material não encontrado: {0}")]
    MaterialNotFound(String),

    #[error("Obra não encontrada: {0}")]
    ObraNotFound(String),

    #[error("A obra {0} está arquivada")]
    ObraArquivada(String),

    #[error("Saídas precisam de uma obra de destino")]
    ObraObrigatoria,

    #[error("A quantidade deve ser um número positivo")]
    QuantidadeInvalida,

    #[error("Estoque insuficiente: disponível {disponivel} {unidade}, solicitado {solicitado}")]
    EstoqueInsuficiente {
        disponivel: Decimal,
        solicitado: Decimal,
        unidade: UnidadeMedida,
    },

    #[error("O resultado excede o limite numérico suportado")]
    ValorForaDoLimite,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de migração: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EstoqueInsuficiente { disponivel, solicitado, unidade } => {
                let body = Json(json!({
                    "error": format!(
                        "Estoque insuficiente! Você tem {} {} em estoque.",
                        disponivel.normalize(),
                        unidade
                    ),
                    "disponivel": disponivel,
                    "solicitado": solicitado,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::MaterialNotFound(_) => (StatusCode::NOT_FOUND, "Material não encontrado."),
            AppError::ObraNotFound(_) => (StatusCode::NOT_FOUND, "Obra não encontrada."),
            AppError::ObraArquivada(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "A obra de destino está arquivada.",
            ),
            AppError::ObraObrigatoria => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Selecione a obra de destino.",
            ),
            AppError::QuantidadeInvalida => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "A quantidade deve ser um número positivo.",
            ),
            AppError::ValorForaDoLimite => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Valor muito grande para ser registrado.",
            ),

            // Banco, serialização e internos viram 500; o detalhe fica no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
