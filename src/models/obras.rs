// src/models/obras.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObraStatus {
    Ativa,
    Arquivada,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Obra {
    pub id: String,
    pub nome_cliente: String,
    pub local: String,
    pub status: ObraStatus,
    // Metragem (m² ou m³ da obra)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metragem: Option<Decimal>,
    // Valor total estimado da obra
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valor_total: Option<Decimal>,
    pub data_inicio: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fim_prevista: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

impl Obra {
    pub fn is_ativa(&self) -> bool {
        self.status == ObraStatus::Ativa
    }
}

// Não há status aqui: toda obra nova nasce ativa.
#[derive(Debug, Clone)]
pub struct NovaObra {
    pub nome_cliente: String,
    pub local: String,
    pub metragem: Option<Decimal>,
    pub valor_total: Option<Decimal>,
    pub data_inicio: NaiveDate,
    pub data_fim_prevista: Option<NaiveDate>,
    pub observacoes: Option<String>,
}

// `Some(None)` nos campos opcionais da obra limpa o valor gravado.
#[derive(Debug, Clone, Default)]
pub struct ObraPatch {
    pub nome_cliente: Option<String>,
    pub local: Option<String>,
    pub status: Option<ObraStatus>,
    pub metragem: Option<Option<Decimal>>,
    pub valor_total: Option<Option<Decimal>>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim_prevista: Option<Option<NaiveDate>>,
    pub observacoes: Option<String>,
}

impl ObraPatch {
    pub fn status(status: ObraStatus) -> Self {
        Self { status: Some(status), ..Self::default() }
    }

    pub(crate) fn apply(self, obra: &mut Obra) {
        if let Some(nome) = self.nome_cliente {
            obra.nome_cliente = nome;
        }
        if let Some(local) = self.local {
            obra.local = local;
        }
        if let Some(status) = self.status {
            obra.status = status;
        }
        if let Some(metragem) = self.metragem {
            obra.metragem = metragem;
        }
        if let Some(valor) = self.valor_total {
            obra.valor_total = valor;
        }
        if let Some(inicio) = self.data_inicio {
            obra.data_inicio = inicio;
        }
        if let Some(fim) = self.data_fim_prevista {
            obra.data_fim_prevista = fim;
        }
        if let Some(obs) = self.observacoes {
            let obs = obs.trim();
            obra.observacoes = (!obs.is_empty()).then(|| obs.to_string());
        }
    }
}
