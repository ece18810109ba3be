// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// 1. Resumo Geral (os cards do topo)
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResumo {
    pub total_materiais: usize,
    pub valor_estoque: Decimal,    // Σ quantidade × valor unitário
    pub metragem_total: Decimal,   // Σ metragem das obras
    pub total_movimentacoes: usize,
    pub alertas_estoque_baixo: usize,
    pub obras_ativas: usize,
    pub valores_por_obra: Vec<ValorPorObra>,
    pub total_geral: Decimal,
}

// 2. Valor movimentado por obra
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValorPorObra {
    pub obra_id: String,
    pub nome_cliente: String,
    pub valor: Decimal,
}
