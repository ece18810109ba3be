// src/db/seed.rs

// Conjunto de dados de exemplo: usado na primeira execução e no "reset de fábrica".
// As datas são fixas para que o reset restaure sempre exatamente o mesmo conteúdo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::models::{
    inventory::{Material, Movimentacao, TipoMovimentacao, UnidadeMedida},
    obras::{Obra, ObraStatus},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    pub materials: Vec<Material>,
    pub obras: Vec<Obra>,
    pub movimentacoes: Vec<Movimentacao>,
}

impl SeedData {
    pub fn sample() -> Self {
        Self {
            materials: materials(),
            obras: obras(),
            movimentacoes: movimentacoes(),
        }
    }
}

fn data(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instante(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    data(y, m, d).and_hms_opt(h, 0, 0).unwrap_or_default().and_utc()
}

fn material(
    id: &str,
    nome: &str,
    unidade: UnidadeMedida,
    quantidade: Decimal,
    minimo: Decimal,
    valor: Decimal,
) -> Material {
    Material {
        id: id.into(),
        nome: nome.into(),
        unidade_medida: unidade,
        quantidade,
        estoque_minimo: minimo,
        valor_unitario: valor,
        local_compra: None,
        created_date: None,
    }
}

pub fn materials() -> Vec<Material> {
    vec![
        material(
            "mat1",
            "Cimento CP II-32",
            UnidadeMedida::Unidade,
            Decimal::from(4),
            Decimal::from(5),
            Decimal::new(355, 1),
        ),
        material(
            "mat2",
            "Tijolo Baiano 6 Furos",
            UnidadeMedida::Unidade,
            Decimal::from(500),
            Decimal::from(400),
            Decimal::new(11, 1),
        ),
        material(
            "mat3",
            "Areia Média",
            UnidadeMedida::MetroCubico,
            Decimal::new(25, 1),
            Decimal::from(5),
            Decimal::from(100),
        ),
        material(
            "mat4",
            "Vergalhão 3/8\"",
            UnidadeMedida::Unidade,
            Decimal::from(15),
            Decimal::from(20),
            Decimal::from(50),
        ),
    ]
}

fn obra(id: &str, cliente: &str, local: &str, status: ObraStatus, inicio: NaiveDate) -> Obra {
    Obra {
        id: id.into(),
        nome_cliente: cliente.into(),
        local: local.into(),
        status,
        metragem: None,
        valor_total: None,
        data_inicio: inicio,
        data_fim_prevista: None,
        observacoes: None,
        created_date: None,
    }
}

pub fn obras() -> Vec<Obra> {
    vec![
        obra("obra1", "Casa do João", "Rua A, 123", ObraStatus::Ativa, data(2025, 1, 6)),
        obra("obra2", "Residência Ana", "Av. B, 456", ObraStatus::Arquivada, data(2024, 9, 2)),
        obra("obra3", "Prédio Comercial", "Centro", ObraStatus::Ativa, data(2025, 1, 13)),
    ]
}

pub fn movimentacoes() -> Vec<Movimentacao> {
    vec![
        Movimentacao {
            id: "mov1".into(),
            tipo: TipoMovimentacao::Saida,
            material_id: "mat1".into(),
            material_nome: "Cimento CP II-32".into(),
            unidade_medida: UnidadeMedida::Unidade,
            obra_id: Some("obra1".into()),
            obra_nome: Some("Casa do João".into()),
            quantidade: Decimal::from(5),
            valor_total: Decimal::new(1775, 1),
            observacao: Some("Início da fundação".into()),
            created_date: instante(2025, 1, 14, 12),
        },
        Movimentacao {
            id: "mov2".into(),
            tipo: TipoMovimentacao::Saida,
            material_id: "mat3".into(),
            material_nome: "Areia Média".into(),
            unidade_medida: UnidadeMedida::MetroCubico,
            obra_id: Some("obra3".into()),
            obra_nome: Some("Prédio Comercial".into()),
            quantidade: Decimal::from(1),
            valor_total: Decimal::from(100),
            observacao: Some("Primeira carga".into()),
            created_date: instante(2025, 1, 15, 11),
        },
    ]
}
