// src/models/inventory.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- 1. Unidades de Medida ---
// Conjunto fechado. Os rótulos antigos ("unid", "sacos", "barras") dos dados
// gravados por versões anteriores são lidos como unidade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum UnidadeMedida {
    #[default]
    #[serde(rename = "un", alias = "unid", alias = "sacos", alias = "barras")]
    Unidade,
    #[serde(rename = "m²")]
    MetroQuadrado,
    #[serde(rename = "m³")]
    MetroCubico,
    #[serde(rename = "L")]
    Litro,
    #[serde(rename = "kg")]
    Quilograma,
}

impl UnidadeMedida {
    pub const ALL: [UnidadeMedida; 5] = [
        UnidadeMedida::Unidade,
        UnidadeMedida::MetroQuadrado,
        UnidadeMedida::MetroCubico,
        UnidadeMedida::Litro,
        UnidadeMedida::Quilograma,
    ];

    pub fn simbolo(self) -> &'static str {
        match self {
            UnidadeMedida::Unidade => "un",
            UnidadeMedida::MetroQuadrado => "m²",
            UnidadeMedida::MetroCubico => "m³",
            UnidadeMedida::Litro => "L",
            UnidadeMedida::Quilograma => "kg",
        }
    }

    pub fn descricao(self) -> &'static str {
        match self {
            UnidadeMedida::Unidade => "Unidade",
            UnidadeMedida::MetroQuadrado => "Metros quadrados",
            UnidadeMedida::MetroCubico => "Metros cúbicos",
            UnidadeMedida::Litro => "Litros",
            UnidadeMedida::Quilograma => "Quilos",
        }
    }
}

impl fmt::Display for UnidadeMedida {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simbolo())
    }
}

// Item do seletor de unidades
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnidadeOpcao {
    pub value: UnidadeMedida,
    pub label: String,
}

impl From<UnidadeMedida> for UnidadeOpcao {
    fn from(unidade: UnidadeMedida) -> Self {
        Self {
            value: unidade,
            label: format!("{} ({})", unidade.descricao(), unidade.simbolo()),
        }
    }
}

// --- 2. Materiais ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Material {
    pub id: String,
    pub nome: String,
    pub unidade_medida: UnidadeMedida,
    pub quantidade: Decimal,
    pub estoque_minimo: Decimal,
    pub valor_unitario: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_compra: Option<String>,
    // Os registros de exemplo não têm data de criação.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

impl Material {
    /// Estoque baixo: quantidade no mínimo configurado ou abaixo dele.
    pub fn is_low_stock(&self) -> bool {
        self.quantidade <= self.estoque_minimo
    }

    /// Valor do saldo atual (quantidade × valor unitário), saturado em `Decimal::MAX`.
    pub fn valor_em_estoque(&self) -> Decimal {
        self.quantidade.saturating_mul(self.valor_unitario)
    }
}

// Dados de criação, já validados pela camada HTTP.
#[derive(Debug, Clone)]
pub struct NovoMaterial {
    pub nome: String,
    pub unidade_medida: UnidadeMedida,
    pub quantidade: Decimal,
    pub estoque_minimo: Decimal,
    pub valor_unitario: Decimal,
    pub local_compra: Option<String>,
}

// Atualização parcial: só os campos `Some` são aplicados.
#[derive(Debug, Clone, Default)]
pub struct MaterialPatch {
    pub nome: Option<String>,
    pub unidade_medida: Option<UnidadeMedida>,
    pub quantidade: Option<Decimal>,
    pub estoque_minimo: Option<Decimal>,
    pub valor_unitario: Option<Decimal>,
    pub local_compra: Option<String>,
}

impl MaterialPatch {
    pub fn quantidade(quantidade: Decimal) -> Self {
        Self { quantidade: Some(quantidade), ..Self::default() }
    }

    pub(crate) fn apply(self, material: &mut Material) {
        if let Some(nome) = self.nome {
            material.nome = nome;
        }
        if let Some(unidade) = self.unidade_medida {
            material.unidade_medida = unidade;
        }
        if let Some(quantidade) = self.quantidade {
            material.quantidade = quantidade;
        }
        if let Some(minimo) = self.estoque_minimo {
            material.estoque_minimo = minimo;
        }
        if let Some(valor) = self.valor_unitario {
            material.valor_unitario = valor;
        }
        // Texto vazio limpa o local de compra.
        if let Some(local) = self.local_compra {
            let local = local.trim();
            material.local_compra = (!local.is_empty()).then(|| local.to_string());
        }
    }
}

// --- 3. Movimentações ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoMovimentacao {
    Entrada,
    Saida,
}

impl TipoMovimentacao {
    /// Aplica a movimentação sobre o saldo atual. `None` em caso de overflow.
    pub fn aplicar(self, saldo: Decimal, quantidade: Decimal) -> Option<Decimal> {
        match self {
            TipoMovimentacao::Entrada => saldo.checked_add(quantidade),
            TipoMovimentacao::Saida => saldo.checked_sub(quantidade),
        }
    }

    pub fn rotulo(self) -> &'static str {
        match self {
            TipoMovimentacao::Entrada => "Entrada",
            TipoMovimentacao::Saida => "Saída",
        }
    }
}

// Histórico imutável: nome, unidade e obra são copiados no momento da criação.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Movimentacao {
    pub id: String,
    pub tipo: TipoMovimentacao,
    pub material_id: String,
    pub material_nome: String,
    pub unidade_medida: UnidadeMedida,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obra_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obra_nome: Option<String>,
    pub quantidade: Decimal,
    pub valor_total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacao: Option<String>,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NovaMovimentacao {
    pub tipo: TipoMovimentacao,
    pub material_id: String,
    pub obra_id: Option<String>,
    pub quantidade: Decimal,
    pub observacao: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(quantidade: i64, minimo: i64) -> Material {
        Material {
            id: "m".into(),
            nome: "Cimento".into(),
            unidade_medida: UnidadeMedida::Unidade,
            quantidade: Decimal::from(quantidade),
            estoque_minimo: Decimal::from(minimo),
            valor_unitario: Decimal::new(355, 1),
            local_compra: None,
            created_date: None,
        }
    }

    #[test]
    fn low_stock_includes_the_threshold_itself() {
        assert!(material(4, 5).is_low_stock());
        assert!(material(5, 5).is_low_stock());
        assert!(!material(6, 5).is_low_stock());
    }

    #[test]
    fn legacy_unit_labels_are_read_as_unidade() {
        for label in ["\"un\"", "\"unid\"", "\"sacos\"", "\"barras\""] {
            let unidade: UnidadeMedida = serde_json::from_str(label).unwrap();
            assert_eq!(unidade, UnidadeMedida::Unidade);
        }
        let cubico: UnidadeMedida = serde_json::from_str("\"m³\"").unwrap();
        assert_eq!(cubico, UnidadeMedida::MetroCubico);
        assert_eq!(serde_json::to_string(&UnidadeMedida::Litro).unwrap(), "\"L\"");
    }

    #[test]
    fn numbers_are_stored_as_json_numbers() {
        let json = serde_json::to_value(material(4, 5)).unwrap();
        assert_eq!(json["valor_unitario"], serde_json::json!(35.5));
        assert!(json.get("local_compra").is_none());
    }

    #[test]
    fn patch_with_blank_location_clears_it() {
        let mut m = material(1, 1);
        m.local_compra = Some("Depósito Central".into());
        MaterialPatch { local_compra: Some("  ".into()), ..Default::default() }.apply(&mut m);
        assert_eq!(m.local_compra, None);
    }

    #[test]
    fn movement_type_adjusts_balance() {
        let saldo = Decimal::from(4);
        assert_eq!(TipoMovimentacao::Saida.aplicar(saldo, Decimal::from(2)), Some(Decimal::from(2)));
        assert_eq!(TipoMovimentacao::Entrada.aplicar(saldo, Decimal::from(2)), Some(Decimal::from(6)));
        assert_eq!(TipoMovimentacao::Entrada.aplicar(Decimal::MAX, Decimal::ONE), None);
    }

    #[test]
    fn stock_value_saturates_instead_of_overflowing() {
        let mut m = material(1, 1);
        m.quantidade = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        m.valor_unitario = m.quantidade;
        assert_eq!(m.valor_em_estoque(), Decimal::MAX);
    }
}
