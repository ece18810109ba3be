// src/services/dashboard_service.rs

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    models::dashboard::{DashboardResumo, ValorPorObra},
    services::data_service::DataService,
};

pub struct DashboardService;

impl DashboardService {
    pub fn resumo(data: &DataService) -> DashboardResumo {
        let materials = data.materials();
        let obras = data.obras();
        let movimentacoes = data.movimentacoes();

        // Totais saturam em Decimal::MAX em vez de estourar
        let valor_estoque = somar(materials.iter().map(|m| m.valor_em_estoque()));
        let metragem_total = somar(obras.iter().filter_map(|o| o.metragem));
        let alertas_estoque_baixo = materials.iter().filter(|m| m.is_low_stock()).count();
        let obras_ativas = obras.iter().filter(|o| o.is_ativa()).count();

        // Valor movimentado por obra (só movimentações ligadas a uma obra)
        let mut por_obra: HashMap<&str, Decimal> = HashMap::new();
        for mov in movimentacoes {
            if let Some(obra_id) = mov.obra_id.as_deref() {
                let total = por_obra.entry(obra_id).or_default();
                *total = total.saturating_add(mov.valor_total);
            }
        }

        let valores_por_obra = obras
            .iter()
            .map(|o| ValorPorObra {
                obra_id: o.id.clone(),
                nome_cliente: o.nome_cliente.clone(),
                valor: por_obra.get(o.id.as_str()).copied().unwrap_or_default(),
            })
            .collect();

        DashboardResumo {
            total_materiais: materials.len(),
            valor_estoque,
            metragem_total,
            total_movimentacoes: movimentacoes.len(),
            alertas_estoque_baixo,
            obras_ativas,
            valores_por_obra,
            // Inclui obras já removidas ou desconhecidas, como no histórico
            total_geral: somar(por_obra.values().copied()),
        }
    }
}

fn somar(valores: impl Iterator<Item = Decimal>) -> Decimal {
    valores.fold(Decimal::ZERO, Decimal::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory_pool, KeyValueRepository, PersistentStore};
    use crate::models::inventory::{NovoMaterial, UnidadeMedida};

    #[tokio::test]
    async fn summary_of_the_sample_dataset() {
        let store = PersistentStore::spawn(KeyValueRepository::new(memory_pool().await.unwrap()));
        let data = DataService::load(store).await;

        let resumo = DashboardService::resumo(&data);

        assert_eq!(resumo.total_materiais, 4);
        // 4×35.5 + 500×1.1 + 2.5×100 + 15×50
        assert_eq!(resumo.valor_estoque, Decimal::from(1692));
        assert_eq!(resumo.metragem_total, Decimal::ZERO);
        assert_eq!(resumo.total_movimentacoes, 2);
        assert_eq!(resumo.alertas_estoque_baixo, 3);
        assert_eq!(resumo.obras_ativas, 2);
        assert_eq!(resumo.total_geral, Decimal::new(2775, 1));

        let valores: Vec<_> = resumo
            .valores_por_obra
            .iter()
            .map(|v| (v.obra_id.as_str(), v.valor))
            .collect();
        assert_eq!(
            valores,
            [
                ("obra1", Decimal::new(1775, 1)),
                ("obra2", Decimal::ZERO),
                ("obra3", Decimal::from(100)),
            ]
        );
    }

    #[tokio::test]
    async fn huge_stock_value_saturates_instead_of_panicking() {
        let store = PersistentStore::spawn(KeyValueRepository::new(memory_pool().await.unwrap()));
        let mut data = DataService::load(store).await;
        let enorme = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        data.create_material(NovoMaterial {
            nome: "Aço Especial".into(),
            unidade_medida: UnidadeMedida::Quilograma,
            quantidade: enorme,
            estoque_minimo: Decimal::ZERO,
            valor_unitario: enorme,
            local_compra: None,
        });

        let resumo = DashboardService::resumo(&data);

        assert_eq!(resumo.valor_estoque, Decimal::MAX);
        assert_eq!(resumo.total_materiais, 5);
    }
}
