// src/services/data_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    db::{
        seed::SeedData,
        storage::{MATERIALS_KEY, MOVIMENTACOES_KEY, OBRAS_KEY},
        PersistentStore,
    },
    models::{
        inventory::{
            Material, MaterialPatch, Movimentacao, NovaMovimentacao, NovoMaterial, TipoMovimentacao,
        },
        obras::{NovaObra, Obra, ObraPatch, ObraStatus},
    },
};

// ---
// Filtros das telas de listagem
// ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub enum FiltroEstoque {
    #[default]
    #[serde(rename = "all")]
    Todos,
    #[serde(rename = "low")]
    Baixo,
}

#[derive(Debug, Clone, Default)]
pub struct FiltroMateriais {
    pub termo: Option<String>,
    pub estoque: FiltroEstoque,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FiltroObras {
    #[default]
    Todas,
    Ativas,
    Arquivadas,
}

#[derive(Debug, Clone, Default)]
pub struct FiltroHistorico {
    pub termo: Option<String>,
    pub obra_id: Option<String>,
    pub material_id: Option<String>,
}

fn contem(campo: Option<&str>, termo: &str) -> bool {
    campo.is_some_and(|c| c.to_lowercase().contains(termo))
}

fn termo_normalizado(termo: &Option<String>) -> Option<String> {
    termo
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

// Ids no formato "<prefixo><millis>". O carimbo só cresce, então dois
// registros criados no mesmo milissegundo recebem ids distintos.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next(&mut self, prefix: &str, is_taken: impl Fn(&str) -> bool) -> String {
        let mut stamp = Utc::now().timestamp_millis().max(self.last + 1);
        loop {
            let id = format!("{prefix}{stamp}");
            if !is_taken(&id) {
                self.last = stamp;
                return id;
            }
            stamp += 1;
        }
    }
}

/// Dono único das três coleções em memória.
///
/// Toda mutação é síncrona sobre a memória e enfileira a gravação da coleção
/// inteira no [`PersistentStore`].
pub struct DataService {
    store: PersistentStore,
    materials: Vec<Material>,
    obras: Vec<Obra>,
    movimentacoes: Vec<Movimentacao>,
    ids: IdGenerator,
}

impl DataService {
    /// Carrega as coleções gravadas. Chave ausente (primeira execução) usa os
    /// dados de exemplo; falha de leitura deixa a coleção vazia.
    pub async fn load(store: PersistentStore) -> Self {
        let seed = SeedData::sample();
        let materials = load_collection(&store, MATERIALS_KEY, seed.materials).await;
        let obras = load_collection(&store, OBRAS_KEY, seed.obras).await;
        let movimentacoes = load_collection(&store, MOVIMENTACOES_KEY, seed.movimentacoes).await;

        tracing::info!(
            "✅ Dados locais carregados: {} materiais, {} obras, {} movimentações",
            materials.len(),
            obras.len(),
            movimentacoes.len()
        );

        Self {
            store,
            materials,
            obras,
            movimentacoes,
            ids: IdGenerator::default(),
        }
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn obras(&self) -> &[Obra] {
        &self.obras
    }

    pub fn movimentacoes(&self) -> &[Movimentacao] {
        &self.movimentacoes
    }

    pub fn find_material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.id == id)
    }

    pub fn find_obra(&self, id: &str) -> Option<&Obra> {
        self.obras.iter().find(|o| o.id == id)
    }

    pub fn store(&self) -> &PersistentStore {
        &self.store
    }

    // ---
    // Materiais
    // ---

    pub fn create_material(&mut self, input: NovoMaterial) -> Material {
        let materials = &self.materials;
        let id = self.ids.next("mat", |id| materials.iter().any(|m| m.id == id));

        let material = Material {
            id,
            nome: input.nome,
            unidade_medida: input.unidade_medida,
            quantidade: input.quantidade,
            estoque_minimo: input.estoque_minimo,
            valor_unitario: input.valor_unitario,
            local_compra: input.local_compra.filter(|l| !l.trim().is_empty()),
            created_date: Some(Utc::now()),
        };

        self.materials.insert(0, material.clone());
        self.store.save(MATERIALS_KEY, &self.materials);
        tracing::debug!("Material criado: {}", material.id);
        material
    }

    /// Mescla os campos informados. `None` se o id não existir.
    pub fn update_material(&mut self, id: &str, patch: MaterialPatch) -> Option<Material> {
        let material = self.materials.iter_mut().find(|m| m.id == id)?;
        patch.apply(material);
        let updated = material.clone();

        self.store.save(MATERIALS_KEY, &self.materials);
        Some(updated)
    }

    /// Remove o material. Movimentações que apontam para ele continuam intactas.
    pub fn delete_material(&mut self, id: &str) -> bool {
        let before = self.materials.len();
        self.materials.retain(|m| m.id != id);
        if self.materials.len() == before {
            return false;
        }

        self.store.save(MATERIALS_KEY, &self.materials);
        tracing::debug!("Material removido: {}", id);
        true
    }

    pub fn buscar_materiais(&self, filtro: &FiltroMateriais) -> Vec<Material> {
        let termo = termo_normalizado(&filtro.termo);

        self.materials
            .iter()
            .filter(|m| filtro.estoque == FiltroEstoque::Todos || m.is_low_stock())
            .filter(|m| match &termo {
                Some(t) => contem(Some(m.nome.as_str()), t) || contem(m.local_compra.as_deref(), t),
                None => true,
            })
            .cloned()
            .collect()
    }

    // ---
    // Obras
    // ---

    pub fn create_obra(&mut self, input: NovaObra) -> Obra {
        let obras = &self.obras;
        let id = self.ids.next("obra", |id| obras.iter().any(|o| o.id == id));

        let obra = Obra {
            id,
            nome_cliente: input.nome_cliente,
            local: input.local,
            status: ObraStatus::Ativa,
            metragem: input.metragem,
            valor_total: input.valor_total,
            data_inicio: input.data_inicio,
            data_fim_prevista: input.data_fim_prevista,
            observacoes: input.observacoes.filter(|o| !o.trim().is_empty()),
            created_date: Some(Utc::now()),
        };

        self.obras.insert(0, obra.clone());
        self.store.save(OBRAS_KEY, &self.obras);
        tracing::debug!("Obra criada: {}", obra.id);
        obra
    }

    pub fn update_obra(&mut self, id: &str, patch: ObraPatch) -> Option<Obra> {
        let obra = self.obras.iter_mut().find(|o| o.id == id)?;
        patch.apply(obra);
        let updated = obra.clone();

        self.store.save(OBRAS_KEY, &self.obras);
        Some(updated)
    }

    pub fn archive_obra(&mut self, id: &str) -> Option<Obra> {
        self.update_obra(id, ObraPatch::status(ObraStatus::Arquivada))
    }

    pub fn unarchive_obra(&mut self, id: &str) -> Option<Obra> {
        self.update_obra(id, ObraPatch::status(ObraStatus::Ativa))
    }

    pub fn obras_por_status(&self, filtro: FiltroObras) -> Vec<Obra> {
        self.obras
            .iter()
            .filter(|o| match filtro {
                FiltroObras::Todas => true,
                FiltroObras::Ativas => o.status == ObraStatus::Ativa,
                FiltroObras::Arquivadas => o.status == ObraStatus::Arquivada,
            })
            .cloned()
            .collect()
    }

    // ---
    // Movimentações
    // ---

    /// Registra a movimentação e ajusta o saldo do material.
    ///
    /// Saídas precisam de uma obra ativa e não podem deixar o saldo negativo.
    /// Em caso de erro nada é alterado.
    pub fn create_movimentacao(&mut self, input: NovaMovimentacao) -> Result<Movimentacao, AppError> {
        if input.quantidade <= Decimal::ZERO {
            return Err(AppError::QuantidadeInvalida);
        }

        let material = self
            .find_material(&input.material_id)
            .ok_or_else(|| AppError::MaterialNotFound(input.material_id.clone()))?;

        let obra = match input.tipo {
            TipoMovimentacao::Saida => {
                let obra_id = input.obra_id.as_deref().ok_or(AppError::ObraObrigatoria)?;
                let obra = self
                    .find_obra(obra_id)
                    .ok_or_else(|| AppError::ObraNotFound(obra_id.to_string()))?;
                if !obra.is_ativa() {
                    return Err(AppError::ObraArquivada(obra.id.clone()));
                }
                if input.quantidade > material.quantidade {
                    return Err(AppError::EstoqueInsuficiente {
                        disponivel: material.quantidade,
                        solicitado: input.quantidade,
                        unidade: material.unidade_medida,
                    });
                }
                Some((obra.id.clone(), obra.nome_cliente.clone()))
            }
            // Entradas vão para o estoque, sem obra.
            TipoMovimentacao::Entrada => None,
        };

        let nova_quantidade = input
            .tipo
            .aplicar(material.quantidade, input.quantidade)
            .ok_or(AppError::ValorForaDoLimite)?;
        let valor_total = input
            .quantidade
            .checked_mul(material.valor_unitario)
            .ok_or(AppError::ValorForaDoLimite)?;
        let material_id = material.id.clone();
        let material_nome = material.nome.clone();
        let unidade_medida = material.unidade_medida;

        let movimentacoes = &self.movimentacoes;
        let id = self.ids.next("mov", |id| movimentacoes.iter().any(|m| m.id == id));
        let (obra_id, obra_nome) = obra.unzip();

        let movimentacao = Movimentacao {
            id,
            tipo: input.tipo,
            material_id,
            material_nome,
            unidade_medida,
            obra_id,
            obra_nome,
            quantidade: input.quantidade,
            valor_total,
            observacao: input.observacao.filter(|o| !o.trim().is_empty()),
            created_date: Utc::now(),
        };

        self.update_material(&movimentacao.material_id, MaterialPatch::quantidade(nova_quantidade));
        self.movimentacoes.insert(0, movimentacao.clone());
        self.store.save(MOVIMENTACOES_KEY, &self.movimentacoes);

        tracing::info!(
            "{} de {} {} ({}) registrada",
            movimentacao.tipo.rotulo(),
            movimentacao.quantidade.normalize(),
            movimentacao.unidade_medida,
            movimentacao.material_nome
        );
        Ok(movimentacao)
    }

    /// Histórico do mais recente para o mais antigo.
    pub fn historico(&self, filtro: &FiltroHistorico) -> Vec<Movimentacao> {
        let termo = termo_normalizado(&filtro.termo);

        let mut lista: Vec<Movimentacao> = self
            .movimentacoes
            .iter()
            .filter(|m| match &termo {
                Some(t) => {
                    contem(Some(m.material_nome.as_str()), t)
                        || contem(m.obra_nome.as_deref(), t)
                        || contem(m.observacao.as_deref(), t)
                }
                None => true,
            })
            .filter(|m| filtro.obra_id.is_none() || m.obra_id == filtro.obra_id)
            .filter(|m| filtro.material_id.as_ref().is_none_or(|id| &m.material_id == id))
            .cloned()
            .collect();

        lista.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        lista
    }

    // ---
    // Reset de fábrica
    // ---

    pub async fn reset_database(&mut self) {
        let seed = SeedData::sample();
        self.materials = seed.materials.clone();
        self.obras = seed.obras.clone();
        self.movimentacoes = seed.movimentacoes.clone();

        self.store.reset(&seed).await;
        tracing::info!("✅ Banco de dados restaurado para o estado inicial.");
    }
}

async fn load_collection<T: serde::de::DeserializeOwned>(
    store: &PersistentStore,
    key: &'static str,
    fallback: Vec<T>,
) -> Vec<T> {
    match store.load(key).await {
        Ok(Some(records)) => records,
        Ok(None) => fallback,
        Err(e) => {
            tracing::error!("Erro ao carregar dados locais ({}): {:?}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory_pool, KeyValueRepository};
    use crate::models::inventory::UnidadeMedida;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    async fn service() -> DataService {
        let store = PersistentStore::spawn(KeyValueRepository::new(memory_pool().await.unwrap()));
        DataService::load(store).await
    }

    fn saida(material_id: &str, obra_id: &str, quantidade: Decimal) -> NovaMovimentacao {
        NovaMovimentacao {
            tipo: TipoMovimentacao::Saida,
            material_id: material_id.into(),
            obra_id: Some(obra_id.into()),
            quantidade,
            observacao: None,
        }
    }

    fn entrada(material_id: &str, quantidade: Decimal) -> NovaMovimentacao {
        NovaMovimentacao {
            tipo: TipoMovimentacao::Entrada,
            material_id: material_id.into(),
            obra_id: None,
            quantidade,
            observacao: Some("Compra semanal".into()),
        }
    }

    fn novo_material(nome: &str) -> NovoMaterial {
        NovoMaterial {
            nome: nome.into(),
            unidade_medida: UnidadeMedida::Quilograma,
            quantidade: Decimal::from(10),
            estoque_minimo: Decimal::from(2),
            valor_unitario: Decimal::new(799, 2),
            local_compra: Some("Depósito Central".into()),
        }
    }

    fn nova_obra(nome: &str) -> NovaObra {
        NovaObra {
            nome_cliente: nome.into(),
            local: "Rua C, 789".into(),
            metragem: Some(Decimal::from(120)),
            valor_total: None,
            data_inicio: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            data_fim_prevista: None,
            observacoes: None,
        }
    }

    #[tokio::test]
    async fn first_run_loads_sample_data() {
        let data = service().await;
        let seed = SeedData::sample();
        assert_eq!(data.materials(), seed.materials.as_slice());
        assert_eq!(data.obras(), seed.obras.as_slice());
        assert_eq!(data.movimentacoes(), seed.movimentacoes.as_slice());
    }

    #[tokio::test]
    async fn saida_decrements_stock_and_snapshots_material() {
        let mut data = service().await;

        let mov = data.create_movimentacao(saida("mat1", "obra1", Decimal::from(2))).unwrap();

        assert_eq!(data.find_material("mat1").unwrap().quantidade, Decimal::from(2));
        assert_eq!(mov.material_nome, "Cimento CP II-32");
        assert_eq!(mov.obra_nome.as_deref(), Some("Casa do João"));
        assert_eq!(mov.valor_total, Decimal::from(71));
        assert_eq!(data.movimentacoes()[0], mov);
    }

    #[tokio::test]
    async fn entrada_increments_stock_without_site() {
        let mut data = service().await;

        let mov = data.create_movimentacao(entrada("mat3", Decimal::new(15, 1))).unwrap();

        assert_eq!(data.find_material("mat3").unwrap().quantidade, Decimal::from(4));
        assert_eq!(mov.obra_id, None);
        assert_eq!(mov.valor_total, Decimal::from(150));
    }

    #[tokio::test]
    async fn saida_beyond_stock_is_rejected_without_changes() {
        let mut data = service().await;
        let before = data.movimentacoes().len();

        let err = data.create_movimentacao(saida("mat1", "obra1", Decimal::from(5))).unwrap_err();

        assert!(matches!(err, AppError::EstoqueInsuficiente { .. }));
        assert_eq!(data.find_material("mat1").unwrap().quantidade, Decimal::from(4));
        assert_eq!(data.movimentacoes().len(), before);
    }

    #[tokio::test]
    async fn saida_requires_an_active_site() {
        let mut data = service().await;

        let mut sem_obra = saida("mat2", "obra1", Decimal::ONE);
        sem_obra.obra_id = None;
        assert!(matches!(data.create_movimentacao(sem_obra), Err(AppError::ObraObrigatoria)));

        let arquivada = data.create_movimentacao(saida("mat2", "obra2", Decimal::ONE));
        assert!(matches!(arquivada, Err(AppError::ObraArquivada(_))));

        let inexistente = data.create_movimentacao(saida("mat2", "obra9", Decimal::ONE));
        assert!(matches!(inexistente, Err(AppError::ObraNotFound(_))));

        let zero = data.create_movimentacao(entrada("mat2", Decimal::ZERO));
        assert!(matches!(zero, Err(AppError::QuantidadeInvalida)));
    }

    #[tokio::test]
    async fn created_ids_are_unique() {
        let mut data = service().await;

        for i in 0..20 {
            data.create_material(novo_material(&format!("Material {i}")));
            data.create_obra(nova_obra(&format!("Cliente {i}")));
            data.create_movimentacao(entrada("mat2", Decimal::ONE)).unwrap();
        }

        let materials: HashSet<_> = data.materials().iter().map(|m| m.id.clone()).collect();
        let obras: HashSet<_> = data.obras().iter().map(|o| o.id.clone()).collect();
        let movs: HashSet<_> = data.movimentacoes().iter().map(|m| m.id.clone()).collect();
        assert_eq!(materials.len(), data.materials().len());
        assert_eq!(obras.len(), data.obras().len());
        assert_eq!(movs.len(), data.movimentacoes().len());
    }

    #[tokio::test]
    async fn new_records_are_prepended() {
        let mut data = service().await;

        let material = data.create_material(novo_material("Cal Hidratada"));
        assert!(material.id.starts_with("mat"));
        assert!(material.created_date.is_some());
        assert_eq!(data.materials()[0].id, material.id);

        let obra = data.create_obra(nova_obra("Galpão Norte"));
        assert_eq!(obra.status, ObraStatus::Ativa);
        assert_eq!(data.obras()[0].id, obra.id);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_no_op() {
        let mut data = service().await;
        let before = data.materials().to_vec();

        let patch = MaterialPatch { nome: Some("Outro".into()), ..Default::default() };
        assert!(data.update_material("nao-existe", patch).is_none());
        assert!(data.update_obra("nao-existe", ObraPatch::default()).is_none());
        assert_eq!(data.materials(), before.as_slice());
    }

    #[tokio::test]
    async fn archived_sites_leave_the_active_view() {
        let mut data = service().await;
        let ids = |obras: Vec<Obra>| obras.into_iter().map(|o| o.id).collect::<Vec<_>>();

        data.archive_obra("obra1").unwrap();
        // Arquivar duas vezes não é erro.
        data.archive_obra("obra1").unwrap();
        assert!(!ids(data.obras_por_status(FiltroObras::Ativas)).contains(&"obra1".to_string()));
        assert!(ids(data.obras_por_status(FiltroObras::Arquivadas)).contains(&"obra1".to_string()));

        data.unarchive_obra("obra1").unwrap();
        assert!(ids(data.obras_por_status(FiltroObras::Ativas)).contains(&"obra1".to_string()));
        assert_eq!(data.obras_por_status(FiltroObras::Todas).len(), 3);
    }

    #[tokio::test]
    async fn deleting_a_material_keeps_its_movements() {
        let mut data = service().await;
        let historico = data.movimentacoes().to_vec();

        assert!(data.delete_material("mat1"));
        assert!(!data.delete_material("mat1"));

        assert!(data.find_material("mat1").is_none());
        assert_eq!(data.movimentacoes(), historico.as_slice());
        assert!(data.movimentacoes().iter().any(|m| m.material_id == "mat1"));
    }

    #[tokio::test]
    async fn reset_restores_the_sample_dataset() {
        let mut data = service().await;
        data.create_material(novo_material("Brita 1"));
        data.delete_material("mat2");
        data.archive_obra("obra3");
        data.create_movimentacao(entrada("mat1", Decimal::TEN)).unwrap();

        data.reset_database().await;

        let seed = SeedData::sample();
        assert_eq!(data.materials(), seed.materials.as_slice());
        assert_eq!(data.obras(), seed.obras.as_slice());
        assert_eq!(data.movimentacoes(), seed.movimentacoes.as_slice());

        // E o espelho persistente também.
        let reloaded = DataService::load(data.store().clone()).await;
        assert_eq!(reloaded.materials(), seed.materials.as_slice());
        assert_eq!(reloaded.movimentacoes(), seed.movimentacoes.as_slice());
    }

    #[tokio::test]
    async fn mutations_survive_a_reload() {
        let mut data = service().await;
        let material = data.create_material(novo_material("Argamassa AC-II"));
        data.create_movimentacao(saida(&material.id, "obra3", Decimal::from(4))).unwrap();
        data.store().flush().await;

        let reloaded = DataService::load(data.store().clone()).await;
        assert_eq!(reloaded.find_material(&material.id).unwrap().quantidade, Decimal::from(6));
        assert_eq!(reloaded.movimentacoes().len(), 3);
        assert_eq!(reloaded.movimentacoes()[0].material_id, material.id);
    }

    #[tokio::test]
    async fn unreadable_collection_loads_empty() {
        let repo = KeyValueRepository::new(memory_pool().await.unwrap());
        repo.set_item(MATERIALS_KEY, "nada disso é json").await.unwrap();

        let data = DataService::load(PersistentStore::spawn(repo)).await;
        assert!(data.materials().is_empty());
        assert_eq!(data.obras().len(), 3);
    }

    #[tokio::test]
    async fn storage_failures_do_not_reach_the_caller() {
        let pool = memory_pool().await.unwrap();
        let store = PersistentStore::spawn(KeyValueRepository::new(pool.clone()));
        let mut data = DataService::load(store).await;

        pool.close().await;

        let material = data.create_material(novo_material("Tinta Acrílica"));
        data.store().flush().await;
        assert_eq!(data.find_material(&material.id).unwrap().nome, "Tinta Acrílica");
    }

    #[tokio::test]
    async fn material_search_and_low_stock_filter() {
        let mut data = service().await;
        data.create_material(novo_material("Massa Corrida"));

        let baixos = data.buscar_materiais(&FiltroMateriais {
            termo: None,
            estoque: FiltroEstoque::Baixo,
        });
        let ids: Vec<_> = baixos.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["mat1", "mat3", "mat4"]);
        assert!(baixos.iter().all(Material::is_low_stock));

        let por_local = data.buscar_materiais(&FiltroMateriais {
            termo: Some("depósito".into()),
            estoque: FiltroEstoque::Todos,
        });
        assert_eq!(por_local.len(), 1);
        assert_eq!(por_local[0].nome, "Massa Corrida");

        let por_nome = data.buscar_materiais(&FiltroMateriais {
            termo: Some("  AREIA ".into()),
            estoque: FiltroEstoque::Todos,
        });
        assert_eq!(por_nome[0].id, "mat3");
    }

    #[tokio::test]
    async fn movement_overflow_is_rejected_without_changes() {
        let mut data = service().await;
        let enorme = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        let material = data.create_material(NovoMaterial {
            quantidade: enorme,
            valor_unitario: enorme,
            ..novo_material("Aço Especial")
        });
        let before = data.movimentacoes().len();

        // quantidade × valor unitário estoura
        let err = data.create_movimentacao(entrada(&material.id, enorme)).unwrap_err();
        assert!(matches!(err, AppError::ValorForaDoLimite));

        // saldo + quantidade estoura
        let cheio = data.create_material(NovoMaterial {
            quantidade: Decimal::MAX,
            valor_unitario: Decimal::ZERO,
            ..novo_material("Prego")
        });
        let err = data.create_movimentacao(entrada(&cheio.id, Decimal::ONE)).unwrap_err();
        assert!(matches!(err, AppError::ValorForaDoLimite));

        assert_eq!(data.find_material(&material.id).unwrap().quantidade, enorme);
        assert_eq!(data.find_material(&cheio.id).unwrap().quantidade, Decimal::MAX);
        assert_eq!(data.movimentacoes().len(), before);
    }

    #[tokio::test]
    async fn obra_patch_can_clear_optional_fields() {
        let mut data = service().await;
        let obra = data.create_obra(NovaObra {
            valor_total: Some(Decimal::from(50_000)),
            data_fim_prevista: NaiveDate::from_ymd_opt(2025, 6, 1),
            ..nova_obra("Galpão Norte")
        });

        // Campo ausente mantém o valor; null limpa.
        let mantida = data
            .update_obra(&obra.id, ObraPatch { local: Some("Rua D, 10".into()), ..Default::default() })
            .unwrap();
        assert_eq!(mantida.data_fim_prevista, obra.data_fim_prevista);
        assert_eq!(mantida.metragem, Some(Decimal::from(120)));

        let limpa = data
            .update_obra(
                &obra.id,
                ObraPatch {
                    metragem: Some(None),
                    valor_total: Some(None),
                    data_fim_prevista: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(limpa.metragem, None);
        assert_eq!(limpa.valor_total, None);
        assert_eq!(limpa.data_fim_prevista, None);
        assert_eq!(limpa.local, "Rua D, 10");
    }

    #[tokio::test]
    async fn history_is_newest_first_and_filterable() {
        let mut data = service().await;
        let nova = data.create_movimentacao(entrada("mat4", Decimal::from(5))).unwrap();

        let todos = data.historico(&FiltroHistorico::default());
        let ids: Vec<_> = todos.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, [nova.id.as_str(), "mov2", "mov1"]);

        let por_obra = data.historico(&FiltroHistorico {
            obra_id: Some("obra3".into()),
            ..Default::default()
        });
        assert_eq!(por_obra.len(), 1);
        assert_eq!(por_obra[0].id, "mov2");

        let por_termo = data.historico(&FiltroHistorico {
            termo: Some("fundação".into()),
            ..Default::default()
        });
        assert_eq!(por_termo.len(), 1);
        assert_eq!(por_termo[0].id, "mov1");

        let por_material = data.historico(&FiltroHistorico {
            material_id: Some("mat4".into()),
            ..Default::default()
        });
        assert_eq!(por_material.len(), 1);
    }
}
