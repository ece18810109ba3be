// src/db/storage.rs

// Espelho persistente das coleções. Cada coleção é gravada inteira, como um
// array JSON, sob uma chave fixa. As gravações são "fire-and-forget": quem
// chama não espera nem fica sabendo de falhas; o estado em memória é a
// verdade da sessão. Todas as gravações passam por uma única task, na ordem
// em que foram enfileiradas.

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::{mpsc, oneshot};

use crate::{common::error::AppError, db::{seed::SeedData, KeyValueRepository}};

pub const MATERIALS_KEY: &str = "@data_materials";
pub const OBRAS_KEY: &str = "@data_obras";
pub const MOVIMENTACOES_KEY: &str = "@data_movimentacoes";
pub const THEME_KEY: &str = "@user-theme";

pub const COLLECTION_KEYS: [&str; 3] = [MATERIALS_KEY, OBRAS_KEY, MOVIMENTACOES_KEY];

enum StoreCommand {
    Save {
        key: &'static str,
        payload: String,
    },
    Reset {
        entries: Vec<(&'static str, String)>,
        done: oneshot::Sender<()>,
    },
    Flush {
        done: oneshot::Sender<()>,
    },
}

#[derive(Clone)]
pub struct PersistentStore {
    repo: KeyValueRepository,
    sender: mpsc::UnboundedSender<StoreCommand>,
}

impl PersistentStore {
    /// Cria o store e inicia a task de gravação. Precisa de um runtime tokio.
    pub fn spawn(repo: KeyValueRepository) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(repo.clone(), receiver));
        Self { repo, sender }
    }

    // ---
    // Leitura (somente na inicialização)
    // ---

    pub async fn load_value(&self, key: &str) -> Result<Option<String>, AppError> {
        self.repo.get_item(key).await
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, AppError> {
        match self.load_value(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    // ---
    // Escrita
    // ---

    pub fn save<T: Serialize>(&self, key: &'static str, records: &[T]) {
        match serde_json::to_string(records) {
            Ok(payload) => self.save_value(key, payload),
            Err(e) => tracing::error!("Erro ao serializar {}: {}", key, e),
        }
    }

    pub fn save_value(&self, key: &'static str, payload: String) {
        if self.sender.send(StoreCommand::Save { key, payload }).is_err() {
            tracing::error!("Erro ao salvar {}: gravador encerrado", key);
        }
    }

    /// Apaga as três coleções e regrava o conjunto de exemplo.
    pub async fn reset(&self, seed: &SeedData) {
        let entries = match seed_entries(seed) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Erro ao serializar os dados de exemplo: {}", e);
                return;
            }
        };

        let (done, wait) = oneshot::channel();
        if self.sender.send(StoreCommand::Reset { entries, done }).is_err() {
            tracing::error!("Erro ao restaurar banco de dados: gravador encerrado");
            return;
        }
        let _ = wait.await;
    }

    /// Espera todas as gravações enfileiradas até aqui.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(StoreCommand::Flush { done }).is_ok() {
            let _ = wait.await;
        }
    }
}

fn seed_entries(seed: &SeedData) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    Ok(vec![
        (MATERIALS_KEY, serde_json::to_string(&seed.materials)?),
        (OBRAS_KEY, serde_json::to_string(&seed.obras)?),
        (MOVIMENTACOES_KEY, serde_json::to_string(&seed.movimentacoes)?),
    ])
}

async fn run_writer(repo: KeyValueRepository, mut receiver: mpsc::UnboundedReceiver<StoreCommand>) {
    tracing::debug!("Gravador do armazenamento local iniciado");

    while let Some(command) = receiver.recv().await {
        match command {
            StoreCommand::Save { key, payload } => {
                if let Err(e) = repo.set_item(key, &payload).await {
                    tracing::error!("Erro ao salvar {}: {:?}", key, e);
                }
            }
            StoreCommand::Reset { entries, done } => {
                if let Err(e) = repo.multi_remove(&COLLECTION_KEYS).await {
                    tracing::error!("Erro ao limpar as coleções: {:?}", e);
                }
                for (key, payload) in entries {
                    if let Err(e) = repo.set_item(key, &payload).await {
                        tracing::error!("Erro ao salvar {}: {:?}", key, e);
                    }
                }
                let _ = done.send(());
            }
            StoreCommand::Flush { done } => {
                let _ = done.send(());
            }
        }
    }

    tracing::debug!("Gravador do armazenamento local encerrado");
}
