// src/config.rs

use std::{env, sync::Arc};

use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::{
    db::{self, KeyValueRepository, PersistentStore},
    services::{DataService, ThemeService},
};

const DEFAULT_DATABASE_URL: &str = "sqlite://estoque.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Config {
    // Lê o .env (se existir) e as variáveis de ambiente, com valores padrão
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: PersistentStore,
    // O RwLock garante uma mutação por vez, como no app original
    pub data_service: Arc<RwLock<DataService>>,
    pub theme_service: Arc<RwLock<ThemeService>>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = db::connect(&config.database_url).await?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        db::run_migrations(&db_pool).await?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::from_pool(db_pool).await)
    }

    // --- Monta o gráfico de dependências ---
    pub async fn from_pool(db_pool: SqlitePool) -> Self {
        let store = PersistentStore::spawn(KeyValueRepository::new(db_pool));
        let data_service = DataService::load(store.clone()).await;
        let theme_service = ThemeService::load(store.clone()).await;

        Self {
            store,
            data_service: Arc::new(RwLock::new(data_service)),
            theme_service: Arc::new(RwLock::new(theme_service)),
        }
    }
}
