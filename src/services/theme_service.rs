// src/services/theme_service.rs

use crate::{
    db::{storage::THEME_KEY, PersistentStore},
    models::settings::{Palette, ThemeName},
};

// Preferência de tema (claro/escuro). Não conversa com o DataService.
pub struct ThemeService {
    store: PersistentStore,
    current: ThemeName,
}

impl ThemeService {
    pub async fn load(store: PersistentStore) -> Self {
        let current = match store.load_value(THEME_KEY).await {
            Ok(Some(saved)) => ThemeName::parse(&saved).unwrap_or_else(|| {
                tracing::warn!("Tema desconhecido no armazenamento: {:?}", saved);
                ThemeName::default()
            }),
            Ok(None) => ThemeName::default(),
            Err(e) => {
                tracing::error!("Erro ao carregar o tema: {:?}", e);
                ThemeName::default()
            }
        };

        Self { store, current }
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    pub fn palette(&self) -> &'static Palette {
        self.current.palette()
    }

    pub fn toggle(&mut self) -> ThemeName {
        self.current = self.current.toggled();
        self.store.save_value(THEME_KEY, self.current.as_str().to_string());
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory_pool, KeyValueRepository};

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let store = PersistentStore::spawn(KeyValueRepository::new(memory_pool().await.unwrap()));
        let mut theme = ThemeService::load(store.clone()).await;
        assert_eq!(theme.current(), ThemeName::Light);
        assert_eq!(theme.palette().colors.background, "#f9fafb");

        assert_eq!(theme.toggle(), ThemeName::Dark);
        store.flush().await;
        assert_eq!(store.load_value(THEME_KEY).await.unwrap().as_deref(), Some("dark"));

        let reloaded = ThemeService::load(store.clone()).await;
        assert_eq!(reloaded.current(), ThemeName::Dark);
        assert_eq!(reloaded.palette().gradient, ["#1f6feb", "#58A6FF"]);

        theme.toggle();
        assert_eq!(theme.current(), ThemeName::Light);
    }

    #[tokio::test]
    async fn unknown_stored_value_falls_back_to_light() {
        let repo = KeyValueRepository::new(memory_pool().await.unwrap());
        repo.set_item(THEME_KEY, "sepia").await.unwrap();

        let theme = ThemeService::load(PersistentStore::spawn(repo)).await;
        assert_eq!(theme.current(), ThemeName::Light);
    }
}
