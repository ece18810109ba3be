// src/routes.rs

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let material_routes = Router::new()
        .route("/"
               ,post(handlers::inventory::create_material)
               .get(handlers::inventory::list_materials)
        )
        .route("/{id}"
               ,put(handlers::inventory::update_material)
               .delete(handlers::inventory::delete_material)
        );

    let obra_routes = Router::new()
        .route("/"
               ,post(handlers::obras::create_obra)
               .get(handlers::obras::list_obras)
        )
        .route("/{id}", put(handlers::obras::update_obra))
        .route("/{id}/archive", post(handlers::obras::archive_obra))
        .route("/{id}/unarchive", post(handlers::obras::unarchive_obra));

    let movimentacao_routes = Router::new()
        .route("/"
               ,post(handlers::inventory::create_movimentacao)
               .get(handlers::inventory::list_movimentacoes)
        );

    let theme_routes = Router::new()
        .route("/", get(handlers::settings::get_theme))
        .route("/toggle", post(handlers::settings::toggle_theme));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/data", get(handlers::database::get_snapshot))
        .route("/api/reset", post(handlers::database::reset_database))
        .route("/api/units", get(handlers::inventory::list_units))
        .route("/api/dashboard", get(handlers::dashboard::get_summary))
        .nest("/api/materials", material_routes)
        .nest("/api/obras", obra_routes)
        .nest("/api/movimentacoes", movimentacao_routes)
        .nest("/api/theme", theme_routes)
        .with_state(app_state)
}
