// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dados ---
        handlers::database::get_snapshot,
        handlers::database::reset_database,

        // --- Materiais ---
        handlers::inventory::list_materials,
        handlers::inventory::create_material,
        handlers::inventory::update_material,
        handlers::inventory::delete_material,
        handlers::inventory::list_units,

        // --- Movimentações ---
        handlers::inventory::list_movimentacoes,
        handlers::inventory::create_movimentacao,

        // --- Obras ---
        handlers::obras::list_obras,
        handlers::obras::create_obra,
        handlers::obras::update_obra,
        handlers::obras::archive_obra,
        handlers::obras::unarchive_obra,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Tema ---
        handlers::settings::get_theme,
        handlers::settings::toggle_theme,
    ),
    components(
        schemas(
            // --- Materiais e Movimentações ---
            models::inventory::UnidadeMedida,
            models::inventory::UnidadeOpcao,
            models::inventory::Material,
            models::inventory::TipoMovimentacao,
            models::inventory::Movimentacao,
            handlers::inventory::CreateMaterialPayload,
            handlers::inventory::UpdateMaterialPayload,
            handlers::inventory::CreateMovimentacaoPayload,
            services::data_service::FiltroEstoque,

            // --- Obras ---
            models::obras::ObraStatus,
            models::obras::Obra,
            handlers::obras::CreateObraPayload,
            handlers::obras::UpdateObraPayload,
            services::data_service::FiltroObras,

            // --- Dashboard ---
            models::dashboard::DashboardResumo,
            models::dashboard::ValorPorObra,

            // --- Tema ---
            models::settings::ThemeName,
            models::settings::ThemeColors,
            models::settings::Palette,
            models::settings::ThemeResponse,

            handlers::database::DataSnapshot,
        )
    ),
    tags(
        (name = "Dados", description = "Coleções completas e reset de fábrica"),
        (name = "Materiais", description = "Cadastro de materiais e unidades"),
        (name = "Movimentações", description = "Entradas e saídas de estoque"),
        (name = "Obras", description = "Cadastro e arquivamento de obras"),
        (name = "Dashboard", description = "Resumo geral"),
        (name = "Tema", description = "Preferência de tema claro/escuro")
    )
)]
pub struct ApiDoc;
