// src/models/settings.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    /// Valor gravado no armazenamento (texto simples, sem JSON).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeName::Light),
            "dark" => Some(ThemeName::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeName::Light => &LIGHT,
            ThemeName::Dark => &DARK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub background: &'static str,
    pub surface: &'static str,
    pub surface_alt: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub text_muted: &'static str,
    pub text_light: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Palette {
    pub colors: ThemeColors,
    #[schema(value_type = Vec<String>)]
    pub gradient: [&'static str; 2],
}

static LIGHT: Palette = Palette {
    colors: ThemeColors {
        background: "#f9fafb",
        surface: "#ffffff",
        surface_alt: "#f3f4f6",
        border: "#e5e7eb",
        text: "#111827",
        text_muted: "#6b7280",
        text_light: "#9ca3af",
        primary: "#4c669f",
        secondary: "#3b5998",
    },
    gradient: ["#4c669f", "#3b5998"],
};

static DARK: Palette = Palette {
    colors: ThemeColors {
        background: "#0D1117",
        surface: "#161B22",
        surface_alt: "#1F242C",
        border: "#30363D",
        text: "#E6EDF3",
        text_muted: "#9BA3B4",
        text_light: "#7D8694",
        primary: "#1f6feb",
        secondary: "#58A6FF",
    },
    gradient: ["#1f6feb", "#58A6FF"],
};

// Resposta do endpoint de tema
#[derive(Debug, Serialize, ToSchema)]
pub struct ThemeResponse {
    pub name: ThemeName,
    #[schema(value_type = Palette)]
    pub palette: &'static Palette,
}
