use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raridade de uma carta.
///
/// O backend grava os rótulos sem acento ("epica", "lendaria"); os aliases
/// acentuados cobrem cargas antigas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Raridade {
    Comum,
    Incomum,
    Rara,
    #[serde(alias = "épica")]
    Epica,
    #[serde(alias = "lendária")]
    Lendaria,
}

impl Raridade {
    /// Conta para a missão "Caçador de Raras" (rara, épica ou lendária).
    pub fn rara_ou_melhor(&self) -> bool {
        matches!(self, Raridade::Rara | Raridade::Epica | Raridade::Lendaria)
    }
}

impl Default for Raridade {
    fn default() -> Self {
        Raridade::Comum
    }
}

/// Carta colecionável.
///
/// Dado de referência imutável do backend; `qrcode` é a chave primária.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carta {
    pub qrcode: String,

    #[serde(default)]
    pub nome: Option<String>,

    #[serde(default)]
    pub raridade: Raridade,

    #[serde(default)]
    pub descricao: Option<String>,

    #[serde(default)]
    pub imagem: Option<String>,

    #[serde(default)]
    pub audio: Option<String>,

    #[serde(default)]
    pub localizacao: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Entrada da coleção do usuário: posse de uma carta com contagem.
///
/// As quantidades são de autoridade exclusiva do backend; o cliente apenas lê.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemColecao {
    pub qrcode: String,
    pub quantidade: u32,
    pub carta: Carta,
}

/// Estatísticas agregadas da coleção (`GET /api/colecao/estatisticas`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstatisticasColecao {
    pub total_cartas: u32,
    pub cartas_unicas: u32,
    #[serde(default)]
    pub por_raridade: HashMap<String, u32>,
}
