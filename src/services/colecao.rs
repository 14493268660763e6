use serde_json::{json, Value};

use crate::models::{ApiError, EstatisticasColecao, ItemColecao};
use crate::services::client::ApiClient;

/// Métodos da coleção do usuário logado.
///
/// As quantidades são de autoridade exclusiva do backend: o cliente adiciona
/// e remove, mas nunca calcula posse localmente.
impl ApiClient {
    /// Coleção completa do usuário (`GET /api/minha-colecao`).
    pub async fn minha_colecao(&self) -> Result<Vec<ItemColecao>, ApiError> {
        self.get_data("/api/minha-colecao").await
    }

    /// Registra a coleta de uma carta (`POST /api/colecao/adicionar`).
    ///
    /// O retorno carrega o registro atualizado e, quando a coleta rende XP,
    /// os campos de bonificação calculados pelo backend.
    pub async fn adicionar_carta(&self, carta_id: &str) -> Result<Value, ApiError> {
        let body = json!({ "carta_id": carta_id });
        self.post_data("/api/colecao/adicionar", Some(&body)).await
    }

    /// Remove unidades de uma carta (`DELETE /api/colecao/remover`).
    pub async fn remover_carta(&self, carta_id: &str, quantidade: u32) -> Result<Value, ApiError> {
        let body = json!({ "carta_id": carta_id, "quantidade": quantidade });
        self.delete_data("/api/colecao/remover", Some(&body)).await
    }

    /// Estatísticas agregadas da coleção (`GET /api/colecao/estatisticas`).
    pub async fn estatisticas_colecao(&self) -> Result<EstatisticasColecao, ApiError> {
        self.get_data("/api/colecao/estatisticas").await
    }

    /// Verifica a posse de uma carta (`GET /api/colecao/verificar/{cartaId}`).
    ///
    /// Carta não possuída chega como `ApiError::Http { status: 404, .. }`.
    pub async fn verificar_carta(&self, carta_id: &str) -> Result<Value, ApiError> {
        self.get_data(&format!("/api/colecao/verificar/{}", carta_id))
            .await
    }

    /// Esvazia a coleção (`DELETE /api/colecao/limpar`).
    pub async fn limpar_colecao(&self) -> Result<Value, ApiError> {
        self.delete_data("/api/colecao/limpar", None).await
    }
}
