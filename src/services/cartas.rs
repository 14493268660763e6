use crate::models::{ApiError, Carta};
use crate::services::client::ApiClient;

/// Métodos de cartas (dado de referência imutável do backend).
impl ApiClient {
    /// Todas as cartas cadastradas (`GET /api/cartas`).
    pub async fn cartas(&self) -> Result<Vec<Carta>, ApiError> {
        self.get_data("/api/cartas").await
    }

    /// Uma carta pelo identificador de QR code (`GET /api/cartas/{id}`).
    pub async fn carta(&self, id: &str) -> Result<Carta, ApiError> {
        self.get_data(&format!("/api/cartas/{}", id)).await
    }
}
