use crate::models::{
    ApiError, Missao, MissaoQtd, MissaoRaridade, ParticipacaoQuantidade, ParticipacaoRaridade,
};
use crate::services::client::ApiClient;

/// Métodos de missões.
///
/// O backend só expõe os dados crus (missões, detalhes por tipo e listas de
/// participação); toda a derivação de progresso acontece no agregador
/// (`calcular_progresso_missoes`).
impl ApiClient {
    /// Todas as missões (`GET /api/missoes`).
    pub async fn missoes(&self) -> Result<Vec<Missao>, ApiError> {
        self.get_data("/api/missoes").await
    }

    /// Participações do usuário em missões de quantidade
    /// (`GET /api/participacoes/quantidade`).
    pub async fn participacoes_quantidade(
        &self,
    ) -> Result<Vec<ParticipacaoQuantidade>, ApiError> {
        self.get_data("/api/participacoes/quantidade").await
    }

    /// Participações do usuário em missões de raridade
    /// (`GET /api/participacoes/raridade`).
    pub async fn participacoes_raridade(&self) -> Result<Vec<ParticipacaoRaridade>, ApiError> {
        self.get_data("/api/participacoes/raridade").await
    }

    /// Detalhe de missão por quantidade (`GET /api/missaoqtd/{codigo}`).
    ///
    /// A existência do registro marca a missão como baseada em quantidade;
    /// missão sem detalhe responde 404.
    pub async fn missao_quantidade(&self, codigo: i64) -> Result<MissaoQtd, ApiError> {
        self.get_data(&format!("/api/missaoqtd/{}", codigo)).await
    }

    /// Registros de missão por raridade (`GET /api/missoes/raridade`).
    pub async fn missoes_raridade(&self) -> Result<Vec<MissaoRaridade>, ApiError> {
        self.get_data("/api/missoes/raridade").await
    }
}
