use reqwest::{Method, Url};
use serde_json::json;

use crate::models::{
    Amigo, ApiError, Confirmacao, Envelope, SolicitacaoAmizade, StatusAmizadeResposta,
    UsuarioBusca,
};
use crate::services::client::ApiClient;

/// Métodos de amizade.
impl ApiClient {
    /// Envia uma solicitação de amizade (`POST /api/amizades/solicitar`).
    pub async fn enviar_solicitacao_amizade(
        &self,
        destinatario: &str,
    ) -> Result<Confirmacao, ApiError> {
        let body = json!({ "destinatario": destinatario });
        self.post_data("/api/amizades/solicitar", Some(&body)).await
    }

    /// Aceita uma solicitação pendente (`POST /api/amizades/aceitar/{id}`).
    pub async fn aceitar_solicitacao_amizade(
        &self,
        solicitacao_id: i64,
    ) -> Result<Confirmacao, ApiError> {
        self.post_data(&format!("/api/amizades/aceitar/{}", solicitacao_id), None)
            .await
    }

    /// Recusa uma solicitação pendente (`POST /api/amizades/recusar/{id}`).
    pub async fn recusar_solicitacao_amizade(
        &self,
        solicitacao_id: i64,
    ) -> Result<Confirmacao, ApiError> {
        self.post_data(&format!("/api/amizades/recusar/{}", solicitacao_id), None)
            .await
    }

    /// Desfaz uma amizade (`DELETE /api/amizades/remover/{nickname}`).
    pub async fn remover_amizade(&self, nickname: &str) -> Result<Confirmacao, ApiError> {
        self.delete_data(&format!("/api/amizades/remover/{}", nickname), None)
            .await
    }

    /// Amigos confirmados (`GET /api/amizades/meus-amigos`).
    pub async fn meus_amigos(&self) -> Result<Vec<Amigo>, ApiError> {
        self.get_data("/api/amizades/meus-amigos").await
    }

    /// Solicitações recebidas e pendentes
    /// (`GET /api/amizades/solicitacoes-pendentes`).
    pub async fn solicitacoes_pendentes(&self) -> Result<Vec<SolicitacaoAmizade>, ApiError> {
        self.get_data("/api/amizades/solicitacoes-pendentes").await
    }

    /// Busca usuários por termo (`GET /api/amizades/buscar?q=&limit=`).
    ///
    /// O termo é codificado na query; cada resultado carrega o estado de
    /// amizade em relação ao usuário logado.
    pub async fn buscar_usuarios(
        &self,
        termo: &str,
        limit: u32,
    ) -> Result<Vec<UsuarioBusca>, ApiError> {
        let url = Url::parse_with_params(
            &format!("{}/api/amizades/buscar", self.base_url()),
            &[("q", termo), ("limit", &limit.to_string())],
        )
        .map_err(|e| ApiError::Network(format!("URL de busca inválida: {}", e)))?;

        let body = self.request_url(Method::GET, url.as_str(), None).await?;
        Envelope::decode(body)
    }

    /// Estado de amizade com outro usuário
    /// (`GET /api/amizades/status/{nickname}`).
    pub async fn status_amizade(&self, nickname: &str) -> Result<StatusAmizadeResposta, ApiError> {
        self.get_data(&format!("/api/amizades/status/{}", nickname))
            .await
    }
}
