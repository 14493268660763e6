use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;
use std::path::Path;

use crate::models::{ApiError, FotoPerfil, ProfileStats, UsuarioRanking};
use crate::services::client::ApiClient;
use crate::services::storage::CHAVE_FOTO_PERFIL;

/// Métodos de perfil e ranking.
impl ApiClient {
    /// Estatísticas completas de um perfil
    /// (`GET /api/usuarios/{nickname}/profile-stats`).
    pub async fn profile_stats(&self, nickname: &str) -> Result<ProfileStats, ApiError> {
        self.get_data(&format!("/api/usuarios/{}/profile-stats", nickname))
            .await
    }

    /// Ranking de usuários (`GET /api/usuarios/?limit=N`).
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<UsuarioRanking>, ApiError> {
        self.get_data(&format!("/api/usuarios/?limit={}", limit))
            .await
    }

    /// Envia a foto de perfil (`POST /api/usuarios/{nickname}/upload-photo`).
    ///
    /// Único ponto em que dado binário cruza a fronteira: a imagem local é
    /// lida por completo, codificada em base64 e embutida no JSON como
    /// `photo_data` (sem multipart nem streaming).
    pub async fn upload_profile_photo(
        &self,
        nickname: &str,
        caminho: &Path,
    ) -> Result<FotoPerfil, ApiError> {
        let bytes = tokio::fs::read(caminho).await.map_err(|e| {
            tracing::error!(
                caminho = %caminho.display(),
                error = %e,
                "Failed to read profile photo"
            );
            ApiError::Network(format!("falha ao ler a imagem local: {}", e))
        })?;

        let photo_data = BASE64.encode(&bytes);
        tracing::debug!(
            nickname = %nickname,
            bytes = %bytes.len(),
            "Uploading profile photo"
        );

        let body = json!({ "photo_data": photo_data });
        self.post_data(
            &format!("/api/usuarios/{}/upload-photo", nickname),
            Some(&body),
        )
        .await
    }

    /// Cópia local da foto de perfil, quando sincronizada.
    pub async fn foto_perfil_local(&self) -> Result<Option<String>, ApiError> {
        Ok(self.store().get(CHAVE_FOTO_PERFIL).await?)
    }

    /// Atualiza a cópia local da foto de perfil.
    ///
    /// Gravada após upload ou ao sincronizar com a URL devolvida pelo
    /// backend; é o único dado de perfil com posse local.
    pub async fn salvar_foto_perfil_local(&self, uri: &str) -> Result<(), ApiError> {
        Ok(self.store().set(CHAVE_FOTO_PERFIL, uri).await?)
    }
}
